//! jf-core: stable foundation for jouleflow.
//!
//! Contains:
//! - units (uom SI types, constructors, °C/bar conversions)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{JfError, JfResult};
pub use numeric::*;
pub use units::*;
