//! jf-gas: ideal-gas property data for jouleflow.
//!
//! Provides:
//! - Gas species registry (air, helium, nitrogen, carbon dioxide)
//! - Static per-species data (R, molar mass, constant cp/κ, cp(T) polynomial)
//! - `IdealGas`: cp, mean cp, cv, κ, mean κ and specific volume under a chosen cp model
//! - Material property packs for tabulation
//!
//! # Example
//!
//! ```
//! use jf_gas::{CpModel, GasSpecies, IdealGas};
//!
//! let air = IdealGas::new(GasSpecies::Air, CpModel::Polynomial);
//! let cp = air.cp(500.0);
//! let v = air.specific_volume(1e5, 293.15);
//! assert!(cp > 1000.0 && v > 0.8);
//! ```

pub mod error;
pub mod model;
pub mod species;

// Re-exports for ergonomics
pub use error::{GasError, GasResult};
pub use model::{CpModel, GasPropertyPack, IdealGas};
pub use species::{GasData, GasSpecies};
