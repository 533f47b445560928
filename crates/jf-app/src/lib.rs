//! Shared application service layer for jouleflow.
//!
//! This crate sits between case files and the cycle solver. It compiles a
//! `CycleCase` into solver input and runs the fixed operation sequence.
//! It also builds serializable reports and evaluates pressure-ratio sweeps.

pub mod case_compile;
pub mod case_service;
pub mod error;
pub mod report;
pub mod run_service;
pub mod sweep;

pub use case_compile::{CompiledCase, OperatingPoint, PowerDemand, compile_case, parse_gas};
pub use case_service::{CaseSummary, load_case, save_case, summarize, validate_case};
pub use error::{AppError, AppResult};
pub use report::{CategoryGroup, CycleReport, StateRow, write_report_json};
pub use run_service::{run_case, run_compiled, solve_states};
pub use sweep::{
    SweepDefinition, SweepPoint, SweepType, SweepValues, best_point, sweep_pressure_ratio,
};
