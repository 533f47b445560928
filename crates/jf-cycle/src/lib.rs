//! jf-cycle: closed Joule (Brayton) cycle solver.
//!
//! Provides:
//! - `JouleCycle`: ordered state propagation 1 → 2 (± intercooling) → 3 → 4 → regeneration
//! - Process property aggregation (work, heat, efficiency, mean temperatures)
//! - Optimal pressure ratio
//! - Step/trace recording of every computed quantity
//!
//! # Example
//!
//! ```
//! use jf_core::units::{bar, k};
//! use jf_cycle::{CycleParameters, JouleCycle};
//!
//! let params = CycleParameters::default().with_efficiencies(0.85, 0.9);
//! let mut cycle = JouleCycle::new(params).unwrap();
//! cycle.compute_state_1(bar(1.0), k(293.15)).unwrap();
//! cycle.compute_state_2(bar(8.0)).unwrap();
//! cycle.compute_state_3(bar(8.0), k(1273.15)).unwrap();
//! cycle.compute_state_4(bar(1.0)).unwrap();
//! let props = cycle.process_properties();
//! assert!(props.thermal_efficiency.unwrap() > 0.3);
//! ```

pub mod error;
pub mod label;
pub mod params;
pub mod process;
pub mod properties;
pub mod regeneration;
pub mod solver;
pub mod state;
pub mod trace;

pub use error::{CycleError, CycleResult};
pub use label::StateLabel;
pub use params::{CycleParameters, IntercoolingParams, IntermediatePressure, RegenerationParams};
pub use properties::{
    OptimalPressureRatio, PowerBasis, PowerRates, ProcessProperties, mass_flow_for_power,
};
pub use regeneration::RegenerationOutcome;
pub use solver::JouleCycle;
pub use state::{StateTable, ThermoState};
pub use trace::{CalculationStep, StepCategory, StepLog};
