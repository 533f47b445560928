//! Cycle configuration.

use crate::error::{CycleError, CycleResult};
use jf_gas::{CpModel, GasSpecies};
use serde::{Deserialize, Serialize};

/// How the intermediate pressure of two-stage compression is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "ratio")]
pub enum IntermediatePressure {
    /// p_int = √(p1·p2), equal stage ratios.
    #[default]
    GeometricMean,
    /// p_int = (p1 + p2)/2.
    ArithmeticMean,
    /// p_int = p1 · ratio.
    FirstStageRatio(f64),
}

impl IntermediatePressure {
    /// Intermediate pressure [Pa] for inlet `p1` and final outlet `p2`.
    pub fn resolve(&self, p1: f64, p2: f64) -> f64 {
        match self {
            IntermediatePressure::GeometricMean => (p1 * p2).sqrt(),
            IntermediatePressure::ArithmeticMean => p1 * 0.5 * (1.0 + p2 / p1),
            IntermediatePressure::FirstStageRatio(ratio) => p1 * ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegenerationParams {
    /// Regenerator effectiveness in [0,1]
    pub effectiveness: f64,
    /// Minimum hot/cold temperature difference [K]
    #[serde(default)]
    pub pinch_point_k: Option<f64>,
}

impl RegenerationParams {
    pub fn pinch_point(&self) -> f64 {
        self.pinch_point_k.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntercoolingParams {
    /// Intercooler outlet temperature [K]; `None` cools back to T1.
    #[serde(default)]
    pub outlet_temperature_k: Option<f64>,
    #[serde(default)]
    pub intermediate_pressure: IntermediatePressure,
}

/// Configuration of one cycle calculation, fixed before solving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleParameters {
    pub gas: GasSpecies,
    #[serde(default)]
    pub cp_model: CpModel,
    pub compressor_efficiency: f64,
    pub turbine_efficiency: f64,
    #[serde(default)]
    pub regeneration: Option<RegenerationParams>,
    #[serde(default)]
    pub intercooling: Option<IntercoolingParams>,
    #[serde(default)]
    pub mass_flow_kg_s: Option<f64>,
}

impl Default for CycleParameters {
    fn default() -> Self {
        Self {
            gas: GasSpecies::Air,
            cp_model: CpModel::Constant,
            compressor_efficiency: 1.0,
            turbine_efficiency: 1.0,
            regeneration: None,
            intercooling: None,
            mass_flow_kg_s: None,
        }
    }
}

impl CycleParameters {
    pub fn new(gas: GasSpecies, cp_model: CpModel) -> Self {
        Self {
            gas,
            cp_model,
            ..Self::default()
        }
    }

    pub fn with_efficiencies(mut self, compressor: f64, turbine: f64) -> Self {
        self.compressor_efficiency = compressor;
        self.turbine_efficiency = turbine;
        self
    }

    pub fn with_regeneration(mut self, effectiveness: f64, pinch_point_k: Option<f64>) -> Self {
        self.regeneration = Some(RegenerationParams {
            effectiveness,
            pinch_point_k,
        });
        self
    }

    pub fn with_intercooling(mut self, intercooling: IntercoolingParams) -> Self {
        self.intercooling = Some(intercooling);
        self
    }

    pub fn with_mass_flow(mut self, mass_flow_kg_s: f64) -> Self {
        self.mass_flow_kg_s = Some(mass_flow_kg_s);
        self
    }

    /// Range checks on the configuration.
    ///
    /// State inputs (p, T) are not checked; degenerate values propagate as
    /// NaN/Inf through the results.
    pub fn validate(&self) -> CycleResult<()> {
        if !(self.compressor_efficiency > 0.0 && self.compressor_efficiency <= 1.0) {
            return Err(CycleError::InvalidParameter {
                what: "compressor efficiency must be in (0,1]",
            });
        }
        if !(self.turbine_efficiency > 0.0 && self.turbine_efficiency <= 1.0) {
            return Err(CycleError::InvalidParameter {
                what: "turbine efficiency must be in (0,1]",
            });
        }
        if let Some(regen) = &self.regeneration {
            if !(0.0..=1.0).contains(&regen.effectiveness) {
                return Err(CycleError::InvalidParameter {
                    what: "regenerator effectiveness must be in [0,1]",
                });
            }
            if regen.pinch_point_k.is_some_and(|dt| !(dt >= 0.0)) {
                return Err(CycleError::InvalidParameter {
                    what: "pinch point must be non-negative",
                });
            }
        }
        if let Some(ic) = &self.intercooling
            && let IntermediatePressure::FirstStageRatio(ratio) = ic.intermediate_pressure
            && !(ratio > 0.0)
        {
            return Err(CycleError::InvalidParameter {
                what: "first-stage pressure ratio must be positive",
            });
        }
        if self.mass_flow_kg_s.is_some_and(|m| !(m >= 0.0)) {
            return Err(CycleError::InvalidParameter {
                what: "mass flow must be non-negative",
            });
        }
        Ok(())
    }
}
