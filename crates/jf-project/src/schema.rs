//! Case schema definitions.
//!
//! Pressures are in bar and temperatures in K (or °C via the `*_c` field);
//! conversion to SI happens when a case is compiled into solver input.

use jf_core::celsius_to_kelvin;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleCase {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Gas key, e.g. `air`, `helium`, `nitrogen`, `carbon_dioxide`
    pub gas: String,
    #[serde(default)]
    pub cp_model: CpModelDef,
    pub inlet: InletDef,
    pub compressor: MachineDef,
    pub heater: HeaterDef,
    pub turbine: MachineDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regeneration: Option<RegenerationDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercooling: Option<IntercoolingDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_flow: Option<MassFlowDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CpModelDef {
    #[default]
    Constant,
    Polynomial,
}

/// A temperature given either in K or in °C.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TemperatureDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

impl TemperatureDef {
    pub fn kelvin(k: f64) -> Self {
        Self {
            temperature_k: Some(k),
            temperature_c: None,
        }
    }

    pub fn celsius(c: f64) -> Self {
        Self {
            temperature_k: None,
            temperature_c: Some(c),
        }
    }

    /// Temperature in K; the K field wins if both are given.
    pub fn to_kelvin(&self) -> Option<f64> {
        self.temperature_k
            .or(self.temperature_c.map(celsius_to_kelvin))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InletDef {
    pub pressure_bar: f64,
    #[serde(flatten)]
    pub temperature: TemperatureDef,
}

/// Compressor or turbine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MachineDef {
    pub outlet_pressure_bar: f64,
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
}

fn default_efficiency() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HeaterDef {
    #[serde(flatten)]
    pub outlet_temperature: TemperatureDef,
    /// Turbine inlet pressure; defaults to the compressor outlet pressure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_bar: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RegenerationDef {
    pub effectiveness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinch_point_k: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct IntercoolingDef {
    /// Intercooler outlet; empty means cooling back to the inlet temperature
    #[serde(flatten)]
    pub outlet_temperature: TemperatureDef,
    #[serde(default)]
    pub intermediate_pressure: IntermediatePressureDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntermediatePressureDef {
    #[default]
    GeometricMean,
    ArithmeticMean,
    FirstStageRatio {
        ratio: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MassFlowDef {
    /// Fixed mass flow
    Direct { kg_per_s: f64 },
    /// Mass flow sized to deliver a power on the given basis
    FromPower { basis: PowerBasisDef, power_kw: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PowerBasisDef {
    Turbine,
    Compressor,
    #[default]
    Net,
}

impl CycleCase {
    /// Minimal air case at 1 bar/20 °C compressed to `pressure_ratio`, heated to `t3_k`.
    pub fn simple(name: &str, pressure_ratio: f64, t3_k: f64) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: name.to_string(),
            description: None,
            gas: "air".to_string(),
            cp_model: CpModelDef::Constant,
            inlet: InletDef {
                pressure_bar: 1.0,
                temperature: TemperatureDef::celsius(20.0),
            },
            compressor: MachineDef {
                outlet_pressure_bar: pressure_ratio,
                efficiency: 1.0,
            },
            heater: HeaterDef {
                outlet_temperature: TemperatureDef::kelvin(t3_k),
                pressure_bar: None,
            },
            turbine: MachineDef {
                outlet_pressure_bar: 1.0,
                efficiency: 1.0,
            },
            regeneration: None,
            intercooling: None,
            mass_flow: None,
        }
    }

    /// Turbine inlet pressure [bar].
    pub fn heater_pressure_bar(&self) -> f64 {
        self.heater
            .pressure_bar
            .unwrap_or(self.compressor.outlet_pressure_bar)
    }
}
