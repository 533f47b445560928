//! Compilation of a `CycleCase` into solver input.

use jf_core::units::{Pressure, Temperature, bar, k, kw};
use jf_cycle::{
    CycleParameters, IntercoolingParams, IntermediatePressure, PowerBasis, RegenerationParams,
};
use jf_gas::{CpModel, GasSpecies};
use jf_project::schema::{
    CpModelDef, CycleCase, IntermediatePressureDef, MassFlowDef, PowerBasisDef, TemperatureDef,
};

use crate::error::{AppError, AppResult};

/// Inputs of the four principal state operations, in SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub p1: Pressure,
    pub t1: Temperature,
    pub p2: Pressure,
    pub p3: Pressure,
    pub t3: Temperature,
    pub p4: Pressure,
}

impl OperatingPoint {
    /// Same point at another overall pressure ratio p2/p1.
    ///
    /// The heater pressure keeps its ratio to the compressor outlet.
    pub fn with_pressure_ratio(&self, pressure_ratio: f64) -> Self {
        let heater_ratio = self.p3.value / self.p2.value;
        let p2 = self.p1 * pressure_ratio;
        Self {
            p2,
            p3: p2 * heater_ratio,
            ..*self
        }
    }
}

/// A requested power to size the mass flow from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerDemand {
    pub basis: PowerBasis,
    /// Power [W]
    pub power_w: f64,
}

/// Everything `run_service` needs to solve a case.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCase {
    pub name: String,
    pub params: CycleParameters,
    pub point: OperatingPoint,
    pub power_demand: Option<PowerDemand>,
}

fn required_temperature(field: &str, t: &TemperatureDef) -> AppResult<Temperature> {
    t.to_kelvin()
        .map(k)
        .ok_or_else(|| AppError::Compile(format!("{field} is missing")))
}

pub fn parse_gas(key: &str) -> AppResult<GasSpecies> {
    Ok(GasSpecies::from_key(key)?)
}

fn cp_model(def: CpModelDef) -> CpModel {
    match def {
        CpModelDef::Constant => CpModel::Constant,
        CpModelDef::Polynomial => CpModel::Polynomial,
    }
}

fn power_basis(def: PowerBasisDef) -> PowerBasis {
    match def {
        PowerBasisDef::Turbine => PowerBasis::Turbine,
        PowerBasisDef::Compressor => PowerBasis::Compressor,
        PowerBasisDef::Net => PowerBasis::Net,
    }
}

/// Compile a validated case definition into parameters and an operating point.
pub fn compile_case(case: &CycleCase) -> AppResult<CompiledCase> {
    let gas = parse_gas(&case.gas)?;

    let mut params = CycleParameters::new(gas, cp_model(case.cp_model))
        .with_efficiencies(case.compressor.efficiency, case.turbine.efficiency);

    params.regeneration = case.regeneration.map(|r| RegenerationParams {
        effectiveness: r.effectiveness,
        pinch_point_k: r.pinch_point_k,
    });

    params.intercooling = case.intercooling.map(|ic| IntercoolingParams {
        outlet_temperature_k: ic.outlet_temperature.to_kelvin(),
        intermediate_pressure: match ic.intermediate_pressure {
            IntermediatePressureDef::GeometricMean => IntermediatePressure::GeometricMean,
            IntermediatePressureDef::ArithmeticMean => IntermediatePressure::ArithmeticMean,
            IntermediatePressureDef::FirstStageRatio { ratio } => {
                IntermediatePressure::FirstStageRatio(ratio)
            }
        },
    });

    let mut power_demand = None;
    match case.mass_flow {
        Some(MassFlowDef::Direct { kg_per_s }) => params.mass_flow_kg_s = Some(kg_per_s),
        Some(MassFlowDef::FromPower { basis, power_kw }) => {
            power_demand = Some(PowerDemand {
                basis: power_basis(basis),
                power_w: kw(power_kw).value,
            });
        }
        None => {}
    }

    params
        .validate()
        .map_err(|e| AppError::Compile(e.to_string()))?;

    let point = OperatingPoint {
        p1: bar(case.inlet.pressure_bar),
        t1: required_temperature("inlet temperature", &case.inlet.temperature)?,
        p2: bar(case.compressor.outlet_pressure_bar),
        p3: bar(case.heater_pressure_bar()),
        t3: required_temperature("heater temperature", &case.heater.outlet_temperature)?,
        p4: bar(case.turbine.outlet_pressure_bar),
    };

    Ok(CompiledCase {
        name: case.name.clone(),
        params,
        point,
        power_demand,
    })
}
