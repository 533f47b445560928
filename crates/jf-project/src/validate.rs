//! Case validation logic.

use crate::schema::{CycleCase, IntermediatePressureDef, MassFlowDef, TemperatureDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing value: {field}")]
    Missing { field: String },

    #[error("Conflicting values: {field} given both in K and °C")]
    Conflict { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn fraction(field: &str, value: f64, allow_zero: bool) -> Result<(), ValidationError> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if lower_ok && value <= 1.0 {
        Ok(())
    } else {
        let range = if allow_zero { "[0,1]" } else { "(0,1]" };
        Err(invalid(field, value, &format!("must be in {range}")))
    }
}

fn temperature(field: &str, t: &TemperatureDef, required: bool) -> Result<(), ValidationError> {
    if t.temperature_k.is_some() && t.temperature_c.is_some() {
        return Err(ValidationError::Conflict {
            field: field.to_string(),
        });
    }
    match t.to_kelvin() {
        Some(k) => positive(field, k),
        None if required => Err(ValidationError::Missing {
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_case(case: &CycleCase) -> Result<(), ValidationError> {
    if case.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }
    if case.name.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "name".to_string(),
        });
    }
    if case.gas.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "gas".to_string(),
        });
    }

    positive("inlet.pressure_bar", case.inlet.pressure_bar)?;
    temperature("inlet.temperature", &case.inlet.temperature, true)?;

    positive("compressor.outlet_pressure_bar", case.compressor.outlet_pressure_bar)?;
    fraction("compressor.efficiency", case.compressor.efficiency, false)?;

    temperature("heater.temperature", &case.heater.outlet_temperature, true)?;
    if let Some(p) = case.heater.pressure_bar {
        positive("heater.pressure_bar", p)?;
    }

    positive("turbine.outlet_pressure_bar", case.turbine.outlet_pressure_bar)?;
    fraction("turbine.efficiency", case.turbine.efficiency, false)?;

    if let Some(regen) = &case.regeneration {
        fraction("regeneration.effectiveness", regen.effectiveness, true)?;
        if let Some(pinch) = regen.pinch_point_k
            && !(pinch >= 0.0)
        {
            return Err(invalid(
                "regeneration.pinch_point_k",
                pinch,
                "must be non-negative",
            ));
        }
    }

    if let Some(ic) = &case.intercooling {
        temperature("intercooling.temperature", &ic.outlet_temperature, false)?;
        if let IntermediatePressureDef::FirstStageRatio { ratio } = ic.intermediate_pressure {
            positive("intercooling.intermediate_pressure.ratio", ratio)?;
        }
    }

    match case.mass_flow {
        Some(MassFlowDef::Direct { kg_per_s }) if !(kg_per_s >= 0.0) => {
            return Err(invalid("mass_flow.kg_per_s", kg_per_s, "must be non-negative"));
        }
        Some(MassFlowDef::FromPower { power_kw, .. }) => positive("mass_flow.power_kw", power_kw)?,
        _ => {}
    }

    Ok(())
}
