//! Case loading, saving, validation and introspection.

use jf_project::schema::CycleCase;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// One-line overview of a case for listing.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub name: String,
    pub gas: String,
    pub pressure_ratio: f64,
    pub intercooled: bool,
    pub regenerated: bool,
}

/// Load and validate a case file (YAML, or JSON by extension).
pub fn load_case(path: &Path) -> AppResult<CycleCase> {
    Ok(jf_project::load_case(path)?)
}

/// Validate and save a case as YAML.
pub fn save_case(path: &Path, case: &CycleCase) -> AppResult<()> {
    Ok(jf_project::save_yaml(path, case)?)
}

/// Schema validation plus a gas-key check.
pub fn validate_case(case: &CycleCase) -> AppResult<()> {
    jf_project::validate_case(case).map_err(|e| AppError::Project(e.to_string()))?;
    jf_gas::GasSpecies::from_key(&case.gas)?;
    Ok(())
}

pub fn summarize(case: &CycleCase) -> CaseSummary {
    CaseSummary {
        name: case.name.clone(),
        gas: case.gas.clone(),
        pressure_ratio: case.compressor.outlet_pressure_bar / case.inlet.pressure_bar,
        intercooled: case.intercooling.is_some(),
        regenerated: case
            .regeneration
            .is_some_and(|r| r.effectiveness > 0.0),
    }
}
