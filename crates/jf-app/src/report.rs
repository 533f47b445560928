//! Serializable result of one cycle calculation.

use jf_core::{kelvin_to_celsius, pascal_to_bar};
use jf_cycle::{
    CalculationStep, JouleCycle, OptimalPressureRatio, ProcessProperties, RegenerationOutcome,
    StateLabel, StepCategory,
};
use serde::Serialize;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// One row of the state table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateRow {
    pub label: StateLabel,
    pub description: &'static str,
    pub p_bar: f64,
    pub t_k: f64,
    pub t_c: f64,
    pub v_m3_per_kg: f64,
    pub h_j_per_kg: f64,
    pub s_j_per_kg_k: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: StepCategory,
    pub steps: Vec<CalculationStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub name: String,
    pub gas: String,
    pub cp_model: String,
    /// States in display order
    pub states: Vec<StateRow>,
    pub steps: Vec<CalculationStep>,
    /// Steps grouped by category, first-seen order
    pub steps_by_category: Vec<CategoryGroup>,
    pub properties: ProcessProperties,
    pub regeneration: RegenerationOutcome,
    pub optimum: OptimalPressureRatio,
    pub mass_flow_kg_s: Option<f64>,
}

impl CycleReport {
    pub fn from_cycle(
        name: &str,
        cycle: &JouleCycle,
        properties: ProcessProperties,
        regeneration: RegenerationOutcome,
        optimum: OptimalPressureRatio,
    ) -> Self {
        let states = cycle
            .states()
            .iter()
            .map(|(label, s)| StateRow {
                label,
                description: label.description(),
                p_bar: pascal_to_bar(s.p()),
                t_k: s.t(),
                t_c: kelvin_to_celsius(s.t()),
                v_m3_per_kg: s.v(),
                h_j_per_kg: s.h(),
                s_j_per_kg_k: s.s(),
            })
            .collect();

        let steps_by_category = cycle
            .steps_by_category()
            .into_iter()
            .map(|(category, steps)| CategoryGroup {
                category,
                steps: steps.into_iter().cloned().collect(),
            })
            .collect();

        Self {
            name: name.to_string(),
            gas: cycle.gas().species().display_name().to_string(),
            cp_model: cycle.gas().model().label().to_string(),
            states,
            steps: cycle.steps().as_slice().to_vec(),
            steps_by_category,
            mass_flow_kg_s: properties.mass_flow,
            properties,
            regeneration,
            optimum,
        }
    }

    pub fn state(&self, label: StateLabel) -> Option<&StateRow> {
        self.states.iter().find(|row| row.label == label)
    }

    /// Steps of one category, empty if the category never appeared.
    pub fn category(&self, category: StepCategory) -> &[CalculationStep] {
        self.steps_by_category
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.steps.as_slice())
            .unwrap_or(&[])
    }
}

/// Export a report as pretty JSON.
pub fn write_report_json(path: &Path, report: &CycleReport) -> AppResult<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content).map_err(|e| AppError::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
