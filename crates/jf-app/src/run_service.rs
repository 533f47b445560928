//! Cycle execution service.

use jf_cycle::{JouleCycle, mass_flow_for_power};
use jf_project::schema::CycleCase;
use std::time::Instant;
use tracing::info;

use crate::case_compile::{self, CompiledCase, OperatingPoint};
use crate::error::{AppError, AppResult};
use crate::report::CycleReport;

/// Compile and run a case in the fixed operation order.
pub fn run_case(case: &CycleCase) -> AppResult<CycleReport> {
    let compiled = case_compile::compile_case(case)?;
    run_compiled(&compiled)
}

/// State 1 → 2 → 3 → 4 on a fresh solver.
pub fn solve_states(compiled: &CompiledCase, point: &OperatingPoint) -> AppResult<JouleCycle> {
    let mut cycle = JouleCycle::new(compiled.params.clone())?;
    cycle.compute_state_1(point.p1, point.t1)?;
    cycle.compute_state_2(point.p2)?;
    cycle.compute_state_3(point.p3, point.t3)?;
    cycle.compute_state_4(point.p4)?;
    Ok(cycle)
}

/// Run a compiled case: states, regeneration, properties, mass flow, optimum.
pub fn run_compiled(compiled: &CompiledCase) -> AppResult<CycleReport> {
    let start = Instant::now();
    let mut cycle = solve_states(compiled, &compiled.point)?;
    let regeneration = cycle.compute_regeneration()?;
    let mut properties = cycle.process_properties();

    if let Some(demand) = compiled.power_demand {
        let m = mass_flow_for_power(&properties, demand.basis, demand.power_w).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "cannot size mass flow: {:?} work is zero or unavailable",
                demand.basis
            ))
        })?;
        cycle.set_mass_flow(Some(m));
        properties = properties.with_mass_flow(Some(m));
    }

    let optimum = cycle.optimal_pressure_ratio();

    info!(
        case = %compiled.name,
        states = cycle.states().len(),
        steps = cycle.steps().len(),
        eta_th = ?properties.thermal_efficiency,
        elapsed_us = start.elapsed().as_micros() as u64,
        "cycle solved"
    );

    Ok(CycleReport::from_cycle(
        &compiled.name,
        &cycle,
        properties,
        regeneration,
        optimum,
    ))
}
