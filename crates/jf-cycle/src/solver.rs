//! Stateful Joule cycle solver.
//!
//! One `JouleCycle` is one calculation: it owns the state table and the step
//! log, and its operations must be called in dependency order
//! (1 → 2 → 3 → 4 → regeneration). An operation called before its
//! predecessor exists fails with `MissingPrerequisite` and leaves the table
//! untouched.

use crate::error::CycleResult;
use crate::label::StateLabel;
use crate::params::{CycleParameters, IntercoolingParams};
use crate::process::{self, LegLabels, MachineKind};
use crate::properties::{self, OptimalPressureRatio, ProcessProperties};
use crate::regeneration::{RegenerationOutcome, regenerator_temperatures};
use crate::state::{StateTable, ThermoState};
use crate::trace::{CalculationStep, StepCategory, StepLog, Traced};
use jf_core::units::{Pressure, Temperature};
use jf_gas::IdealGas;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct JouleCycle {
    gas: IdealGas,
    params: CycleParameters,
    states: StateTable,
    log: StepLog,
}

impl JouleCycle {
    /// Validate the parameters and start an empty calculation.
    pub fn new(params: CycleParameters) -> CycleResult<Self> {
        params.validate()?;
        let gas = IdealGas::new(params.gas, params.cp_model);
        let mut cycle = Self {
            gas,
            params,
            states: StateTable::new(),
            log: StepLog::new(),
        };
        cycle.record_parameters();
        Ok(cycle)
    }

    fn record_parameters(&mut self) {
        let p = &self.params;
        let mut text = format!(
            "Gas: {}, model: {}, regeneration: {}",
            self.gas.species(),
            p.cp_model.label(),
            match &p.regeneration {
                Some(r) => format!(
                    "yes (effectiveness {:.2}, pinch point {:.2} K)",
                    r.effectiveness,
                    r.pinch_point()
                ),
                None => "no".to_string(),
            }
        );
        text.push_str(&format!(
            ", compressor efficiency: {:.2}, turbine efficiency: {:.2}",
            p.compressor_efficiency, p.turbine_efficiency
        ));
        if let Some(m) = p.mass_flow_kg_s {
            text.push_str(&format!(", mass flow: {m:.4} kg/s"));
        }
        let mut step = CalculationStep::new(StepCategory::General, "Cycle parameters").calculation(text);
        if self.gas.model().is_constant() {
            step.formula = Some(format!(
                "cp = {:.1} J/(kg·K), cv = {:.1} J/(kg·K), κ = {:.3}, R = {:.3} J/(kg·K)",
                self.gas.cp_const(),
                self.gas.cv_const(),
                self.gas.kappa_const(),
                self.gas.r()
            ));
        }
        self.log.push(step);

        if let Some(ic) = &p.intercooling {
            let target = match ic.outlet_temperature_k {
                Some(t) => format!("outlet temperature {t:.2} K"),
                None => "cooling back to inlet temperature".to_string(),
            };
            self.log.push(
                CalculationStep::new(StepCategory::Intercooling, "Intercooling parameters")
                    .calculation(format!(
                        "Intercooling active, {target}, intermediate pressure: {:?}",
                        ic.intermediate_pressure
                    )),
            );
        }
    }

    fn apply<T>(&mut self, traced: Traced<T>) -> T {
        self.log.extend(traced.steps);
        traced.value
    }

    fn insert(&mut self, label: StateLabel, state: ThermoState) {
        debug!(
            state = %label,
            p_pa = state.p(),
            t_k = state.t(),
            h = state.h(),
            s = state.s(),
            "state computed"
        );
        if !self.gas.in_valid_range(state.t()) {
            debug!(state = %label, t_k = state.t(), "temperature outside cp validity range");
        }
        self.states.insert(label, state);
    }

    /// Compressor inlet from (p1, T1); anchors h and s at zero.
    pub fn compute_state_1(&mut self, p1: Pressure, t1: Temperature) -> CycleResult<()> {
        let state = self.apply(process::inlet_state(&self.gas, p1.value, t1.value));
        self.insert(StateLabel::Inlet1, state);
        Ok(())
    }

    /// Compressor outlet at `p2`, single stage or intercooled two-stage.
    pub fn compute_state_2(&mut self, p2: Pressure) -> CycleResult<()> {
        let s1 = self.states.require(StateLabel::Inlet1, "compute_state_2")?;
        match self.params.intercooling {
            Some(ic) => self.compress_intercooled(&s1, p2.value, ic),
            None => {
                let leg = self.apply(process::machine_leg(
                    MachineKind::Compressor,
                    &self.gas,
                    &s1,
                    p2.value,
                    self.params.compressor_efficiency,
                    LegLabels {
                        inlet: StateLabel::Inlet1,
                        isentropic: StateLabel::Outlet2Isentropic,
                        outlet: StateLabel::Outlet2,
                        category: StepCategory::State2,
                    },
                ));
                self.insert(StateLabel::Outlet2Isentropic, leg.isentropic);
                self.insert(StateLabel::Outlet2, leg.real);
            }
        }
        Ok(())
    }

    fn compress_intercooled(&mut self, s1: &ThermoState, p2: f64, ic: IntercoolingParams) {
        let p1 = s1.p();
        let p_int = ic.intermediate_pressure.resolve(p1, p2);
        self.log.push(
            CalculationStep::new(StepCategory::Intercooling, "Intermediate pressure p_2a")
                .calculation(format!(
                    "{:?}: p_2a = {:.4} bar, stage ratios {:.4} and {:.4}",
                    ic.intermediate_pressure,
                    jf_core::pascal_to_bar(p_int),
                    p_int / p1,
                    p2 / p_int
                ))
                .result(p_int, "Pa"),
        );

        let eta = self.params.compressor_efficiency;
        let first = self.apply(process::machine_leg(
            MachineKind::Compressor,
            &self.gas,
            s1,
            p_int,
            eta,
            LegLabels {
                inlet: StateLabel::Inlet1,
                isentropic: StateLabel::Stage2aIsentropic,
                outlet: StateLabel::Stage2aReal,
                category: StepCategory::State2a,
            },
        ));
        self.insert(StateLabel::Stage2aIsentropic, first.isentropic);
        self.insert(StateLabel::Stage2aReal, first.real);

        let t_cooled = ic.outlet_temperature_k.unwrap_or(s1.t());
        let cooled = self.apply(process::heat_exchange(
            &self.gas,
            &first.real,
            StateLabel::Stage2aReal,
            StateLabel::Stage2bCooled,
            p_int,
            t_cooled,
            StepCategory::State2b,
        ));
        self.insert(StateLabel::Stage2bCooled, cooled);

        let second = self.apply(process::machine_leg(
            MachineKind::Compressor,
            &self.gas,
            &cooled,
            p2,
            eta,
            LegLabels {
                inlet: StateLabel::Stage2bCooled,
                isentropic: StateLabel::Stage2cIsentropic,
                outlet: StateLabel::Stage2cReal,
                category: StepCategory::State2c,
            },
        ));
        self.insert(StateLabel::Stage2cIsentropic, second.isentropic);
        self.insert(StateLabel::Stage2cReal, second.real);
        self.log.push(
            CalculationStep::new(StepCategory::State2c, "State 2")
                .calculation("state 2c is the compressor outlet, state 2 = state 2c"),
        );
        self.insert(StateLabel::Outlet2, second.real);
    }

    /// Turbine inlet at (p3, T3), heat added from state 2.
    pub fn compute_state_3(&mut self, p3: Pressure, t3: Temperature) -> CycleResult<()> {
        let s2 = self.states.require(StateLabel::Outlet2, "compute_state_3")?;
        let state = self.apply(process::heat_exchange(
            &self.gas,
            &s2,
            StateLabel::Outlet2,
            StateLabel::Inlet3,
            p3.value,
            t3.value,
            StepCategory::State3,
        ));
        self.insert(StateLabel::Inlet3, state);
        Ok(())
    }

    /// Turbine outlet at `p4`.
    pub fn compute_state_4(&mut self, p4: Pressure) -> CycleResult<()> {
        let s3 = self.states.require(StateLabel::Inlet3, "compute_state_4")?;
        let leg = self.apply(process::machine_leg(
            MachineKind::Turbine,
            &self.gas,
            &s3,
            p4.value,
            self.params.turbine_efficiency,
            LegLabels {
                inlet: StateLabel::Inlet3,
                isentropic: StateLabel::Outlet4Isentropic,
                outlet: StateLabel::Outlet4,
                category: StepCategory::State4,
            },
        ));
        self.insert(StateLabel::Outlet4Isentropic, leg.isentropic);
        self.insert(StateLabel::Outlet4, leg.real);
        Ok(())
    }

    /// Regenerative preheat of state 2 by the turbine exhaust.
    ///
    /// Infeasibility is reported in the outcome and the log; it is not an error.
    pub fn compute_regeneration(&mut self) -> CycleResult<RegenerationOutcome> {
        let Some(regen) = self.params.regeneration.filter(|r| r.effectiveness > 0.0) else {
            return Ok(RegenerationOutcome::Disabled);
        };
        let s2 = self.states.require(StateLabel::Outlet2, "compute_regeneration")?;
        let s4 = self.states.require(StateLabel::Outlet4, "compute_regeneration")?;
        let cat = StepCategory::Regeneration;
        let pinch = regen.pinch_point();
        let (t2, t4) = (s2.t(), s4.t());

        self.log.push(
            CalculationStep::new(cat, "Regeneration")
                .calculation(format!(
                    "effectiveness ε = {:.4}, pinch point ΔT_min = {pinch:.2} K",
                    regen.effectiveness
                )),
        );
        self.log.push(
            CalculationStep::new(cat, "Feasibility check")
                .formula("T_4 > T_2 + ΔT_min")
                .calculation(format!("T_2 = {t2:.2} K, T_4 = {t4:.2} K, ΔT_min = {pinch:.2} K")),
        );

        let Some((t2_star, t4_star)) =
            regenerator_temperatures(t2, t4, regen.effectiveness, pinch)
        else {
            warn!(t2_k = t2, t4_k = t4, pinch_k = pinch, "regeneration not possible");
            self.log.push(
                CalculationStep::new(cat, "Regeneration not possible").calculation(format!(
                    "T_4 = {t4:.2} K ≤ T_2 + ΔT_min = {:.2} K",
                    t2 + pinch
                )),
            );
            return Ok(RegenerationOutcome::Infeasible {
                t2,
                t4,
                pinch_point: pinch,
            });
        };

        self.log.push(
            CalculationStep::new(cat, "Temperature T_2*")
                .formula("T_2* = min(T_2 + ε·(T_4 - T_2), T_4 - ΔT_min)")
                .calculation(format!(
                    "T_2* = min({t2:.2} K + {:.4} · ({t4:.2} K - {t2:.2} K), {:.2} K)",
                    regen.effectiveness,
                    t4 - pinch
                ))
                .result(t2_star, "K"),
        );
        self.log.push(
            CalculationStep::new(cat, "Temperature T_4*")
                .formula("T_4* = T_4 - (T_2* - T_2)")
                .calculation(format!("T_4* = {t4:.2} K - ({t2_star:.2} K - {t2:.2} K)"))
                .result(t4_star, "K"),
        );

        let s2_star = self.apply(process::heat_exchange(
            &self.gas,
            &s2,
            StateLabel::Outlet2,
            StateLabel::Regenerated2Star,
            s2.p(),
            t2_star,
            cat,
        ));
        self.insert(StateLabel::Regenerated2Star, s2_star);
        let s4_star = self.apply(process::heat_exchange(
            &self.gas,
            &s4,
            StateLabel::Outlet4,
            StateLabel::Regenerated4Star,
            s4.p(),
            t4_star,
            cat,
        ));
        self.insert(StateLabel::Regenerated4Star, s4_star);

        Ok(RegenerationOutcome::Applied { t2_star, t4_star })
    }

    /// Aggregate work, heat and efficiency from the current table.
    pub fn process_properties(&mut self) -> ProcessProperties {
        let props = self.apply(properties::aggregate(&self.states, &self.params));
        debug!(
            w_net = ?props.w_net,
            eta_th = ?props.thermal_efficiency,
            "process properties"
        );
        props
    }

    /// Optimal overall pressure ratio; `Undetermined` without states 1 and 3.
    pub fn optimal_pressure_ratio(&mut self) -> OptimalPressureRatio {
        let (Some(s1), Some(s3)) = (
            self.states.get(StateLabel::Inlet1).copied(),
            self.states.get(StateLabel::Inlet3).copied(),
        ) else {
            self.log.push(
                CalculationStep::new(StepCategory::General, "Optimal pressure ratio undetermined")
                    .calculation("states 1 and 3 are required"),
            );
            return OptimalPressureRatio::Undetermined;
        };
        self.apply(properties::optimal_pressure_ratio(&self.gas, s1.t(), s3.t()))
    }

    /// Replace the configured mass flow, e.g. after deriving it from a power demand.
    pub fn set_mass_flow(&mut self, mass_flow_kg_s: Option<f64>) {
        self.params.mass_flow_kg_s = mass_flow_kg_s;
        let text = match mass_flow_kg_s {
            Some(m) => format!("ṁ = {m:.4} kg/s"),
            None => "no mass flow".to_string(),
        };
        let mut step = CalculationStep::new(StepCategory::General, "Mass flow").calculation(text);
        if let Some(m) = mass_flow_kg_s {
            step = step.result(m, "kg/s");
        }
        self.log.push(step);
    }

    pub fn gas(&self) -> &IdealGas {
        &self.gas
    }

    pub fn params(&self) -> &CycleParameters {
        &self.params
    }

    pub fn states(&self) -> &StateTable {
        &self.states
    }

    pub fn steps(&self) -> &StepLog {
        &self.log
    }

    /// Steps grouped by category, first-seen order.
    pub fn steps_by_category(&self) -> Vec<(StepCategory, Vec<&CalculationStep>)> {
        self.log.by_category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CycleError;
    use jf_core::units::{bar, k};
    use jf_gas::{CpModel, GasSpecies};

    #[test]
    fn state_2_requires_state_1() {
        let mut cycle = JouleCycle::new(CycleParameters::default()).unwrap();
        let err = cycle.compute_state_2(bar(8.0)).unwrap_err();
        assert_eq!(
            err,
            CycleError::MissingPrerequisite {
                operation: "compute_state_2",
                required: StateLabel::Inlet1,
            }
        );
        assert!(cycle.states().is_empty());
    }

    #[test]
    fn state_3_requires_state_2() {
        let mut cycle = JouleCycle::new(CycleParameters::default()).unwrap();
        cycle.compute_state_1(bar(1.0), k(293.15)).unwrap();
        let err = cycle.compute_state_3(bar(8.0), k(1173.15)).unwrap_err();
        assert_eq!(
            err,
            CycleError::MissingPrerequisite {
                operation: "compute_state_3",
                required: StateLabel::Outlet2,
            }
        );
        assert_eq!(cycle.states().len(), 1);
        assert!(cycle.states().get(StateLabel::Inlet1).is_some());
    }

    #[test]
    fn state_4_requires_state_3() {
        let mut cycle = JouleCycle::new(CycleParameters::default()).unwrap();
        cycle.compute_state_1(bar(1.0), k(293.15)).unwrap();
        cycle.compute_state_2(bar(8.0)).unwrap();
        let before = cycle.states().clone();
        assert!(cycle.compute_state_4(bar(1.0)).is_err());
        assert_eq!(cycle.states(), &before);
    }

    #[test]
    fn invalid_parameters_rejected() {
        let params = CycleParameters::default().with_efficiencies(1.5, 0.9);
        assert!(matches!(
            JouleCycle::new(params),
            Err(CycleError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn regeneration_disabled_checks_nothing() {
        let mut cycle = JouleCycle::new(CycleParameters::default()).unwrap();
        assert_eq!(cycle.compute_regeneration().unwrap(), RegenerationOutcome::Disabled);

        let params = CycleParameters::default().with_regeneration(0.0, None);
        let mut cycle = JouleCycle::new(params).unwrap();
        assert_eq!(cycle.compute_regeneration().unwrap(), RegenerationOutcome::Disabled);
    }

    #[test]
    fn regeneration_requires_states_when_enabled() {
        let params = CycleParameters::default().with_regeneration(0.8, None);
        let mut cycle = JouleCycle::new(params).unwrap();
        assert!(matches!(
            cycle.compute_regeneration(),
            Err(CycleError::MissingPrerequisite {
                required: StateLabel::Outlet2,
                ..
            })
        ));
    }

    #[test]
    fn parameters_are_traced() {
        let params = CycleParameters::new(GasSpecies::Nitrogen, CpModel::Constant)
            .with_intercooling(IntercoolingParams::default())
            .with_mass_flow(1.5);
        let cycle = JouleCycle::new(params).unwrap();
        let groups = cycle.steps_by_category();
        assert_eq!(groups[0].0, StepCategory::General);
        assert_eq!(groups[1].0, StepCategory::Intercooling);
        let text = groups[0].1[0].calculation.as_deref().unwrap();
        assert!(text.contains("Nitrogen"));
        assert!(text.contains("1.5000 kg/s"));
    }

    #[test]
    fn optimum_undetermined_without_state_3() {
        let mut cycle = JouleCycle::new(CycleParameters::default()).unwrap();
        assert_eq!(cycle.optimal_pressure_ratio(), OptimalPressureRatio::Undetermined);
        cycle.compute_state_1(bar(1.0), k(293.15)).unwrap();
        assert_eq!(cycle.optimal_pressure_ratio(), OptimalPressureRatio::Undetermined);
    }

    #[test]
    fn set_mass_flow_updates_rates() {
        let mut cycle = JouleCycle::new(CycleParameters::default()).unwrap();
        cycle.compute_state_1(bar(1.0), k(293.15)).unwrap();
        cycle.compute_state_2(bar(8.0)).unwrap();
        cycle.set_mass_flow(Some(2.0));
        let props = cycle.process_properties();
        let rates = props.rates.unwrap();
        assert_eq!(rates.p_compressor, props.w_compressor.map(|w| w * 2.0));
    }
}
