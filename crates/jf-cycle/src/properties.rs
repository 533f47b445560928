//! Process property aggregation.
//!
//! ## Sign conventions
//!
//! - Compressor work is NEGATIVE (work supplied to the gas): `w_c = h1 - h2`
//! - Turbine work is POSITIVE (work delivered): `w_t = h3 - h4`
//! - Net work `w_KP = w_c + w_t`
//! - Heat added `q_in` and heat rejected `q_out` are both reported POSITIVE

use crate::label::StateLabel;
use crate::params::CycleParameters;
use crate::state::{StateTable, ThermoState};
use crate::trace::{CalculationStep, StepCategory, Traced};
use jf_core::log_mean;
use jf_gas::IdealGas;
use serde::{Deserialize, Serialize};

const CAT: StepCategory = StepCategory::General;
const J_KG: &str = "J/kg";

/// Cycle-level scalars. A field is `None` when its input states are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessProperties {
    /// Compressor specific work [J/kg], negative
    pub w_compressor: Option<f64>,
    /// First intercooled stage [J/kg]
    pub w_compressor_stage1: Option<f64>,
    /// Second intercooled stage [J/kg]
    pub w_compressor_stage2: Option<f64>,
    /// Turbine specific work [J/kg]
    pub w_turbine: Option<f64>,
    /// Net specific cycle work w_KP [J/kg]
    pub w_net: Option<f64>,
    /// Heat added [J/kg]
    pub q_in: Option<f64>,
    /// Heat rejected [J/kg]
    pub q_out: Option<f64>,
    /// Intercooler duty [J/kg]
    pub q_intercool: Option<f64>,
    /// Regenerator duty [J/kg]
    pub q_regen: Option<f64>,
    /// Thermal efficiency w_KP/q_in
    pub thermal_efficiency: Option<f64>,
    /// Log-mean temperature of heat addition [K]
    pub t_mean_in: Option<f64>,
    /// Log-mean temperature of heat rejection [K]
    pub t_mean_out: Option<f64>,
    /// π = p2/p1
    pub pressure_ratio: Option<f64>,
    /// τ = T3/T1
    pub temperature_ratio: Option<f64>,
    /// Mass flow the rates were computed with [kg/s]
    pub mass_flow: Option<f64>,
    /// Absolute rates, present when a mass flow is configured
    pub rates: Option<PowerRates>,
}

/// Specific quantities multiplied by the mass flow [W].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PowerRates {
    pub p_compressor: Option<f64>,
    pub p_compressor_stage1: Option<f64>,
    pub p_compressor_stage2: Option<f64>,
    pub p_turbine: Option<f64>,
    pub p_net: Option<f64>,
    pub q_in: Option<f64>,
    pub q_out: Option<f64>,
    pub q_intercool: Option<f64>,
    pub q_regen: Option<f64>,
}

impl PowerRates {
    fn from_specific(props: &ProcessProperties, m: f64) -> Self {
        let scale = |v: Option<f64>| v.map(|x| x * m);
        Self {
            p_compressor: scale(props.w_compressor),
            p_compressor_stage1: scale(props.w_compressor_stage1),
            p_compressor_stage2: scale(props.w_compressor_stage2),
            p_turbine: scale(props.w_turbine),
            p_net: scale(props.w_net),
            q_in: scale(props.q_in),
            q_out: scale(props.q_out),
            q_intercool: scale(props.q_intercool),
            q_regen: scale(props.q_regen),
        }
    }
}

impl ProcessProperties {
    /// Recompute the absolute rates for a new mass flow.
    pub fn with_mass_flow(mut self, mass_flow: Option<f64>) -> Self {
        self.mass_flow = mass_flow;
        self.rates = mass_flow.map(|m| PowerRates::from_specific(&self, m));
        self
    }

    /// Specific work of the chosen basis [J/kg].
    pub fn work(&self, basis: PowerBasis) -> Option<f64> {
        match basis {
            PowerBasis::Turbine => self.w_turbine,
            PowerBasis::Compressor => self.w_compressor,
            PowerBasis::Net => self.w_net,
        }
    }
}

/// Which power a requested power figure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerBasis {
    Turbine,
    Compressor,
    #[default]
    Net,
}

/// Mass flow [kg/s] delivering `power_w` on the given basis.
///
/// Uses the magnitude of the specific work, so compressor power (negative
/// work) still yields a positive flow. `None` if the work is absent or zero.
pub fn mass_flow_for_power(props: &ProcessProperties, basis: PowerBasis, power_w: f64) -> Option<f64> {
    match props.work(basis) {
        Some(w) if w != 0.0 => Some(power_w / w.abs()),
        _ => None,
    }
}

fn enthalpy_difference(
    steps: &mut Vec<CalculationStep>,
    title: &str,
    symbol: &str,
    (la, a): (StateLabel, &ThermoState),
    (lb, b): (StateLabel, &ThermoState),
) -> f64 {
    let value = a.h() - b.h();
    steps.push(
        CalculationStep::new(CAT, title)
            .formula(format!("{symbol} = h_{la} - h_{lb}"))
            .calculation(format!("{symbol} = {:.2} J/kg - {:.2} J/kg", a.h(), b.h()))
            .result(value, J_KG),
    );
    value
}

fn mean_temperature(
    steps: &mut Vec<CalculationStep>,
    title: &str,
    symbol: &str,
    (la, a): (StateLabel, &ThermoState),
    (lb, b): (StateLabel, &ThermoState),
) -> f64 {
    let value = log_mean(a.t(), b.t());
    steps.push(
        CalculationStep::new(CAT, title)
            .formula(format!("{symbol} = (T_{la} - T_{lb})/ln(T_{la}/T_{lb})"))
            .calculation(format!(
                "{symbol} = ({0:.2} - {1:.2})/ln({0:.2}/{1:.2})",
                a.t(),
                b.t()
            ))
            .result(value, "K"),
    );
    value
}

/// Derive the cycle scalars from a state table.
pub fn aggregate(states: &StateTable, params: &CycleParameters) -> Traced<ProcessProperties> {
    use StateLabel::*;

    let mut steps = Vec::new();
    let mut props = ProcessProperties::default();
    let get = |label: StateLabel| states.get(label).map(|s| (label, s));

    let s1 = get(Inlet1);
    let s2 = get(Outlet2);
    let s3 = get(Inlet3);
    let s4 = get(Outlet4);
    let regen = params.regeneration.is_some()
        && states.contains(Regenerated2Star)
        && states.contains(Regenerated4Star);
    let s2_star = get(Regenerated2Star).filter(|_| regen);
    let s4_star = get(Regenerated4Star).filter(|_| regen);

    // Compressor
    if let (Some(s1), Some(s2a), Some(s2b), Some(s2c)) =
        (s1, get(Stage2aReal), get(Stage2bCooled), get(Stage2cReal))
    {
        let w1 = enthalpy_difference(&mut steps, "Compressor work, first stage w_c1", "w_c1", s1, s2a);
        let w2 = enthalpy_difference(&mut steps, "Compressor work, second stage w_c2", "w_c2", s2b, s2c);
        let w = w1 + w2;
        steps.push(
            CalculationStep::new(CAT, "Total compressor work w_c")
                .formula("w_c = w_c1 + w_c2")
                .calculation(format!("w_c = {w1:.2} J/kg + {w2:.2} J/kg"))
                .result(w, J_KG),
        );
        props.w_compressor_stage1 = Some(w1);
        props.w_compressor_stage2 = Some(w2);
        props.w_compressor = Some(w);
        props.q_intercool = Some(enthalpy_difference(
            &mut steps,
            "Heat rejected in intercooler q_intercool",
            "q_intercool",
            s2a,
            s2b,
        ));
    } else if let (Some(s1), Some(s2)) = (s1, s2) {
        props.w_compressor = Some(enthalpy_difference(&mut steps, "Compressor work w_c", "w_c", s1, s2));
    }

    if let (Some(s3), Some(s4)) = (s3, s4) {
        props.w_turbine = Some(enthalpy_difference(&mut steps, "Turbine work w_t", "w_t", s3, s4));
    }

    if let (Some(wc), Some(wt)) = (props.w_compressor, props.w_turbine) {
        let w_net = wc + wt;
        steps.push(
            CalculationStep::new(CAT, "Net cycle work w_KP")
                .formula("w_KP = w_c + w_t")
                .calculation(format!("w_KP = {wc:.2} J/kg + {wt:.2} J/kg"))
                .result(w_net, J_KG),
        );
        props.w_net = Some(w_net);
    }

    // Heat addition starts from 2* when the regenerator preheats the gas.
    let heat_start = s2_star.or(s2);
    if let (Some(s3), Some(start)) = (s3, heat_start) {
        props.q_in = Some(enthalpy_difference(&mut steps, "Heat added q_in", "q_in", s3, start));
        props.t_mean_in = Some(mean_temperature(
            &mut steps,
            "Mean temperature of heat addition T_m,in",
            "T_m,in",
            s3,
            start,
        ));
    }

    let heat_end = s4_star.or(s4);
    if let (Some(end), Some(s1)) = (heat_end, s1) {
        props.q_out = Some(enthalpy_difference(&mut steps, "Heat rejected q_out", "q_out", end, s1));
        props.t_mean_out = Some(mean_temperature(
            &mut steps,
            "Mean temperature of heat rejection T_m,out",
            "T_m,out",
            end,
            s1,
        ));
    }

    if let (Some(w_net), Some(q_in)) = (props.w_net, props.q_in) {
        let eta = w_net / q_in;
        steps.push(
            CalculationStep::new(CAT, "Thermal efficiency η_th")
                .formula("η_th = w_KP/q_in")
                .calculation(format!("η_th = {w_net:.2} J/kg / {q_in:.2} J/kg"))
                .result(eta, "-"),
        );
        props.thermal_efficiency = Some(eta);
    }

    if let (Some(s2_star), Some(s2)) = (s2_star, s2) {
        props.q_regen = Some(enthalpy_difference(
            &mut steps,
            "Heat transferred in regenerator q_reg",
            "q_reg",
            s2_star,
            s2,
        ));
    }

    if let (Some((_, s1)), Some((_, s2))) = (s1, s2) {
        props.pressure_ratio = Some(s2.p() / s1.p());
    }
    if let (Some((_, s1)), Some((_, s3))) = (s1, s3) {
        props.temperature_ratio = Some(s3.t() / s1.t());
    }

    let props = props.with_mass_flow(params.mass_flow_kg_s);
    Traced::new(props, steps)
}

/// Pressure ratio of maximum net work for the given inlet temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OptimalPressureRatio {
    Determined {
        pi_opt: f64,
        /// Compressor outlet temperature at `pi_opt` [K]
        t2_opt: f64,
        kappa: f64,
    },
    /// State 1 or state 3 is missing.
    Undetermined,
}

/// π_opt = (T3/T1)^(κ/(2(κ-1))) and the isentropic T2 it leads to.
///
/// With cp(T) κ is the mean over (T1, T3) and T2 uses a mean κ over the
/// estimated compression span.
pub fn optimal_pressure_ratio(gas: &IdealGas, t1: f64, t3: f64) -> Traced<OptimalPressureRatio> {
    let constant = gas.model().is_constant();
    let kappa = if constant {
        gas.kappa_const()
    } else {
        gas.kappa_mean(t1, t3)
    };
    let pi_opt = (t3 / t1).powf(kappa / (2.0 * (kappa - 1.0)));
    let kappa_12 = if constant {
        kappa
    } else {
        gas.kappa_mean(t1, t1 * pi_opt.powf(0.3))
    };
    let t2_opt = t1 * pi_opt.powf((kappa_12 - 1.0) / kappa_12);

    let steps = vec![
        CalculationStep::new(CAT, "Optimal pressure ratio π_opt")
            .formula("π_opt = (T_3/T_1)^(κ/(2·(κ-1)))")
            .calculation(format!(
                "π_opt = ({t3:.2}/{t1:.2})^({kappa:.4}/(2·({kappa:.4}-1)))"
            ))
            .result(pi_opt, "-"),
        CalculationStep::new(CAT, "Optimal temperature T_2")
            .formula("T_2,opt = T_1·π_opt^((κ-1)/κ)")
            .calculation(format!(
                "T_2,opt = {t1:.2} K · {pi_opt:.4}^(({kappa_12:.4}-1)/{kappa_12:.4})"
            ))
            .result(t2_opt, "K"),
    ];
    Traced::new(
        OptimalPressureRatio::Determined {
            pi_opt,
            t2_opt,
            kappa,
        },
        steps,
    )
}
