//! Pure state-change calculations.
//!
//! Each function takes the predecessor state and returns the new state(s)
//! together with the calculation steps that explain them. Nothing here
//! touches a state table or a step log.
//!
//! ## Machine legs
//!
//! Compression and expansion share one algorithm:
//!
//! ```text
//! κ     = κ_const                          (constant cp)
//!       = κ_m(T_in, T_in·(p_out/p_in)^0.2) (cp(T), one-shot pre-estimate)
//! T_s   = T_in·(p_out/p_in)^((κ-1)/κ)
//! h_s   = h_in + cp_m(T_in, T_s)·(T_s - T_in)
//! s_s   = s_in
//! ΔT    = (T_s - T_in)/η   compressor
//!       = (T_s - T_in)·η   turbine
//! h     = h_in + cp_eff·ΔT,   cp_eff = (h_s - h_in)/(T_s - T_in)
//! Δs    = cp_m(T_in, T)·ln(T/T_in) - R·ln(p_out/p_in)
//! ```
//!
//! With cp(T) the enthalpy step uses `cp_eff` while the entropy step uses the
//! mean cp over the real temperature span, so the two differ slightly.

use crate::label::StateLabel;
use crate::state::ThermoState;
use crate::trace::{CalculationStep, StepCategory, Traced};
use jf_core::kelvin_to_celsius;
use jf_gas::IdealGas;

const K: &str = "K";
const J_KG: &str = "J/kg";
const J_KG_K: &str = "J/(kg·K)";
const M3_KG: &str = "m³/kg";

/// Direction of a machine leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineKind {
    Compressor,
    Turbine,
}

impl MachineKind {
    fn efficiency_symbol(&self) -> &'static str {
        match self {
            MachineKind::Compressor => "η_c",
            MachineKind::Turbine => "η_t",
        }
    }
}

/// Labels and trace category of one machine leg.
#[derive(Debug, Clone, Copy)]
pub struct LegLabels {
    pub inlet: StateLabel,
    pub isentropic: StateLabel,
    pub outlet: StateLabel,
    pub category: StepCategory,
}

/// Result of a compression or expansion leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineLeg {
    pub isentropic: ThermoState,
    pub real: ThermoState,
    /// κ used for the isentropic relation
    pub kappa: f64,
}

/// State 1: the reference point, h = 0 and s = 0.
pub fn inlet_state(gas: &IdealGas, p1: f64, t1: f64) -> Traced<ThermoState> {
    let cat = StepCategory::State1;
    let state = ThermoState::new(gas, p1, t1, 0.0, 0.0);
    let steps = vec![
        CalculationStep::new(cat, "State 1 (compressor inlet)").calculation(format!(
            "p_1 = {:.4} bar = {:.2} Pa, T_1 = {:.2} °C = {:.2} K",
            jf_core::pascal_to_bar(p1),
            p1,
            kelvin_to_celsius(t1),
            t1
        )),
        CalculationStep::new(cat, "Specific volume v_1")
            .formula("v_1 = R·T_1/p_1")
            .calculation(format!("v_1 = {:.3} J/(kg·K) · {t1:.2} K / {p1:.2} Pa", gas.r()))
            .result(state.v(), M3_KG),
        CalculationStep::new(cat, "Specific enthalpy h_1")
            .calculation("reference point, h_1 = 0 J/kg")
            .result(0.0, J_KG),
        CalculationStep::new(cat, "Specific entropy s_1")
            .calculation("reference point, s_1 = 0 J/(kg·K)")
            .result(0.0, J_KG_K),
    ];
    Traced::new(state, steps)
}

/// Isentropic compression or expansion followed by the efficiency correction.
pub fn machine_leg(
    kind: MachineKind,
    gas: &IdealGas,
    inlet: &ThermoState,
    p_out: f64,
    eta: f64,
    labels: LegLabels,
) -> Traced<MachineLeg> {
    let cat = labels.category;
    let (i, is, o) = (labels.inlet, labels.isentropic, labels.outlet);
    let (p_in, t_in) = (inlet.p(), inlet.t());
    let ratio = p_out / p_in;
    let constant = gas.model().is_constant();
    let mut steps = Vec::new();

    let kappa = if constant {
        gas.kappa_const()
    } else {
        gas.kappa_mean(t_in, t_in * ratio.powf(0.2))
    };
    steps.push(if constant {
        CalculationStep::new(cat, "Isentropic exponent κ")
            .calculation(format!("constant cp model, κ = {kappa:.4}"))
            .result(kappa, "-")
    } else {
        let t_est = t_in * ratio.powf(0.2);
        CalculationStep::new(cat, "Mean isentropic exponent κ")
            .formula(format!("κ = κ_m(T_{i}, T_{i}·(p_{o}/p_{i})^0.2)"))
            .calculation(format!("κ = κ_m({t_in:.2} K, {t_est:.2} K)"))
            .result(kappa, "-")
    });

    let t_s = t_in * ratio.powf((kappa - 1.0) / kappa);
    steps.push(
        CalculationStep::new(cat, format!("Isentropic temperature T_{is}"))
            .formula(format!("T_{is} = T_{i}·(p_{o}/p_{i})^((κ-1)/κ)"))
            .calculation(format!(
                "T_{is} = {t_in:.2} K · ({p_out:.2} Pa / {p_in:.2} Pa)^(({kappa:.4}-1)/{kappa:.4})"
            ))
            .result(t_s, K),
    );

    let cp_s = gas.cp_mean(t_in, t_s);
    let h_s = inlet.h() + cp_s * (t_s - t_in);
    let isentropic = ThermoState::new(gas, p_out, t_s, h_s, inlet.s());
    steps.push(volume_step(cat, is, gas, &isentropic));
    steps.push(
        CalculationStep::new(cat, format!("Specific enthalpy h_{is}"))
            .formula(format!("h_{is} = h_{i} + cp·(T_{is} - T_{i})"))
            .calculation(format!(
                "h_{is} = {:.2} J/kg + {cp_s:.2} J/(kg·K) · ({t_s:.2} K - {t_in:.2} K)",
                inlet.h()
            ))
            .result(h_s, J_KG),
    );
    steps.push(
        CalculationStep::new(cat, format!("Specific entropy s_{is}"))
            .formula(format!("s_{is} = s_{i}"))
            .calculation("isentropic change of state")
            .result(isentropic.s(), J_KG_K),
    );

    let eta_sym = kind.efficiency_symbol();
    if eta == 1.0 {
        steps.push(
            CalculationStep::new(cat, format!("State {o}"))
                .calculation(format!("{eta_sym} = 1, state {o} equals state {is}")),
        );
        steps.push(celsius_step(cat, o, t_s));
        let real = ThermoState::new(gas, p_out, t_s, h_s, inlet.s());
        return Traced::new(
            MachineLeg {
                isentropic,
                real,
                kappa,
            },
            steps,
        );
    }

    let cp_eff = if constant {
        gas.cp_const()
    } else {
        (h_s - inlet.h()) / (t_s - t_in)
    };
    if !constant {
        steps.push(
            CalculationStep::new(cat, "Effective specific heat cp_eff")
                .formula(format!("cp_eff = (h_{is} - h_{i})/(T_{is} - T_{i})"))
                .result(cp_eff, J_KG_K),
        );
    }

    let dt_s = t_s - t_in;
    let dt = match kind {
        MachineKind::Compressor => dt_s / eta,
        MachineKind::Turbine => dt_s * eta,
    };
    let t = t_in + dt;
    let dt_formula = match kind {
        MachineKind::Compressor => format!("ΔT = (T_{is} - T_{i})/{eta_sym}"),
        MachineKind::Turbine => format!("ΔT = (T_{is} - T_{i})·{eta_sym}"),
    };
    steps.push(
        CalculationStep::new(cat, "Real temperature change ΔT")
            .formula(dt_formula)
            .calculation(format!("ΔT = {dt_s:.2} K with {eta_sym} = {eta:.4}"))
            .result(dt, K),
    );
    steps.push(
        CalculationStep::new(cat, format!("Temperature T_{o}"))
            .formula(format!("T_{o} = T_{i} + ΔT"))
            .calculation(format!("T_{o} = {t_in:.2} K + {dt:.2} K"))
            .result(t, K),
    );
    steps.push(celsius_step(cat, o, t));

    let h = inlet.h() + cp_eff * dt;
    let cp_ent = gas.cp_mean(t_in, t);
    let ds = cp_ent * (t / t_in).ln() - gas.r() * ratio.ln();
    let real = ThermoState::new(gas, p_out, t, h, inlet.s() + ds);
    steps.push(volume_step(cat, o, gas, &real));
    steps.push(
        CalculationStep::new(cat, format!("Specific enthalpy h_{o}"))
            .formula(format!("h_{o} = h_{i} + cp·ΔT"))
            .calculation(format!(
                "h_{o} = {:.2} J/kg + {cp_eff:.2} J/(kg·K) · {dt:.2} K",
                inlet.h()
            ))
            .result(h, J_KG),
    );
    steps.push(entropy_step(cat, i, o, cp_ent, t_in, t, gas.r(), p_in, p_out, ds));
    steps.push(
        CalculationStep::new(cat, format!("Specific entropy s_{o}"))
            .formula(format!("s_{o} = s_{i} + Δs"))
            .result(real.s(), J_KG_K),
    );

    Traced::new(
        MachineLeg {
            isentropic,
            real,
            kappa,
        },
        steps,
    )
}

/// Heat transfer from `from` to a state at (`p_to`, `t_to`).
///
/// Used for heat addition (2→3), intercooling (2a→2b) and both regenerator
/// sides. The pressure term vanishes when the change is isobaric.
pub fn heat_exchange(
    gas: &IdealGas,
    from: &ThermoState,
    from_label: StateLabel,
    to_label: StateLabel,
    p_to: f64,
    t_to: f64,
    category: StepCategory,
) -> Traced<ThermoState> {
    let (f, t) = (from_label, to_label);
    let cp = gas.cp_mean(from.t(), t_to);
    let dh = cp * (t_to - from.t());
    let ds = cp * (t_to / from.t()).ln() - gas.r() * (p_to / from.p()).ln();
    let state = ThermoState::new(gas, p_to, t_to, from.h() + dh, from.s() + ds);

    let steps = vec![
        CalculationStep::new(category, format!("State {t} ({})", to_label.description()))
            .calculation(format!(
                "p_{t} = {:.4} bar = {p_to:.2} Pa, T_{t} = {t_to:.2} K",
                jf_core::pascal_to_bar(p_to)
            )),
        celsius_step(category, t, t_to),
        volume_step(category, t, gas, &state),
        CalculationStep::new(category, format!("Enthalpy change Δh_{f}{t}"))
            .formula(format!("Δh = cp·(T_{t} - T_{f})"))
            .calculation(format!(
                "Δh = {cp:.2} J/(kg·K) · ({t_to:.2} K - {:.2} K)",
                from.t()
            ))
            .result(dh, J_KG),
        CalculationStep::new(category, format!("Specific enthalpy h_{t}"))
            .formula(format!("h_{t} = h_{f} + Δh"))
            .result(state.h(), J_KG),
        entropy_step(category, f, t, cp, from.t(), t_to, gas.r(), from.p(), p_to, ds),
        CalculationStep::new(category, format!("Specific entropy s_{t}"))
            .formula(format!("s_{t} = s_{f} + Δs"))
            .result(state.s(), J_KG_K),
    ];
    Traced::new(state, steps)
}

fn volume_step(
    cat: StepCategory,
    label: StateLabel,
    gas: &IdealGas,
    state: &ThermoState,
) -> CalculationStep {
    CalculationStep::new(cat, format!("Specific volume v_{label}"))
        .formula(format!("v_{label} = R·T_{label}/p_{label}"))
        .calculation(format!(
            "v_{label} = {:.3} J/(kg·K) · {:.2} K / {:.2} Pa",
            gas.r(),
            state.t(),
            state.p()
        ))
        .result(state.v(), M3_KG)
}

fn celsius_step(cat: StepCategory, label: StateLabel, t: f64) -> CalculationStep {
    let t_c = kelvin_to_celsius(t);
    CalculationStep::new(cat, format!("Temperature T_{label} in °C"))
        .calculation(format!("T_{label} = {t:.2} K - 273.15"))
        .result(t_c, "°C")
}

#[allow(clippy::too_many_arguments)]
fn entropy_step(
    cat: StepCategory,
    from: StateLabel,
    to: StateLabel,
    cp: f64,
    t_from: f64,
    t_to: f64,
    r: f64,
    p_from: f64,
    p_to: f64,
    ds: f64,
) -> CalculationStep {
    CalculationStep::new(cat, format!("Entropy change Δs_{from}{to}"))
        .formula(format!(
            "Δs = cp·ln(T_{to}/T_{from}) - R·ln(p_{to}/p_{from})"
        ))
        .calculation(format!(
            "Δs = {cp:.2} · ln({t_to:.2}/{t_from:.2}) - {r:.3} · ln({p_to:.2}/{p_from:.2})"
        ))
        .result(ds, J_KG_K)
}
