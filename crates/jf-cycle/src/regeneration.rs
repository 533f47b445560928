//! Regenerator outlet temperatures.

use serde::Serialize;

/// What the regeneration step did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegenerationOutcome {
    /// Not configured, or effectiveness ≤ 0.
    Disabled,
    /// Turbine exhaust not hot enough; no states were added.
    Infeasible { t2: f64, t4: f64, pinch_point: f64 },
    /// States 2* and 4* were added.
    Applied { t2_star: f64, t4_star: f64 },
}

impl RegenerationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RegenerationOutcome::Applied { .. })
    }
}

/// Outlet temperatures of both regenerator sides, or `None` if infeasible.
///
/// Feasible only when `t4 > t2 + pinch_point` (strict). The cold side reaches
/// `min(t2 + ε·(t4 - t2), t4 - pinch_point)`; the hot side gives up the same
/// temperature difference (equal cp on both sides).
pub fn regenerator_temperatures(
    t2: f64,
    t4: f64,
    effectiveness: f64,
    pinch_point: f64,
) -> Option<(f64, f64)> {
    if !(t4 > t2 + pinch_point) {
        return None;
    }
    let t2_star = (t2 + effectiveness * (t4 - t2)).min(t4 - pinch_point);
    let t4_star = t4 - (t2_star - t2);
    Some((t2_star, t4_star))
}
