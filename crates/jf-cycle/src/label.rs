//! Cycle state labels and their display order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A point in the cycle.
///
/// Sorted by numeric prefix, then by suffix (bare numbers first), so a
/// state table lists `1, 2, 2*, 2a, 2a_s, 2b, 2c, 2c_s, 2s, 3, 4, 4*, 4s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateLabel {
    /// Compressor inlet, reference point for h and s.
    #[serde(rename = "1")]
    Inlet1,
    /// Compressor outlet; after intercooling an alias of 2c.
    #[serde(rename = "2")]
    Outlet2,
    #[serde(rename = "2s")]
    Outlet2Isentropic,
    /// After the first compression stage.
    #[serde(rename = "2a")]
    Stage2aReal,
    #[serde(rename = "2a_s")]
    Stage2aIsentropic,
    /// After the intercooler.
    #[serde(rename = "2b")]
    Stage2bCooled,
    /// After the second compression stage.
    #[serde(rename = "2c")]
    Stage2cReal,
    #[serde(rename = "2c_s")]
    Stage2cIsentropic,
    /// Turbine inlet.
    #[serde(rename = "3")]
    Inlet3,
    /// Turbine outlet.
    #[serde(rename = "4")]
    Outlet4,
    #[serde(rename = "4s")]
    Outlet4Isentropic,
    /// Compressed gas after regenerative preheat.
    #[serde(rename = "2*")]
    Regenerated2Star,
    /// Turbine exhaust after regenerative heat recovery.
    #[serde(rename = "4*")]
    Regenerated4Star,
}

impl StateLabel {
    pub const ALL: [StateLabel; 13] = [
        StateLabel::Inlet1,
        StateLabel::Outlet2,
        StateLabel::Outlet2Isentropic,
        StateLabel::Stage2aReal,
        StateLabel::Stage2aIsentropic,
        StateLabel::Stage2bCooled,
        StateLabel::Stage2cReal,
        StateLabel::Stage2cIsentropic,
        StateLabel::Inlet3,
        StateLabel::Outlet4,
        StateLabel::Outlet4Isentropic,
        StateLabel::Regenerated2Star,
        StateLabel::Regenerated4Star,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            StateLabel::Inlet1 => "1",
            StateLabel::Outlet2 => "2",
            StateLabel::Outlet2Isentropic => "2s",
            StateLabel::Stage2aReal => "2a",
            StateLabel::Stage2aIsentropic => "2a_s",
            StateLabel::Stage2bCooled => "2b",
            StateLabel::Stage2cReal => "2c",
            StateLabel::Stage2cIsentropic => "2c_s",
            StateLabel::Inlet3 => "3",
            StateLabel::Outlet4 => "4",
            StateLabel::Outlet4Isentropic => "4s",
            StateLabel::Regenerated2Star => "2*",
            StateLabel::Regenerated4Star => "4*",
        }
    }

    /// Numeric prefix of the label.
    pub fn number(&self) -> u8 {
        match self {
            StateLabel::Inlet1 => 1,
            StateLabel::Inlet3 => 3,
            StateLabel::Outlet4 | StateLabel::Outlet4Isentropic | StateLabel::Regenerated4Star => 4,
            _ => 2,
        }
    }

    /// Suffix after the numeric prefix, empty for principal points.
    pub fn suffix(&self) -> &'static str {
        &self.key()[1..]
    }

    /// Isentropic reference points are kept for inspection only.
    pub fn is_isentropic_reference(&self) -> bool {
        matches!(
            self,
            StateLabel::Outlet2Isentropic
                | StateLabel::Stage2aIsentropic
                | StateLabel::Stage2cIsentropic
                | StateLabel::Outlet4Isentropic
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            StateLabel::Inlet1 => "compressor inlet",
            StateLabel::Outlet2 => "compressor outlet",
            StateLabel::Outlet2Isentropic => "compressor outlet, isentropic",
            StateLabel::Stage2aReal => "after first compression stage",
            StateLabel::Stage2aIsentropic => "after first compression stage, isentropic",
            StateLabel::Stage2bCooled => "after intercooling",
            StateLabel::Stage2cReal => "after second compression stage",
            StateLabel::Stage2cIsentropic => "after second compression stage, isentropic",
            StateLabel::Inlet3 => "turbine inlet",
            StateLabel::Outlet4 => "turbine outlet",
            StateLabel::Outlet4Isentropic => "turbine outlet, isentropic",
            StateLabel::Regenerated2Star => "after regenerative preheat",
            StateLabel::Regenerated4Star => "after regenerative heat recovery",
        }
    }
}

impl Ord for StateLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number()
            .cmp(&other.number())
            .then_with(|| self.suffix().cmp(other.suffix()))
    }
}

impl PartialOrd for StateLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for StateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for StateLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        StateLabel::ALL
            .into_iter()
            .find(|label| label.key() == key)
            .ok_or_else(|| format!("unknown state label '{key}'"))
    }
}
