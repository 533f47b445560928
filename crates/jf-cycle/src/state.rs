//! Thermodynamic state records and the labelled state table.

use crate::error::{CycleError, CycleResult};
use crate::label::StateLabel;
use jf_core::units::{Pressure, Temperature, k, pa};
use jf_gas::IdealGas;
use serde::Serialize;
use std::collections::BTreeMap;

/// One state point of the working gas.
///
/// `v` is always `R·T/p` of the gas it was built with; there is no setter,
/// so the stored value cannot drift from the derived one. `h` and `s` are
/// relative to state 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermoState {
    /// Pressure [Pa]
    p: f64,
    /// Temperature [K]
    t: f64,
    /// Specific volume [m³/kg]
    v: f64,
    /// Specific enthalpy [J/kg]
    h: f64,
    /// Specific entropy [J/(kg·K)]
    s: f64,
}

impl ThermoState {
    pub fn new(gas: &IdealGas, p: f64, t: f64, h: f64, s: f64) -> Self {
        Self {
            p,
            t,
            v: gas.specific_volume(p, t),
            h,
            s,
        }
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn v(&self) -> f64 {
        self.v
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.p)
    }

    pub fn temperature(&self) -> Temperature {
        k(self.t)
    }
}

/// States computed so far, keyed and ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StateTable(BTreeMap<StateLabel, ThermoState>);

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: StateLabel) -> Option<&ThermoState> {
        self.0.get(&label)
    }

    /// Look up a predecessor state, failing with `MissingPrerequisite`.
    pub fn require(&self, label: StateLabel, operation: &'static str) -> CycleResult<ThermoState> {
        self.0
            .get(&label)
            .copied()
            .ok_or(CycleError::MissingPrerequisite {
                operation,
                required: label,
            })
    }

    pub fn insert(&mut self, label: StateLabel, state: ThermoState) {
        self.0.insert(label, state);
    }

    pub fn contains(&self, label: StateLabel) -> bool {
        self.0.contains_key(&label)
    }

    /// States in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StateLabel, &ThermoState)> {
        self.0.iter().map(|(label, state)| (*label, state))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jf_gas::{CpModel, GasSpecies};

    #[test]
    fn volume_is_derived() {
        let gas = IdealGas::new(GasSpecies::Air, CpModel::Constant);
        let state = ThermoState::new(&gas, 1e5, 293.15, 0.0, 0.0);
        assert_eq!(state.v(), gas.specific_volume(1e5, 293.15));
        assert_eq!(state.pressure().value, 1e5);
        assert_eq!(state.temperature().value, 293.15);
    }

    #[test]
    fn require_reports_missing_label() {
        let table = StateTable::new();
        let err = table.require(StateLabel::Inlet3, "compute_state_4").unwrap_err();
        assert_eq!(
            err,
            CycleError::MissingPrerequisite {
                operation: "compute_state_4",
                required: StateLabel::Inlet3,
            }
        );
    }

    #[test]
    fn iteration_follows_label_order() {
        let gas = IdealGas::new(GasSpecies::Air, CpModel::Constant);
        let mut table = StateTable::new();
        for label in [StateLabel::Outlet4, StateLabel::Inlet1, StateLabel::Regenerated2Star] {
            table.insert(label, ThermoState::new(&gas, 1e5, 300.0, 0.0, 0.0));
        }
        let order: Vec<StateLabel> = table.iter().map(|(l, _)| l).collect();
        assert_eq!(
            order,
            vec![StateLabel::Inlet1, StateLabel::Regenerated2Star, StateLabel::Outlet4]
        );
        assert_eq!(table.len(), 3);
    }
}
