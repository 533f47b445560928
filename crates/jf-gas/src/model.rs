//! Ideal-gas property functions under a constant or temperature-dependent cp model.

use crate::species::{GasData, GasSpecies};
use serde::{Deserialize, Serialize};

/// How specific heat is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpModel {
    /// Frozen cp, cv and κ for the whole calculation.
    #[default]
    Constant,
    /// cp(T) from the species' cubic polynomial.
    Polynomial,
}

impl CpModel {
    pub fn is_constant(&self) -> bool {
        matches!(self, CpModel::Constant)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CpModel::Constant => "constant cp",
            CpModel::Polynomial => "cp(T) polynomial",
        }
    }
}

/// Material properties of a gas at one temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasPropertyPack {
    /// Temperature [K]
    pub t: f64,
    /// Specific heat at constant pressure [J/(kg·K)]
    pub cp: f64,
    /// Specific heat at constant volume [J/(kg·K)]
    pub cv: f64,
    /// Isentropic exponent κ (dimensionless)
    pub kappa: f64,
    /// Specific gas constant [J/(kg·K)]
    pub r: f64,
}

impl GasPropertyPack {
    /// Return a summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "Pack(T={:.1}K,cp={:.1}J/kg·K,cv={:.1}J/kg·K,κ={:.4},R={:.3}J/kg·K)",
            self.t, self.cp, self.cv, self.kappa, self.r
        )
    }
}

/// An ideal gas bound to a cp model.
///
/// Shared, read-only and cheap to copy. No check is made against the species'
/// stated temperature range: the polynomial extrapolates silently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGas {
    species: GasSpecies,
    model: CpModel,
}

impl IdealGas {
    pub fn new(species: GasSpecies, model: CpModel) -> Self {
        Self { species, model }
    }

    pub fn species(&self) -> GasSpecies {
        self.species
    }

    pub fn model(&self) -> CpModel {
        self.model
    }

    pub fn data(&self) -> &'static GasData {
        self.species.data()
    }

    /// Specific gas constant R [J/(kg·K)].
    pub fn r(&self) -> f64 {
        self.data().r
    }

    /// cp [J/(kg·K)] at temperature `t` [K].
    pub fn cp(&self, t: f64) -> f64 {
        let data = self.data();
        if self.model.is_constant() {
            return data.cp_const;
        }
        let [a, b, c, d] = data.cp_coeffs;
        a + b * t + c * t * t + d * t * t * t
    }

    /// Mean cp between `t1` and `t2`.
    ///
    /// Arithmetic mean of the end-point values, not the integral mean.
    pub fn cp_mean(&self, t1: f64, t2: f64) -> f64 {
        if self.model.is_constant() {
            return self.data().cp_const;
        }
        (self.cp(t1) + self.cp(t2)) / 2.0
    }

    /// cv = cp − R.
    pub fn cv(&self, t: f64) -> f64 {
        self.cp(t) - self.r()
    }

    /// κ = cp/cv, or the tabulated approximation under the constant model.
    pub fn kappa(&self, t: f64) -> f64 {
        if self.model.is_constant() {
            return self.data().kappa_const;
        }
        self.cp(t) / self.cv(t)
    }

    /// Mean κ between `t1` and `t2` (arithmetic mean of end points).
    pub fn kappa_mean(&self, t1: f64, t2: f64) -> f64 {
        if self.model.is_constant() {
            return self.data().kappa_const;
        }
        (self.kappa(t1) + self.kappa(t2)) / 2.0
    }

    /// Specific volume v = R·T/p [m³/kg].
    pub fn specific_volume(&self, p: f64, t: f64) -> f64 {
        self.r() * t / p
    }

    /// Frozen constant-model cp.
    pub fn cp_const(&self) -> f64 {
        self.data().cp_const
    }

    /// Frozen constant-model κ.
    pub fn kappa_const(&self) -> f64 {
        self.data().kappa_const
    }

    /// Frozen constant-model cv = cp_const − R.
    pub fn cv_const(&self) -> f64 {
        self.cp_const() - self.r()
    }

    /// Whether `t` lies inside the species' stated polynomial range.
    ///
    /// Informational only; no property function consults it.
    pub fn in_valid_range(&self, t: f64) -> bool {
        let (lo, hi) = self.data().t_range;
        t >= lo && t <= hi
    }

    /// Compute cp, cv, κ and R at one temperature.
    pub fn property_pack(&self, t: f64) -> GasPropertyPack {
        if !self.in_valid_range(t) {
            tracing::debug!(
                gas = self.species.key(),
                t_k = t,
                "temperature outside stated cp range, extrapolating"
            );
        }
        GasPropertyPack {
            t,
            cp: self.cp(t),
            cv: self.cv(t),
            kappa: self.kappa(t),
            r: self.r(),
        }
    }

    /// Property packs for a set of temperatures, sorted ascending with duplicates removed.
    pub fn material_table(&self, temperatures: &[f64]) -> Vec<GasPropertyPack> {
        let mut temps: Vec<f64> = temperatures.to_vec();
        temps.sort_by(f64::total_cmp);
        temps.dedup();
        temps.into_iter().map(|t| self.property_pack(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn air(model: CpModel) -> IdealGas {
        IdealGas::new(GasSpecies::Air, model)
    }

    #[test]
    fn constant_model_freezes_values() {
        let gas = air(CpModel::Constant);
        assert_eq!(gas.cp(300.0), 1005.0);
        assert_eq!(gas.cp(1500.0), 1005.0);
        assert_eq!(gas.cp_mean(300.0, 1500.0), 1005.0);
        assert_eq!(gas.kappa(900.0), 1.4);
        assert_eq!(gas.kappa_mean(300.0, 900.0), 1.4);
        assert_eq!(gas.cv(400.0), 1005.0 - 287.058);
    }

    #[test]
    fn polynomial_cp_for_air() {
        let gas = air(CpModel::Polynomial);
        let t: f64 = 300.0;
        let expected = 1047.63 - 0.372589 * t + 9.45304e-4 * t * t - 6.02409e-7 * t * t * t;
        assert_eq!(gas.cp(t), expected);
        // Roughly 1005 J/(kg·K) at room temperature, rising towards 700 K
        assert!((gas.cp(t) - 1005.0).abs() < 5.0);
        assert!(gas.cp(700.0) > gas.cp(300.0));
    }

    #[test]
    fn mean_cp_is_arithmetic_mean() {
        let gas = air(CpModel::Polynomial);
        assert_eq!(gas.cp_mean(300.0, 900.0), (gas.cp(300.0) + gas.cp(900.0)) / 2.0);
        assert_eq!(
            gas.kappa_mean(300.0, 900.0),
            (gas.kappa(300.0) + gas.kappa(900.0)) / 2.0
        );
    }

    #[test]
    fn polynomial_kappa_is_cp_over_cv() {
        let gas = air(CpModel::Polynomial);
        let t = 700.0;
        assert_eq!(gas.kappa(t), gas.cp(t) / (gas.cp(t) - gas.r()));
        assert!(gas.kappa(t) > 1.3 && gas.kappa(t) < 1.4);
    }

    #[test]
    fn helium_polynomial_is_flat() {
        let gas = IdealGas::new(GasSpecies::Helium, CpModel::Polynomial);
        assert_eq!(gas.cp(300.0), 5193.0);
        assert_eq!(gas.cp(1800.0), 5193.0);
    }

    #[test]
    fn specific_volume_of_air() {
        let gas = air(CpModel::Constant);
        let v = gas.specific_volume(1e5, 293.15);
        assert!((v - 0.8415).abs() < 1e-3);
    }

    #[test]
    fn no_range_validation() {
        let gas = air(CpModel::Polynomial);
        assert!(!gas.in_valid_range(2500.0));
        // Still evaluates the polynomial out of range
        assert!(gas.cp(2500.0).is_finite());
    }

    #[test]
    fn material_table_sorts_and_dedups() {
        let gas = air(CpModel::Polynomial);
        let table = gas.material_table(&[900.0, 300.0, 900.0, 600.0]);
        let temps: Vec<f64> = table.iter().map(|p| p.t).collect();
        assert_eq!(temps, vec![300.0, 600.0, 900.0]);
        assert!(table[0].summary().contains("T=300.0K"));
    }
}
