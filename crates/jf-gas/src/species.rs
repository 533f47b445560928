//! Gas species definitions and static property data.

use crate::error::{GasError, GasResult};
use serde::{Deserialize, Serialize};

/// Working gases available for a closed Joule cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasSpecies {
    /// Dry air
    Air,
    /// Helium (He)
    Helium,
    /// Nitrogen (N₂)
    Nitrogen,
    /// Carbon dioxide (CO₂)
    CarbonDioxide,
}

/// Immutable per-species ideal-gas data.
///
/// Loaded once as static configuration, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct GasData {
    /// Human-readable name
    pub name: &'static str,
    /// Molar mass [g/mol]
    pub molar_mass: f64,
    /// Specific gas constant R [J/(kg·K)]
    pub r: f64,
    /// Isentropic exponent approximation for the constant-cp model
    pub kappa_const: f64,
    /// cp(T) = a + b·T + c·T² + d·T³ in J/(kg·K), T in K
    pub cp_coeffs: [f64; 4],
    /// Constant cp approximation [J/(kg·K)]
    pub cp_const: f64,
    /// Stated validity range of the cp polynomial [K]
    pub t_range: (f64, f64),
}

static AIR: GasData = GasData {
    name: "Air",
    molar_mass: 28.9647,
    r: 287.058,
    kappa_const: 1.4,
    cp_coeffs: [1047.63, -0.372589, 9.45304e-4, -6.02409e-7],
    cp_const: 1005.0,
    t_range: (200.0, 1600.0),
};

static HELIUM: GasData = GasData {
    name: "Helium",
    molar_mass: 4.0026,
    r: 2077.1,
    kappa_const: 1.667,
    cp_coeffs: [5193.0, 0.0, 0.0, 0.0],
    cp_const: 5193.0,
    t_range: (200.0, 2000.0),
};

static NITROGEN: GasData = GasData {
    name: "Nitrogen",
    molar_mass: 28.0134,
    r: 296.8,
    kappa_const: 1.4,
    cp_coeffs: [1041.0, -0.29, 0.0007, -5e-7],
    cp_const: 1040.0,
    t_range: (200.0, 1600.0),
};

static CARBON_DIOXIDE: GasData = GasData {
    name: "Carbon Dioxide",
    molar_mass: 44.01,
    r: 188.9,
    kappa_const: 1.3,
    cp_coeffs: [820.0, 1.2, -0.0005, 7e-8],
    cp_const: 846.0,
    t_range: (200.0, 1600.0),
};

impl GasSpecies {
    pub const ALL: [GasSpecies; 4] = [
        GasSpecies::Air,
        GasSpecies::Helium,
        GasSpecies::Nitrogen,
        GasSpecies::CarbonDioxide,
    ];

    /// Canonical lookup key.
    pub fn key(&self) -> &'static str {
        match self {
            GasSpecies::Air => "air",
            GasSpecies::Helium => "helium",
            GasSpecies::Nitrogen => "nitrogen",
            GasSpecies::CarbonDioxide => "carbon_dioxide",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        self.data().name
    }

    /// Static property record for this species.
    pub fn data(&self) -> &'static GasData {
        match self {
            GasSpecies::Air => &AIR,
            GasSpecies::Helium => &HELIUM,
            GasSpecies::Nitrogen => &NITROGEN,
            GasSpecies::CarbonDioxide => &CARBON_DIOXIDE,
        }
    }

    /// Keyed lookup; fails with `UnknownSpecies` for unregistered keys.
    pub fn from_key(key: &str) -> GasResult<Self> {
        key.parse()
    }
}

impl std::str::FromStr for GasSpecies {
    type Err = GasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AIR" | "LUFT" => Ok(GasSpecies::Air),
            "HELIUM" | "HE" => Ok(GasSpecies::Helium),
            "NITROGEN" | "N2" => Ok(GasSpecies::Nitrogen),
            "CARBON_DIOXIDE" | "CARBONDIOXIDE" | "CARBON DIOXIDE" | "CO2" => {
                Ok(GasSpecies::CarbonDioxide)
            }
            _ => Err(GasError::UnknownSpecies { key: s.to_string() }),
        }
    }
}

impl std::fmt::Display for GasSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
