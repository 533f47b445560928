// jf-core/src/units.rs

use uom::si::f64::{
    Power as UomPower, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Offset between the Celsius and Kelvin scales [K].
pub const CELSIUS_OFFSET_K: f64 = 273.15;

/// Pascal per bar.
pub const PA_PER_BAR: f64 = 1e5;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    pa(bar_to_pascal(v))
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    watts(v * 1e3)
}

// Plain linear maps, used where values are carried as bare f64 (trace text, case files).

#[inline]
pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    t_c + CELSIUS_OFFSET_K
}

#[inline]
pub fn kelvin_to_celsius(t_k: f64) -> f64 {
    t_k - CELSIUS_OFFSET_K
}

#[inline]
pub fn bar_to_pascal(p_bar: f64) -> f64 {
    p_bar * PA_PER_BAR
}

#[inline]
pub fn pascal_to_bar(p_pa: f64) -> f64 {
    p_pa / PA_PER_BAR
}
