//! Named formula catalog
//!
//! Configuration refers to formulas by name; this is the set it can use.

use measura_core::Formula;

const ABSOLUTE_ZERO_C: f64 = 273.15;
const ABSOLUTE_ZERO_F: f64 = 459.67;

/// Litres per 100 km times miles per gallon (US)
const MPG_L_PER_100KM: f64 = 100.0 * 3.785411784 / 1.609344;

pub static FORMULAS: [Formula; 8] = [
    Formula::new("celsius_to_kelvin", |c| c + ABSOLUTE_ZERO_C),
    Formula::new("kelvin_to_celsius", |k| k - ABSOLUTE_ZERO_C),
    Formula::new("celsius_to_fahrenheit", |c| c * 9.0 / 5.0 + 32.0),
    Formula::new("fahrenheit_to_celsius", |f| (f - 32.0) * 5.0 / 9.0),
    Formula::new("fahrenheit_to_kelvin", |f| (f + ABSOLUTE_ZERO_F) * 5.0 / 9.0),
    Formula::new("kelvin_to_fahrenheit", |k| k * 9.0 / 5.0 - ABSOLUTE_ZERO_F),
    // km/L <-> L/100km, its own inverse
    Formula::new("hundred_over", |x| 100.0 / x),
    // mpg <-> L/100km, its own inverse
    Formula::new("mpg_l_per_100km", |x| MPG_L_PER_100KM / x),
];

pub fn lookup(name: &str) -> Option<Formula> {
    FORMULAS.iter().find(|f| f.name() == name).copied()
}
