//! Measura Kitchen Procedures
//!
//! Special conversion procedures for kitchen scales that are not linear:
//! - UK gas mark <-> degrees Fahrenheit
//!
//! Plain F <-> C conversions are ordinary formula edges in the unit tables.

mod temperature;

pub use temperature::{FahrenheitToGasMark, GasMarkToFahrenheit};

use measura_plugin::ProcedureRegistry;

/// Load kitchen procedures into registry
pub fn load_kitchen_procedures(registry: ProcedureRegistry) -> ProcedureRegistry {
    registry
        .with_procedure(temperature::GasMarkToFahrenheit)
        .with_procedure(temperature::FahrenheitToGasMark)
}
