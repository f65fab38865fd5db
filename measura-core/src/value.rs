//! Value - a magnitude with its unit and kind

use crate::{Kind, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A measured quantity
///
/// `kind` is always the kind that owns `unit` in the registry the value
/// came from. Values are immutable; converting one produces a new value.
///
/// Deserializing does not consult a registry, so the same caveat as
/// [`Value::new`] applies to values read back from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    magnitude: f64,
    unit: Unit,
    kind: Kind,
}

impl Value {
    /// Assemble a value from parts already checked against a registry.
    ///
    /// Nothing here checks that `unit` is registered or owned by `kind`.
    /// Use `UnitRegistry::value` to build values from user input. The
    /// facade rejects values whose unit is not registered, including ones
    /// built here or deserialized, as an undefined origin.
    pub fn new(magnitude: f64, unit: Unit, kind: Kind) -> Self {
        Value { magnitude, unit, kind }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Same kind, new magnitude and unit
    pub fn converted(&self, magnitude: f64, unit: Unit) -> Value {
        Value {
            magnitude,
            unit,
            kind: self.kind.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}
