//! Conversion rules and edges

use crate::Unit;
use serde::{Serialize, Serializer};
use std::fmt;

/// Named one-argument numeric function, usable only in the direction it
/// was defined for
#[derive(Clone, Copy)]
pub struct Formula {
    name: &'static str,
    function: fn(f64) -> f64,
}

impl Formula {
    pub const fn new(name: &'static str, function: fn(f64) -> f64) -> Self {
        Formula { name, function }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, value: f64) -> f64 {
        (self.function)(value)
    }
}

// Two formulas are the same rule when they carry the same name.
impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Formula({})", self.name)
    }
}

impl Serialize for Formula {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Name of an externally implemented conversion procedure
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProcedureId(String);

impl ProcedureId {
    pub fn new(name: impl Into<String>) -> Self {
        ProcedureId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a magnitude is carried from one unit to another
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConversionRule {
    /// Multiply by the factor
    Factor(f64),
    /// Invoke a one-way function
    Formula(Formula),
    /// Invoke a named procedure
    Special(ProcedureId),
}

impl ConversionRule {
    pub const IDENTITY: ConversionRule = ConversionRule::Factor(1.0);

    pub fn as_factor(&self) -> Option<f64> {
        match self {
            ConversionRule::Factor(f) => Some(*f),
            _ => None,
        }
    }

    /// Reciprocal rule; only factors can be inverted
    pub fn invert(&self) -> Option<ConversionRule> {
        match self {
            ConversionRule::Factor(f) if *f != 0.0 => Some(ConversionRule::Factor(1.0 / f)),
            _ => None,
        }
    }

    /// Apply the rule to a magnitude.
    ///
    /// `special` runs named procedures; it returns `None` when the procedure
    /// is unknown or rejects the input.
    pub fn apply_with<F>(&self, magnitude: f64, special: F) -> Option<f64>
    where
        F: FnOnce(&ProcedureId, f64) -> Option<f64>,
    {
        let result = match self {
            ConversionRule::Factor(f) => magnitude * f,
            ConversionRule::Formula(formula) => formula.call(magnitude),
            ConversionRule::Special(id) => special(id, magnitude)?,
        };
        result.is_finite().then_some(result)
    }
}

impl fmt::Display for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionRule::Factor(factor) => write!(f, "x {}", factor),
            ConversionRule::Formula(formula) => write!(f, "formula {}", formula.name()),
            ConversionRule::Special(id) => write!(f, "special {}", id),
        }
    }
}

/// Directed edge of a kind's conversion graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionEdge {
    pub from: Unit,
    pub to: Unit,
    pub rule: ConversionRule,
}

impl ConversionEdge {
    pub fn new(from: Unit, to: Unit, rule: ConversionRule) -> Self {
        ConversionEdge { from, to, rule }
    }

    /// Configuration key of the edge, `<from>_to_<to>`
    pub fn key(&self) -> String {
        format!("{}_to_{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_special(_: &ProcedureId, _: f64) -> Option<f64> {
        None
    }

    #[test]
    fn test_factor_inverts_to_reciprocal() {
        let rule = ConversionRule::Factor(1000.0);
        assert_eq!(rule.invert(), Some(ConversionRule::Factor(0.001)));
    }

    #[test]
    fn test_formula_and_special_never_invert() {
        let formula = ConversionRule::Formula(Formula::new("plus_one", |x| x + 1.0));
        assert_eq!(formula.invert(), None);
        assert_eq!(ConversionRule::Special(ProcedureId::new("p")).invert(), None);
        assert_eq!(ConversionRule::Factor(0.0).invert(), None);
    }

    #[test]
    fn test_apply() {
        assert_eq!(ConversionRule::Factor(16.0).apply_with(5.0, no_special), Some(80.0));

        let formula = ConversionRule::Formula(Formula::new("c_to_k", |c| c + 273.15));
        assert_eq!(formula.apply_with(15.0, no_special), Some(288.15));

        let special = ConversionRule::Special(ProcedureId::new("double"));
        assert_eq!(special.apply_with(2.0, |_, x| Some(x * 2.0)), Some(4.0));
        assert_eq!(special.apply_with(2.0, no_special), None);
    }

    #[test]
    fn test_non_finite_results_are_rejected() {
        let formula = ConversionRule::Formula(Formula::new("recip", |x| 1.0 / x));
        assert_eq!(formula.apply_with(0.0, no_special), None);
    }

    #[test]
    fn test_edge_key() {
        let edge = ConversionEdge::new(Unit::new("km"), Unit::new("m"), ConversionRule::Factor(1000.0));
        assert_eq!(edge.key(), "km_to_m");
    }

    #[test]
    fn test_rule_serialization() {
        let json = serde_json::to_string(&ConversionRule::Factor(2.0)).unwrap();
        assert_eq!(json, r#"{"type":"factor","value":2.0}"#);

        let json = serde_json::to_string(&ConversionRule::Formula(Formula::new("c_to_k", |c| c))).unwrap();
        assert_eq!(json, r#"{"type":"formula","value":"c_to_k"}"#);
    }
}
