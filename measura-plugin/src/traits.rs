//! Plugin traits

use serde::Serialize;

/// Metadata for a special conversion procedure
#[derive(Debug, Clone, Serialize)]
pub struct ProcedureMeta {
    pub name: &'static str,
    pub description: &'static str,
    /// Canonical unit the procedure reads
    pub from: &'static str,
    /// Canonical unit the procedure produces
    pub to: &'static str,
    pub examples: &'static [&'static str],
    pub category: &'static str,
}

/// Externally implemented conversion between two units
///
/// Covers conversions that are neither a factor nor a plain formula, such as
/// stepped scales. Procedures are one-way; register the opposite direction
/// as its own procedure.
pub trait SpecialProcedure: Send + Sync {
    fn meta(&self) -> ProcedureMeta;

    /// Convert a magnitude, or `None` when the input is outside the
    /// procedure's domain
    fn call(&self, magnitude: f64) -> Option<f64>;
}
