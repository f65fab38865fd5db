//! Measura Core - Fundamental types
//!
//! This crate provides the core types used throughout Measura:
//! - `Unit` / `Kind`: canonical identifiers
//! - `ConversionRule`: factor, formula, or named procedure
//! - `Value`: a magnitude tagged with its unit and kind
//! - `ConversionError` / `ConfigError`: error taxonomy

mod error;
mod rule;
mod unit;
mod value;

pub use error::{codes, ConfigError, ConversionError};
pub use rule::{ConversionEdge, ConversionRule, Formula, ProcedureId};
pub use unit::{Kind, Unit};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{ConversionError, ConversionRule, Kind, ProcedureId, Unit, Value};
}
