//! Measura Plugin System
//!
//! Provides the extension point for conversions that a plain factor or
//! formula cannot express: named special procedures, looked up by id when a
//! `ConversionRule::Special` edge is applied.

mod registry;
mod traits;

pub use registry::ProcedureRegistry;
pub use traits::{ProcedureMeta, SpecialProcedure};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ProcedureMeta, ProcedureRegistry, SpecialProcedure};
    pub use measura_core::prelude::*;
}
