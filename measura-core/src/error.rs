//! Error taxonomy
//!
//! Conversions never panic. Every failure a caller can observe is one of the
//! two `ConversionError` variants; configuration problems are reported once,
//! when the tables are built, as `ConfigError`.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNDEFINED_ORIGIN: &str = "UNDEFINED_ORIGIN";
    pub const UNDEFINED_CONVERSION: &str = "UNDEFINED_CONVERSION";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// User-visible conversion failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversionError {
    /// The source is absent, or its text does not name a registered unit
    #[error("undefined origin")]
    UndefinedOrigin,

    /// No chain of conversion rules connects the two units
    #[error("undefined conversion from {from} to {to}")]
    UndefinedConversion { from: String, to: String },
}

impl ConversionError {
    pub fn undefined_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UndefinedConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::UndefinedOrigin => codes::UNDEFINED_ORIGIN,
            Self::UndefinedConversion { .. } => codes::UNDEFINED_CONVERSION,
        }
    }
}

/// Problems found while building unit tables
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("kind '{0}' is declared twice")]
    DuplicateKind(String),

    #[error("unit '{unit}' of kind '{kind}' is already registered under kind '{existing}'")]
    DuplicateUnit {
        unit: String,
        kind: String,
        existing: String,
    },

    #[error("kind '{0}' is not declared")]
    UnknownKind(String),

    #[error("edge '{key}' in kind '{kind}' is not of the form <from>_to_<to>")]
    MalformedEdge { kind: String, key: String },

    #[error("edge '{key}' references units outside kind '{kind}'")]
    ForeignUnit { kind: String, key: String },

    #[error("edge '{key}' in kind '{kind}' has unusable factor {factor}")]
    InvalidFactor { kind: String, key: String, factor: f64 },

    #[error("edge '{key}' in kind '{kind}' uses unknown formula '{name}'")]
    UnknownFormula {
        kind: String,
        key: String,
        name: String,
    },

    #[error("edge '{key}' in kind '{kind}' uses unregistered procedure '{name}'")]
    UnknownProcedure {
        kind: String,
        key: String,
        name: String,
    },

    #[error("failed to read configuration from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        codes::CONFIG_ERROR
    }
}
