//! Configuration model for unit tables
//!
//! The same model backs the built-in tables and JSON table files:
//!
//! ```json
//! {
//!   "precision": 2,
//!   "allow_exact_results": false,
//!   "kinds": [
//!     { "name": "mass",
//!       "units": [ { "unit": "kg", "aliases": ["kilogram"] }, { "unit": "g" } ],
//!       "conversions": [ { "edge": "kg_to_g", "factor": 1000 } ] }
//!   ]
//! }
//! ```

use measura_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Display settings applied by the facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Decimal places used when rendering a value
    pub precision: usize,
    /// Render exactly integral magnitudes without decimals
    pub allow_exact_results: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            precision: 2,
            allow_exact_results: false,
        }
    }
}

/// Complete table configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitsConfig {
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(default)]
    pub kinds: Vec<KindConfig>,
}

impl UnitsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: KindConfig) -> Self {
        self.kinds.push(kind);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One kind: its units and conversion edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindConfig {
    pub name: String,
    #[serde(default)]
    pub units: Vec<UnitConfig>,
    #[serde(default)]
    pub conversions: Vec<EdgeConfig>,
}

impl KindConfig {
    pub fn new(name: &str) -> Self {
        KindConfig {
            name: name.to_string(),
            units: Vec::new(),
            conversions: Vec::new(),
        }
    }

    pub fn unit(mut self, unit: &str, aliases: &[&str]) -> Self {
        self.units.push(UnitConfig {
            unit: unit.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    pub fn factor(self, edge: &str, factor: f64) -> Self {
        self.edge(edge, RuleConfig::Factor(factor))
    }

    pub fn formula(self, edge: &str, name: &str) -> Self {
        self.edge(edge, RuleConfig::Formula(name.to_string()))
    }

    pub fn special(self, edge: &str, procedure: &str) -> Self {
        self.edge(edge, RuleConfig::Special(procedure.to_string()))
    }

    fn edge(mut self, edge: &str, rule: RuleConfig) -> Self {
        self.conversions.push(EdgeConfig {
            edge: edge.to_string(),
            rule,
        });
        self
    }
}

/// Canonical unit with its aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub unit: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Edge keyed `<unit_from>_to_<unit_to>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub edge: String,
    #[serde(flatten)]
    pub rule: RuleConfig,
}

/// Rule as written in configuration; formulas and procedures by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleConfig {
    Factor(f64),
    Formula(String),
    Special(String),
}
