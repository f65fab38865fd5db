//! Measura Units - Unit Registry and Conversion Graph
//!
//! Kinds group units; each kind carries a sparse set of directed
//! conversion edges. The resolver turns any two units of one kind into a
//! single rule: direct edge, reciprocal of a factor edge, or a composed
//! path of factor edges.
//!
//! Built-in kinds:
//! - Length (m, km, ft, mi, etc.)
//! - Mass (kg, g, lb, oz, etc.)
//! - Time (s, min, h, d, etc.)
//! - Temperature (K, C, F, R, gas mark)
//! - Volume (L, mL, gal, cup, etc.)
//! - Area (m2, ha, acre, etc.)
//! - Speed (m/s, km/h, mph, knots)
//! - Data (bit, byte, MB, MiB, etc.)
//! - Fuel economy (km/L, mpg, L/100km)

mod builtin;
mod config;
mod formulas;
mod parse;
mod registry;
mod resolver;
mod table;

pub use config::{EdgeConfig, KindConfig, RuleConfig, Settings, UnitConfig, UnitsConfig};
pub use formulas::{lookup as lookup_formula, FORMULAS};
pub use parse::parse_quantity;
pub use registry::{AliasCollision, UnitRegistry};
pub use resolver::Resolver;
pub use table::ConversionTable;

use measura_core::ConfigError;
use measura_plugin::ProcedureRegistry;
use tracing::debug;

/// Registry and conversion table built from one configuration
#[derive(Debug, Clone, Default)]
pub struct Units {
    registry: UnitRegistry,
    table: ConversionTable,
    settings: Settings,
}

impl Units {
    /// Build and validate both tables.
    ///
    /// Special edges are checked against `procedures`.
    pub fn build(config: &UnitsConfig, procedures: &ProcedureRegistry) -> Result<Self, ConfigError> {
        let registry = UnitRegistry::build(config)?;
        let table = ConversionTable::build(config, &registry, procedures)?;
        debug!(
            kinds = config.kinds.len(),
            collisions = registry.collisions().len(),
            "unit tables built"
        );
        Ok(Units {
            registry,
            table,
            settings: config.settings,
        })
    }

    /// The built-in tables
    pub fn builtin(procedures: &ProcedureRegistry) -> Result<Self, ConfigError> {
        Self::build(&UnitsConfig::builtin(), procedures)
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measura_core::{ConversionRule, Kind, Unit};

    fn units() -> Units {
        let procedures = measura_kitchen::load_kitchen_procedures(ProcedureRegistry::new());
        Units::builtin(&procedures).unwrap()
    }

    #[test]
    fn test_parse_then_resolve() {
        let units = units();
        let (magnitude, alias) = parse_quantity("5' 2\"").unwrap();
        let (unit, kind) = units.registry().resolve_unit(&alias).unwrap();
        assert_eq!(kind.as_str(), "length");

        let rule = units.resolver().resolve(&kind, &unit, &Unit::new("cm")).unwrap();
        let cm = rule.apply_with(magnitude, |_, _| None).unwrap();
        assert!((cm - 157.48).abs() < 1e-9);
    }

    #[test]
    fn test_pounds_ounces_to_grams() {
        let units = units();
        let (magnitude, alias) = parse_quantity("5 lb 2 oz").unwrap();
        let (unit, kind) = units.registry().resolve_unit(&alias).unwrap();
        let rule = units.resolver().resolve(&kind, &unit, &Unit::new("oz")).unwrap();
        assert_eq!(rule, ConversionRule::Factor(16.0));
        assert_eq!(rule.apply_with(magnitude, |_, _| None), Some(82.0));
    }

    #[test]
    fn test_settings_carried() {
        let config = UnitsConfig::new().with_settings(Settings {
            precision: 4,
            allow_exact_results: true,
        });
        let units = Units::build(&config, &ProcedureRegistry::new()).unwrap();
        assert_eq!(units.settings().precision, 4);
        assert!(units.settings().allow_exact_results);
        assert_eq!(units.registry().kinds().count(), 0);
    }

    #[test]
    fn test_special_edge_needs_procedure_to_apply() {
        let units = units();
        let kind = Kind::new("temperature");
        let rule = units
            .resolver()
            .resolve(&kind, &Unit::new("gas_mark"), &Unit::new("F"))
            .unwrap();
        assert!(matches!(rule, ConversionRule::Special(_)));
        assert_eq!(rule.apply_with(4.0, |_, _| None), None);
    }
}
