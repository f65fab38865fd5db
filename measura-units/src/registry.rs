//! Unit registry - canonical units and aliases, grouped by kind

use crate::config::UnitsConfig;
use measura_core::{ConfigError, Kind, Unit, Value};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// An alias claimed by more than one unit; the first registration wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasCollision {
    pub alias: String,
    pub kept: Unit,
    pub ignored: Unit,
}

#[derive(Debug, Clone)]
struct KindEntry {
    kind: Kind,
    units: Vec<Unit>,
    aliases: HashMap<String, Unit>,
}

/// Registry of all known units
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    kinds: Vec<KindEntry>,
    aliases: HashMap<String, (Unit, Kind)>,
    owners: HashMap<Unit, Kind>,
    collisions: Vec<AliasCollision>,
}

impl UnitRegistry {
    /// Build the registry from configuration, in declaration order
    pub fn build(config: &UnitsConfig) -> Result<Self, ConfigError> {
        let mut registry = UnitRegistry::default();

        for kind_config in &config.kinds {
            let kind = Kind::new(kind_config.name.as_str());
            if registry.kinds.iter().any(|k| k.kind == kind) {
                return Err(ConfigError::DuplicateKind(kind_config.name.clone()));
            }
            registry.kinds.push(KindEntry {
                kind: kind.clone(),
                units: Vec::new(),
                aliases: HashMap::new(),
            });

            for unit_config in &kind_config.units {
                let unit = Unit::new(unit_config.unit.trim());
                registry.register(&kind, unit.clone())?;

                // The canonical name is a trivial alias of itself
                registry.alias(&kind, unit.as_str(), &unit);
                for alias in &unit_config.aliases {
                    registry.alias(&kind, alias, &unit);
                }
            }
        }

        Ok(registry)
    }

    fn register(&mut self, kind: &Kind, unit: Unit) -> Result<(), ConfigError> {
        if let Some(existing) = self.owners.get(&unit) {
            return Err(ConfigError::DuplicateUnit {
                unit: unit.to_string(),
                kind: kind.to_string(),
                existing: existing.to_string(),
            });
        }
        self.owners.insert(unit.clone(), kind.clone());
        if let Some(entry) = self.kinds.iter_mut().find(|k| &k.kind == kind) {
            entry.units.push(unit);
        }
        Ok(())
    }

    fn alias(&mut self, kind: &Kind, alias: &str, unit: &Unit) {
        let alias = alias.trim();
        if alias.is_empty() {
            return;
        }

        if let Some(entry) = self.kinds.iter_mut().find(|k| &k.kind == kind) {
            entry.aliases.entry(alias.to_string()).or_insert_with(|| unit.clone());
        }

        match self.aliases.get(alias) {
            Some((kept, _)) if kept != unit => {
                warn!(alias, kept = %kept, ignored = %unit, "alias registered twice, keeping first");
                self.collisions.push(AliasCollision {
                    alias: alias.to_string(),
                    kept: kept.clone(),
                    ignored: unit.clone(),
                });
            }
            Some(_) => {}
            None => {
                self.aliases.insert(alias.to_string(), (unit.clone(), kind.clone()));
            }
        }
    }

    /// Resolve an alias (surrounding whitespace ignored) to its unit and kind
    pub fn resolve_unit(&self, alias: &str) -> Option<(Unit, Kind)> {
        self.aliases.get(alias.trim()).cloned()
    }

    /// Resolve an alias using only the alias table of `kind`
    pub fn canonical_unit_for(&self, alias: &str, kind: &Kind) -> Option<Unit> {
        self.entry(kind)?.aliases.get(alias.trim()).cloned()
    }

    pub fn kind_of(&self, unit_or_alias: &str) -> Option<Kind> {
        self.resolve_unit(unit_or_alias).map(|(_, kind)| kind)
    }

    /// Kind owning a canonical unit
    pub fn owner(&self, unit: &Unit) -> Option<&Kind> {
        self.owners.get(unit)
    }

    /// Checked constructor: a value only exists for a registered unit
    pub fn value(&self, magnitude: f64, alias: &str) -> Option<Value> {
        let (unit, kind) = self.resolve_unit(alias)?;
        Some(Value::new(magnitude, unit, kind))
    }

    /// Whether a value's unit is registered and owned by the value's kind
    pub fn is_valid(&self, value: &Value) -> bool {
        self.owner(value.unit()) == Some(value.kind())
    }

    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.kinds.iter().map(|k| &k.kind)
    }

    pub fn contains_kind(&self, kind: &Kind) -> bool {
        self.entry(kind).is_some()
    }

    /// Canonical units of a kind, in declaration order
    pub fn units_of(&self, kind: &Kind) -> &[Unit] {
        self.entry(kind).map(|k| k.units.as_slice()).unwrap_or(&[])
    }

    /// Every alias of a unit, canonical name included, sorted
    pub fn aliases_of(&self, unit: &Unit) -> Vec<&str> {
        let Some(kind) = self.owner(unit) else {
            return Vec::new();
        };
        let mut aliases: Vec<&str> = self
            .entry(kind)
            .map(|k| {
                k.aliases
                    .iter()
                    .filter(|(_, u)| *u == unit)
                    .map(|(a, _)| a.as_str())
                    .collect()
            })
            .unwrap_or_default();
        aliases.sort_unstable();
        aliases
    }

    /// kind -> alias -> canonical unit, for every kind
    pub fn alias_table(&self) -> BTreeMap<Kind, BTreeMap<String, Unit>> {
        self.kinds
            .iter()
            .map(|k| {
                let aliases = k.aliases.iter().map(|(a, u)| (a.clone(), u.clone())).collect();
                (k.kind.clone(), aliases)
            })
            .collect()
    }

    /// Alias collisions found while building
    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }

    fn entry(&self, kind: &Kind) -> Option<&KindEntry> {
        self.kinds.iter().find(|k| &k.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KindConfig;

    fn sample() -> UnitRegistry {
        let config = UnitsConfig::new()
            .with_kind(
                KindConfig::new("length")
                    .unit("m", &["meter", "meters"])
                    .unit("km", &["kilometer"]),
            )
            .with_kind(
                KindConfig::new("time")
                    .unit("s", &["second"])
                    .unit("min", &["minute", "m"]),
            );
        UnitRegistry::build(&config).unwrap()
    }

    #[test]
    fn test_resolve_alias() {
        let registry = sample();
        let (unit, kind) = registry.resolve_unit("meters").unwrap();
        assert_eq!(unit.as_str(), "m");
        assert_eq!(kind.as_str(), "length");
    }

    #[test]
    fn test_canonical_name_is_alias() {
        let registry = sample();
        assert_eq!(registry.resolve_unit("km").unwrap().0.as_str(), "km");
    }

    #[test]
    fn test_trims_but_is_case_sensitive() {
        let registry = sample();
        assert!(registry.resolve_unit("  km ").is_some());
        assert!(registry.resolve_unit("KM").is_none());
        assert!(registry.resolve_unit("furlong").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let registry = sample();
        // "m" is meter's canonical name before it is minute's alias
        assert_eq!(registry.resolve_unit("m").unwrap().0.as_str(), "m");
        assert_eq!(registry.collisions().len(), 1);
        assert_eq!(registry.collisions()[0].ignored.as_str(), "min");
    }

    #[test]
    fn test_canonical_unit_for_uses_kind_table() {
        let registry = sample();
        let time = Kind::new("time");
        // Shadowed globally, but still minute inside its own kind
        assert_eq!(registry.canonical_unit_for("m", &time).unwrap().as_str(), "min");
        assert!(registry.canonical_unit_for("km", &time).is_none());
    }

    #[test]
    fn test_kind_of() {
        let registry = sample();
        assert_eq!(registry.kind_of("second").unwrap().as_str(), "time");
        assert!(registry.kind_of("alien").is_none());
    }

    #[test]
    fn test_units_and_aliases_of() {
        let registry = sample();
        let length = Kind::new("length");
        let units: Vec<&str> = registry.units_of(&length).iter().map(|u| u.as_str()).collect();
        assert_eq!(units, ["m", "km"]);
        assert_eq!(registry.aliases_of(&Unit::new("m")), ["m", "meter", "meters"]);
    }

    #[test]
    fn test_checked_value() {
        let registry = sample();
        let v = registry.value(3.0, "kilometer").unwrap();
        assert_eq!(v.unit().as_str(), "km");
        assert!(registry.is_valid(&v));
        assert!(registry.value(3.0, "parsec").is_none());

        let forged = Value::new(1.0, Unit::new("km"), Kind::new("time"));
        assert!(!registry.is_valid(&forged));
    }

    #[test]
    fn test_duplicate_unit_is_rejected() {
        let config = UnitsConfig::new()
            .with_kind(KindConfig::new("a").unit("x", &[]))
            .with_kind(KindConfig::new("b").unit("x", &[]));
        let err = UnitRegistry::build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateUnit { .. }));
    }

    #[test]
    fn test_duplicate_kind_is_rejected() {
        let config = UnitsConfig::new()
            .with_kind(KindConfig::new("a"))
            .with_kind(KindConfig::new("a"));
        assert!(matches!(
            UnitRegistry::build(&config),
            Err(ConfigError::DuplicateKind(_))
        ));
    }
}
