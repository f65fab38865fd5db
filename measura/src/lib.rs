//! Measura - Unit Conversion Engine
//!
//! ```text
//! "5 pounds" -> parse -> kind lookup -> resolve -> apply -> 80.00 oz
//! ```
//!
//! `Measura` is cheap to clone and safe to share between threads; its
//! tables are immutable once built.

mod origin;
mod render;

pub use origin::Origin;
pub use render::Renderer;

pub use measura_core::{ConfigError, ConversionError, ConversionRule, Kind, Unit, Value};
pub use measura_units::{Settings, Units, UnitsConfig};

use measura_plugin::ProcedureRegistry;
use measura_units::parse_quantity;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error};

static GLOBAL: LazyLock<Measura> = LazyLock::new(Measura::builtin);

/// Procedures available to special edges of the built-in tables
pub fn standard_procedures() -> ProcedureRegistry {
    measura_kitchen::load_kitchen_procedures(ProcedureRegistry::new())
}

/// Main conversion engine
#[derive(Debug, Clone)]
pub struct Measura {
    units: Arc<Units>,
    procedures: Arc<ProcedureRegistry>,
    settings: Settings,
}

impl Measura {
    pub fn new(units: Units, procedures: ProcedureRegistry) -> Self {
        Self {
            settings: units.settings(),
            units: Arc::new(units),
            procedures: Arc::new(procedures),
        }
    }

    /// Build from a table configuration with the standard procedures
    pub fn with_config(config: &UnitsConfig) -> Result<Self, ConfigError> {
        Self::with_procedures(config, standard_procedures())
    }

    pub fn with_procedures(config: &UnitsConfig, procedures: ProcedureRegistry) -> Result<Self, ConfigError> {
        let units = Units::build(config, &procedures)?;
        Ok(Self::new(units, procedures))
    }

    /// Engine over the built-in tables.
    ///
    /// Falls back to empty tables (logged) if they fail to build.
    pub fn builtin() -> Self {
        Self::with_config(&UnitsConfig::builtin()).unwrap_or_else(|e| {
            error!(error = %e, "built-in unit tables rejected");
            Self::new(Units::default(), standard_procedures())
        })
    }

    /// Shared engine over the built-in tables, built on first use
    pub fn global() -> &'static Measura {
        &GLOBAL
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.settings.precision = precision;
        self
    }

    pub fn with_exact_results(mut self, allow: bool) -> Self {
        self.settings.allow_exact_results = allow;
        self
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn units_tables(&self) -> &Units {
        &self.units
    }

    pub fn procedures(&self) -> &ProcedureRegistry {
        &self.procedures
    }

    /// Parse a quantity string into a value of a registered unit
    pub fn from(&self, input: &str) -> Option<Value> {
        let (magnitude, alias) = parse_quantity(input)?;
        self.units.registry().value(magnitude, &alias)
    }

    /// Convert `origin` into `target` (any alias of a unit of the same kind)
    pub fn to(&self, origin: impl Into<Origin>, target: &str) -> Result<Value, ConversionError> {
        let value = match origin.into() {
            Origin::Missing => return Err(ConversionError::UndefinedOrigin),
            Origin::Text(text) => self.from(&text).ok_or(ConversionError::UndefinedOrigin)?,
            Origin::Value(value) if self.units.registry().is_valid(&value) => value,
            Origin::Value(_) => return Err(ConversionError::UndefinedOrigin),
        };

        let target = target.trim();
        let undefined = || ConversionError::undefined_conversion(value.unit().as_str(), target);

        let to_unit = self
            .units
            .registry()
            .canonical_unit_for(target, value.kind())
            .ok_or_else(undefined)?;
        let rule = self
            .units
            .resolver()
            .resolve(value.kind(), value.unit(), &to_unit)
            .ok_or_else(undefined)?;
        let magnitude = rule
            .apply_with(value.magnitude(), |id, x| self.procedures.call(id, x))
            .ok_or_else(undefined)?;

        debug!(from = %value, to = %to_unit, %rule, magnitude, "converted");
        Ok(value.converted(magnitude, to_unit))
    }

    /// Error message, or the value rendered with the display settings
    pub fn as_string(&self, result: &Result<Value, ConversionError>) -> String {
        self.renderer().result(result)
    }

    pub fn format_value(&self, value: &Value) -> String {
        self.renderer().value(value)
    }

    /// Parse, convert and render in one step
    pub fn convert(&self, input: &str, target: &str) -> String {
        self.as_string(&self.to(input, target))
    }

    /// kind -> alias -> canonical unit
    pub fn units(&self) -> BTreeMap<Kind, BTreeMap<String, Unit>> {
        self.units.registry().alias_table()
    }

    pub fn kind_of_unit(&self, unit: &str) -> Option<String> {
        self.units.registry().kind_of(unit).map(|k| k.to_string())
    }

    /// Rule between two units given by any alias
    pub fn get_conversion(&self, from: &str, to: &str) -> Result<ConversionRule, ConversionError> {
        let undefined = || ConversionError::undefined_conversion(from.trim(), to.trim());
        let registry = self.units.registry();

        let (from_unit, kind) = registry.resolve_unit(from).ok_or_else(undefined)?;
        let to_unit = registry.canonical_unit_for(to, &kind).ok_or_else(undefined)?;
        self.units
            .resolver()
            .resolve(&kind, &from_unit, &to_unit)
            .ok_or_else(undefined)
    }

    fn renderer(&self) -> Renderer {
        Renderer::new(self.settings)
    }
}

impl Default for Measura {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m() -> Measura {
        Measura::builtin()
    }

    fn assert_value(v: &Value, magnitude: f64, unit: &str, kind: &str) {
        assert!(
            (v.magnitude() - magnitude).abs() < 1e-9 * magnitude.abs().max(1.0),
            "{} != {}",
            v.magnitude(),
            magnitude
        );
        assert_eq!(v.unit().as_str(), unit);
        assert_eq!(v.kind().as_str(), kind);
    }

    #[test]
    fn test_from() {
        let v = m().from("500 mg").unwrap();
        assert_value(&v, 500.0, "mg", "mass");
        assert!(m().from("5 alien").is_none());
        assert!(m().from("alien").is_none());
    }

    #[test]
    fn test_from_resolves_alias() {
        let v = m().from("3 kilometres").unwrap();
        assert_value(&v, 3.0, "km", "length");
    }

    #[test]
    fn test_to_from_value() {
        let m = m();
        let grams = m.from("20 g").unwrap();
        assert_value(&m.to(grams, "mg").unwrap(), 20_000.0, "mg", "mass");
    }

    #[test]
    fn test_to_from_text() {
        let v = m().to("15C", "K").unwrap();
        assert_value(&v, 288.15, "K", "temperature");
    }

    #[test]
    fn test_undefined_origin() {
        let m = m();
        assert_eq!(m.to(Origin::Missing, "g"), Err(ConversionError::UndefinedOrigin));
        assert_eq!(m.to(None::<Value>, "g"), Err(ConversionError::UndefinedOrigin));
        assert_eq!(m.to("lots of g", "g"), Err(ConversionError::UndefinedOrigin));
        assert_eq!(m.to("5 alien", "g"), Err(ConversionError::UndefinedOrigin));
    }

    #[test]
    fn test_unregistered_value_is_rejected() {
        let forged = Value::new(1.0, Unit::new("km"), Kind::new("mass"));
        assert_eq!(m().to(forged, "g"), Err(ConversionError::UndefinedOrigin));
        let unknown = Value::new(1.0, Unit::new("furlong"), Kind::new("length"));
        assert_eq!(m().to(unknown, "m"), Err(ConversionError::UndefinedOrigin));
    }

    #[test]
    fn test_undefined_conversion() {
        let m = m();
        assert_eq!(
            m.to("5 km", "zz"),
            Err(ConversionError::undefined_conversion("km", "zz"))
        );
        // Cross-kind
        assert_eq!(
            m.to("5 km", "kg"),
            Err(ConversionError::undefined_conversion("km", "kg"))
        );
        // Same kind, no path: formulas are not chained
        assert!(m.to("5 R", "C").is_err());
    }

    #[test]
    fn test_convert_renders() {
        let m = m();
        assert_eq!(m.convert("5 pounds", "oz"), "80.00 oz");
        assert_eq!(m.convert("5 km", "kg"), "undefined conversion from km to kg");
        assert_eq!(m.convert("", "kg"), "undefined origin");
    }

    #[test]
    fn test_exact_results() {
        let m = m().with_exact_results(true);
        assert_eq!(m.convert("5 pounds", "oz"), "80 oz");
        assert_eq!(m.convert("1 in", "cm"), "2.54 cm");

        let m = Measura::builtin().with_precision(0);
        assert_eq!(m.convert("5 pounds", "oz"), "80 oz");
    }

    #[test]
    fn test_composites() {
        let m = m();
        assert_value(&m.to("5' 2\"", "in").unwrap(), 62.0, "in", "length");
        assert_value(&m.to("5 lb 2 oz", "oz").unwrap(), 82.0, "oz", "mass");
    }

    #[test]
    fn test_area_unit_is_not_feet_and_inches() {
        let m = m();
        assert_value(&m.from("5 ft2").unwrap(), 5.0, "ft2", "area");
        assert_value(&m.to("5 ft2", "m2").unwrap(), 0.4645152, "m2", "area");
        assert_value(&m.to("5 ft 2 in", "in").unwrap(), 62.0, "in", "length");
    }

    #[test]
    fn test_overflowing_origin() {
        let m = m();
        assert!(m.from("1e999 m").is_none());
        assert_eq!(m.to("1e999 m", "m"), Err(ConversionError::UndefinedOrigin));
        assert_eq!(m.convert("-1e999 km", "m"), "undefined origin");
    }

    #[test]
    fn test_negative_zero_renders_unsigned() {
        let m = m();
        assert_eq!(m.convert("-0 m", "m"), "0.00 m");
        assert_eq!(m.convert("-0 C", "K"), "273.15 K");
        assert_eq!(m.with_exact_results(true).convert("-0 km", "m"), "0 m");
    }

    #[test]
    fn test_special_procedures() {
        let m = m();
        assert_value(&m.to("4 gas mark", "F").unwrap(), 350.0, "F", "temperature");
        assert_value(&m.to("375 F", "gas_mark").unwrap(), 5.0, "gas_mark", "temperature");
        // Outside the gas mark scale
        assert_eq!(
            m.to("1000 F", "gas mark"),
            Err(ConversionError::undefined_conversion("F", "gas mark"))
        );
    }

    #[test]
    fn test_get_conversion() {
        let m = m();
        assert_eq!(m.get_conversion("km", "m"), Ok(ConversionRule::Factor(1000.0)));
        assert_eq!(m.get_conversion("m", "km"), Ok(ConversionRule::Factor(0.001)));
        assert_eq!(m.get_conversion("kg", "kg"), Ok(ConversionRule::IDENTITY));
        assert_eq!(
            m.get_conversion("g", "zz"),
            Err(ConversionError::undefined_conversion("g", "zz"))
        );
        assert!(matches!(m.get_conversion("C", "K"), Ok(ConversionRule::Formula(_))));
    }

    #[test]
    fn test_introspection() {
        let m = m();
        assert_eq!(m.kind_of_unit("pounds").as_deref(), Some("mass"));
        assert_eq!(m.kind_of_unit("zz"), None);

        let units = m.units();
        assert_eq!(units[&Kind::new("mass")]["pounds"], Unit::new("lb"));
        assert!(units.contains_key(&Kind::new("fuel_economy")));
    }

    #[test]
    fn test_custom_config() {
        let json = r#"{
            "precision": 3,
            "allow_exact_results": true,
            "kinds": [
                { "name": "mass",
                  "units": [ { "unit": "kg", "aliases": ["kilo"] }, { "unit": "g" } ],
                  "conversions": [ { "edge": "kilo_to_g", "factor": 1000 } ] }
            ]
        }"#;
        let config = UnitsConfig::from_json_str(json).unwrap();
        let m = Measura::with_config(&config).unwrap();

        assert_eq!(m.convert("2 kilo", "g"), "2000 g");
        assert_eq!(m.convert("1 g", "kg"), "0.001 kg");
        assert!(m.from("5 lb").is_none());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(Measura::global(), Measura::global()));
        assert_eq!(Measura::global().convert("1 km", "m"), "1000.00 m");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Measura>();
    }
}
