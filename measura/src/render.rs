//! Display rendering for conversion results

use measura_core::{ConversionError, Value};
use measura_units::Settings;

/// Renders values and errors using display settings
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    settings: Settings,
}

impl Renderer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Magnitude at the configured precision, or without decimals when
    /// exact results are allowed and the magnitude is integral.
    ///
    /// Zero never carries a sign, including negatives that round to zero.
    pub fn magnitude(&self, magnitude: f64) -> String {
        let text = if self.settings.allow_exact_results && magnitude.is_finite() && magnitude.fract() == 0.0 {
            format!("{:.0}", magnitude)
        } else {
            format!("{:.*}", self.settings.precision, magnitude)
        };
        match text.strip_prefix('-') {
            Some(unsigned) if unsigned.bytes().all(|b| b == b'0' || b == b'.') => unsigned.to_string(),
            _ => text,
        }
    }

    pub fn value(&self, value: &Value) -> String {
        format!("{} {}", self.magnitude(value.magnitude()), value.unit())
    }

    pub fn result(&self, result: &Result<Value, ConversionError>) -> String {
        match result {
            Ok(value) => self.value(value),
            Err(e) => e.to_string(),
        }
    }
}
