//! Quantity string parsing - "5 km", "15C", "5' 2\"", "5 lb 2 oz"
//!
//! Composite notations are tried first; each one folds its two parts into
//! a single magnitude of its base unit. Anything else is a leading decimal
//! number followed by a unit alias.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// A recognised two-part notation
struct CompositeDetector {
    name: &'static str,
    pattern: Regex,
    /// Alias of the unit the combined magnitude is expressed in
    base_unit: &'static str,
    /// (major, minor) -> magnitude in `base_unit`
    combine: fn(f64, f64) -> f64,
}

const NUMBER: &str = r"\d+(?:\.\d+)?|\.\d+";
const INCH_MARKS: &str = r#""|''|inches|inch|in"#;

static DETECTORS: LazyLock<Vec<CompositeDetector>> = LazyLock::new(|| {
    vec![
        CompositeDetector {
            name: "feet_inches",
            pattern: composite_pattern(r#"'|feet|foot|ft"#, INCH_MARKS, false),
            base_unit: "in",
            combine: |feet, inches| feet * 12.0 + inches,
        },
        // 5'2 only: a bare trailing number after a word unit may be part of
        // another unit name, as in ft2
        CompositeDetector {
            name: "feet_mark_inches",
            pattern: composite_pattern("'", INCH_MARKS, true),
            base_unit: "in",
            combine: |feet, inches| feet * 12.0 + inches,
        },
        CompositeDetector {
            name: "pounds_ounces",
            pattern: composite_pattern(r"lbs|lb|pounds|pound", r"ounces|ounce|oz", false),
            base_unit: "lb",
            combine: |pounds, ounces| pounds + ounces / 16.0,
        },
    ]
});

/// `<sign><major> <major unit> <minor> <minor unit>`, whole string
fn composite_pattern(major_unit: &str, minor_unit: &str, minor_unit_optional: bool) -> Regex {
    let optional = if minor_unit_optional { "?" } else { "" };
    let pattern = format!(
        r"^\s*(?P<sign>[+-]?)(?P<major>{n})\s*(?:{major_unit})\s*(?P<minor>{n})\s*(?:{minor_unit}){optional}\s*$",
        n = NUMBER,
    );
    // The pattern is assembled from constants above
    Regex::new(&pattern).unwrap_or_else(|e| unreachable!("invalid composite pattern: {e}"))
}

fn detect_composite(input: &str) -> Option<(f64, String)> {
    DETECTORS.iter().find_map(|detector| {
        let caps = detector.pattern.captures(input)?;
        let major: f64 = caps.name("major")?.as_str().parse().ok()?;
        let minor: f64 = caps.name("minor")?.as_str().parse().ok()?;
        let magnitude = (detector.combine)(major, minor);
        let magnitude = if caps.name("sign").map(|s| s.as_str()) == Some("-") {
            -magnitude
        } else {
            magnitude
        };
        trace!(detector = detector.name, input, magnitude, "composite quantity");
        magnitude
            .is_finite()
            .then(|| (magnitude, detector.base_unit.to_string()))
    })
}

/// Length in bytes of the leading decimal number of `s`, if any.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// exponent only when digits follow it (so "5 em" keeps its unit).
fn numeric_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits > 0 || frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    Some(end)
}

/// Split a quantity string into a magnitude and a unit alias.
///
/// Returns `None` when the string does not start with a number or the
/// number overflows. The alias is not checked against any registry here.
pub fn parse_quantity(input: &str) -> Option<(f64, String)> {
    let s = input.trim();

    if let Some(composite) = detect_composite(s) {
        return Some(composite);
    }

    let len = numeric_prefix_len(s)?;
    let magnitude: f64 = s[..len].parse().ok()?;
    if !magnitude.is_finite() {
        trace!(input, "magnitude out of range");
        return None;
    }
    let alias = s[len..].trim();
    trace!(input, magnitude, alias, "decimal quantity");
    Some((magnitude, alias.to_string()))
}
