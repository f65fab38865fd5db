//! Oven temperature procedures
//!
//! UK gas marks are a stepped scale: from mark 1 upwards each mark adds 25 °F
//! to a 250 °F base, while the fractional marks below 1 are spaced unevenly.
//! Neither direction is a factor or an invertible formula, so both are
//! registered as special procedures between `F` and `gas_mark`.

use measura_plugin::{ProcedureMeta, SpecialProcedure};

/// (gas mark, degrees Fahrenheit) breakpoints, linear in between
const GAS_MARK_SCALE: [(f64, f64); 4] = [
    (0.25, 225.0),
    (0.5, 250.0),
    (1.0, 275.0),
    (10.0, 500.0),
];

/// Piecewise-linear lookup over the scale; `input` and `output` pick the columns
fn interpolate(x: f64, input: fn(&(f64, f64)) -> f64, output: fn(&(f64, f64)) -> f64) -> Option<f64> {
    GAS_MARK_SCALE.windows(2).find_map(|pair| {
        let (lo, hi) = (&pair[0], &pair[1]);
        if !(input(lo)..=input(hi)).contains(&x) {
            return None;
        }
        let t = (x - input(lo)) / (input(hi) - input(lo));
        Some(output(lo) + t * (output(hi) - output(lo)))
    })
}

pub(crate) fn mark_to_fahrenheit(mark: f64) -> Option<f64> {
    interpolate(mark, |p| p.0, |p| p.1)
}

pub(crate) fn fahrenheit_to_mark(f: f64) -> Option<f64> {
    interpolate(f, |p| p.1, |p| p.0)
}

// ============ gas_mark_to_fahrenheit ============

pub struct GasMarkToFahrenheit;

static GAS_MARK_TO_F_EXAMPLES: [&str; 3] = [
    "4 gas_mark -> 350 F",
    "6 gas_mark -> 400 F",
    "0.5 gas_mark -> 250 F",
];

impl SpecialProcedure for GasMarkToFahrenheit {
    fn meta(&self) -> ProcedureMeta {
        ProcedureMeta {
            name: "gas_mark_to_fahrenheit",
            description: "Convert UK gas mark (0.25 to 10) to degrees Fahrenheit",
            from: "gas_mark",
            to: "F",
            examples: &GAS_MARK_TO_F_EXAMPLES,
            category: "kitchen",
        }
    }

    fn call(&self, magnitude: f64) -> Option<f64> {
        mark_to_fahrenheit(magnitude)
    }
}

// ============ fahrenheit_to_gas_mark ============

pub struct FahrenheitToGasMark;

static F_TO_GAS_MARK_EXAMPLES: [&str; 3] = [
    "350 F -> 4 gas_mark",
    "425 F -> 7 gas_mark",
    "225 F -> 0.25 gas_mark",
];

impl SpecialProcedure for FahrenheitToGasMark {
    fn meta(&self) -> ProcedureMeta {
        ProcedureMeta {
            name: "fahrenheit_to_gas_mark",
            description: "Convert degrees Fahrenheit (225 to 500) to UK gas mark",
            from: "F",
            to: "gas_mark",
            examples: &F_TO_GAS_MARK_EXAMPLES,
            category: "kitchen",
        }
    }

    fn call(&self, magnitude: f64) -> Option<f64> {
        fahrenheit_to_mark(magnitude)
    }
}
