//! Measura CLI
//!
//! Commands:
//! - convert: Convert a quantity to a unit
//! - parse: Parse a quantity into magnitude, unit and kind
//! - units: List kinds, units and aliases
//! - rule: Show the rule between two units
//! - procedures: List special conversion procedures
//!
//! With no command, reads `<quantity> -> <unit>` lines from stdin.

mod args;

use args::{Cli, Command};
use clap::Parser;
use measura::{ConfigError, ConversionError, Measura, UnitsConfig, Value};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON form of one conversion
#[derive(Debug, Serialize)]
struct Report<'a> {
    input: &'a str,
    target: &'a str,
    display: String,
    #[serde(flatten)]
    outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Value(Value),
    Error(ConversionError),
}

impl From<Result<Value, ConversionError>> for Outcome {
    fn from(result: Result<Value, ConversionError>) -> Self {
        match result {
            Ok(v) => Outcome::Value(v),
            Err(e) => Outcome::Error(e),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(&cli, stdin.lock(), stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "measura failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG, falling back to warnings only; always to stderr
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn engine(cli: &Cli) -> Result<Measura, CliError> {
    let mut measura = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading unit tables");
            Measura::with_config(&UnitsConfig::from_path(path)?)?
        }
        None => Measura::global().clone(),
    };
    if let Some(precision) = cli.precision {
        measura = measura.with_precision(precision);
    }
    if cli.exact {
        measura = measura.with_exact_results(true);
    }
    Ok(measura)
}

/// Run one invocation; `Ok(false)` when any conversion failed
fn run(cli: &Cli, input: impl BufRead, mut out: impl Write) -> Result<bool, CliError> {
    let measura = engine(cli)?;

    match &cli.command {
        Some(Command::Convert { input, target }) => convert(&measura, cli.json, input, target, &mut out),
        Some(Command::Parse { input }) => {
            let value = measura.from(input);
            if cli.json {
                writeln!(out, "{}", serde_json::to_string(&value)?)?;
            } else {
                match &value {
                    Some(v) => writeln!(out, "{} {} ({})", v.magnitude(), v.unit(), v.kind())?,
                    None => writeln!(out, "{}", ConversionError::UndefinedOrigin)?,
                }
            }
            Ok(value.is_some())
        }
        Some(Command::Units { kind }) => {
            let mut table = measura.units();
            if let Some(kind) = kind {
                table.retain(|k, _| k.as_str() == kind.as_str());
            }
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&table)?)?;
            } else {
                let registry = measura.units_tables().registry();
                for (kind, aliases) in &table {
                    writeln!(out, "{}:", kind)?;
                    for unit in registry.units_of(kind) {
                        let names: Vec<&str> = registry
                            .aliases_of(unit)
                            .into_iter()
                            .filter(|a| *a != unit.as_str() && aliases.contains_key(*a))
                            .collect();
                        writeln!(out, "  {} {}", unit, names.join(", "))?;
                    }
                }
            }
            Ok(!table.is_empty())
        }
        Some(Command::Rule { from, to }) => {
            let rule = measura.get_conversion(from, to);
            if cli.json {
                let json = match &rule {
                    Ok(r) => serde_json::to_string(r)?,
                    Err(e) => serde_json::to_string(e)?,
                };
                writeln!(out, "{}", json)?;
            } else {
                match &rule {
                    Ok(r) => writeln!(out, "{}", r)?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            Ok(rule.is_ok())
        }
        Some(Command::Procedures { category }) => {
            let list = measura.procedures().list(category.as_deref());
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&list)?)?;
            } else {
                for meta in &list {
                    writeln!(out, "{} ({} -> {}): {}", meta.name, meta.from, meta.to, meta.description)?;
                }
            }
            Ok(true)
        }
        None => line_mode(&measura, cli.json, input, &mut out),
    }
}

fn convert(measura: &Measura, json: bool, input: &str, target: &str, out: &mut impl Write) -> Result<bool, CliError> {
    let result = measura.to(input, target);
    let ok = result.is_ok();
    if json {
        let report = Report {
            input,
            target,
            display: measura.as_string(&result),
            outcome: result.into(),
        };
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        writeln!(out, "{}", measura.as_string(&result))?;
    }
    Ok(ok)
}

/// `<quantity> -> <unit>`
fn split_request(line: &str) -> Option<(&str, &str)> {
    let (input, target) = line.split_once("->")?;
    let (input, target) = (input.trim(), target.trim());
    (!input.is_empty() && !target.is_empty()).then_some((input, target))
}

fn line_mode(measura: &Measura, json: bool, input: impl BufRead, out: &mut impl Write) -> Result<bool, CliError> {
    let mut all_ok = true;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match split_request(line) {
            Some((quantity, target)) => {
                all_ok &= convert(measura, json, quantity, target, out)?;
            }
            None => {
                warn!(line, "expected '<quantity> -> <unit>'");
                writeln!(out, "expected '<quantity> -> <unit>': {}", line)?;
                all_ok = false;
            }
        }
        out.flush()?;
    }

    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["measura"];
        argv.extend_from_slice(args);
        let mut cli = Cli::try_parse_from(argv).unwrap();
        // Ignore MEASURA_CONFIG from the environment running the tests
        cli.config = None;
        cli
    }

    fn run_to_string(cli: &Cli, stdin: &str) -> (bool, String) {
        let mut out = Vec::new();
        let ok = run(cli, stdin.as_bytes(), &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_split_request() {
        assert_eq!(split_request("5 pounds -> oz"), Some(("5 pounds", "oz")));
        assert_eq!(split_request("  15C->K "), Some(("15C", "K")));
        assert_eq!(split_request("5 pounds oz"), None);
        assert_eq!(split_request("-> oz"), None);
    }

    #[test]
    fn test_convert_text() {
        let (ok, out) = run_to_string(&cli(&["convert", "5 pounds", "oz"]), "");
        assert!(ok);
        assert_eq!(out, "80.00 oz\n");
    }

    #[test]
    fn test_convert_flags() {
        let (_, out) = run_to_string(&cli(&["--exact", "convert", "5 pounds", "oz"]), "");
        assert_eq!(out, "80 oz\n");
        let (_, out) = run_to_string(&cli(&["--precision", "1", "convert", "1 in", "cm"]), "");
        assert_eq!(out, "2.5 cm\n");
    }

    #[test]
    fn test_convert_json() {
        let (ok, out) = run_to_string(&cli(&["--json", "convert", "20 g", "mg"]), "");
        assert!(ok);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["display"], "20000.00 mg");
        assert_eq!(json["value"]["unit"], "mg");
        assert_eq!(json["value"]["kind"], "mass");
    }

    #[test]
    fn test_convert_json_error() {
        let (ok, out) = run_to_string(&cli(&["--json", "convert", "5 km", "kg"]), "");
        assert!(!ok);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["error"]["code"], "UNDEFINED_CONVERSION");
        assert_eq!(json["display"], "undefined conversion from km to kg");
    }

    #[test]
    fn test_rule() {
        let (ok, out) = run_to_string(&cli(&["rule", "g", "zz"]), "");
        assert!(!ok);
        assert_eq!(out, "undefined conversion from g to zz\n");

        let (ok, _) = run_to_string(&cli(&["rule", "km", "m"]), "");
        assert!(ok);
    }

    #[test]
    fn test_parse() {
        let (ok, out) = run_to_string(&cli(&["parse", "5' 2\""]), "");
        assert!(ok);
        assert_eq!(out, "62 in (length)\n");

        let (ok, _) = run_to_string(&cli(&["parse", "5 alien"]), "");
        assert!(!ok);
    }

    #[test]
    fn test_units_for_kind() {
        let (ok, out) = run_to_string(&cli(&["units", "mass"]), "");
        assert!(ok);
        assert!(out.starts_with("mass:\n"));
        assert!(out.contains("  lb lbs, pound, pounds\n"));

        let (ok, _) = run_to_string(&cli(&["units", "nothing"]), "");
        assert!(!ok);
    }

    #[test]
    fn test_procedures() {
        let (ok, out) = run_to_string(&cli(&["procedures", "kitchen"]), "");
        assert!(ok);
        assert!(out.contains("gas_mark_to_fahrenheit"));
    }

    #[test]
    fn test_line_mode() {
        let stdin = "5 pounds -> oz\n\n# comment\n15C -> K\nnonsense\n";
        let (ok, out) = run_to_string(&cli(&[]), stdin);
        assert!(!ok);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "80.00 oz",
                "288.15 K",
                "expected '<quantity> -> <unit>': nonsense",
            ]
        );
    }
}
