mod error;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tf_controls::{
    Derivation, SweepDefinition, SweepResult, SweepSpacing, TransferFunctionModel, run_sweep,
};
use tf_poly::RationalFunction;
use tracing::debug;

use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "tf-cli")]
#[command(about = "Closed-loop transfer functions for a controller and cascaded plants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive C, P, L, W and Ed
    Derive {
        /// Path to the loop description (.json, .yaml or .yml)
        spec_path: PathBuf,
        /// Override a constant before deriving (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        overrides: Vec<(String, f64)>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate a loop description and check that every term evaluates
    Validate {
        /// Path to the loop description (.json, .yaml or .yml)
        spec_path: PathBuf,
    },
    /// Derive the closed loop across values of one constant
    Sweep {
        /// Path to the loop description (.json, .yaml or .yml)
        spec_path: PathBuf,
        /// Constant to sweep
        #[arg(long)]
        constant: String,
        /// Explicit comma-separated values
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["start", "end", "points", "log"])]
        values: Vec<f64>,
        /// First value of a generated range
        #[arg(long)]
        start: Option<f64>,
        /// Last value of a generated range
        #[arg(long)]
        end: Option<f64>,
        /// Number of generated values
        #[arg(long)]
        points: Option<usize>,
        /// Space generated values logarithmically
        #[arg(long)]
        log: bool,
        /// Override other constants first (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        overrides: Vec<(String, f64)>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive {
            spec_path,
            overrides,
            format,
        } => cmd_derive(&spec_path, &overrides, format),
        Commands::Validate { spec_path } => cmd_validate(&spec_path),
        Commands::Sweep {
            spec_path,
            constant,
            values,
            start,
            end,
            points,
            log,
            overrides,
            format,
        } => {
            let (definition, values) = if values.is_empty() {
                let definition = sweep_definition(&constant, start, end, points, log)?;
                let values = definition.generate_points();
                (Some(definition), values)
            } else {
                (None, values)
            };
            cmd_sweep(
                &spec_path,
                &constant,
                definition.as_ref(),
                &values,
                &overrides,
                format,
            )
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for {}: {e}", name.trim()))?;
    Ok((name.trim().to_string(), value))
}

fn sweep_definition(
    constant: &str,
    start: Option<f64>,
    end: Option<f64>,
    points: Option<usize>,
    log: bool,
) -> CliResult<SweepDefinition> {
    let (Some(start), Some(end), Some(points)) = (start, end, points) else {
        return Err(CliError::InvalidInput(
            "sweep needs --values or all of --start, --end and --points".to_string(),
        ));
    };
    let spacing = if log {
        SweepSpacing::Logarithmic
    } else {
        SweepSpacing::Linear
    };
    Ok(SweepDefinition::new(constant, start, end, points, spacing)?)
}

fn load_model(spec_path: &Path, overrides: &[(String, f64)]) -> CliResult<TransferFunctionModel> {
    let spec = tf_spec::load_spec(spec_path)?;
    let mut model = TransferFunctionModel::new(spec)?;
    for (name, value) in overrides {
        match model.set_constant(name, *value) {
            Ok(_) => {}
            // The constant table has already warned about the unknown name.
            Err(err) if err.is_recoverable() => {
                debug!(constant = %name, "--set override skipped");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(model)
}

fn cmd_derive(spec_path: &Path, overrides: &[(String, f64)], format: OutputFormat) -> CliResult<()> {
    let model = load_model(spec_path, overrides)?;
    let derivation = model.derive()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&derivation)?),
        OutputFormat::Text => print_derivation(&derivation, model.loop_variable().name()),
    }
    Ok(())
}

fn cmd_validate(spec_path: &Path) -> CliResult<()> {
    println!("Validating loop description: {}", spec_path.display());
    let model = load_model(spec_path, &[])?;
    model.derive()?;
    println!(
        "✓ Loop description is valid ({} constants, {} plants)",
        model.constants().len(),
        model.spec().plants.len()
    );
    Ok(())
}

fn cmd_sweep(
    spec_path: &Path,
    constant: &str,
    definition: Option<&SweepDefinition>,
    values: &[f64],
    overrides: &[(String, f64)],
    format: OutputFormat,
) -> CliResult<()> {
    let model = load_model(spec_path, overrides)?;
    let result = run_sweep(&model, constant, values)?;

    match format {
        OutputFormat::Json => {
            let rows = sweep_rows(&result);
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            let var = model.loop_variable().name();
            if let Some(definition) = definition {
                println!("{definition}");
            }
            println!(
                "Sweep of {} ({} points, {} failed)",
                result.constant,
                result.points.len(),
                result.num_failed()
            );
            for point in &result.points {
                match &point.result {
                    Ok(d) => println!(
                        "  {constant} = {}: W({var}) = {}",
                        point.value,
                        d.closed_loop.display(var)
                    ),
                    Err(err) => println!("  {constant} = {}: error: {err}", point.value),
                }
            }
        }
    }
    Ok(())
}

fn print_derivation(derivation: &Derivation, var: &str) {
    let rows: [(&str, &RationalFunction); 5] = [
        ("C", &derivation.controller),
        ("P", &derivation.plants),
        ("L", &derivation.open_loop),
        ("W", &derivation.closed_loop),
        ("Ed", &derivation.disturbance),
    ];
    for (label, tf) in rows {
        println!("{label:>2}({var}) = {}", tf.display(var));
    }
}

#[derive(Serialize)]
struct SweepRow<'a> {
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    closed_loop: Option<&'a RationalFunction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn sweep_rows(result: &SweepResult) -> Vec<SweepRow<'_>> {
    result
        .points
        .iter()
        .map(|point| match &point.result {
            Ok(d) => SweepRow {
                value: point.value,
                closed_loop: Some(&d.closed_loop),
                error: None,
            },
            Err(err) => SweepRow {
                value: point.value,
                closed_loop: None,
                error: Some(err.to_string()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_parsing() {
        assert_eq!(parse_assignment("Kp=2.5").unwrap(), ("Kp".to_string(), 2.5));
        assert_eq!(parse_assignment(" T = -1e-3 ").unwrap(), ("T".to_string(), -1e-3));
        assert!(parse_assignment("Kp").is_err());
        assert!(parse_assignment("Kp=abc").is_err());
    }

    #[test]
    fn sweep_definition_needs_full_range() {
        assert!(sweep_definition("Kp", Some(1.0), None, Some(3), false).is_err());
        let definition = sweep_definition("Kp", Some(1.0), Some(3.0), Some(3), true).unwrap();
        assert_eq!(definition.spacing, SweepSpacing::Logarithmic);
        assert_eq!(definition.to_string(), "sweep Kp from 1 to 3 (3 points, logarithmic)");
        let definition = sweep_definition("Kp", Some(1.0), Some(3.0), Some(3), false).unwrap();
        assert_eq!(definition.generate_points(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn cli_parses_sweep_values() {
        let cli = Cli::try_parse_from([
            "tf-cli", "sweep", "loop.json", "--constant", "Kp", "--values", "1,2,4",
        ])
        .unwrap();
        match cli.command {
            Commands::Sweep { values, constant, .. } => {
                assert_eq!(constant, "Kp");
                assert_eq!(values, vec![1.0, 2.0, 4.0]);
            }
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn cli_rejects_values_with_range() {
        let parsed = Cli::try_parse_from([
            "tf-cli", "sweep", "loop.json", "--constant", "Kp", "--values", "1", "--start", "0",
        ]);
        assert!(parsed.is_err());
    }
}
