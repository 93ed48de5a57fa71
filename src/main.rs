//! Organoid Bio-Computer - command line entry point
//!
//! Runs one analysis: reference slider defaults, optionally replaced by a JSON
//! signals file and `--set NAME=VALUE` adjustments.
//!
//! Usage:
//!   organoid --model my_best_model.onnx --set AF7=1.0 --set TP9=1.0

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use organoid_core::api::{self, AnalysisService};
use organoid_core::constants::{APP_NAME, APP_VERSION};
use organoid_core::logic::config::AppConfig;
use organoid_core::logic::session::SessionState;
use organoid_core::SignalVector;

#[derive(Parser, Debug)]
#[command(name = "organoid", version, about = "Analyze simulated organoid signals")]
struct Args {
    /// Classifier artifact (.onnx or .json); overrides ORGANOID_MODEL_PATH
    #[arg(short, long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Expected SHA-256 of the artifact
    #[arg(long, value_name = "HEX")]
    sha256: Option<String>,

    /// JSON file with signal values; missing fields keep the slider defaults
    #[arg(short, long, value_name = "FILE")]
    signals: Option<PathBuf>,

    /// Set one signal, e.g. `--set Beta=0.0` (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(String, f64)>,

    /// Total power at or above which ACTIVE is forced
    #[arg(long, value_name = "POWER")]
    threshold: Option<f64>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,

    /// Print engine status and exit
    #[arg(long)]
    status: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", raw))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for {}: {}", name, e))?;
    Ok((name.trim().to_string(), value))
}

fn load_signals(args: &Args) -> Result<SignalVector> {
    let mut signals = match &args.signals {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading signals from {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing signals in {}", path.display()))?
        }
        None => SignalVector::reference_defaults(),
    };

    for (name, value) in &args.assignments {
        signals = signals
            .with_signal(name, *value)
            .with_context(|| format!("applying --set {}={}", name, value))?;
    }

    Ok(signals)
}

/// Layer the command-line flags over the environment configuration
fn apply_overrides(config: &mut AppConfig, args: &Args) -> Result<()> {
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    if let Some(sha256) = &args.sha256 {
        config.model_sha256 = Some(sha256.clone());
    }
    if let Some(threshold) = args.threshold {
        config.engine.force_power_threshold = threshold;
    }
    config.engine.validate().context("invalid engine configuration")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let mut config = AppConfig::load();
    apply_overrides(&mut config, &args)?;

    let service = api::install(AnalysisService::from_config(&config));

    if args.status {
        let status = serde_json::to_string_pretty(&service.status()).context("formatting status")?;
        println!("{}", status);
        return Ok(());
    }

    let signals = load_signals(&args)?;

    let mut session = SessionState::new();
    service.start(&mut session).context("cannot start experiment")?;

    let derived = service.preview(&signals);
    log::info!(
        "Computed features: total_power={:.2}, syn_ratio={:.2}",
        derived.total_power,
        derived.syn_ratio
    );

    let response = service
        .analyze(&mut session, signals)
        .context("analysis failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&response).context("formatting response")?;
        println!("{}", json);
    } else {
        println!("Total Input Power: {:.2}", response.derived.total_power);
        println!("Synapse Ratio:     {:.2}", response.derived.syn_ratio);
        println!("{}", response.report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("AF7=0.5").unwrap(), ("AF7".to_string(), 0.5));
        assert_eq!(parse_assignment(" Beta = 0 ").unwrap(), ("Beta".to_string(), 0.0));
        assert!(parse_assignment("AF7").is_err());
        assert!(parse_assignment("AF7=high").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "organoid", "--model", "m.json", "--set", "AF7=1.0", "--set", "TP9=0.2", "--json",
        ]).unwrap();
        assert_eq!(args.model, Some(PathBuf::from("m.json")));
        assert_eq!(args.assignments.len(), 2);
        assert!(args.json);
    }

    #[test]
    fn test_threshold_flag() {
        let mut config = AppConfig::default();
        let args = Args::try_parse_from(["organoid", "--threshold", "3.0"]).unwrap();
        apply_overrides(&mut config, &args).unwrap();
        assert_eq!(config.engine.force_power_threshold, 3.0);

        let mut config = AppConfig::default();
        let args = Args::try_parse_from(["organoid", "--threshold", "NaN"]).unwrap();
        assert!(apply_overrides(&mut config, &args).is_err());
    }

    #[test]
    fn test_load_signals_applies_assignments() {
        let args = Args::try_parse_from(["organoid", "--set", "Membrane=0.1"]).unwrap();
        let signals = load_signals(&args).unwrap();
        assert_eq!(signals.membrane(), 0.1);
        assert_eq!(signals.af7(), 0.90);

        let bad = Args::try_parse_from(["organoid", "--set", "Membrane=1.1"]).unwrap();
        assert!(load_signals(&bad).is_err());
    }
}
