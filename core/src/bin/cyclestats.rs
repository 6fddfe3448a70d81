use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cyclestats_core::{analyze_activity, cli, load_config, parse_streams_json, AnalysisConfig, AnalysisRequest};

#[derive(Parser, Debug)]
#[command(author, version, about = "Power/HR analysis of an activity stream file", long_about = None)]
struct Args {
    /// Stream JSON fra leverandøren (liste- eller nøkkel-form)
    streams: PathBuf,

    /// Functional threshold power (W); gir NP/IF/TSS
    #[arg(long)]
    ftp: Option<f64>,

    /// Kroppsvekt (kg); gir W/kg for best efforts
    #[arg(long)]
    weight: Option<f64>,

    /// Analysekonfig (JSON). Mangler filen brukes default.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skriv rapporten som JSON i stedet for tekst
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let contents = fs::read_to_string(&args.streams)
        .with_context(|| format!("failed to read {}", args.streams.display()))?;
    let raw = parse_streams_json(&contents)
        .with_context(|| format!("failed to parse streams in {}", args.streams.display()))?;
    info!("loaded {} channels from {}", raw.channels().count(), args.streams.display());

    let request = AnalysisRequest {
        ftp: args.ftp,
        weight_kg: args.weight,
    };
    let report = analyze_activity(&raw, &request, &cfg).context("analysis failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        cli::print_report(&report);
    }
    Ok(())
}
