use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use crate::cli::{display_or_none, KindSelection, MatchingArgs, OutputFormat};
use crate::core::types::CalibrationKind;
use crate::matching::engine::MatchingEngine;
use crate::parsing;

#[derive(Args)]
pub struct MatchArgs {
    /// Light frame metadata (JSON object, or a one-row TSV/CSV table)
    #[arg(required = true)]
    pub light: PathBuf,

    /// Calibration pool (JSON object keyed by frame, or TSV/CSV table)
    #[arg(long, required = true)]
    pub pool: PathBuf,

    /// Calibration kinds to search for
    #[arg(long, value_enum, default_value = "all")]
    pub kind: KindSelection,

    #[command(flatten)]
    pub matching: MatchingArgs,
}

/// Execute match subcommand
///
/// # Errors
///
/// Returns an error if the inputs or config cannot be loaded. Finding no
/// calibration frame is not an error.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MatchArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = args.matching.to_config()?;

    let light = parsing::load_light(&args.light)
        .with_context(|| format!("Failed to read light frame {}", args.light.display()))?;
    let pool = parsing::load_pool(&args.pool)
        .with_context(|| format!("Failed to read pool {}", args.pool.display()))?;

    debug!(
        "Loaded light with {} fields and pool of {} frames",
        light.len(),
        pool.len()
    );
    if pool.is_empty() {
        info!("Calibration pool is empty, nothing can match");
    }

    let engine = MatchingEngine::with_config(&pool, config);
    let matches: Vec<(CalibrationKind, Option<&str>)> = args
        .kind
        .kinds()
        .into_iter()
        .map(|kind| (kind, engine.find(&light, kind)))
        .collect();

    for (kind, id) in &matches {
        debug!("{kind}: {}", display_or_none(*id));
    }

    let light_name = args.light.display().to_string();
    match format {
        OutputFormat::Text => print_text(&light_name, &matches),
        OutputFormat::Json => print_json(&light_name, &matches)?,
        OutputFormat::Tsv => print_tsv(&light_name, &matches),
    }

    Ok(())
}

fn print_text(light: &str, matches: &[(CalibrationKind, Option<&str>)]) {
    println!("Light: {light}");
    for (kind, id) in matches {
        println!("  {kind}: {}", display_or_none(*id));
    }
}

fn print_json(light: &str, matches: &[(CalibrationKind, Option<&str>)]) -> anyhow::Result<()> {
    let mut output = serde_json::Map::new();
    output.insert("light".to_string(), serde_json::json!(light));
    for (kind, id) in matches {
        output.insert(kind.to_string(), serde_json::json!(id));
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(output))?
    );
    Ok(())
}

fn print_tsv(light: &str, matches: &[(CalibrationKind, Option<&str>)]) {
    let header: Vec<String> = matches.iter().map(|(kind, _)| kind.to_string()).collect();
    println!("light\t{}", header.join("\t"));
    let row: Vec<&str> = matches.iter().map(|(_, id)| id.unwrap_or("")).collect();
    println!("{light}\t{}", row.join("\t"));
}
