use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info, warn};

use crate::cli::{display_or_none, MatchingArgs, OutputFormat};
use crate::core::types::CalibrationKind;
use crate::matching::engine::{MatchResult, MatchingEngine};
use crate::parsing;
use crate::utils::progress::ProgressTracker;

#[derive(Args)]
pub struct BatchArgs {
    /// Light frames (JSON object keyed by frame, or TSV/CSV table)
    #[arg(required = true)]
    pub lights: PathBuf,

    /// Calibration pool (JSON object keyed by frame, or TSV/CSV table)
    #[arg(long, required = true)]
    pub pool: PathBuf,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,

    #[command(flatten)]
    pub matching: MatchingArgs,
}

/// Matches for one light frame
struct BatchRow<'a> {
    light: &'a str,
    result: MatchResult<'a>,
}

/// Execute batch subcommand
///
/// # Errors
///
/// Returns an error if the inputs or config cannot be loaded. Lights that
/// find no calibration frame are reported, not treated as failures.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: BatchArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = args.matching.to_config()?;

    let lights = parsing::load_lights(&args.lights)
        .with_context(|| format!("Failed to read light frames {}", args.lights.display()))?;
    let pool = parsing::load_pool(&args.pool)
        .with_context(|| format!("Failed to read pool {}", args.pool.display()))?;

    info!(
        "Matching {} light frames against {} calibration frames",
        lights.len(),
        pool.len()
    );

    let engine = MatchingEngine::with_config(&pool, config);
    let mut tracker =
        ProgressTracker::new(Some(lights.len()), "Matching", "lights", args.progress);

    let mut rows = Vec::with_capacity(lights.len());
    for (light_id, light) in lights.iter() {
        tracker.set_status(light_id);
        let result = engine.find_all(light);
        // Log lines share stderr with the bar
        tracker.suspend(|| {
            debug!(
                "{light_id}: dark={} bias={} flat={}",
                display_or_none(result.dark),
                display_or_none(result.bias),
                display_or_none(result.flat)
            );
        });
        rows.push(BatchRow {
            light: light_id,
            result,
        });
        tracker.update(1, None);
    }
    tracker.finish();

    log_summary(&rows);

    match format {
        OutputFormat::Text => print_text(&rows),
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Tsv => print_tsv(&rows),
    }

    Ok(())
}

fn log_summary(rows: &[BatchRow<'_>]) {
    let complete = rows.iter().filter(|r| r.result.is_complete()).count();
    info!("{complete}/{} light frames fully matched", rows.len());

    for kind in CalibrationKind::ALL {
        let missing = rows
            .iter()
            .filter(|r| r.result.get(kind).is_none())
            .count();
        if missing > 0 {
            warn!("{missing} light frames have no {kind}");
        }
    }
}

fn print_text(rows: &[BatchRow<'_>]) {
    let width = rows.iter().map(|r| r.light.len()).max().unwrap_or(0);
    for row in rows {
        println!(
            "{:<width$}  dark: {}  bias: {}  flat: {}",
            row.light,
            display_or_none(row.result.dark),
            display_or_none(row.result.bias),
            display_or_none(row.result.flat),
        );
    }
}

fn print_json(rows: &[BatchRow<'_>]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "light": row.light,
                "dark": row.result.dark,
                "bias": row.result.bias,
                "flat": row.result.flat,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(rows: &[BatchRow<'_>]) {
    println!("light\tdark\tbias\tflat");
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}",
            row.light,
            row.result.dark.unwrap_or(""),
            row.result.bias.unwrap_or(""),
            row.result.flat.unwrap_or(""),
        );
    }
}
