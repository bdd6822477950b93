use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::metadata::FrameMetadata;
use crate::core::types::{
    HEADER_CAMERA, HEADER_DATE, HEADER_EXPOSURESECONDS, HEADER_FILTER, HEADER_SETTEMP,
};
use crate::matching::classify::frame_type;
use crate::parsing;

#[derive(Args)]
pub struct ShowArgs {
    /// Calibration pool (JSON object keyed by frame, or TSV/CSV table)
    #[arg(required = true)]
    pub pool: PathBuf,
}

/// One pool entry as the matchers see it
#[derive(Debug, Serialize)]
struct FrameSummary<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    frame_type: String,
    camera: Option<String>,
    exposureseconds: Option<f64>,
    settemp: Option<f64>,
    filter: Option<String>,
    date: Option<String>,
}

impl<'a> FrameSummary<'a> {
    fn new(id: &'a str, meta: &FrameMetadata) -> Self {
        Self {
            id,
            frame_type: frame_type(meta).map_or_else(|| "unknown".to_string(), |t| t.to_string()),
            camera: meta.get_str(HEADER_CAMERA),
            exposureseconds: meta.get_f64(HEADER_EXPOSURESECONDS),
            settemp: meta.get_f64(HEADER_SETTEMP),
            filter: meta.get_str(HEADER_FILTER),
            date: meta.get_str(HEADER_DATE),
        }
    }
}

/// Execute show subcommand
///
/// # Errors
///
/// Returns an error if the pool cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let pool = parsing::load_pool(&args.pool)
        .with_context(|| format!("Failed to read pool {}", args.pool.display()))?;

    let summaries: Vec<FrameSummary<'_>> = pool
        .iter()
        .map(|(id, meta)| FrameSummary::new(id, meta))
        .collect();

    match format {
        OutputFormat::Text => print_text(&summaries),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Tsv => print_tsv(&summaries),
    }

    Ok(())
}

fn opt_text<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

fn print_text(summaries: &[FrameSummary<'_>]) {
    println!("Calibration pool: {} frames", summaries.len());
    println!("{}", "=".repeat(60));
    for s in summaries {
        println!("\n{}", s.id);
        println!("  Type: {}", s.frame_type);
        println!("  Camera: {}", opt_text(s.camera.as_ref()));
        println!("  Exposure: {}", opt_text(s.exposureseconds.as_ref()));
        println!("  Set temp: {}", opt_text(s.settemp.as_ref()));
        println!("  Filter: {}", opt_text(s.filter.as_ref()));
        println!("  Date: {}", opt_text(s.date.as_ref()));
    }
}

fn print_tsv(summaries: &[FrameSummary<'_>]) {
    println!("id\ttype\tcamera\texposureseconds\tsettemp\tfilter\tdate");
    for s in summaries {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            s.id,
            s.frame_type,
            s.camera.as_deref().unwrap_or(""),
            s.exposureseconds.map(|v| v.to_string()).unwrap_or_default(),
            s.settemp.map(|v| v.to_string()).unwrap_or_default(),
            s.filter.as_deref().unwrap_or(""),
            s.date.as_deref().unwrap_or(""),
        );
    }
}
