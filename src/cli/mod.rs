//! Command-line interface for calib-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Find the dark, bias, and flat for one light frame
//! - **batch**: Match every light frame in a file against one pool
//! - **show**: List a calibration pool with each frame's classification
//!
//! ## Usage
//!
//! ```text
//! # Match one light frame against a pool of masters
//! calib-solver match light.json --pool masters.json
//!
//! # Only the flat, allowing flats up to a week old
//! calib-solver match light.json --pool masters.tsv --kind flat --date-tolerance-days 7
//!
//! # Match a whole night with a progress bar, TSV output for scripting
//! calib-solver batch lights.tsv --pool masters.json --progress --format tsv
//!
//! # Inspect what the pool contains
//! calib-solver show masters.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::core::types::CalibrationKind;
use crate::matching::config::MatchingConfig;

pub mod batch;
pub mod match_light;
pub mod show;

#[derive(Parser)]
#[command(name = "calib-solver")]
#[command(version)]
#[command(about = "Select matching dark, bias, and flat frames for astrophotography lights")]
#[command(
    long_about = "calib-solver pairs light frames with calibration frames from a pool of raw or master darks, biases, and flats.\n\nInputs are normalized frame metadata (JSON or TSV), not image files. For each light it reports:\n- The shortest dark at least as long as the light, within the set-temperature tolerance\n- The first bias taken with the same camera settings\n- The closest-dated flat with the same filter"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (overrides --quiet)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match one light frame against a calibration pool
    Match(match_light::MatchArgs),

    /// Match every light frame in a file against a calibration pool
    Batch(batch::BatchArgs),

    /// List the frames in a calibration pool
    Show(show::ShowArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Which calibration kinds to search for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum KindSelection {
    #[default]
    All,
    Dark,
    Bias,
    Flat,
}

impl KindSelection {
    #[must_use]
    pub fn kinds(self) -> Vec<CalibrationKind> {
        match self {
            Self::All => CalibrationKind::ALL.to_vec(),
            Self::Dark => vec![CalibrationKind::Dark],
            Self::Bias => vec![CalibrationKind::Bias],
            Self::Flat => vec![CalibrationKind::Flat],
        }
    }
}

/// Matching options shared by `match` and `batch`
#[derive(clap::Args, Debug, Default)]
pub struct MatchingArgs {
    /// JSON file with matching options; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum set-temperature difference for darks, in degrees (default 5.0)
    #[arg(long)]
    pub temperature_tolerance: Option<f64>,

    /// Maximum days between light and flat (default: dates ignored)
    #[arg(long)]
    pub date_tolerance_days: Option<u32>,

    /// Rank darks by exposure difference only, without favouring exact matches
    #[arg(long)]
    pub no_prefer_exact: bool,

    /// Accept calibration frames with a different gain
    #[arg(long)]
    pub ignore_gain: bool,

    /// Accept calibration frames with a different offset
    #[arg(long)]
    pub ignore_offset: bool,
}

impl MatchingArgs {
    /// Build the matching config: file (or defaults) first, then flags
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the resulting
    /// tolerances are invalid.
    pub fn to_config(&self) -> anyhow::Result<MatchingConfig> {
        let mut config = match &self.config {
            Some(path) => MatchingConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => MatchingConfig::default(),
        };

        if let Some(tolerance) = self.temperature_tolerance {
            config.temperature_tolerance = tolerance;
        }
        if let Some(days) = self.date_tolerance_days {
            config.date_tolerance_days = Some(days);
        }
        if self.no_prefer_exact {
            config.prefer_exact_exposure = false;
        }
        if self.ignore_gain {
            config.require_gain_match = false;
        }
        if self.ignore_offset {
            config.require_offset_match = false;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Log filter directive for the verbosity flags; `verbose` wins over `quiet`
#[must_use]
pub fn log_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "calib_solver=debug,info"
    } else if quiet {
        "calib_solver=warn"
    } else {
        "calib_solver=info"
    }
}

/// Render an optional identifier for text output
#[must_use]
pub fn display_or_none(id: Option<&str>) -> &str {
    id.unwrap_or("none")
}
