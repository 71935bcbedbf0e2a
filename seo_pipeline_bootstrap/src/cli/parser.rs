// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CLI Parser
//!
//! Command-line interface parsing using clap. This module defines the CLI
//! structure only; security validation of free-text arguments happens in
//! [`crate::cli::validator`] after parsing, and `Generate`'s arguments are
//! converted to a domain `JobConfig` by [`GenerateArgs::into_job_config`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure.
#[derive(Parser, Debug, Clone)]
#[command(name = "seo-pipeline")]
#[command(about = concat!("SEO/AEO article generation workflow engine v", env!("CARGO_PKG_VERSION")))]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit structured JSON logs instead of human-readable ones.
    #[arg(long)]
    pub log_json: bool,

    /// Configuration file path (TOML); CLI flags take precedence over it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory export artifacts are written to.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a single article.
    Generate(GenerateArgs),

    /// Generate a batch of articles sharing a similarity pool, reading job
    /// definitions from a manifest file.
    Batch {
        /// Manifest file listing one job per entry.
        #[arg(short, long)]
        manifest: PathBuf,

        /// Maximum number of jobs run concurrently.
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },

    /// Re-run generation for a single section of a previously produced
    /// article (the refresh workflow from the quality-report follow-up).
    Refresh {
        /// Job id of the article to refresh, used to label the refreshed
        /// export artifact.
        #[arg(short, long)]
        job_id: String,

        /// Section key to refresh (e.g. `direct_answer`, or a stat-bearing
        /// body section).
        #[arg(short, long)]
        section: String,

        /// Path to the previously exported article JSON to refresh.
        #[arg(long)]
        article: PathBuf,

        /// What should change, e.g. "update the Q3 adoption statistic".
        #[arg(long)]
        instruction: String,

        /// Primary keyword the article targets, used to select rewrite
        /// templates; defaults to empty if omitted.
        #[arg(long)]
        primary_keyword: Option<String>,
    },

    /// Validate a job configuration file without running the pipeline.
    Validate {
        /// Job configuration file (TOML or JSON).
        config: PathBuf,
    },
}

/// Arguments for the `generate` subcommand, one-to-one with the fields a
/// caller supplies on `JobConfig` before the pipeline fills in defaults.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Job identifier, used to key exported artifacts and logs.
    #[arg(long)]
    pub job_id: String,

    /// The primary SEO keyword this article targets.
    #[arg(short = 'k', long)]
    pub primary_keyword: String,

    /// Company website, used for sitemap discovery and internal linking.
    #[arg(long)]
    pub company_url: Option<String>,

    /// Company name, used when no crawlable website is available.
    #[arg(long)]
    pub company_name: Option<String>,

    /// BCP-47-ish language code (default "en").
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Target country/region for localization.
    #[arg(long)]
    pub country: Option<String>,

    /// Target word count, clamped to [1500, 3000] by the domain.
    #[arg(long, default_value = "2000")]
    pub word_count_target: u32,

    /// Comma-separated export formats: html,markdown,pdf,json.
    #[arg(long, default_value = "html")]
    pub export_formats: String,

    /// Author name for E-E-A-T attribution.
    #[arg(long)]
    pub author_name: Option<String>,

    /// Author bio for E-E-A-T attribution.
    #[arg(long)]
    pub author_bio: Option<String>,

    /// Author profile URL for E-E-A-T attribution.
    #[arg(long)]
    pub author_url: Option<String>,

    /// Maximum full-regeneration attempts the quality gate may spend.
    #[arg(long, default_value = "3")]
    pub max_regeneration_attempts: u32,

    /// Minimum AEO score the quality gate accepts without further rewrites.
    #[arg(long, default_value = "85.0")]
    pub quality_gate_aeo_min: f64,

    /// Maximum unresolved critical issues the quality gate tolerates.
    #[arg(long, default_value = "0")]
    pub quality_gate_critical_max: usize,
}

/// Parses process arguments into a [`Cli`].
pub fn parse_cli() -> Cli {
    Cli::parse()
}
