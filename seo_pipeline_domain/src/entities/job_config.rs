// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Configuration Entity
//!
//! `JobConfig` is the caller-supplied configuration for a single article
//! generation job. Data-Fetch normalizes it (filling defaults) before the
//! rest of the pipeline reads it.

use crate::value_objects::WordCountTarget;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Export formats a job may request for the finished article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Markdown,
    Pdf,
    Json,
}

/// Optional author attribution used for the E-E-A-T scoring component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub bio: String,
    pub url: String,
}

/// A summary of a previously produced article in the same batch, used for
/// similarity dedup and as part of the internal-link candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSiblingSummary {
    pub sibling_id: String,
    pub slug: String,
    pub title: String,
    pub topics: Vec<String>,
    /// Precomputed 64-bit SimHash fingerprint of the sibling's content, if
    /// known ahead of time; if absent the similarity-check stage treats the
    /// sibling as contributing no fingerprint (never flags a duplicate
    /// against it).
    pub fingerprint: Option<u64>,
}

/// Caller-supplied job configuration. `language`/`country` default per
/// the recognized-options contract; `word_count_target` is clamped to
/// `[1500, 3000]` by [`WordCountTarget`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub primary_keyword: String,
    pub company_url: Option<String>,
    pub company_name: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub country: Option<String>,
    #[serde(default)]
    pub word_count_target: WordCountTarget,
    pub export_formats: BTreeSet<ExportFormat>,
    #[serde(default)]
    pub batch_siblings: Vec<BatchSiblingSummary>,
    pub author: Option<Author>,
    #[serde(default = "default_max_regeneration_attempts")]
    pub max_regeneration_attempts: u32,
    #[serde(default = "default_quality_gate_aeo_min")]
    pub quality_gate_aeo_min: f64,
    #[serde(default = "default_quality_gate_critical_max")]
    pub quality_gate_critical_max: usize,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_regeneration_attempts() -> u32 {
    3
}

fn default_quality_gate_aeo_min() -> f64 {
    85.0
}

fn default_quality_gate_critical_max() -> usize {
    0
}

impl JobConfig {
    /// Validates the required fields. Called by the data-fetch stage before
    /// any defaults are filled.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PipelineError::InvalidInput`] if
    /// `primary_keyword` is missing or blank.
    pub fn validate_required(&self) -> Result<(), crate::error::PipelineError> {
        if self.primary_keyword.trim().is_empty() {
            return Err(crate::error::PipelineError::InvalidInput(
                "primary_keyword is required and must not be blank".to_string(),
            ));
        }
        if !(1..=5).contains(&self.max_regeneration_attempts) {
            return Err(crate::error::PipelineError::InvalidConfiguration(format!(
                "max_regeneration_attempts {} out of range [1, 5]",
                self.max_regeneration_attempts
            )));
        }
        if !(0.0..=100.0).contains(&self.quality_gate_aeo_min) {
            return Err(crate::error::PipelineError::InvalidConfiguration(format!(
                "quality_gate_aeo_min {} out of range [0, 100]",
                self.quality_gate_aeo_min
            )));
        }
        if self.quality_gate_critical_max > 5 {
            return Err(crate::error::PipelineError::InvalidConfiguration(format!(
                "quality_gate_critical_max {} out of range [0, 5]",
                self.quality_gate_critical_max
            )));
        }
        Ok(())
    }
}
