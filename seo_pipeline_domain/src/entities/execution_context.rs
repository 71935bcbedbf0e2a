// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Execution Context Entity
//!
//! `ExecutionContext` is the single mutable record threaded through every
//! stage. Stages read the fields their phase has already populated and
//! write their own; nothing is communicated between stages any other way.

use crate::entities::article::ArticleOutput;
use crate::entities::job_config::JobConfig;
use crate::entities::quality_report::{QualityReport, SimilarityReport};
use crate::error::PipelineErrorKind;
use crate::value_objects::{JobId, StageName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recorded stage failure, carrying enough context to reconstruct why a
/// job ended up in a failed or partially degraded terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageFailure {
    pub stage: StageName,
    pub kind: PipelineErrorKind,
    pub message: String,
    pub fatal: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Raw data pulled by the data-fetch stage: the fetched company profile (if
/// any) and sitemap-derived candidate URLs for internal linking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub products: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitemapData {
    pub urls: Vec<String>,
}

/// The mutable record threaded through the whole pipeline for one job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub job_id: JobId,
    pub job_config: JobConfig,
    pub started_at: DateTime<Utc>,

    pub company_data: Option<CompanyData>,
    pub sitemap_data: Option<SitemapData>,
    pub prompt: Option<String>,

    pub raw_article: Option<String>,
    pub structured_article: Option<ArticleOutput>,

    /// Per-stage outputs from the parallel phase, keyed by stage name so
    /// later stages can look up a specific collaborator's contribution
    /// without depending on phase-partition ordering.
    pub parallel_results: BTreeMap<StageName, String>,

    pub quality_report: Option<QualityReport>,
    pub similarity_report: Option<SimilarityReport>,

    /// Number of full regeneration passes performed so far (bounded by
    /// `job_config.max_regeneration_attempts`).
    pub regeneration_attempt: u32,
    /// Number of surgical rewrite passes performed in the current
    /// regeneration attempt.
    pub surgical_pass_count: u32,

    pub execution_times: BTreeMap<StageName, i64>,
    pub errors: Vec<StageFailure>,

    /// Export format -> rendered artifact (bytes encoded as UTF-8 for
    /// text formats, base64 for PDF).
    pub exported_artifacts: BTreeMap<String, String>,
}

impl ExecutionContext {
    pub fn new(job_id: JobId, job_config: JobConfig, started_at: DateTime<Utc>) -> Self {
        Self {
            job_id,
            job_config,
            started_at,
            company_data: None,
            sitemap_data: None,
            prompt: None,
            raw_article: None,
            structured_article: None,
            parallel_results: BTreeMap::new(),
            quality_report: None,
            similarity_report: None,
            regeneration_attempt: 0,
            surgical_pass_count: 0,
            execution_times: BTreeMap::new(),
            errors: Vec::new(),
            exported_artifacts: BTreeMap::new(),
        }
    }

    pub fn record_failure(&mut self, failure: StageFailure) {
        self.errors.push(failure);
    }

    pub fn has_fatal_failure(&self) -> bool {
        self.errors.iter().any(|f| f.fatal)
    }

    pub fn record_duration(&mut self, stage: StageName, millis: i64) {
        self.execution_times.insert(stage, millis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::job_config::{ExportFormat, JobConfig};
    use crate::value_objects::WordCountTarget;
    use std::collections::BTreeSet;

    fn ctx() -> ExecutionContext {
        let job_config = JobConfig {
            primary_keyword: "ai customer service".into(),
            company_url: None,
            company_name: None,
            language: "en".into(),
            country: None,
            word_count_target: WordCountTarget::default(),
            export_formats: BTreeSet::from([ExportFormat::Html]),
            batch_siblings: Vec::new(),
            author: None,
            max_regeneration_attempts: 3,
            quality_gate_aeo_min: 85.0,
            quality_gate_critical_max: 0,
        };
        ExecutionContext::new(JobId::parse("job-1").unwrap(), job_config, Utc::now())
    }

    #[test]
    fn starts_with_no_failures() {
        let context = ctx();
        assert!(!context.has_fatal_failure());
    }

    #[test]
    fn fatal_failure_is_detected() {
        let mut context = ctx();
        context.record_failure(StageFailure {
            stage: StageName::new("generation"),
            kind: PipelineErrorKind::CriticalStageFailed,
            message: "boom".into(),
            fatal: true,
            occurred_at: Utc::now(),
        });
        assert!(context.has_fatal_failure());
    }
}
