// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline Metrics
//!
//! Prometheus-based observability for the workflow engine: per-stage
//! duration histograms, quality-gate outcome counters, and rewrite-attempt
//! counters. A single [`PipelineMetrics`] is built once at the composition
//! root and cloned (it's `Arc`-backed internally) into every stage that
//! wants to record something.

use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use seo_pipeline_domain::PipelineError;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct PipelineMetrics {
    registry: Arc<Registry>,
    stage_duration_seconds: HistogramVec,
    quality_gate_decisions_total: IntCounterVec,
    rewrite_attempts_total: IntCounterVec,
    job_duration_seconds: Histogram,
}

impl PipelineMetrics {
    pub fn new() -> Result<Self, PipelineError> {
        let registry = Registry::new();

        let stage_duration_seconds = HistogramVec::new(
            HistogramOpts::new("stage_duration_seconds", "Time spent executing a single stage")
                .namespace("seo_pipeline")
                .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["stage"],
        )
        .map_err(|e| PipelineError::InvalidConfiguration(format!("failed to create stage_duration_seconds: {e}")))?;

        let quality_gate_decisions_total = IntCounterVec::new(
            Opts::new("quality_gate_decisions_total", "Quality gate decisions by outcome").namespace("seo_pipeline"),
            &["decision"],
        )
        .map_err(|e| {
            PipelineError::InvalidConfiguration(format!("failed to create quality_gate_decisions_total: {e}"))
        })?;

        let rewrite_attempts_total = IntCounterVec::new(
            Opts::new("rewrite_attempts_total", "Surgical rewrite attempts by outcome").namespace("seo_pipeline"),
            &["outcome"],
        )
        .map_err(|e| PipelineError::InvalidConfiguration(format!("failed to create rewrite_attempts_total: {e}")))?;

        let job_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("job_duration_seconds", "End-to-end article generation job duration")
                .namespace("seo_pipeline")
                .buckets(vec![5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        )
        .map_err(|e| PipelineError::InvalidConfiguration(format!("failed to create job_duration_seconds: {e}")))?;

        registry
            .register(Box::new(stage_duration_seconds.clone()))
            .map_err(|e| PipelineError::InvalidConfiguration(format!("failed to register stage_duration_seconds: {e}")))?;
        registry
            .register(Box::new(quality_gate_decisions_total.clone()))
            .map_err(|e| {
                PipelineError::InvalidConfiguration(format!("failed to register quality_gate_decisions_total: {e}"))
            })?;
        registry
            .register(Box::new(rewrite_attempts_total.clone()))
            .map_err(|e| PipelineError::InvalidConfiguration(format!("failed to register rewrite_attempts_total: {e}")))?;
        registry
            .register(Box::new(job_duration_seconds.clone()))
            .map_err(|e| PipelineError::InvalidConfiguration(format!("failed to register job_duration_seconds: {e}")))?;

        debug!("pipeline metrics registry initialized");

        Ok(Self { registry: Arc::new(registry), stage_duration_seconds, quality_gate_decisions_total, rewrite_attempts_total, job_duration_seconds })
    }

    pub fn record_stage_duration(&self, stage_name: &str, elapsed: Duration) {
        self.stage_duration_seconds.with_label_values(&[stage_name]).observe(elapsed.as_secs_f64());
    }

    pub fn record_quality_gate_decision(&self, decision: &str) {
        self.quality_gate_decisions_total.with_label_values(&[decision]).inc();
    }

    pub fn record_rewrite_attempt(&self, outcome: &str) {
        self.rewrite_attempts_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_job_duration(&self, elapsed: Duration) {
        self.job_duration_seconds.observe(elapsed.as_secs_f64());
    }

    /// Renders the current state of every registered metric in the
    /// Prometheus text exposition format.
    pub fn gather_text(&self) -> Result<String, PipelineError> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| PipelineError::InvalidConfiguration(format!("failed to encode metrics: {e}")))?;
        String::from_utf8(buffer).map_err(|e| PipelineError::InvalidConfiguration(format!("metrics output was not valid utf-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_exposes_stage_duration() {
        let metrics = PipelineMetrics::new().expect("metrics registry builds");
        metrics.record_stage_duration("generation", Duration::from_millis(250));
        let text = metrics.gather_text().expect("metrics encode");
        assert!(text.contains("seo_pipeline_stage_duration_seconds"));
        assert!(text.contains("generation"));
    }

    #[test]
    fn records_quality_gate_decision() {
        let metrics = PipelineMetrics::new().expect("metrics registry builds");
        metrics.record_quality_gate_decision("accept");
        let text = metrics.gather_text().expect("metrics encode");
        assert!(text.contains("seo_pipeline_quality_gate_decisions_total"));
    }
}
