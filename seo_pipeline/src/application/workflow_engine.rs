// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Default Workflow Engine
//!
//! Drives one job through the registered stages: pre-phase stages run
//! sequentially by ordinal, the quality gate loop regenerates/rewrites in
//! place after quality refinement, parallel-phase stages run concurrently
//! bounded by a semaphore and fan in deterministically by stage name, and
//! post-phase stages close out the run.

use crate::application::engine_config::EngineConfig;
use crate::application::quality_gate;
use crate::rewrite::RewriteEngine;
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use seo_pipeline_domain::{
    ExecutionContext, JobConfig, JobId, Phase, PipelineError, QualityGateDecision, Stage, StageFailure,
    StageRegistry, WorkflowEngine,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{error, info, instrument, warn};

/// Defensive upper bound on quality-gate loop iterations, independent of
/// `max_regeneration_attempts`, guarding against a misconfigured gate that
/// never reaches `Accept` or `Exhaust`.
const MAX_QUALITY_GATE_ITERATIONS: u32 = 16;

pub struct DefaultWorkflowEngine {
    registry: StageRegistry,
    engine_config: EngineConfig,
    rewrite_engine: Arc<RewriteEngine>,
}

impl DefaultWorkflowEngine {
    pub fn new(registry: StageRegistry, engine_config: EngineConfig, rewrite_engine: Arc<RewriteEngine>) -> Self {
        Self { registry, engine_config, rewrite_engine }
    }

    fn find_stage(&self, name: &str) -> Option<&dyn Stage> {
        self.registry.stages().iter().find(|s| s.name().as_str() == name).map(|s| s.as_ref())
    }

    /// Runs a single stage with its configured retry/backoff and timeout.
    /// On exhaustion, a critical stage returns `Err`; a non-critical stage
    /// returns `Ok` with the failure recorded on the context.
    #[instrument(skip(self, stage, context), fields(stage = %stage.name()))]
    async fn run_stage(&self, stage: &dyn Stage, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let stage_name = stage.name();
        let timeout = self.engine_config.timeout_for(stage_name.as_str(), stage.timeout());
        let attempts = stage.max_attempts().max(1);
        let start = Instant::now();

        let mut last_error: Option<PipelineError> = None;
        for attempt in 0..attempts {
            let attempt_context = context.clone();
            let result = tokio::time::timeout(timeout, stage.execute(attempt_context)).await;
            match result {
                Ok(Ok(updated)) => {
                    context = updated;
                    context.record_duration(stage_name.clone(), start.elapsed().as_millis() as i64);
                    return Ok(context);
                }
                Ok(Err(err)) => {
                    warn!(attempt, error = %err, "stage attempt failed");
                    last_error = Some(err);
                }
                Err(_elapsed) => {
                    let err = PipelineError::StageTimeout { stage: stage_name.to_string(), elapsed_ms: timeout.as_millis() as u64 };
                    warn!(attempt, "stage attempt timed out");
                    last_error = Some(err);
                }
            }

            if attempt + 1 < attempts {
                tokio::time::sleep(self.engine_config.retry_policy.delay_for_attempt(attempt)).await;
            }
        }

        let err = last_error.unwrap_or_else(|| PipelineError::StageException { stage: stage_name.to_string(), detail: "unknown failure".to_string() });
        context.record_duration(stage_name.clone(), start.elapsed().as_millis() as i64);
        context.record_failure(StageFailure {
            stage: stage_name.clone(),
            kind: err.kind(),
            message: err.to_string(),
            fatal: stage.critical(),
            occurred_at: Utc::now(),
        });

        if stage.critical() {
            error!(stage = %stage_name, "critical stage exhausted retries");
            Err(PipelineError::CriticalStageFailed { stage: stage_name.to_string(), detail: err.to_string() })
        } else {
            Ok(context)
        }
    }

    async fn run_quality_gate_loop(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        for _ in 0..MAX_QUALITY_GATE_ITERATIONS {
            match quality_gate::evaluate(&context) {
                QualityGateDecision::Accept => return Ok(context),
                QualityGateDecision::Exhaust => {
                    if let Some(report) = context.quality_report.as_mut() {
                        report.quality_gate_failed = true;
                    }
                    return Ok(context);
                }
                QualityGateDecision::Surgical(instructions) => {
                    let Some(article) = context.structured_article.clone() else { return Ok(context) };
                    let primary_keyword = context.job_config.primary_keyword.clone();
                    let batch = self.rewrite_engine.rewrite(&article, &instructions, &primary_keyword).await?;
                    context.structured_article = Some(batch.article);
                    context.surgical_pass_count += 1;
                    context = self.rescore(context)?;
                }
                QualityGateDecision::Regenerate => {
                    context.regeneration_attempt += 1;
                    context.surgical_pass_count = 0;
                    if let Some(generation) = self.find_stage("generation") {
                        context = self.run_stage(generation, context).await?;
                    }
                    if let Some(quality_refinement) = self.find_stage("quality_refinement") {
                        context = self.run_stage(quality_refinement, context).await?;
                    }
                }
            }
        }
        warn!("quality gate loop reached its defensive iteration cap without converging");
        Ok(context)
    }

    /// Re-runs the quality-refinement stage's scorer (not its normalization
    /// or rewrite dispatch) after a surgical pass applied in the gate loop
    /// directly, avoiding a second round of deterministic normalization.
    fn rescore(&self, context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        crate::stages::quality_refinement::rescore(context)
    }

    async fn run_parallel_phase(&self, context: ExecutionContext) -> ExecutionContext {
        let parallel_stages = self.registry.stages_in_phase(Phase::Parallel);
        if parallel_stages.is_empty() {
            return context;
        }

        let semaphore = Arc::new(Semaphore::new(self.engine_config.parallel_concurrency.max(1)));
        let futures = parallel_stages.into_iter().map(|stage| {
            let semaphore = semaphore.clone();
            let context = context.clone();
            async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                self.run_stage(stage, context).await
            }
        });

        let results = join_all(futures).await;

        let mut merged = context;
        for result in results {
            match result {
                Ok(updated) => {
                    merged.parallel_results.extend(updated.parallel_results);
                    let new_failures: Vec<_> = updated.errors.into_iter().filter(|f| !merged.errors.contains(f)).collect();
                    merged.errors.extend(new_failures);
                    for (stage, millis) in updated.execution_times {
                        merged.execution_times.entry(stage).or_insert(millis);
                    }
                    if updated.similarity_report.is_some() {
                        merged.similarity_report = updated.similarity_report;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "parallel stage returned a fatal error despite being non-critical by contract");
                }
            }
        }
        merged
    }

    async fn run_sequential_phase(&self, phase: Phase, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let owned_stages: Vec<&dyn Stage> = self.registry.stages_in_phase(phase);
        for stage in owned_stages {
            context = self.run_stage(stage, context).await?;
        }
        Ok(context)
    }

    /// A duplicate flag raised by the similarity-check stage is a critical
    /// issue that may trigger regeneration, bounded by the same
    /// `max_regeneration_attempts` budget the quality gate uses. Each
    /// retry re-runs generation, quality refinement, the quality gate loop,
    /// and the parallel phase (the similarity check needs a fresh
    /// fingerprint of the regenerated article).
    async fn run_regeneration_on_duplicate(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        while context.similarity_report.as_ref().is_some_and(|r| r.is_duplicate) {
            if context.regeneration_attempt >= context.job_config.max_regeneration_attempts {
                warn!("duplicate content detected but regeneration budget is spent, accepting best attempt");
                if let Some(report) = context.quality_report.as_mut() {
                    report.quality_gate_failed = true;
                }
                break;
            }

            warn!(attempt = context.regeneration_attempt, "duplicate content detected, regenerating");
            context.regeneration_attempt += 1;
            context.surgical_pass_count = 0;
            context.parallel_results.clear();

            if let Some(generation) = self.find_stage("generation") {
                context = self.run_stage(generation, context).await?;
            }
            if let Some(quality_refinement) = self.find_stage("quality_refinement") {
                context = self.run_stage(quality_refinement, context).await?;
            }
            context = self.run_quality_gate_loop(context).await?;
            context = self.run_parallel_phase(context).await;
        }
        Ok(context)
    }
}

#[async_trait]
impl WorkflowEngine for DefaultWorkflowEngine {
    #[instrument(skip(self, job_config), fields(job_id = %job_id))]
    async fn execute(&self, job_id: JobId, job_config: JobConfig) -> Result<ExecutionContext, PipelineError> {
        info!("starting pipeline run");
        let mut context = ExecutionContext::new(job_id, job_config, Utc::now());

        for stage_name in ["data_fetch", "prompt_build", "generation", "quality_refinement"] {
            if let Some(stage) = self.find_stage(stage_name) {
                context = self.run_stage(stage, context).await?;
            }
            if stage_name == "quality_refinement" {
                context = self.run_quality_gate_loop(context).await?;
            }
        }

        context = self.run_parallel_phase(context).await;
        context = self.run_regeneration_on_duplicate(context).await?;
        context = self.run_sequential_phase(Phase::Post, context).await?;

        info!(fatal = context.has_fatal_failure(), "pipeline run finished");
        Ok(context)
    }
}

/// Minimum total wall-clock budget the engine gives an entire job before
/// the bootstrap's outer supervisor considers it stuck. Not enforced here;
/// recorded for the bootstrap's own watchdog to read.
pub const DEFAULT_JOB_BUDGET: Duration = Duration::from_secs(600);
