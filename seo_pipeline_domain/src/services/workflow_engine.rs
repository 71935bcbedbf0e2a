// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Workflow Engine Contract
//!
//! The domain crate only declares the engine's shape; [`crate::services::stage::StageRegistry`]
//! ordering and concurrency live here as pure data, while the actual
//! scheduling loop (retry backoff, semaphore-bounded parallelism, cancellation)
//! is implemented by the application crate's concrete engine.

use crate::entities::execution_context::ExecutionContext;
use crate::entities::job_config::JobConfig;
use crate::error::PipelineError;
use crate::value_objects::{JobId, RewriteInstruction};
use async_trait::async_trait;

/// The quality gate's decision after a quality-refinement pass, evaluated
/// as a pure function of the context's quality report and attempt counters
/// rather than via exception-driven control flow.
#[derive(Debug, Clone)]
pub enum QualityGateDecision {
    /// The article meets the bar; proceed to the post phase.
    Accept,
    /// Apply these targeted rewrites, then re-run quality refinement.
    Surgical(Vec<RewriteInstruction>),
    /// Surgical budget exhausted for this attempt; regenerate the article
    /// from scratch (bounded by `max_regeneration_attempts`).
    Regenerate,
    /// Both surgical and regeneration budgets are exhausted; accept the
    /// best attempt so far rather than fail the job.
    Exhaust,
}

/// Orchestrates a job's execution across the registered stages.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    /// Runs every registered stage for one job, returning the final
    /// context. Returns `Err` only for a fatal (critical-stage) failure;
    /// non-fatal failures are recorded on the context and the run
    /// continues.
    async fn execute(&self, job_id: JobId, job_config: JobConfig) -> Result<ExecutionContext, PipelineError>;
}
