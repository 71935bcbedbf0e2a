// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Abstraction
//!
//! A [`Stage`] is one unit of pipeline work. The domain crate defines only
//! the contract; concrete stages (data fetch, generation, rewrite, ...) live
//! in the application crate and are registered into a [`StageRegistry`] at
//! composition time.

use crate::entities::execution_context::ExecutionContext;
use crate::error::PipelineError;
use crate::value_objects::StageName;
use async_trait::async_trait;
use std::time::Duration;

/// Which partition of the execution plan a stage belongs to. Stages within
/// a phase are ordered by [`Stage::ordinal`]; `Parallel` stages additionally
/// run concurrently (bounded by the engine's configured concurrency limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Pre,
    Parallel,
    Post,
}

/// One unit of pipeline work.
///
/// Implementors must be side-effect-idempotent with respect to retries: the
/// engine may call `execute` again with the same context after a transient
/// failure, up to `max_attempts` times.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Ordering within this stage's phase. Lower runs first.
    fn ordinal(&self) -> u32;

    fn name(&self) -> StageName;

    fn phase(&self) -> Phase;

    /// If true, a failure surviving all retry attempts is fatal to the
    /// whole run (mapped to [`PipelineError::CriticalStageFailed`]).
    fn critical(&self) -> bool {
        true
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(60)
    }

    fn max_attempts(&self) -> u32 {
        1
    }

    /// Executes this stage, returning the updated context.
    async fn execute(&self, context: ExecutionContext) -> Result<ExecutionContext, PipelineError>;
}

/// Ordered collection of stages, partitioned by [`Phase`] at plan-build
/// time by the workflow engine.
#[derive(Default)]
pub struct StageRegistry {
    stages: Vec<Box<dyn Stage>>,
}

impl StageRegistry {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Idempotent: a stage registered with the same ordinal as one already
    /// present replaces it rather than running alongside it. Last
    /// registration wins.
    pub fn register(&mut self, stage: Box<dyn Stage>) {
        self.stages.retain(|existing| existing.ordinal() != stage.ordinal());
        self.stages.push(stage);
    }

    pub fn stages(&self) -> &[Box<dyn Stage>] {
        &self.stages
    }

    /// Stages belonging to `phase`, sorted by ordinal.
    pub fn stages_in_phase(&self, phase: Phase) -> Vec<&dyn Stage> {
        let mut matched: Vec<&dyn Stage> =
            self.stages.iter().filter(|s| s.phase() == phase).map(|s| s.as_ref()).collect();
        matched.sort_by_key(|s| s.ordinal());
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopStage {
        ordinal: u32,
        phase: Phase,
    }

    #[async_trait]
    impl Stage for NoopStage {
        fn ordinal(&self) -> u32 {
            self.ordinal
        }
        fn name(&self) -> StageName {
            StageName::new(format!("noop_{}", self.ordinal))
        }
        fn phase(&self) -> Phase {
            self.phase
        }
        async fn execute(&self, context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
            Ok(context)
        }
    }

    #[test]
    fn register_is_idempotent_for_a_given_ordinal() {
        let mut registry = StageRegistry::new();
        registry.register(Box::new(NoopStage { ordinal: 0, phase: Phase::Pre }));
        registry.register(Box::new(NoopStage { ordinal: 0, phase: Phase::Pre }));

        assert_eq!(registry.stages().len(), 1);
    }

    #[test]
    fn stages_in_phase_are_ordinal_sorted() {
        let mut registry = StageRegistry::new();
        registry.register(Box::new(NoopStage { ordinal: 2, phase: Phase::Parallel }));
        registry.register(Box::new(NoopStage { ordinal: 1, phase: Phase::Parallel }));
        registry.register(Box::new(NoopStage { ordinal: 0, phase: Phase::Pre }));

        let parallel = registry.stages_in_phase(Phase::Parallel);
        assert_eq!(parallel.len(), 2);
        assert_eq!(parallel[0].ordinal(), 1);
        assert_eq!(parallel[1].ordinal(), 2);
    }
}
