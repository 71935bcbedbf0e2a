// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! `PipelineError` is the single error type returned from every stage,
//! collaborator port, and the workflow engine itself. Each variant maps
//! directly to one of the error-taxonomy kinds described by the system's
//! failure model: input validation, upstream collaborator failures, schema
//! violations, rewrite validation failures, quality-gate exhaustion, and
//! fatal critical-stage failure.
//!
//! Collaborator errors are never re-raised naked; stages wrap them in the
//! variant that best describes the failure and attach enough context
//! (stage name, offending field) to populate a [`crate::entities::execution_context::StageFailure`]
//! without further string munging at the call site.

use thiserror::Error;

/// Domain-specific errors for the article generation workflow.
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    /// Missing/blank `primary_keyword`, malformed `company_url`. Fatal at
    /// the data-fetch stage.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A collaborator (LLM, URL-health, image generator, sitemap) timed out.
    #[error("upstream timeout calling {collaborator}: {detail}")]
    UpstreamTimeout { collaborator: String, detail: String },

    /// A collaborator returned an error that isn't a timeout.
    #[error("upstream error calling {collaborator}: {detail}")]
    UpstreamError { collaborator: String, detail: String },

    /// LLM output failed schema validation against `ArticleOutput`.
    #[error("schema violation in {field}: {detail}")]
    SchemaViolation { field: String, detail: String },

    /// A rewrite edit failed similarity/structure/citation/link validation.
    #[error("rewrite validation failed for target '{target}': {detail}")]
    ValidationFailure { target: String, detail: String },

    /// The quality gate accepted the article after exhausting regeneration
    /// and surgical-rewrite attempts. Non-fatal.
    #[error("quality gate exhausted after {attempts} attempts")]
    QualityGateExhausted { attempts: u32 },

    /// A stage marked `critical` failed after its configured `max_attempts`.
    /// Fatal: the pipeline returns this to the caller.
    #[error("critical stage '{stage}' failed: {detail}")]
    CriticalStageFailed { stage: String, detail: String },

    /// A stage timed out (wrapped into `StageException`/`StageTimeout`
    /// bookkeeping by the engine; this variant carries the raw condition).
    #[error("stage '{stage}' timed out after {elapsed_ms}ms")]
    StageTimeout { stage: String, elapsed_ms: u64 },

    /// Any other stage-level exception not covered above.
    #[error("stage '{stage}' raised an exception: {detail}")]
    StageException { stage: String, detail: String },

    /// Configuration is structurally invalid (bad TOML, out-of-range
    /// tunable, unknown export format, etc).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An invariant from the data model was violated (e.g. a dangling
    /// citation marker, an internal link with no matching slug).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl PipelineError {
    /// Classifies the error for the purposes of the engine's retry/abort
    /// decision. Mirrors the taxonomy used to build `StageFailure` records.
    pub fn kind(&self) -> PipelineErrorKind {
        match self {
            PipelineError::InvalidInput(_) => PipelineErrorKind::InvalidInput,
            PipelineError::UpstreamTimeout { .. } => PipelineErrorKind::UpstreamTimeout,
            PipelineError::UpstreamError { .. } => PipelineErrorKind::UpstreamError,
            PipelineError::SchemaViolation { .. } => PipelineErrorKind::SchemaViolation,
            PipelineError::ValidationFailure { .. } => PipelineErrorKind::ValidationFailure,
            PipelineError::QualityGateExhausted { .. } => PipelineErrorKind::QualityGateExhausted,
            PipelineError::CriticalStageFailed { .. } => PipelineErrorKind::CriticalStageFailed,
            PipelineError::StageTimeout { .. } => PipelineErrorKind::StageTimeout,
            PipelineError::StageException { .. } => PipelineErrorKind::StageException,
            PipelineError::InvalidConfiguration(_) => PipelineErrorKind::InvalidConfiguration,
            PipelineError::InvariantViolation(_) => PipelineErrorKind::InvariantViolation,
        }
    }

    /// Whether this error, if raised by a critical stage after exhausting
    /// retries, should be fatal to the whole pipeline run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::CriticalStageFailed { .. } | PipelineError::InvalidInput(_))
    }
}

/// Stable classification of [`PipelineError`] variants, used as the `kind`
/// field on recorded stage failures so callers can branch on failure class
/// without matching the full error (and its formatted message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineErrorKind {
    InvalidInput,
    UpstreamTimeout,
    UpstreamError,
    SchemaViolation,
    ValidationFailure,
    QualityGateExhausted,
    CriticalStageFailed,
    StageTimeout,
    StageException,
    InvalidConfiguration,
    InvariantViolation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_stage_failed_is_fatal() {
        let err = PipelineError::CriticalStageFailed {
            stage: "data_fetch".into(),
            detail: "boom".into(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.kind(), PipelineErrorKind::CriticalStageFailed);
    }

    #[test]
    fn quality_gate_exhausted_is_not_fatal() {
        let err = PipelineError::QualityGateExhausted { attempts: 3 };
        assert!(!err.is_fatal());
    }
}
