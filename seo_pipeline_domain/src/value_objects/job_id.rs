// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Identifier Value Object
//!
//! `JobId` wraps the caller-supplied opaque job identifier. Unlike most
//! value-object identifiers in this domain, a `JobId` is never generated
//! internally -- it is handed in by the caller at `execute(job_id, ...)` --
//! so the constructor validates rather than mints.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, non-empty job identifier with no interior whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Validates and wraps a caller-supplied job id.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidInput`] if `raw` is empty, all
    /// whitespace, or contains interior whitespace.
    pub fn parse(raw: impl Into<String>) -> Result<Self, PipelineError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::InvalidInput("job_id must not be blank".to_string()));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(PipelineError::InvalidInput(
                "job_id must not contain whitespace".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
