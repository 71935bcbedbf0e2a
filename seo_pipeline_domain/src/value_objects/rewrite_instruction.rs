// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Rewrite Instruction Value Object
//!
//! A `RewriteInstruction` describes a single targeted, validated surgical
//! edit that the [`crate::services::rewrite_engine`] port applies to an
//! article. It is produced both by the quality-refinement stage (from
//! detected critical issues) and by the external refresh interface.

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Default similarity bounds for `mode: QualityFix`.
pub const QUALITY_FIX_MIN_SIMILARITY: f64 = 0.70;
pub const QUALITY_FIX_MAX_SIMILARITY: f64 = 0.95;

/// Relaxed bounds for `mode: Refresh`, since statistic updates may touch
/// more characters.
pub const REFRESH_MIN_SIMILARITY: f64 = 0.60;
pub const REFRESH_MAX_SIMILARITY: f64 = 0.85;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// What a rewrite instruction targets: a single named field, or one of the
/// two bulk targets the refresh interface may request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteTarget {
    Field(String),
    AllSections,
    AllContent,
}

impl RewriteTarget {
    /// Field names this target resolves to on a concrete article, given the
    /// set of section field names currently present.
    pub fn resolve<'a>(&'a self, section_fields: &'a [String]) -> Vec<&'a str> {
        match self {
            RewriteTarget::Field(name) => vec![name.as_str()],
            RewriteTarget::AllSections => section_fields.iter().map(String::as_str).collect(),
            RewriteTarget::AllContent => section_fields.iter().map(String::as_str).collect(),
        }
    }
}

/// Why the rewrite is being requested; selects the validation bounds and
/// informs prompt-template selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteMode {
    QualityFix,
    Refresh,
}

impl RewriteMode {
    pub fn default_similarity_bounds(&self) -> (f64, f64) {
        match self {
            RewriteMode::QualityFix => (QUALITY_FIX_MIN_SIMILARITY, QUALITY_FIX_MAX_SIMILARITY),
            RewriteMode::Refresh => (REFRESH_MIN_SIMILARITY, REFRESH_MAX_SIMILARITY),
        }
    }
}

/// A single targeted surgical edit request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RewriteInstruction {
    pub target: RewriteTarget,
    pub instruction: String,
    pub mode: RewriteMode,
    pub context: BTreeMap<String, JsonValue>,
    pub min_similarity: f64,
    pub max_similarity: f64,
    pub max_attempts: u32,
}

impl RewriteInstruction {
    /// Builds an instruction using the mode's default similarity bounds and
    /// [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(target: RewriteTarget, instruction: impl Into<String>, mode: RewriteMode) -> Self {
        let (min_similarity, max_similarity) = mode.default_similarity_bounds();
        Self {
            target,
            instruction: instruction.into(),
            mode,
            context: BTreeMap::new(),
            min_similarity,
            max_similarity,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}
