// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Quality and Similarity Report Entities

use serde::{Deserialize, Serialize};

/// A single defect found by quality refinement, severe enough to block the
/// quality gate from accepting the article as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalIssue {
    pub kind: String,
    pub field: String,
    pub detail: String,
}

/// Aggregate quality-refinement output: the AEO score and any critical
/// issues found, consumed by the pure quality-gate evaluator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityReport {
    pub aeo_score: f64,
    pub component_scores: std::collections::BTreeMap<String, f64>,
    pub critical_issues: Vec<CriticalIssue>,
    /// Set when the quality gate exhausted both its surgical and
    /// regeneration budgets and accepted the best attempt rather than
    /// failing the job outright.
    pub quality_gate_failed: bool,
}

impl QualityReport {
    pub fn has_critical_issues(&self) -> bool {
        !self.critical_issues.is_empty()
    }
}

/// Output of the similarity-check stage's SimHash comparison against batch
/// siblings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub max_similarity: f64,
    pub most_similar_sibling_id: Option<String>,
    pub is_duplicate: bool,
}
