// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Quality Gate
//!
//! A pure function over the execution context's quality report and
//! attempt counters, returning a [`QualityGateDecision`] rather than
//! driving control flow through exceptions. Kept free of I/O so its
//! branches are exhaustively unit-testable.

use seo_pipeline_domain::{
    CriticalIssue, ExecutionContext, QualityGateDecision, RewriteInstruction, RewriteMode, RewriteTarget,
};

const TARGETABLE_ISSUE_KINDS: &[&str] =
    &["keyword_overuse", "keyword_underuse", "short_paragraph", "ai_marker_residue", "unclosed_tag"];

fn is_targetable(issue: &CriticalIssue) -> bool {
    TARGETABLE_ISSUE_KINDS.contains(&issue.kind.as_str())
}

fn instruction_for(issue: &CriticalIssue) -> RewriteInstruction {
    let verb = match issue.kind.as_str() {
        "keyword_overuse" => "reduce primary-keyword density in this field",
        "keyword_underuse" => "increase primary-keyword density in this field",
        "short_paragraph" => "expand the short paragraph in this field",
        "ai_marker_residue" => "remove residual AI-assistant disclaimer language from this field",
        "unclosed_tag" => "repair the unbalanced HTML tags in this field",
        _ => "address the flagged issue in this field",
    };
    RewriteInstruction::new(RewriteTarget::Field(issue.field.clone()), verb, RewriteMode::QualityFix)
        .with_context("issue_kind", issue.kind.clone())
        .with_context("detail", issue.detail.clone())
}

/// Evaluates the quality gate for the current attempt. `max_regeneration_attempts`
/// and whether a surgical pass has already run this generation come from
/// `context`'s own counters, not a side channel.
pub fn evaluate(context: &ExecutionContext) -> QualityGateDecision {
    let Some(report) = context.quality_report.as_ref() else {
        return QualityGateDecision::Regenerate;
    };

    let aeo_min = context.job_config.quality_gate_aeo_min;
    let critical_max = context.job_config.quality_gate_critical_max;

    if report.aeo_score >= aeo_min && report.critical_issues.len() <= critical_max {
        return QualityGateDecision::Accept;
    }

    let max_regeneration_attempts = context.job_config.max_regeneration_attempts;
    let surgical_budget_remaining = context.surgical_pass_count < 1;
    let all_targetable = !report.critical_issues.is_empty() && report.critical_issues.iter().all(is_targetable);

    if surgical_budget_remaining && all_targetable {
        return QualityGateDecision::Surgical(report.critical_issues.iter().map(instruction_for).collect());
    }

    if context.regeneration_attempt < max_regeneration_attempts {
        return QualityGateDecision::Regenerate;
    }

    QualityGateDecision::Exhaust
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_pipeline_domain::{ExportFormat, JobConfig, JobId, QualityReport, WordCountTarget};
    use std::collections::BTreeSet;

    fn base_context() -> ExecutionContext {
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
        ExecutionContext::new(JobId::parse("job-1").unwrap(), job_config, chrono::Utc::now())
    }

    #[test]
    fn accepts_when_score_and_issues_clear() {
        let mut context = base_context();
        context.quality_report = Some(QualityReport { aeo_score: 90.0, component_scores: Default::default(), critical_issues: vec![], quality_gate_failed: false });
        assert!(matches!(evaluate(&context), QualityGateDecision::Accept));
    }

    #[test]
    fn surgical_when_issues_are_all_targetable_and_budget_available() {
        let mut context = base_context();
        context.quality_report = Some(QualityReport {
            aeo_score: 70.0,
            component_scores: Default::default(),
            critical_issues: vec![CriticalIssue { kind: "keyword_overuse".into(), field: "section_01_content".into(), detail: "too many".into() }],
            quality_gate_failed: false,
        });
        assert!(matches!(evaluate(&context), QualityGateDecision::Surgical(_)));
    }

    #[test]
    fn regenerates_when_surgical_budget_spent() {
        let mut context = base_context();
        context.surgical_pass_count = 1;
        context.quality_report = Some(QualityReport {
            aeo_score: 70.0,
            component_scores: Default::default(),
            critical_issues: vec![CriticalIssue { kind: "keyword_overuse".into(), field: "section_01_content".into(), detail: "too many".into() }],
            quality_gate_failed: false,
        });
        assert!(matches!(evaluate(&context), QualityGateDecision::Regenerate));
    }

    #[test]
    fn exhausts_when_regeneration_budget_spent() {
        let mut context = base_context();
        context.surgical_pass_count = 1;
        context.regeneration_attempt = 3;
        context.quality_report = Some(QualityReport {
            aeo_score: 70.0,
            component_scores: Default::default(),
            critical_issues: vec![CriticalIssue { kind: "keyword_overuse".into(), field: "section_01_content".into(), detail: "too many".into() }],
            quality_gate_failed: false,
        });
        assert!(matches!(evaluate(&context), QualityGateDecision::Exhaust));
    }
}
