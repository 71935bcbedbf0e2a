// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end: a well-formed article clears the quality gate on the
//! first pass with no surgical rewrites or regeneration, and the
//! finished article carries no em-dash and no unresolved critical
//! issues.

mod common;

use seo_pipeline_domain::{JobId, WorkflowEngine};
use std::sync::Arc;

#[tokio::test]
async fn accepts_a_well_formed_article_on_the_first_pass() {
    let keyword = "ai customer service";
    let article = common::scoring_article(keyword, "platform");
    let response = serde_json::to_string(&article).expect("article serializes");

    let llm_client = Arc::new(common::ScriptedLlmClient::new(vec![response]));
    let engine = common::build_engine(llm_client);

    let job_id = JobId::parse("job-happy-path").expect("valid job id");
    let job_config = common::base_job_config(keyword);

    let context = engine.execute(job_id, job_config).await.expect("pipeline run succeeds");

    let report = context.quality_report.expect("quality report recorded");
    assert!(report.aeo_score >= 85.0, "expected aeo_score >= 85, got {}", report.aeo_score);
    assert!(report.critical_issues.is_empty(), "expected no unresolved critical issues, found {:?}", report.critical_issues);
    assert!(!report.quality_gate_failed);

    let finished = context.structured_article.expect("article produced");
    assert!(!finished.full_text().contains('\u{2014}'), "article must contain no em-dash");
    assert!(!finished.title.contains('\u{2014}'));

    assert_eq!(context.regeneration_attempt, 0);
    assert_eq!(context.surgical_pass_count, 0);
    assert!(!context.has_fatal_failure());

    assert!(context.exported_artifacts.contains_key("html"));
}
