// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end: the first draft is a near-duplicate of a batch sibling, so
//! the engine regenerates once. The second draft, built from substantially
//! different filler prose, no longer fingerprints as a duplicate and the
//! run completes with `regeneration_attempt == 1`.

mod common;

use seo_pipeline::text::simhash::fingerprint;
use seo_pipeline_domain::{BatchSiblingSummary, JobId, WorkflowEngine};
use std::sync::Arc;

#[tokio::test]
async fn regenerates_once_when_the_first_draft_duplicates_a_sibling() {
    let keyword = "ai customer service";
    let draft_one = common::scoring_article(keyword, "platform");
    let draft_two = common::scoring_article(keyword, "almanac");

    let sibling_fingerprint = fingerprint(&draft_one.full_text());

    let response_one = serde_json::to_string(&draft_one).expect("draft one serializes");
    let response_two = serde_json::to_string(&draft_two).expect("draft two serializes");

    let llm_client = Arc::new(common::ScriptedLlmClient::new(vec![response_one, response_two]));
    let engine = common::build_engine(llm_client);

    let job_id = JobId::parse("job-duplicate-sibling").expect("valid job id");
    let mut job_config = common::base_job_config(keyword);
    job_config.batch_siblings = vec![BatchSiblingSummary {
        sibling_id: "sibling-01".to_string(),
        slug: "ai-customer-service-guide-sibling".to_string(),
        title: "AI Customer Service: The Complete Guide for Support Teams".to_string(),
        topics: vec![keyword.to_string()],
        fingerprint: Some(sibling_fingerprint),
    }];

    let context = engine.execute(job_id, job_config).await.expect("pipeline run succeeds");

    assert_eq!(context.regeneration_attempt, 1, "expected exactly one regeneration pass");

    let similarity = context.similarity_report.expect("similarity report recorded");
    assert!(!similarity.is_duplicate, "final draft should no longer read as a duplicate");

    let report = context.quality_report.expect("quality report recorded");
    assert!(!report.quality_gate_failed);

    let finished = context.structured_article.expect("article produced");
    assert!(finished.full_text().contains("almanac"), "expected the second, non-duplicate draft to win");
}
