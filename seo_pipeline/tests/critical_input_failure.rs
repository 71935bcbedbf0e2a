// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end: a blank primary keyword fails input validation inside the
//! data-fetch stage, which is critical, so the whole run aborts with
//! `CriticalStageFailed` rather than proceeding to generation.

mod common;

use seo_pipeline_domain::{JobId, PipelineError, WorkflowEngine};
use std::sync::Arc;

#[tokio::test]
async fn blank_primary_keyword_aborts_before_generation() {
    let llm_client = Arc::new(common::ScriptedLlmClient::new(Vec::new()));
    let engine = common::build_engine(llm_client);

    let job_id = JobId::parse("job-blank-keyword").expect("valid job id");
    let mut job_config = common::base_job_config("ai customer service");
    job_config.primary_keyword = "   ".to_string();

    let result = engine.execute(job_id, job_config).await;

    match result {
        Err(PipelineError::CriticalStageFailed { stage, .. }) => {
            assert_eq!(stage, "data_fetch");
        }
        other => panic!("expected CriticalStageFailed from data_fetch, got {other:?}"),
    }
}
