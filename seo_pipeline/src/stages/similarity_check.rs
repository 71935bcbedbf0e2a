// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Similarity-Check Stage (parallel, non-critical)
//!
//! Fingerprints `structured_article` and compares it against every batch
//! sibling's precomputed fingerprint, flagging a near-duplicate when the
//! Hamming distance is small enough. Writes directly to
//! `ctx.similarity_report` rather than `parallel_results` since the
//! workflow engine reads it after the parallel phase to decide whether a
//! duplicate should trigger regeneration.

use crate::text::simhash::{fingerprint, hamming_distance, is_near_duplicate};
use async_trait::async_trait;
use seo_pipeline_domain::{ExecutionContext, Phase, PipelineError, SimilarityReport, Stage, StageName};
use std::time::Duration;

pub struct SimilarityCheckStage;

impl SimilarityCheckStage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimilarityCheckStage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Stage for SimilarityCheckStage {
    fn ordinal(&self) -> u32 {
        13
    }

    fn name(&self) -> StageName {
        StageName::new("similarity_check")
    }

    fn phase(&self) -> Phase {
        Phase::Parallel
    }

    fn critical(&self) -> bool {
        false
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(5)
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let Some(article) = context.structured_article.as_ref() else {
            return Ok(context);
        };
        let own_fingerprint = fingerprint(&article.full_text());

        let mut max_similarity = 0.0;
        let mut most_similar_sibling_id = None;
        let mut is_duplicate = false;

        for sibling in &context.job_config.batch_siblings {
            let Some(sibling_fingerprint) = sibling.fingerprint else { continue };
            let distance = hamming_distance(own_fingerprint, sibling_fingerprint);
            let similarity = 1.0 - (distance as f64 / 64.0);
            if similarity > max_similarity {
                max_similarity = similarity;
                most_similar_sibling_id = Some(sibling.sibling_id.clone());
            }
            if is_near_duplicate(own_fingerprint, sibling_fingerprint) {
                is_duplicate = true;
            }
        }

        context.similarity_report = Some(SimilarityReport { max_similarity, most_similar_sibling_id, is_duplicate });
        Ok(context)
    }
}
