// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Article Persistence Port

use crate::entities::article::ArticleOutput;
use crate::error::PipelineError;
use crate::value_objects::JobId;
use async_trait::async_trait;

/// Collaborator boundary for the storage-export stage's final write of the
/// finished article and its rendered export artifacts.
#[async_trait]
pub trait ArticlePersistence: Send + Sync {
    async fn store(
        &self,
        job_id: &JobId,
        article: &ArticleOutput,
        artifacts: &std::collections::BTreeMap<String, String>,
    ) -> Result<(), PipelineError>;
}
