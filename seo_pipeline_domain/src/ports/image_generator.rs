// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Image Generator Port

use crate::error::PipelineError;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub placeholder_id: String,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct ImageResult {
    pub placeholder_id: String,
    pub url: String,
}

/// Collaborator boundary for generating illustrative images for the
/// article's image placeholders.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: ImageRequest) -> Result<ImageResult, PipelineError>;
}
