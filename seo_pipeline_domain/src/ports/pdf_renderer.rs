// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # PDF Renderer Port
//!
//! PDF conversion is the one export format the core does not own an
//! in-process renderer for; HTML/Markdown/JSON rendering stays pure and
//! dependency-free inside the application crate.

use crate::entities::article::ArticleOutput;
use crate::error::PipelineError;
use async_trait::async_trait;

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Renders `html_body` (the already-rendered HTML export) to a PDF,
    /// returning the raw PDF bytes base64-encoded.
    async fn render(&self, article: &ArticleOutput, html_body: &str) -> Result<String, PipelineError>;
}
