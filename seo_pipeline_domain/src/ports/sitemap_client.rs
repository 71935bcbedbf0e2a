// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Sitemap Client Port

use crate::entities::execution_context::SitemapData;
use crate::error::PipelineError;
use async_trait::async_trait;

/// Collaborator boundary for fetching a site's sitemap, used by the
/// internal-links stage to build its candidate URL pool.
#[async_trait]
pub trait SitemapClient: Send + Sync {
    async fn fetch_sitemap(&self, site_url: &str) -> Result<SitemapData, PipelineError>;
}
