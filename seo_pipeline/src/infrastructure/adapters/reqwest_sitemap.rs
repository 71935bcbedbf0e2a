// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Reqwest Sitemap Client
//!
//! Fetches `sitemap.xml` (or a caller-supplied sitemap path) over HTTP and
//! extracts `<loc>` entries with a regex rather than a full XML parser,
//! since a sitemap's schema is narrow and the internal-links stage only
//! needs the URL list.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use seo_pipeline_domain::{PipelineError, SitemapClient, SitemapData};
use std::sync::LazyLock;
use std::time::Duration;

const COLLABORATOR: &str = "sitemap_client";
const MAX_URLS: usize = 500;

static LOC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<loc>\s*(.*?)\s*</loc>").expect("static sitemap regex is valid"));

pub struct ReqwestSitemapClient {
    client: Client,
}

impl ReqwestSitemapClient {
    pub fn new(timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| PipelineError::UpstreamError {
            collaborator: COLLABORATOR.to_string(),
            detail: format!("failed to build http client: {e}"),
        })?;
        Ok(Self { client })
    }

    fn sitemap_url(site_url: &str) -> String {
        format!("{}/sitemap.xml", site_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SitemapClient for ReqwestSitemapClient {
    async fn fetch_sitemap(&self, site_url: &str) -> Result<SitemapData, PipelineError> {
        let sitemap_url = Self::sitemap_url(site_url);

        let response = self.client.get(&sitemap_url).send().await.map_err(|e| {
            if e.is_timeout() {
                PipelineError::UpstreamTimeout { collaborator: COLLABORATOR.to_string(), detail: sitemap_url.clone() }
            } else {
                PipelineError::UpstreamError { collaborator: COLLABORATOR.to_string(), detail: format!("{e}") }
            }
        })?;

        if !response.status().is_success() {
            return Err(PipelineError::UpstreamError {
                collaborator: COLLABORATOR.to_string(),
                detail: format!("{sitemap_url} returned {}", response.status()),
            });
        }

        let body = response.text().await.map_err(|e| PipelineError::UpstreamError {
            collaborator: COLLABORATOR.to_string(),
            detail: format!("failed to read sitemap body: {e}"),
        })?;

        let urls: Vec<String> = LOC_PATTERN.captures_iter(&body).map(|c| c[1].to_string()).take(MAX_URLS).collect();

        Ok(SitemapData { urls })
    }
}
