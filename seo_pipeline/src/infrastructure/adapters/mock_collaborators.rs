// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Mock Collaborators
//!
//! In-memory stand-ins for every collaborator port, used by `--dry-run`
//! bootstrap mode (no network calls, no LLM spend) and by integration
//! tests that exercise the full workflow engine without wiremock servers.

use async_trait::async_trait;
use parking_lot::Mutex;
use seo_pipeline_domain::{
    ArticleOutput, ArticlePersistence, CompanyData, CompanyProfileFetcher, CompletionRequest, CompletionResponse,
    ImageGenerator, ImageRequest, ImageResult, JobId, LlmClient, PdfRenderer, PipelineError, SitemapClient,
    SitemapData, UrlHealth, UrlHealthChecker,
};
use std::collections::BTreeMap;

/// Echoes a fixed completion regardless of prompt; good enough for
/// exercising the pipeline's control flow without an LLM bill.
pub struct MockLlmClient {
    pub fixed_response: String,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self { fixed_response: "mock completion".to_string() }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, PipelineError> {
        Ok(CompletionResponse { text: self.fixed_response.clone() })
    }
}

/// Reports every URL as reachable.
pub struct MockUrlHealthChecker;

#[async_trait]
impl UrlHealthChecker for MockUrlHealthChecker {
    async fn check(&self, _url: &str) -> Result<UrlHealth, PipelineError> {
        Ok(UrlHealth::Ok)
    }
}

/// Returns an empty sitemap, so the internal-links stage degrades to no
/// link suggestions rather than failing.
pub struct MockSitemapClient;

#[async_trait]
impl SitemapClient for MockSitemapClient {
    async fn fetch_sitemap(&self, _site_url: &str) -> Result<SitemapData, PipelineError> {
        Ok(SitemapData::default())
    }
}

/// Generates a placeholder image URL deterministically from the request id.
pub struct MockImageGenerator;

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, request: ImageRequest) -> Result<ImageResult, PipelineError> {
        Ok(ImageResult {
            placeholder_id: request.placeholder_id.clone(),
            url: format!("https://placeholder.invalid/{}.png", request.placeholder_id),
        })
    }
}

/// Returns an empty company profile, as if `company_url`/`company_name`
/// were both absent.
pub struct MockCompanyProfileFetcher;

#[async_trait]
impl CompanyProfileFetcher for MockCompanyProfileFetcher {
    async fn fetch(&self, _company_url: Option<&str>, _company_name: Option<&str>) -> Result<CompanyData, PipelineError> {
        Ok(CompanyData::default())
    }
}

/// Records every stored article in memory, keyed by job id, for tests and
/// `--dry-run` inspection.
#[derive(Default)]
pub struct InMemoryArticlePersistence {
    stored: Mutex<BTreeMap<String, (ArticleOutput, BTreeMap<String, String>)>>,
}

impl InMemoryArticlePersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, job_id: &str) -> Option<(ArticleOutput, BTreeMap<String, String>)> {
        self.stored.lock().get(job_id).cloned()
    }
}

#[async_trait]
impl ArticlePersistence for InMemoryArticlePersistence {
    async fn store(
        &self,
        job_id: &JobId,
        article: &ArticleOutput,
        artifacts: &BTreeMap<String, String>,
    ) -> Result<(), PipelineError> {
        self.stored.lock().insert(job_id.to_string(), (article.clone(), artifacts.clone()));
        Ok(())
    }
}

/// Returns a fixed base64 payload rather than invoking an external PDF
/// renderer.
pub struct MockPdfRenderer;

#[async_trait]
impl PdfRenderer for MockPdfRenderer {
    async fn render(&self, _article: &ArticleOutput, _html_body: &str) -> Result<String, PipelineError> {
        Ok("bW9jay1wZGYtYnl0ZXM=".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_llm_client_returns_fixed_response() {
        let client = MockLlmClient::default();
        let response = client
            .complete(CompletionRequest {
                system_prompt: String::new(),
                user_prompt: String::new(),
                max_output_tokens: 100,
                temperature: 0.5,
            })
            .await
            .expect("mock never fails");
        assert_eq!(response.text, "mock completion");
    }

    #[tokio::test]
    async fn in_memory_persistence_round_trips_stored_article() {
        let persistence = InMemoryArticlePersistence::new();
        let job_id = JobId::parse("job-1").expect("valid job id");
        let article = ArticleOutput { title: "Test".to_string(), ..Default::default() };
        persistence.store(&job_id, &article, &BTreeMap::new()).await.expect("store succeeds");

        let (stored_article, _) = persistence.get(&job_id.to_string()).expect("article was stored");
        assert_eq!(stored_article.title, "Test");
    }
}
