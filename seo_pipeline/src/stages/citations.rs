// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Citations Stage (parallel, non-critical)
//!
//! Validates every citation source URL via the URL-health collaborator
//! (bounded concurrency, 5-minute cached results), attempting a single
//! LLM-driven alternative-URL search for each failing one. Publishes a
//! validated citation map into `ctx.parallel_results` under this stage's
//! name; [`crate::stages::cleanup::CleanupStage`] merges it back into the
//! article's `citation_map`.

use crate::infrastructure::url_health_cache::UrlHealthCache;
use async_trait::async_trait;
use futures::future::join_all;
use seo_pipeline_domain::{CompletionRequest, ExecutionContext, LlmClient, Phase, PipelineError, Stage, StageName, UrlHealth, UrlHealthChecker};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Below this fraction of valid citation URLs, a warning is recorded but
/// the stage still passes cleanup.
const VALID_RATIO_WARNING_THRESHOLD: f64 = 0.75;

/// How many citation URLs are validated concurrently.
const CITATION_CHECK_CONCURRENCY: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationsOutput {
    pub citation_map: BTreeMap<String, String>,
    pub valid_ratio: f64,
    pub below_threshold: bool,
}

pub struct CitationsStage {
    url_health_checker: Arc<dyn UrlHealthChecker>,
    url_health_cache: Arc<UrlHealthCache>,
    llm_client: Arc<dyn LlmClient>,
}

impl CitationsStage {
    pub fn new(url_health_checker: Arc<dyn UrlHealthChecker>, url_health_cache: Arc<UrlHealthCache>, llm_client: Arc<dyn LlmClient>) -> Self {
        Self { url_health_checker, url_health_cache, llm_client }
    }

    async fn check(&self, url: &str) -> Result<UrlHealth, PipelineError> {
        if let Some(cached) = self.url_health_cache.get(url) {
            return Ok(cached);
        }
        let health = self.url_health_checker.check(url).await?;
        self.url_health_cache.put(url.to_string(), health);
        Ok(health)
    }

    async fn find_alternative(&self, marker: &str, dead_url: &str) -> Option<String> {
        let response = self
            .llm_client
            .complete(CompletionRequest {
                system_prompt: "You find a single replacement source URL for a broken citation, returning only the URL.".to_string(),
                user_prompt: format!("Citation marker {marker} previously pointed to {dead_url}, which is unreachable. Provide one replacement URL."),
                max_output_tokens: 128,
                temperature: 0.2,
            })
            .await
            .ok()?;
        let candidate = response.text.trim().to_string();
        if candidate.is_empty() {
            return None;
        }
        matches!(self.check(&candidate).await, Ok(UrlHealth::Ok)).then_some(candidate)
    }
}

#[async_trait]
impl Stage for CitationsStage {
    fn ordinal(&self) -> u32 {
        10
    }

    fn name(&self) -> StageName {
        StageName::new("citations")
    }

    fn phase(&self) -> Phase {
        Phase::Parallel
    }

    fn critical(&self) -> bool {
        false
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(30)
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let Some(article) = context.structured_article.clone() else {
            return Ok(context);
        };

        let total = article.citation_map.len();
        let semaphore = Arc::new(Semaphore::new(CITATION_CHECK_CONCURRENCY.max(1)));
        let futures = article.citation_map.iter().map(|(marker, url)| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                match self.check(url).await {
                    Ok(UrlHealth::Ok) => Some((marker.clone(), url.clone())),
                    Ok(UrlHealth::Broken) | Err(_) => self.find_alternative(marker, url).await.map(|alternative| (marker.clone(), alternative)),
                }
            }
        });

        let validated: BTreeMap<String, String> = join_all(futures).await.into_iter().flatten().collect();
        let valid_count = validated.len();
        let valid_ratio = if total == 0 { 1.0 } else { valid_count as f64 / total as f64 };
        let output = CitationsOutput { citation_map: validated, valid_ratio, below_threshold: valid_ratio < VALID_RATIO_WARNING_THRESHOLD };

        let serialized = serde_json::to_string(&output)
            .map_err(|e| PipelineError::StageException { stage: "citations".to_string(), detail: e.to_string() })?;
        context.parallel_results.insert(self.name(), serialized);
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::MockLlmClient;
    use crate::infrastructure::url_health_cache::SystemClock;
    use seo_pipeline_domain::{ArticleOutput, ExportFormat, JobConfig, JobId};
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_job_config() -> JobConfig {
        JobConfig {
            primary_keyword: "ai customer service".to_string(),
            company_url: None,
            company_name: None,
            language: "en".to_string(),
            country: None,
            word_count_target: Default::default(),
            export_formats: BTreeSet::from([ExportFormat::Html]),
            batch_siblings: Vec::new(),
            author: None,
            max_regeneration_attempts: 3,
            quality_gate_aeo_min: 85.0,
            quality_gate_critical_max: 0,
        }
    }

    /// Tracks the high-water mark of concurrently in-flight `check` calls
    /// so the test can assert the semaphore is actually bounding fan-out,
    /// not just that results come back correct.
    struct ConcurrencyTrackingChecker {
        in_flight: AtomicUsize,
        high_water_mark: AtomicUsize,
    }

    impl ConcurrencyTrackingChecker {
        fn new() -> Self {
            Self { in_flight: AtomicUsize::new(0), high_water_mark: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl UrlHealthChecker for ConcurrencyTrackingChecker {
        async fn check(&self, _url: &str) -> Result<UrlHealth, PipelineError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.high_water_mark.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(UrlHealth::Ok)
        }
    }

    fn article_with_citations(count: usize) -> ArticleOutput {
        let mut citation_map = BTreeMap::new();
        for i in 0..count {
            citation_map.insert(format!("[{i}]"), format!("https://example.com/source-{i}"));
        }
        ArticleOutput { citation_map, ..Default::default() }
    }

    #[tokio::test]
    async fn validates_citations_with_bounded_concurrency() {
        let checker = Arc::new(ConcurrencyTrackingChecker::new());
        let cache = Arc::new(UrlHealthCache::new(Box::new(SystemClock)));
        let stage = CitationsStage::new(checker.clone(), cache, Arc::new(MockLlmClient::default()));

        let mut context = ExecutionContext::new(JobId::parse("job-1").unwrap(), test_job_config(), chrono::Utc::now());
        context.structured_article = Some(article_with_citations(25));

        let context = stage.execute(context).await.expect("stage succeeds");

        assert!(checker.high_water_mark.load(Ordering::SeqCst) <= CITATION_CHECK_CONCURRENCY);
        assert!(checker.high_water_mark.load(Ordering::SeqCst) > 1, "expected checks to run concurrently, not one at a time");

        let raw = context.parallel_results.get("citations").expect("citations output recorded");
        let output: CitationsOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(output.citation_map.len(), 25);
        assert_eq!(output.valid_ratio, 1.0);
    }

    struct AlwaysBrokenChecker;

    #[async_trait]
    impl UrlHealthChecker for AlwaysBrokenChecker {
        async fn check(&self, _url: &str) -> Result<UrlHealth, PipelineError> {
            Ok(UrlHealth::Broken)
        }
    }

    #[tokio::test]
    async fn falls_back_to_llm_alternative_for_broken_urls() {
        let checker = Arc::new(AlwaysBrokenChecker);
        let cache = Arc::new(UrlHealthCache::new(Box::new(SystemClock)));
        let llm = Arc::new(MockLlmClient { fixed_response: "https://example.com/alternative".to_string() });
        let stage = CitationsStage::new(checker, cache, llm);

        let mut context = ExecutionContext::new(JobId::parse("job-1").unwrap(), test_job_config(), chrono::Utc::now());
        context.structured_article = Some(article_with_citations(1));

        let context = stage.execute(context).await.expect("stage succeeds");
        let raw = context.parallel_results.get("citations").expect("citations output recorded");
        let output: CitationsOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(output.citation_map.get("[0]"), Some(&"https://example.com/alternative".to_string()));
    }
}
