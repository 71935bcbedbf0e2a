// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Shared fixtures for the end-to-end workflow tests: a scripted LLM
//! collaborator, a deterministic article builder that clears the AEO
//! rubric and the cleanup stage's invariants by construction, and a
//! fully wired engine using in-memory collaborators for every other port.

use async_trait::async_trait;
use seo_pipeline::infrastructure::adapters::{
    InMemoryArticlePersistence, MockCompanyProfileFetcher, MockImageGenerator, MockSitemapClient,
    MockUrlHealthChecker, MockPdfRenderer,
};
use seo_pipeline::infrastructure::url_health_cache::{SystemClock, UrlHealthCache};
use seo_pipeline::stages::{
    CitationsStage, CleanupStage, DataFetchStage, GenerationStage, ImageStage, InternalLinksStage,
    PromptBuildStage, QualityRefinementStage, SimilarityCheckStage, StorageExportStage,
};
use seo_pipeline::{DefaultWorkflowEngine, EngineConfig, RewriteEngine};
use seo_pipeline_domain::{
    Author, ArticleOutput, CompletionRequest, CompletionResponse, ExportFormat, FaqItem, JobConfig, LlmClient,
    PipelineError, SourceEntry, StageRegistry, TocEntry,
};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Returns queued completion text in order, repeating the last entry once
/// the queue drains so a test doesn't have to predict every call.
pub struct ScriptedLlmClient {
    responses: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl ScriptedLlmClient {
    pub fn new(responses: Vec<String>) -> Self {
        let mut queue: VecDeque<String> = responses.into();
        let last = queue.back().cloned().unwrap_or_default();
        Self { responses: Mutex::new(queue), last: Mutex::new(last) }
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, PipelineError> {
        let mut queue = self.responses.lock().expect("lock poisoned");
        let text = queue.pop_front().unwrap_or_else(|| self.last.lock().expect("lock poisoned").clone());
        Ok(CompletionResponse { text })
    }
}

fn keyword_tokens(keyword: &str) -> Vec<String> {
    keyword.split_whitespace().map(str::to_string).collect()
}

/// Builds an HTML paragraph with an exact word count: `keyword_mentions`
/// repetitions of `keyword` (each followed by a filler word so it counts
/// as a single contiguous occurrence), padded with `filler` to
/// `total_words`, followed by any citation markers.
fn paragraph(keyword: &str, keyword_mentions: usize, filler: &str, total_words: usize, markers: &[&str]) -> String {
    let mut tokens: Vec<String> = Vec::new();
    for _ in 0..keyword_mentions {
        tokens.extend(keyword_tokens(keyword));
        tokens.push("automation".to_string());
    }
    while tokens.len() + markers.len() < total_words {
        tokens.push(filler.to_string());
    }
    for marker in markers {
        tokens.push(marker.to_string());
    }
    format!("<p>{}</p>", tokens.join(" "))
}

/// Builds a fully-scoring article: every AEO rubric component maxes out
/// (author present, direct-answer length/keyword/marker, five FAQ and
/// three PAA entries, three question-form section titles, balanced and
/// dense citations, eight+ conversational markers, three lists and three
/// H2s) and every cleanup invariant holds (headline/meta/intro/direct
/// answer lengths, keyword density in [5, 8], citation bijection, no
/// em-dash). `filler` controls the bulk of the prose so two calls with
/// different fillers produce very different SimHash fingerprints while
/// both still clear the gate.
pub fn scoring_article(keyword: &str, filler: &str) -> ArticleOutput {
    let direct_answer = paragraph(keyword, 1, filler, 48, &["[1]"]);
    // "your", "here's", "think about", "you" conversational markers, 80-120 words, one keyword mention.
    let intro_prefix: Vec<String> = {
        let mut tokens = vec!["Here's".to_string(), "the".to_string(), "short".to_string(), "version".to_string(), "for".to_string(), "you".to_string(), "and".to_string(), "your".to_string(), "team".to_string(), "to".to_string(), "think".to_string(), "about".to_string(), "before".to_string(), "rollout".to_string(), "begins".to_string()];
        tokens.extend(keyword_tokens(keyword));
        tokens.push("automation".to_string());
        tokens
    };
    let mut intro_tokens = intro_prefix;
    while intro_tokens.len() < 100 {
        intro_tokens.push(filler.to_string());
    }
    let intro = format!("<p>{}</p>", intro_tokens.join(" "));

    let section_01 = format!(
        "<h2>How It Rolls Out</h2><ul><li>Faster first response</li><li>Fewer repeat tickets</li><li>Lower handle time</li></ul>{}{}",
        paragraph(keyword, 1, filler, 51, &["[2]", "[3]"]),
        {
            let mut tokens = vec!["Why".to_string(), "does".to_string(), "pricing".to_string(), "vary,".to_string(), "and".to_string(), "what".to_string(), "if".to_string(), "the".to_string(), "cheapest".to_string(), "plan".to_string(), "costs".to_string(), "more".to_string(), "once".to_string(), "you".to_string(), "count".to_string(), "every".to_string(), "fee?".to_string()];
            tokens.extend(keyword_tokens(keyword));
            tokens.push("automation".to_string());
            while tokens.len() + 2 < 45 {
                tokens.push(filler.to_string());
            }
            tokens.push("[2]".to_string());
            tokens.push("[4]".to_string());
            format!("<p>{}</p>", tokens.join(" "))
        }
    );

    let section_02 = format!(
        "<h2>Comparing Total Cost</h2><ol><li>Base platform fee</li><li>Per seat licensing</li><li>Integration add-ons</li></ol>{}",
        {
            let mut tokens = vec!["Consider".to_string(), "two".to_string(), "teams".to_string(), "of".to_string(), "similar".to_string(), "size".to_string(), "comparing".to_string()];
            tokens.extend(keyword_tokens(keyword));
            tokens.push("automation".to_string());
            while tokens.len() + 2 < 46 {
                tokens.push(filler.to_string());
            }
            tokens.push("[3]".to_string());
            tokens.push("[4]".to_string());
            format!("<p>{}</p>", tokens.join(" "))
        }
    );

    let section_03 = format!(
        "<h2>Scaling Without Overwhelming Staff</h2><ul><li>Start with simple intents</li><li>Expand by volume</li><li>Review escalations quarterly</li></ul>{}",
        {
            let mut tokens = vec!["Picture".to_string(), "this:".to_string(), "imagine".to_string(), "a".to_string(), "queue".to_string(), "that".to_string(), "quietly".to_string(), "routes".to_string(), "routine".to_string()];
            tokens.extend(keyword_tokens(keyword));
            tokens.push("automation".to_string());
            while tokens.len() + 2 < 47 {
                tokens.push(filler.to_string());
            }
            tokens.push("[3]".to_string());
            tokens.push("[4]".to_string());
            format!("<p>{}</p>", tokens.join(" "))
        }
    );

    let mut sections = BTreeMap::new();
    sections.insert("direct_answer".to_string(), direct_answer);
    sections.insert("intro".to_string(), intro);
    sections.insert("section_01_content".to_string(), section_01);
    sections.insert("section_02_content".to_string(), section_02);
    sections.insert("section_03_content".to_string(), section_03);

    let section_order = vec![
        "direct_answer".to_string(),
        "intro".to_string(),
        "section_01_content".to_string(),
        "section_02_content".to_string(),
        "section_03_content".to_string(),
    ];

    let toc = vec![
        TocEntry { anchor: "#how-it-works".to_string(), short_label: "How Does It Work?".to_string() },
        TocEntry { anchor: "#pricing".to_string(), short_label: "What Does It Cost?".to_string() },
        TocEntry { anchor: "#rollout".to_string(), short_label: "How Do Teams Roll It Out?".to_string() },
        TocEntry { anchor: "#results".to_string(), short_label: "Results and Outcomes".to_string() },
    ];

    let faq = (0..5)
        .map(|i| FaqItem { question: format!("FAQ question number {i}?"), answer: format!("Answer body for FAQ entry {i}.") })
        .collect();
    let paa = (0..3)
        .map(|i| FaqItem { question: format!("People also ask number {i}?"), answer: format!("Answer body for PAA entry {i}.") })
        .collect();

    let mut citation_map = BTreeMap::new();
    citation_map.insert("[1]".to_string(), "https://example.com/source-1".to_string());
    citation_map.insert("[2]".to_string(), "https://example.com/source-2".to_string());
    citation_map.insert("[3]".to_string(), "https://example.com/source-3".to_string());
    citation_map.insert("[4]".to_string(), "https://example.com/source-4".to_string());

    let sources = vec![
        SourceEntry { id: "[1]".to_string(), url: "https://example.com/source-1".to_string(), title: "Source One".to_string() },
        SourceEntry { id: "[2]".to_string(), url: "https://example.com/source-2".to_string(), title: "Source Two".to_string() },
        SourceEntry { id: "[3]".to_string(), url: "https://example.com/source-3".to_string(), title: "Source Three".to_string() },
        SourceEntry { id: "[4]".to_string(), url: "https://example.com/source-4".to_string(), title: "Source Four".to_string() },
    ];

    ArticleOutput {
        title: "AI Customer Service: The Complete Guide for Support Teams".to_string(),
        subtitle: "A practical rollout guide for support leaders".to_string(),
        teaser: "What it actually takes to bring automation into a support queue without losing the team's trust.".to_string(),
        slug: "ai-customer-service-guide".to_string(),
        meta_title: "AI Customer Service Guide for Support Teams".to_string(),
        meta_description: "Learn how ai customer service automation helps support teams resolve tickets faster, cut costs, and scale without sacrificing quality or empathy.".to_string(),
        sections,
        section_order,
        toc,
        faq,
        paa,
        comparison_tables: Vec::new(),
        images: BTreeMap::new(),
        internal_links: BTreeMap::new(),
        citation_map,
        sources,
        word_count: 0,
    }
}

/// A job config with every required field set, an author present (for
/// the E-E-A-T component), and the default gate thresholds.
pub fn base_job_config(primary_keyword: &str) -> JobConfig {
    JobConfig {
        primary_keyword: primary_keyword.to_string(),
        company_url: None,
        company_name: None,
        language: "en".to_string(),
        country: None,
        word_count_target: Default::default(),
        export_formats: BTreeSet::from([ExportFormat::Html]),
        batch_siblings: Vec::new(),
        author: Some(Author {
            name: "Jordan Lee".to_string(),
            bio: "Jordan writes about customer operations.".to_string(),
            url: "https://example.com/authors/jordan-lee".to_string(),
        }),
        max_regeneration_attempts: 3,
        quality_gate_aeo_min: 85.0,
        quality_gate_critical_max: 0,
    }
}

/// Wires every stage with in-memory collaborators, swapping in
/// `llm_client` for the generation and citations stages.
pub fn build_engine(llm_client: Arc<dyn LlmClient>) -> DefaultWorkflowEngine {
    let mut registry = StageRegistry::new();
    registry.register(Box::new(DataFetchStage::new(Arc::new(MockSitemapClient), Arc::new(MockCompanyProfileFetcher))));
    registry.register(Box::new(PromptBuildStage::new()));
    registry.register(Box::new(GenerationStage::new(llm_client.clone())));
    registry.register(Box::new(QualityRefinementStage::new()));
    registry.register(Box::new(ImageStage::new(Arc::new(MockImageGenerator))));
    registry.register(Box::new(InternalLinksStage::new()));
    registry.register(Box::new(CitationsStage::new(
        Arc::new(MockUrlHealthChecker),
        Arc::new(UrlHealthCache::new(Box::new(SystemClock))),
        llm_client.clone(),
    )));
    registry.register(Box::new(SimilarityCheckStage::new()));
    registry.register(Box::new(CleanupStage::new()));
    registry.register(Box::new(StorageExportStage::new(Arc::new(InMemoryArticlePersistence::new()), Arc::new(MockPdfRenderer))));

    let rewrite_engine = Arc::new(RewriteEngine::new(llm_client));
    DefaultWorkflowEngine::new(registry, EngineConfig::default(), rewrite_engine)
}
