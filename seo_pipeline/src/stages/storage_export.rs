// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Storage/Export Stage (post, non-critical)
//!
//! Renders the article to each requested format. HTML rendering injects
//! CSS, schema.org JSON-LD, and OpenGraph/Twitter-card meta tags; image
//! `src` attributes are rewritten to absolute URLs; citation markers in
//! the body are linkified to in-page anchors. PDF rendering is delegated
//! to the injected [`PdfRenderer`] collaborator.

use async_trait::async_trait;
use seo_pipeline_domain::{ArticlePersistence, ArticleOutput, ExecutionContext, ExportFormat, PdfRenderer, Phase, PipelineError, Stage, StageName};
use std::sync::Arc;
use std::time::Duration;

pub struct StorageExportStage {
    persistence: Arc<dyn ArticlePersistence>,
    pdf_renderer: Arc<dyn PdfRenderer>,
}

impl StorageExportStage {
    pub fn new(persistence: Arc<dyn ArticlePersistence>, pdf_renderer: Arc<dyn PdfRenderer>) -> Self {
        Self { persistence, pdf_renderer }
    }
}

fn linkify_citations(body: &str) -> String {
    let re = regex::Regex::new(r"\[(\d+)\]").unwrap();
    re.replace_all(body, r#"<a href="#source-$1">[$1]</a>"#).into_owned()
}

fn render_html(article: &ArticleOutput, company_url: Option<&str>) -> String {
    let base = company_url.unwrap_or("");
    let mut body = String::new();
    for (_, content) in article.ordered_sections() {
        body.push_str(&linkify_citations(content));
        body.push('\n');
    }

    let faq_json: Vec<String> = article
        .faq
        .iter()
        .map(|f| format!(r#"{{"@type":"Question","name":{},"acceptedAnswer":{{"@type":"Answer","text":{}}}}}"#, serde_json::to_string(&f.question).unwrap_or_default(), serde_json::to_string(&f.answer).unwrap_or_default()))
        .collect();

    let json_ld = format!(
        r#"<script type="application/ld+json">{{"@context":"https://schema.org","@graph":[{{"@type":"Article","headline":{},"description":{}}},{{"@type":"FAQPage","mainEntity":[{}]}}]}}</script>"#,
        serde_json::to_string(&article.title).unwrap_or_default(),
        serde_json::to_string(&article.meta_description).unwrap_or_default(),
        faq_json.join(",")
    );

    let og_tags = format!(
        r#"<meta property="og:title" content="{title}"><meta property="og:description" content="{description}"><meta name="twitter:card" content="summary_large_image">"#,
        title = article.title,
        description = article.meta_description,
    );

    let images: String = article.images.values().map(|url| format!(r#"<img src="{}{}" alt="">"#, base, url)).collect();

    format!(
        "<html><head><title>{title}</title>{json_ld}{og_tags}<style>body{{font-family:sans-serif;max-width:720px;margin:auto;}}</style></head><body><h1>{title}</h1>{body}{images}</body></html>",
        title = article.title,
    )
}

fn render_markdown(article: &ArticleOutput) -> String {
    let mut markdown = format!("# {}\n\n", article.title);
    for (_, content) in article.ordered_sections() {
        markdown.push_str(&crate::text::html::strip_tags(content));
        markdown.push_str("\n\n");
    }
    if !article.faq.is_empty() {
        markdown.push_str("## FAQ\n\n");
        for item in &article.faq {
            markdown.push_str(&format!("**{}**\n\n{}\n\n", item.question, item.answer));
        }
    }
    markdown
}

fn render_json(article: &ArticleOutput) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(article).map_err(|e| PipelineError::StageException { stage: "storage_export".to_string(), detail: e.to_string() })
}

#[async_trait]
impl Stage for StorageExportStage {
    fn ordinal(&self) -> u32 {
        21
    }

    fn name(&self) -> StageName {
        StageName::new("storage_export")
    }

    fn phase(&self) -> Phase {
        Phase::Post
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

        let mut artifacts = std::collections::BTreeMap::new();
        let html = render_html(&article, context.job_config.company_url.as_deref());

        for format in &context.job_config.export_formats {
            match format {
                ExportFormat::Html => {
                    artifacts.insert("html".to_string(), html.clone());
                }
                ExportFormat::Markdown => {
                    artifacts.insert("markdown".to_string(), render_markdown(&article));
                }
                ExportFormat::Json => {
                    artifacts.insert("json".to_string(), render_json(&article)?);
                }
                ExportFormat::Pdf => match self.pdf_renderer.render(&article, &html).await {
                    Ok(encoded) => {
                        artifacts.insert("pdf".to_string(), encoded);
                    }
                    Err(err) => {
                        context.record_failure(seo_pipeline_domain::StageFailure {
                            stage: self.name(),
                            kind: err.kind(),
                            message: format!("pdf rendering failed: {err}"),
                            fatal: false,
                            occurred_at: chrono::Utc::now(),
                        });
                    }
                },
            }
        }

        context.exported_artifacts = artifacts.clone();
        self.persistence.store(&context.job_id, &article, &artifacts).await?;

        Ok(context)
    }
}
