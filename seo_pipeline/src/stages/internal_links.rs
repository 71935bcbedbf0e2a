// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Internal-Links Stage (parallel, non-critical)
//!
//! Selects 1-2 internal links per section from the sitemap and batch
//! siblings by keyword overlap with the section's title, rejecting anchors
//! over 6 words and enforcing uniqueness across the whole article.

use crate::text::links::slugify;
use crate::text::normalize::normalize_internal_href;
use async_trait::async_trait;
use seo_pipeline_domain::{ExecutionContext, Phase, PipelineError, Stage, StageName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

const MAX_ANCHOR_WORDS: usize = 6;
const MAX_LINKS_PER_SECTION: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEntry {
    pub anchor: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InternalLinksOutput {
    pub links_by_section: BTreeMap<String, Vec<LinkEntry>>,
}

pub struct InternalLinksStage;

impl InternalLinksStage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InternalLinksStage {
    fn default() -> Self {
        Self::new()
    }
}

struct Candidate {
    anchor: String,
    href: String,
    keywords: HashSet<String>,
}

fn keyword_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()).filter(|w| w.len() > 3).collect()
}

fn overlap_score(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    a.intersection(b).count()
}

#[async_trait]
impl Stage for InternalLinksStage {
    fn ordinal(&self) -> u32 {
        11
    }

    fn name(&self) -> StageName {
        StageName::new("internal_links")
    }

    fn phase(&self) -> Phase {
        Phase::Parallel
    }

    fn critical(&self) -> bool {
        false
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let Some(article) = context.structured_article.clone() else {
            return Ok(context);
        };

        let site_host = context
            .job_config
            .company_url
            .as_deref()
            .and_then(|url| url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")))
            .unwrap_or("");

        let mut candidates: Vec<Candidate> = Vec::new();
        if let Some(sitemap) = &context.sitemap_data {
            for url in &sitemap.urls {
                let href = normalize_internal_href(url, site_host);
                let anchor_source = href.trim_start_matches("/magazine/").replace('-', " ");
                candidates.push(Candidate { anchor: anchor_source.clone(), href, keywords: keyword_set(&anchor_source) });
            }
        }
        for sibling in &context.job_config.batch_siblings {
            let href = format!("/magazine/{}", slugify(&sibling.slug));
            let keywords = sibling.topics.iter().flat_map(|t| keyword_set(t)).collect();
            candidates.push(Candidate { anchor: sibling.title.clone(), href, keywords });
        }

        let mut output = InternalLinksOutput::default();
        let mut used_hrefs: HashSet<String> = HashSet::new();

        if !candidates.is_empty() {
            for (field, body) in article.ordered_sections() {
                let section_keywords = keyword_set(body);
                let mut scored: Vec<(usize, usize)> = candidates
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (overlap_score(&section_keywords, &c.keywords), i))
                    .filter(|(score, _)| *score > 0)
                    .collect();
                scored.sort_by(|a, b| b.0.cmp(&a.0));

                let mut links = Vec::new();
                for (_, index) in scored {
                    if links.len() >= MAX_LINKS_PER_SECTION {
                        break;
                    }
                    let candidate = &candidates[index];
                    if used_hrefs.contains(&candidate.href) {
                        continue;
                    }
                    if candidate.anchor.split_whitespace().count() > MAX_ANCHOR_WORDS {
                        continue;
                    }
                    links.push(LinkEntry { anchor: candidate.anchor.clone(), href: candidate.href.clone() });
                    used_hrefs.insert(candidate.href.clone());
                }

                if !links.is_empty() {
                    output.links_by_section.insert(field.to_string(), links);
                }
            }
        }

        let serialized = serde_json::to_string(&output)
            .map_err(|e| PipelineError::StageException { stage: "internal_links".to_string(), detail: e.to_string() })?;
        context.parallel_results.insert(self.name(), serialized);
        Ok(context)
    }
}
