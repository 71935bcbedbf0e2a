// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Data-Fetch Stage (pre, critical)

use async_trait::async_trait;
use seo_pipeline_domain::{CompanyProfileFetcher, ExecutionContext, Phase, PipelineError, SitemapClient, Stage, StageName};
use std::sync::Arc;
use std::time::Duration;

pub struct DataFetchStage {
    sitemap_client: Arc<dyn SitemapClient>,
    company_profile_fetcher: Arc<dyn CompanyProfileFetcher>,
}

impl DataFetchStage {
    pub fn new(sitemap_client: Arc<dyn SitemapClient>, company_profile_fetcher: Arc<dyn CompanyProfileFetcher>) -> Self {
        Self { sitemap_client, company_profile_fetcher }
    }
}

#[async_trait]
impl Stage for DataFetchStage {
    fn ordinal(&self) -> u32 {
        0
    }

    fn name(&self) -> StageName {
        StageName::new("data_fetch")
    }

    fn phase(&self) -> Phase {
        Phase::Pre
    }

    fn critical(&self) -> bool {
        true
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(20)
    }

    fn max_attempts(&self) -> u32 {
        2
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        context.job_config.validate_required()?;

        if context.job_config.company_url.is_some() || context.job_config.company_name.is_some() {
            let company_data = self
                .company_profile_fetcher
                .fetch(context.job_config.company_url.as_deref(), context.job_config.company_name.as_deref())
                .await?;
            context.company_data = Some(company_data);
        }

        if let Some(company_url) = context.job_config.company_url.clone() {
            let sitemap_data = self.sitemap_client.fetch_sitemap(&company_url).await?;
            context.sitemap_data = Some(sitemap_data);
        }

        Ok(context)
    }
}
