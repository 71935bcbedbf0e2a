// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Company Profile Fetcher Port

use crate::entities::execution_context::CompanyData;
use crate::error::PipelineError;
use async_trait::async_trait;

/// Collaborator boundary for enriching a job with company context scraped
/// or looked up from `company_url`/`company_name`. Used only by the
/// data-fetch stage.
#[async_trait]
pub trait CompanyProfileFetcher: Send + Sync {
    async fn fetch(&self, company_url: Option<&str>, company_name: Option<&str>) -> Result<CompanyData, PipelineError>;
}
