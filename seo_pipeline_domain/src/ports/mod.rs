// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Ports: trait-only collaborator boundaries implemented by infrastructure
//! adapters in the application crate and wired by the bootstrap crate's
//! composition root.

pub mod article_persistence;
pub mod company_profile_fetcher;
pub mod image_generator;
pub mod llm_client;
pub mod pdf_renderer;
pub mod sitemap_client;
pub mod url_health_checker;

pub use article_persistence::ArticlePersistence;
pub use company_profile_fetcher::CompanyProfileFetcher;
pub use image_generator::{ImageGenerator, ImageRequest, ImageResult};
pub use llm_client::{CompletionRequest, CompletionResponse, LlmClient};
pub use pdf_renderer::PdfRenderer;
pub use sitemap_client::SitemapClient;
pub use url_health_checker::{UrlHealth, UrlHealthChecker};
