// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Collaborator Adapters
//!
//! Concrete implementations of the domain crate's collaborator ports.
//! `reqwest_url_health` and `reqwest_sitemap` are the two ports this crate
//! owns directly (plain HTTP); `mock_collaborators` backs `--dry-run` and
//! integration tests. LLM, image generation, PDF rendering, and article
//! persistence are expected to be wired from provider-specific crates at
//! the bootstrap composition root and are represented here only by their
//! mocks.

pub mod mock_collaborators;
pub mod reqwest_sitemap;
pub mod reqwest_url_health;

pub use mock_collaborators::{
    InMemoryArticlePersistence, MockCompanyProfileFetcher, MockImageGenerator, MockLlmClient, MockPdfRenderer,
    MockSitemapClient, MockUrlHealthChecker,
};
pub use reqwest_sitemap::ReqwestSitemapClient;
pub use reqwest_url_health::ReqwestUrlHealthChecker;
