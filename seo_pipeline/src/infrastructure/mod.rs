// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure
//!
//! Concrete adapters and ambient-stack plumbing implementing the domain
//! crate's collaborator ports and supporting the application's own runtime
//! concerns: configuration loading, logging setup, metrics, and the citation
//! URL-health cache.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod url_health_cache;

pub use config::{load_settings, PipelineSettings};
pub use metrics::PipelineMetrics;
pub use url_health_cache::{Clock, SystemClock, UrlHealthCache};
