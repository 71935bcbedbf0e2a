// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # URL Health Checker Port

use crate::error::PipelineError;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlHealth {
    Ok,
    Broken,
}

/// Collaborator boundary for checking whether a citation source URL is
/// still reachable. The citations stage caches results behind a 5-minute
/// TTL so repeated checks within a batch don't re-dial the same host.
#[async_trait]
pub trait UrlHealthChecker: Send + Sync {
    async fn check(&self, url: &str) -> Result<UrlHealth, PipelineError>;
}
