// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Reqwest URL Health Checker
//!
//! Thin [`UrlHealthChecker`] adapter backed by a single shared
//! [`reqwest::Client`]. Issues a `HEAD` request and falls back to a ranged
//! `GET` if the host rejects `HEAD` (some CDNs return 405), since all we
//! need is a status code, not a body.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use seo_pipeline_domain::{PipelineError, UrlHealth, UrlHealthChecker};
use std::time::Duration;

const COLLABORATOR: &str = "url_health_checker";

pub struct ReqwestUrlHealthChecker {
    client: Client,
}

impl ReqwestUrlHealthChecker {
    pub fn new(timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| PipelineError::UpstreamError {
            collaborator: COLLABORATOR.to_string(),
            detail: format!("failed to build http client: {e}"),
        })?;
        Ok(Self { client })
    }

    fn classify(status: StatusCode) -> UrlHealth {
        if status.is_success() || status.is_redirection() {
            UrlHealth::Ok
        } else {
            UrlHealth::Broken
        }
    }
}

#[async_trait]
impl UrlHealthChecker for ReqwestUrlHealthChecker {
    async fn check(&self, url: &str) -> Result<UrlHealth, PipelineError> {
        let head_result = self.client.head(url).send().await;

        let response = match head_result {
            Ok(response) if response.status() != StatusCode::METHOD_NOT_ALLOWED => response,
            _ => self.client.get(url).send().await.map_err(|e| {
                if e.is_timeout() {
                    PipelineError::UpstreamTimeout { collaborator: COLLABORATOR.to_string(), detail: url.to_string() }
                } else {
                    PipelineError::UpstreamError {
                        collaborator: COLLABORATOR.to_string(),
                        detail: format!("{url}: {e}"),
                    }
                }
            })?,
        };

        Ok(Self::classify(response.status()))
    }
}
