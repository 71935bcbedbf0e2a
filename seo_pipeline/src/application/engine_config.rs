// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Engine Configuration
//!
//! Process-wide tunables that apply across jobs, distinct from the
//! per-job [`seo_pipeline_domain::JobConfig`]. Loaded by
//! [`crate::infrastructure::config`] from defaults, a TOML file, and
//! environment overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { base_delay_ms: 250, max_delay_ms: 8_000, backoff_factor: 2.0 }
    }
}

impl RetryPolicy {
    /// Exponential backoff delay before retry attempt `attempt` (0-indexed),
    /// capped at `max_delay_ms`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let scaled = self.base_delay_ms as f64 * self.backoff_factor.powi(attempt as i32);
        Duration::from_millis(scaled.min(self.max_delay_ms as f64) as u64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on concurrently executing stages within the parallel
    /// phase.
    #[serde(default = "default_parallel_concurrency")]
    pub parallel_concurrency: usize,
    /// Per-stage timeout overrides, keyed by stage name; stages not listed
    /// use their own `Stage::timeout()` default.
    #[serde(default)]
    pub stage_timeouts: BTreeMap<String, u64>,
    #[serde(default)]
    pub retry_policy: RetryPolicy,
}

fn default_parallel_concurrency() -> usize {
    8
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { parallel_concurrency: default_parallel_concurrency(), stage_timeouts: BTreeMap::new(), retry_policy: RetryPolicy::default() }
    }
}

impl EngineConfig {
    /// Resolves the effective timeout for `stage_name`, falling back to
    /// `stage_default` when no override is configured.
    pub fn timeout_for(&self, stage_name: &str, stage_default: Duration) -> Duration {
        self.stage_timeouts.get(stage_name).map(|ms| Duration::from_millis(*ms)).unwrap_or(stage_default)
    }
}
