// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline Configuration
//!
//! Layered runtime configuration for the parts of the system that sit
//! above a single `JobConfig`: stage timeouts/concurrency, the metrics
//! exporter, and observability defaults. Layered default -> TOML file ->
//! environment (`SEO_PIPELINE__` prefix, `__` as the nesting separator) via
//! the `config` crate, the same precedence order the bootstrap crate's
//! `AppConfig` documents for process-level settings.

use seo_pipeline_domain::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    pub stages: StageSettings,
    pub metrics: MetricsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSettings {
    pub default_timeout_secs: u64,
    pub parallel_phase_concurrency: usize,
    pub max_stage_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            stages: StageSettings { default_timeout_secs: 30, parallel_phase_concurrency: 4, max_stage_retries: 2 },
            metrics: MetricsSettings { enabled: true, port: 9091 },
            logging: LoggingSettings { level: "info".to_string(), json: false },
        }
    }
}

/// Loads [`PipelineSettings`], falling back to defaults when no config
/// file is present; environment variables override either.
pub fn load_settings(config_path: Option<&Path>) -> Result<PipelineSettings, PipelineError> {
    let mut builder = config::Config::builder()
        .add_source(config::Config::try_from(&PipelineSettings::default()).map_err(|e| {
            PipelineError::InvalidConfiguration(format!("failed to seed config defaults: {e}"))
        })?);

    if let Some(path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        }
    }

    builder = builder.add_source(config::Environment::with_prefix("SEO_PIPELINE").separator("__"));

    let settings = builder
        .build()
        .map_err(|e| PipelineError::InvalidConfiguration(format!("failed to build configuration: {e}")))?;

    settings.try_deserialize().map_err(|e| PipelineError::InvalidConfiguration(format!("failed to parse configuration: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_when_no_file_given() {
        let settings = load_settings(None).expect("defaults always load");
        assert_eq!(settings.stages.default_timeout_secs, 30);
        assert_eq!(settings.metrics.port, 9091);
    }

    #[test]
    fn missing_file_path_falls_back_to_defaults() {
        let settings = load_settings(Some(Path::new("/nonexistent/seo-pipeline.toml"))).expect("falls back cleanly");
        assert_eq!(settings.logging.level, "info");
    }
}
