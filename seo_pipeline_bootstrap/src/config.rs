// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Configuration
//!
//! Bootstrap-phase configuration, built after CLI parsing, security
//! validation, and config-file/environment resolution. Immutable once
//! built: thread-safe to share across the async runtime without further
//! synchronization.

use std::path::PathBuf;

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Bootstrap-phase application configuration: process-wide settings that
/// sit above a single job's `JobConfig` (which lives in the domain crate
/// and is built separately by the CLI's `generate` command).
#[derive(Debug, Clone)]
pub struct AppConfig {
    app_name: String,
    log_level: LogLevel,
    log_json: bool,
    config_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    worker_concurrency: Option<usize>,
    verbose: bool,
    dry_run: bool,
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn log_json(&self) -> bool {
        self.log_json
    }

    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }

    pub fn output_dir(&self) -> Option<&PathBuf> {
        self.output_dir.as_ref()
    }

    pub fn worker_concurrency(&self) -> Option<usize> {
        self.worker_concurrency
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    app_name: Option<String>,
    log_level: Option<LogLevel>,
    log_json: bool,
    config_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    worker_concurrency: Option<usize>,
    verbose: bool,
    dry_run: bool,
}

impl AppConfigBuilder {
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn log_json(mut self, enabled: bool) -> Self {
        self.log_json = enabled;
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    pub fn worker_concurrency(mut self, count: usize) -> Self {
        self.worker_concurrency = Some(count);
        self
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `app_name` was never set.
    pub fn try_build(self) -> Result<AppConfig, String> {
        Ok(AppConfig {
            app_name: self.app_name.ok_or("app_name is required")?,
            log_level: self.log_level.unwrap_or_default(),
            log_json: self.log_json,
            config_file: self.config_file,
            output_dir: self.output_dir,
            worker_concurrency: self.worker_concurrency,
            verbose: self.verbose,
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_app_name() {
        let result = AppConfig::builder().try_build();
        assert_eq!(result.unwrap_err(), "app_name is required");
    }

    #[test]
    fn builder_applies_defaults() {
        let config = AppConfig::builder().app_name("seo-pipeline").try_build().expect("app_name was set");
        assert_eq!(config.app_name(), "seo-pipeline");
        assert_eq!(config.log_level(), LogLevel::Info);
        assert!(!config.log_json());
        assert!(config.config_file().is_none());
        assert!(!config.is_verbose());
        assert!(!config.is_dry_run());
    }

    #[test]
    fn builder_applies_every_override() {
        let config = AppConfig::builder()
            .app_name("seo-pipeline")
            .log_level(LogLevel::Debug)
            .log_json(true)
            .config_file("/etc/seo-pipeline/config.toml")
            .output_dir("/tmp/out")
            .worker_concurrency(4)
            .verbose(true)
            .dry_run(true)
            .try_build()
            .expect("all required fields were set");

        assert_eq!(config.log_level(), LogLevel::Debug);
        assert!(config.log_json());
        assert_eq!(config.worker_concurrency(), Some(4));
        assert!(config.is_verbose());
        assert!(config.is_dry_run());
    }
}
