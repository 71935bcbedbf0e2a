// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secure Command-Line Argument Validation
//!
//! Validates free-text CLI arguments before they reach the domain, and
//! converts a parsed [`GenerateArgs`] into a domain `JobConfig`.
//!
//! ## Dangerous Patterns Detected
//!
//! Applied only to arguments that become file paths (`--config`,
//! `--output-dir`, manifest paths); keyword/company-name text is allowed to
//! contain ordinary punctuation (an ampersand in a company name is not an
//! attack).

use crate::cli::parser::GenerateArgs;
use seo_pipeline_domain::{Author, ExportFormat, JobConfig, PipelineError, WordCountTarget};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MAX_ARG_LENGTH: usize = 1000;
const MAX_PATH_LENGTH: usize = 4096;

const DANGEROUS_PATH_PATTERNS: &[&str] = &["..", "~", "$", "`", ";", "|", "\n", "\r", "\0"];

const PROTECTED_DIRS: &[&str] = &["/etc", "/bin", "/sbin", "/usr/bin", "/usr/sbin", "/boot", "/sys", "/proc", "/dev"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("argument too long (max {MAX_ARG_LENGTH} characters): {0}")]
    ArgumentTooLong(String),

    #[error("dangerous pattern '{pattern}' detected in path argument: {arg}")]
    DangerousPattern { pattern: String, arg: String },

    #[error("path exceeds maximum length (max {MAX_PATH_LENGTH})")]
    PathTooLong,

    #[error("access to protected system directory denied: {0}")]
    ProtectedDirectory(String),

    #[error("unrecognized export format: {0}")]
    UnknownExportFormat(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Validates a path-like argument for traversal/injection attempts. Does
/// not require the path to exist (callers may be specifying an output path
/// to create).
pub fn validate_path(path: &str) -> Result<PathBuf, ValidationError> {
    if path.len() > MAX_ARG_LENGTH {
        return Err(ValidationError::ArgumentTooLong(path.chars().take(50).collect::<String>() + "..."));
    }

    for pattern in DANGEROUS_PATH_PATTERNS {
        if path.contains(pattern) {
            return Err(ValidationError::DangerousPattern { pattern: pattern.to_string(), arg: path.to_string() });
        }
    }

    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }

    let candidate = Path::new(path);
    for protected in PROTECTED_DIRS {
        if candidate.starts_with(protected) {
            return Err(ValidationError::ProtectedDirectory(path.to_string()));
        }
    }

    Ok(candidate.to_path_buf())
}

fn parse_export_formats(raw: &str) -> Result<BTreeSet<ExportFormat>, ValidationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| match token.to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            other => Err(ValidationError::UnknownExportFormat(other.to_string())),
        })
        .collect()
}

impl GenerateArgs {
    /// Converts parsed CLI arguments into a domain `JobConfig`, validating
    /// the export-format list and word-count bound along the way. Full
    /// semantic validation (blank keyword, tunable ranges) happens in
    /// `JobConfig::validate_required`, run by the data-fetch stage.
    pub fn into_job_config(self) -> Result<JobConfig, ValidationError> {
        let export_formats = parse_export_formats(&self.export_formats)?;
        let word_count_target = WordCountTarget::new(self.word_count_target).unwrap_or_default();

        let author = match (self.author_name, self.author_bio, self.author_url) {
            (Some(name), bio, url) => Some(Author { name, bio: bio.unwrap_or_default(), url: url.unwrap_or_default() }),
            _ => None,
        };

        Ok(JobConfig {
            primary_keyword: self.primary_keyword,
            company_url: self.company_url,
            company_name: self.company_name,
            language: self.language,
            country: self.country,
            word_count_target,
            export_formats,
            batch_siblings: Vec::new(),
            author,
            max_regeneration_attempts: self.max_regeneration_attempts,
            quality_gate_aeo_min: self.quality_gate_aeo_min,
            quality_gate_critical_max: self.quality_gate_critical_max,
        })
    }
}
