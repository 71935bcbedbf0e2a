// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Entities: mutable, identity-bearing records that flow through a job's
//! execution rather than being replaced wholesale like value objects.

pub mod article;
pub mod execution_context;
pub mod job_config;
pub mod quality_report;

pub use article::{ArticleOutput, ComparisonTable, FaqItem, InternalLink, SourceEntry, TocEntry};
pub use execution_context::{CompanyData, ExecutionContext, SitemapData, StageFailure};
pub use job_config::{Author, BatchSiblingSummary, ExportFormat, JobConfig};
pub use quality_report::{CriticalIssue, QualityReport, SimilarityReport};
