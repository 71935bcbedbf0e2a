// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SEO Pipeline Domain
//!
//! Pure domain layer for the article-generation pipeline: entities, value
//! objects, the `Stage`/`WorkflowEngine` service contracts, collaborator
//! ports, and the error taxonomy. This crate depends on nothing that
//! touches I/O directly; `async_trait` is used only to express collaborator
//! contracts, and no `tokio` runtime type appears here. The application
//! crate provides the concrete stages and collaborator adapters; the
//! bootstrap crate wires the composition root.

pub mod entities;
pub mod error;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{
    ArticleOutput, Author, BatchSiblingSummary, CompanyData, ComparisonTable, CriticalIssue,
    ExecutionContext, ExportFormat, FaqItem, InternalLink, JobConfig, QualityReport,
    SimilarityReport, SitemapData, SourceEntry, StageFailure, TocEntry,
};
pub use error::{PipelineError, PipelineErrorKind};
pub use ports::{
    ArticlePersistence, CompanyProfileFetcher, CompletionRequest, CompletionResponse,
    ImageGenerator, ImageRequest, ImageResult, LlmClient, PdfRenderer, SitemapClient, UrlHealth,
    UrlHealthChecker,
};
pub use services::{Phase, QualityGateDecision, Stage, StageRegistry, WorkflowEngine};
pub use value_objects::{JobId, RewriteInstruction, RewriteMode, RewriteTarget, StageName, WordCountTarget};
