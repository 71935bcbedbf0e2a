// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stages
//!
//! One module per pipeline stage. Pre-phase stages run sequentially in
//! registration order; parallel-phase stages run concurrently bounded by
//! [`crate::application::EngineConfig::parallel_concurrency`]; post-phase
//! stages run sequentially after the parallel phase's results are merged.
//! See [`crate::application::workflow_engine::DefaultWorkflowEngine`] for
//! the orchestration itself.

pub mod cleanup;
pub mod citations;
pub mod data_fetch;
pub mod generation;
pub mod image;
pub mod internal_links;
pub mod prompt_build;
pub mod quality_refinement;
pub mod similarity_check;
pub mod storage_export;

pub use cleanup::CleanupStage;
pub use citations::{CitationsOutput, CitationsStage};
pub use data_fetch::DataFetchStage;
pub use generation::GenerationStage;
pub use image::{ImageOutput, ImageStage};
pub use internal_links::{InternalLinksOutput, InternalLinksStage, LinkEntry};
pub use prompt_build::PromptBuildStage;
pub use quality_refinement::QualityRefinementStage;
pub use similarity_check::SimilarityCheckStage;
pub use storage_export::StorageExportStage;
