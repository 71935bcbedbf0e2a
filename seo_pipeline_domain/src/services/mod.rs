// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Domain services: the stage/workflow-engine contracts that the
//! application crate implements and the bootstrap crate wires together.

pub mod stage;
pub mod workflow_engine;

pub use stage::{Phase, Stage, StageRegistry};
pub use workflow_engine::{QualityGateDecision, WorkflowEngine};
