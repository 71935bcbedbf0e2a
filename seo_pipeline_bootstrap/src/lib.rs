// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # Bootstrap Module
//!
//! The bootstrap module sits **outside** the domain/application/infrastructure
//! layers and owns everything the process needs before a single pipeline job
//! can run:
//!
//! - **Entry point** - CLI argument parsing and validation
//! - **Configuration** - layered config-file + environment + CLI precedence
//! - **Signal handling** - graceful shutdown on SIGTERM/SIGINT/SIGHUP
//! - **Exit codes** - BSD `sysexits.h`-style process exit codes
//! - **Logging** - bootstrap-phase logging, separate from the application's
//!   `tracing` spans
//!
//! ## Architecture Position
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          BOOTSTRAP (this crate)              │
//! │  - CLI parsing & validation                  │
//! │  - Config loading                            │
//! │  - Signal handling                           │
//! │  - Exit code mapping                         │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │     APPLICATION (seo_pipeline crate)         │
//! │  - Stages, workflow engine, rewrite engine   │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │     DOMAIN (seo_pipeline_domain crate)       │
//! │  - Entities, ports, services                 │
//! └─────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod signals;
