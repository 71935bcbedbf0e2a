// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Structured Logging Setup
//!
//! Installs the process-wide [`tracing_subscriber`] subscriber. The
//! bootstrap crate's `ConsoleLogger` covers bootstrap-phase messages before
//! the full subscriber is installed; this module configures the subscriber
//! the rest of the pipeline logs through once the composition root has
//! parsed its configuration.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global subscriber reading its filter from `RUST_LOG`,
/// falling back to `default_level` when unset.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init_logging(default_level: &str, json: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json {
        tracing_subscriber::registry().with(filter).with(fmt::layer().json().with_target(true)).try_init()
    } else {
        tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false).compact()).try_init()
    }
}
