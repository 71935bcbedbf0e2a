// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # URL Health Cache
//!
//! A 5-minute TTL cache in front of the [`seo_pipeline_domain::UrlHealthChecker`]
//! port, so a batch of citations sharing a host don't each re-dial it. The
//! clock is injected so cache expiry is deterministically testable without
//! sleeping real time.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use seo_pipeline_domain::UrlHealth;
use std::collections::HashMap;

pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Injected time source, overridden by tests with a fixed or steppable
/// clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry {
    health: UrlHealth,
    cached_at: DateTime<Utc>,
}

pub struct UrlHealthCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Box<dyn Clock>,
    ttl_seconds: i64,
}

impl UrlHealthCache {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { entries: RwLock::new(HashMap::new()), clock, ttl_seconds: DEFAULT_TTL_SECONDS }
    }

    pub fn with_ttl(clock: Box<dyn Clock>, ttl_seconds: i64) -> Self {
        Self { entries: RwLock::new(HashMap::new()), clock, ttl_seconds }
    }

    pub fn get(&self, url: &str) -> Option<UrlHealth> {
        let entries = self.entries.read();
        let entry = entries.get(url)?;
        let age = self.clock.now().signed_duration_since(entry.cached_at);
        if age.num_seconds() > self.ttl_seconds {
            None
        } else {
            Some(entry.health)
        }
    }

    pub fn put(&self, url: String, health: UrlHealth) {
        self.entries.write().insert(url, CacheEntry { health, cached_at: self.clock.now() });
    }
}
