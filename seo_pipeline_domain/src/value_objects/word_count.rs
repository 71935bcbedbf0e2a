// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Word Count Target Value Object

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

pub const WORD_COUNT_MIN: u32 = 1500;
pub const WORD_COUNT_MAX: u32 = 3000;
const WORD_COUNT_DEFAULT: u32 = 2000;

/// A validated target word count for the generated article, bounded to
/// `[1500, 3000]` per the job-config contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WordCountTarget(u32);

impl WordCountTarget {
    pub fn new(value: u32) -> Result<Self, PipelineError> {
        if !(WORD_COUNT_MIN..=WORD_COUNT_MAX).contains(&value) {
            return Err(PipelineError::InvalidConfiguration(format!(
                "word_count_target {value} out of range [{WORD_COUNT_MIN}, {WORD_COUNT_MAX}]"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for WordCountTarget {
    fn default() -> Self {
        Self(WORD_COUNT_DEFAULT)
    }
}

impl TryFrom<u32> for WordCountTarget {
    type Error = PipelineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WordCountTarget> for u32 {
    fn from(value: WordCountTarget) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(WordCountTarget::new(1000).is_err());
        assert!(WordCountTarget::new(4000).is_err());
    }

    #[test]
    fn accepts_bounds() {
        assert!(WordCountTarget::new(WORD_COUNT_MIN).is_ok());
        assert!(WordCountTarget::new(WORD_COUNT_MAX).is_ok());
    }
}
