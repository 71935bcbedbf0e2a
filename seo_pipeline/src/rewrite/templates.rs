// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Rewrite Prompt Templates
//!
//! One template per critical-issue kind the local detector in
//! [`crate::quality::issues`] emits, plus a generic fallback and a
//! refresh-specific template for the external refresh interface.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteTemplate {
    KeywordReduction,
    KeywordIncrease,
    ParagraphExpansion,
    AiMarkerRemoval,
    TagRepair,
    RefreshStat,
    Generic,
}

impl RewriteTemplate {
    /// Selects a template from an issue kind emitted by the local
    /// detector, or a free-form instruction string from the refresh
    /// interface (matched by keyword heuristic).
    pub fn select(issue_kind: Option<&str>, instruction_text: &str) -> Self {
        if let Some(kind) = issue_kind {
            return match kind {
                "keyword_overuse" => RewriteTemplate::KeywordReduction,
                "keyword_underuse" => RewriteTemplate::KeywordIncrease,
                "short_paragraph" => RewriteTemplate::ParagraphExpansion,
                "ai_marker_residue" => RewriteTemplate::AiMarkerRemoval,
                "unclosed_tag" => RewriteTemplate::TagRepair,
                _ => RewriteTemplate::Generic,
            };
        }

        let lowered = instruction_text.to_lowercase();
        if lowered.contains("stat") || lowered.contains("refresh") || lowered.contains("outdated") {
            RewriteTemplate::RefreshStat
        } else {
            RewriteTemplate::Generic
        }
    }

    /// Renders the system-level framing prepended to the LLM prompt for
    /// this template. The caller appends the field's current content and
    /// the instruction text.
    pub fn render_preamble(&self, primary_keyword: &str) -> String {
        match self {
            RewriteTemplate::KeywordReduction => format!(
                "Rewrite the following HTML field so that the phrase \"{primary_keyword}\" appears at most 8 times total, preserving meaning, HTML structure, and every citation marker and internal link exactly as given."
            ),
            RewriteTemplate::KeywordIncrease => format!(
                "Rewrite the following HTML field so that the phrase \"{primary_keyword}\" appears at least 5 times total, preserving meaning, HTML structure, and every citation marker and internal link exactly as given."
            ),
            RewriteTemplate::ParagraphExpansion => {
                "Expand the short paragraph(s) below to at least 40 words each while preserving meaning, HTML structure, citation markers, and internal links exactly as given.".to_string()
            }
            RewriteTemplate::AiMarkerRemoval => {
                "Rewrite the following field to remove any residual AI-assistant disclaimer language, preserving meaning, HTML structure, citation markers, and internal links exactly as given.".to_string()
            }
            RewriteTemplate::TagRepair => {
                "Repair the unbalanced HTML tags in the following field without altering its text content or meaning.".to_string()
            }
            RewriteTemplate::RefreshStat => {
                "Update the statistic or figure referenced in the following field to a current value, preserving surrounding meaning, HTML structure, citation markers, and internal links exactly as given.".to_string()
            }
            RewriteTemplate::Generic => {
                "Apply the following edit instruction to the field below, preserving meaning, HTML structure, citation markers, and internal links exactly as given.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_template_from_issue_kind() {
        assert_eq!(RewriteTemplate::select(Some("keyword_overuse"), ""), RewriteTemplate::KeywordReduction);
        assert_eq!(RewriteTemplate::select(Some("short_paragraph"), ""), RewriteTemplate::ParagraphExpansion);
        assert_eq!(RewriteTemplate::select(Some("unknown_kind"), ""), RewriteTemplate::Generic);
    }

    #[test]
    fn selects_refresh_template_from_free_text() {
        assert_eq!(RewriteTemplate::select(None, "update the outdated stat in this section"), RewriteTemplate::RefreshStat);
        assert_eq!(RewriteTemplate::select(None, "make this sound friendlier"), RewriteTemplate::Generic);
    }
}
