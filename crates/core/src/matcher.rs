// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text-match predicate applied to inbound note text.

use serde::Deserialize;
use std::fmt;

/// How the configured match text is applied to a note's text.
///
/// Parsed from the `reaction.match_type` config value. An empty or absent
/// value falls back to [`MatchMode::Contains`]; any other unrecognized value
/// becomes [`MatchMode::Unrecognized`], which never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum MatchMode {
    /// Note text starts with the match text.
    Prefix,
    /// Note text ends with the match text.
    Suffix,
    /// Note text contains the match text as a substring.
    #[default]
    Contains,
    /// Unknown mode string from the config; matches nothing.
    Unrecognized,
}

impl MatchMode {
    /// Returns the string representation used in config and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Prefix => "prefix",
            MatchMode::Suffix => "suffix",
            MatchMode::Contains => "contains",
            MatchMode::Unrecognized => "unrecognized",
        }
    }

    /// Evaluates the predicate against a note's text.
    ///
    /// Pure and case-sensitive; no normalization is applied.
    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        match self {
            MatchMode::Prefix => text.starts_with(pattern),
            MatchMode::Suffix => text.ends_with(pattern),
            MatchMode::Contains => text.contains(pattern),
            MatchMode::Unrecognized => false,
        }
    }
}

impl From<String> for MatchMode {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "prefix" => MatchMode::Prefix,
            "suffix" => MatchMode::Suffix,
            // Empty means "not configured": fall back to the default.
            "contains" | "" => MatchMode::Contains,
            _ => MatchMode::Unrecognized,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
