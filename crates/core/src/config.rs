// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bot configuration management.
//!
//! Configuration is stored in a TOML file (by default `config.toml`):
//!
//! ```toml
//! [misskey]
//! url = "https://misskey.example"
//! token = "..."
//!
//! [reaction]
//! emoji = "👍"
//! match_text = "hello"
//! match_type = "contains"   # prefix | suffix | contains
//! ```
//!
//! The configuration is loaded and validated once at startup and is
//! immutable for the lifetime of the process.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::matcher::MatchMode;

/// Path on the instance where the streaming WebSocket is served.
const STREAMING_PATH: &str = "/streaming";

/// Bot configuration loaded from the TOML config file.
///
/// Missing sections and fields decode to empty values; `validate` turns
/// them into field-specific errors with hints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Instance connection settings.
    #[serde(default)]
    pub misskey: MisskeyConfig,
    /// Reaction rule settings.
    #[serde(default)]
    pub reaction: ReactionConfig,
}

/// Connection settings for the Misskey instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MisskeyConfig {
    /// Instance origin, e.g. `https://misskey.example`.
    #[serde(default)]
    pub url: String,
    /// API token used for both the REST API and the streaming channel.
    #[serde(default)]
    pub token: String,
}

/// Reaction rule: which notes to react to and with what.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionConfig {
    /// Emoji or custom reaction symbol to post.
    #[serde(default = "default_emoji")]
    pub emoji: String,
    /// Text the note must match.
    #[serde(default)]
    pub match_text: String,
    /// How `match_text` is applied to note text (default: contains).
    #[serde(default)]
    pub match_type: MatchMode,
}

fn default_emoji() -> String {
    "👍".to_string()
}

impl Default for ReactionConfig {
    fn default() -> Self {
        ReactionConfig {
            emoji: default_emoji(),
            match_text: String::new(),
            match_type: MatchMode::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the given TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Validates required fields.
    ///
    /// Must pass before any connection attempt; a partial configuration
    /// never reaches the network.
    pub fn validate(&self) -> Result<()> {
        if self.misskey.url.is_empty() {
            return Err(Error::MissingUrl);
        }
        if !self.misskey.url.starts_with("http://") && !self.misskey.url.starts_with("https://") {
            return Err(Error::InvalidUrl(self.misskey.url.clone()));
        }
        if self.misskey.token.is_empty() {
            return Err(Error::MissingToken);
        }
        if self.reaction.match_text.is_empty() {
            return Err(Error::MissingMatchText);
        }
        Ok(())
    }

    /// Returns the instance origin with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.misskey.url.trim_end_matches('/')
    }

    /// Derives the streaming WebSocket URL from the instance origin.
    ///
    /// The scheme is rewritten `http → ws` / `https → wss` and the token is
    /// passed as the `i` query parameter.
    pub fn stream_url(&self) -> String {
        let base = self.base_url();
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            // validate() rejects other schemes; pass through unchanged
            base.to_string()
        };
        format!("{}{}?i={}", ws_base, STREAMING_PATH, self.misskey.token)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
