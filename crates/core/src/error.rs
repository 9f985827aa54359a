// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for mrb-core operations.

use thiserror::Error;

/// All possible errors that can occur in mrb-core operations.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("misskey.url is not set\n  hint: add 'url' under [misskey] in the config file")]
    MissingUrl,

    #[error("misskey.url is not an http(s) origin: '{0}'\n  hint: the URL must start with http:// or https://")]
    InvalidUrl(String),

    #[error("misskey.token is not set\n  hint: add 'token' under [misskey] in the config file")]
    MissingToken,

    #[error("reaction.match_text is not set\n  hint: add 'match_text' under [reaction] in the config file")]
    MissingMatchText,

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for mrb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
