// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! REST client for attaching reactions to notes.
//!
//! One authenticated POST per reaction; the instance acknowledges with
//! 204 No Content. Anything else is a failure carrying whatever error
//! detail the instance returned.

use std::future::Future;
use std::pin::Pin;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Error type for reaction dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ReactionError {
    /// The request never completed (DNS, refused connection, bad URL).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The instance rejected the reaction with a structured error body.
    #[error(
        "API error: {message}{} (Status: {status})",
        .code.as_ref().map(|c| format!(" (Code: {})", c)).unwrap_or_default()
    )]
    Api {
        /// HTTP status of the rejection.
        status: u16,
        /// Human-readable message from the instance.
        message: String,
        /// Machine error code, when the instance provides one.
        code: Option<String>,
    },

    /// Non-204 response whose body was not a recognizable error object.
    #[error("unexpected status {status}: failed to parse error response: {source}, body: {body}")]
    UnexpectedResponse {
        /// HTTP status of the response.
        status: u16,
        /// Raw response body.
        body: String,
        /// The JSON parse failure.
        source: serde_json::Error,
    },
}

/// Result type for reaction dispatch.
pub type ReactionResult<T> = Result<T, ReactionError>;

/// Request body for `POST /api/notes/reactions/create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReactionRequest<'a> {
    note_id: &'a str,
    reaction: &'a str,
}

/// Error body shape returned by the Misskey API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Sink for reaction dispatches.
///
/// Abstracts the REST client so the watcher and its tests can substitute
/// a recording mock. Implementations must be callable concurrently; each
/// call is an independent request with no shared mutable state.
pub trait Reactor: Send + Sync {
    /// Attach `reaction` to the note with id `note_id`.
    fn react(
        &self,
        note_id: &str,
        reaction: &str,
    ) -> Pin<Box<dyn Future<Output = ReactionResult<()>> + Send + 'static>>;
}

/// Reaction client for the Misskey REST API.
#[derive(Debug, Clone)]
pub struct ReactionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ReactionClient {
    /// Create a client for the given instance origin and API token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ReactionClient {
            http: reqwest::Client::new(),
            base_url,
            token: token.into(),
        }
    }

    /// Post one reaction to one note. Never retries.
    pub async fn create(&self, note_id: &str, reaction: &str) -> ReactionResult<()> {
        let url = format!("{}/api/notes/reactions/create", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&ReactionRequest { note_id, reaction })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }

        // Any other status is a failure, including other 2xx. Pull the body
        // for the instance's error detail.
        let body = response.text().await?;
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(parsed) => Err(ReactionError::Api {
                status: status.as_u16(),
                message: parsed.error.message,
                code: parsed.error.code,
            }),
            Err(source) => Err(ReactionError::UnexpectedResponse {
                status: status.as_u16(),
                body,
                source,
            }),
        }
    }
}

impl Reactor for ReactionClient {
    fn react(
        &self,
        note_id: &str,
        reaction: &str,
    ) -> Pin<Box<dyn Future<Output = ReactionResult<()>> + Send + 'static>> {
        let client = self.clone();
        let note_id = note_id.to_string();
        let reaction = reaction.to_string();
        Box::pin(async move { client.create(&note_id, &reaction).await })
    }
}
