// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming wire protocol for the Misskey WebSocket API.
//!
//! The protocol is simple:
//! - The client sends one `connect` message to subscribe to a channel
//! - The server pushes envelope frames; note events on the subscribed
//!   channel carry the note id and text
//!
//! Inbound frames are decoded leniently: fields that are missing decode to
//! empty strings and unknown envelope shapes are inert, so a surprising
//! frame yields no event rather than an error.

use serde::{Deserialize, Serialize};

/// Channel name for the home timeline subscription.
pub const HOME_TIMELINE: &str = "homeTimeline";

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Subscribe to a streaming channel.
    Connect {
        /// Subscription parameters.
        body: ConnectBody,
    },
}

/// Body of a channel subscription request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectBody {
    /// Channel name, e.g. [`HOME_TIMELINE`].
    pub channel: String,
    /// Caller-chosen identifier echoed on frames for this subscription.
    pub id: String,
    /// API token.
    pub i: String,
}

impl ClientMessage {
    /// Creates a Connect message subscribing to the given channel.
    pub fn connect(
        channel: impl Into<String>,
        id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        ClientMessage::Connect {
            body: ConnectBody {
                channel: channel.into(),
                id: id.into(),
                i: token.into(),
            },
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// An envelope frame pushed by the server.
///
/// Only frames with outer kind `channel` and inner kind `note` carry an
/// event; everything else decodes fine and is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServerMessage {
    /// Outer discriminator, e.g. `channel`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Channel payload.
    #[serde(default)]
    pub body: ChannelMessage,
}

/// Payload of a channel frame.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ChannelMessage {
    /// Subscription identifier chosen at connect time.
    #[serde(default)]
    pub id: String,
    /// Inner discriminator, e.g. `note`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Event payload.
    #[serde(default)]
    pub body: Note,
}

/// A note event: the unit of content a reaction attaches to.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Note {
    /// Note identifier used by the reaction API.
    #[serde(default)]
    pub id: String,
    /// Note text; empty when the note has none.
    #[serde(default)]
    pub text: String,
}

impl ServerMessage {
    /// Deserializes a frame from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Returns the note event carried by this frame, if any.
    ///
    /// `Some` only for a `channel` frame wrapping a `note` body; all other
    /// shapes are inert.
    pub fn note(&self) -> Option<&Note> {
        if self.kind == "channel" && self.body.kind == "note" {
            Some(&self.body.body)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
