// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming watcher: the connect → subscribe → read pipeline.
//!
//! One watcher exclusively owns one streaming connection and processes
//! frames strictly in arrival order. Matched notes are handed to delayed
//! dispatch tasks that never block the read loop; any connect, subscribe,
//! or read failure ends the watcher for good. There is no reconnect.

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use mrb_core::config::Config;
use mrb_core::matcher::MatchMode;
use mrb_core::protocol::{ClientMessage, ServerMessage, HOME_TIMELINE};

use crate::delay::DelayProvider;
use crate::reaction::Reactor;
use crate::transport::{Transport, TransportError};

/// Subscription identifier sent with the connect message.
///
/// The server only requires it to be caller-chosen and stable for the
/// lifetime of the connection.
const SUBSCRIPTION_ID: &str = "mrbd-home";

/// Error type for the watch loop.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Transport-level failure (connect, subscribe, or read).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The remote ended the stream. Treated the same as an error close.
    #[error("stream closed by remote")]
    StreamClosed,
}

/// Result type for the watch loop.
pub type WatchResult<T> = Result<T, WatchError>;

/// Lifecycle of the streaming connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// No connection yet.
    Disconnected,
    /// Connect in progress.
    Connecting,
    /// Connected and subscribed to the channel.
    Subscribed,
    /// Blocked on the next frame.
    Reading,
    /// Loop ended; the watcher does not recover.
    Failed,
}

/// Watches the home timeline and reacts to matching notes.
pub struct Watcher<T: Transport, R: Reactor> {
    stream_url: String,
    token: String,
    match_text: String,
    mode: MatchMode,
    emoji: String,
    transport: T,
    reactor: R,
    delays: Box<dyn DelayProvider>,
    state: WatchState,
    dispatches: JoinSet<()>,
}

impl<T: Transport, R: Reactor> Watcher<T, R> {
    /// Create a watcher from a validated configuration.
    pub fn new(config: &Config, transport: T, reactor: R, delays: Box<dyn DelayProvider>) -> Self {
        Watcher {
            stream_url: config.stream_url(),
            token: config.misskey.token.clone(),
            match_text: config.reaction.match_text.clone(),
            mode: config.reaction.match_type,
            emoji: config.reaction.emoji.clone(),
            transport,
            reactor,
            delays,
            state: WatchState::Disconnected,
            dispatches: JoinSet::new(),
        }
    }

    /// Get the current connection state.
    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Run the watch loop until the stream fails.
    ///
    /// Never returns `Ok`: the loop only ends when the connection does.
    /// In-flight reaction dispatches are drained before the error is
    /// surfaced, so a dying stream doesn't cancel reactions mid-request.
    pub async fn run(&mut self) -> WatchResult<()> {
        self.state = WatchState::Connecting;
        if let Err(e) = self.transport.connect(&self.stream_url).await {
            self.state = WatchState::Failed;
            return Err(e.into());
        }

        let subscribe = ClientMessage::connect(HOME_TIMELINE, SUBSCRIPTION_ID, &self.token);
        if let Err(e) = self.transport.send(subscribe).await {
            self.state = WatchState::Failed;
            return Err(e.into());
        }
        self.state = WatchState::Subscribed;
        info!("subscribed to {}", HOME_TIMELINE);

        let result = self.read_loop().await;
        self.state = WatchState::Failed;

        // Let in-flight reactions finish before reporting the stream failure.
        while self.dispatches.join_next().await.is_some() {}
        result
    }

    /// Read frames until the connection ends.
    async fn read_loop(&mut self) -> WatchResult<()> {
        loop {
            self.state = WatchState::Reading;
            let frame = match self.transport.recv().await {
                Ok(Some(frame)) => frame,
                Ok(None) => return Err(WatchError::StreamClosed),
                Err(e) => return Err(e.into()),
            };

            self.handle_frame(&frame);

            // Reap finished dispatches without blocking the read loop.
            while self.dispatches.try_join_next().is_some() {}
        }
    }

    /// Decode one frame and schedule a reaction if it matches.
    ///
    /// A frame that fails to decode is logged and skipped; it never ends
    /// the loop.
    fn handle_frame(&mut self, raw: &str) {
        let msg = match ServerMessage::from_json(raw) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("skipping malformed frame: {} (payload: {})", e, raw);
                return;
            }
        };

        let Some(note) = msg.note() else {
            return;
        };

        if !self.mode.matches(&note.text, &self.match_text) {
            debug!("note {} did not match", note.id);
            return;
        }

        let note_id = note.id.clone();
        self.schedule_reaction(note_id);
    }

    /// Spawn one delayed dispatch for a matched note.
    ///
    /// Dispatch failures are logged and isolated; nothing here reaches the
    /// read loop. Dispatches for distinct notes may overlap and complete
    /// in any order.
    fn schedule_reaction(&mut self, note_id: String) {
        let delay = self.delays.pick();
        let request = self.reactor.react(&note_id, &self.emoji);
        let emoji = self.emoji.clone();
        info!("note {} matched, reacting in {}ms", note_id, delay.as_millis());

        self.dispatches.spawn(async move {
            tokio::time::sleep(delay).await;
            match request.await {
                Ok(()) => info!("reacted to note {} with {}", note_id, emoji),
                Err(e) => warn!("failed to react to note {}: {}", note_id, e),
            }
        });
    }
}
