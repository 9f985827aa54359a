// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mrbd: auto-reaction daemon for a Misskey instance.
//!
//! Watches the home timeline over the streaming WebSocket API and posts a
//! configured emoji reaction to every note whose text matches the
//! configured rule, after a short randomized delay.
//!
//! Usage:
//!   mrbd --config config.toml

mod delay;
mod reaction;
mod stream;
mod transport;


#[cfg(test)]
mod reaction_tests;



use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use mrb_core::{Config, MatchMode};

use delay::UniformJitter;
use reaction::ReactionClient;
use stream::Watcher;
use transport::WebSocketTransport;

/// mrbd: Misskey auto-reaction daemon
#[derive(Parser, Debug)]
#[command(name = "mrbd")]
#[command(about = "Reacts to matching notes on a Misskey home timeline")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Configuration must validate before anything touches the network.
    let config = Config::load(&args.config)?;
    config.validate()?;

    info!("Starting mrbd");
    info!("  Instance: {}", config.base_url());
    info!(
        "  Match rule: {} \"{}\"",
        config.reaction.match_type, config.reaction.match_text
    );
    info!("  Reaction: {}", config.reaction.emoji);

    if config.reaction.match_type == MatchMode::Unrecognized {
        warn!("match_type is not one of prefix/suffix/contains; no note will ever match");
    }

    let reactor = ReactionClient::new(config.base_url(), &config.misskey.token);
    let transport = WebSocketTransport::new();
    let mut watcher = Watcher::new(
        &config,
        transport,
        reactor,
        Box::new(UniformJitter::default()),
    );

    // Runs until the stream fails; there is no reconnect.
    watcher.run().await?;

    Ok(())
}
