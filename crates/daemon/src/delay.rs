// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delay provider for humanized reaction timing.
//!
//! Reactions are deliberately not instantaneous: a uniform random delay
//! keeps the bot from reacting faster than any human reader could.

use rand::Rng;
use std::time::Duration;

/// Lower bound of the production reaction delay, in milliseconds.
const DEFAULT_MIN_MS: u64 = 5_000;
/// Upper bound of the production reaction delay, in milliseconds.
const DEFAULT_MAX_MS: u64 = 8_000;

/// Source of pre-dispatch delays.
///
/// Injectable so tests can substitute a fixed or zero delay instead of
/// depending on process-wide random state.
pub trait DelayProvider: Send + Sync {
    /// Pick the delay to wait before the next dispatch.
    fn pick(&self) -> Duration;
}

/// Uniformly random delay within an inclusive millisecond range.
#[derive(Debug, Clone, Copy)]
pub struct UniformJitter {
    min_ms: u64,
    max_ms: u64,
}

impl UniformJitter {
    /// Create a jitter source over `[min_ms, max_ms]`.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        UniformJitter { min_ms, max_ms }
    }
}

impl Default for UniformJitter {
    fn default() -> Self {
        UniformJitter::new(DEFAULT_MIN_MS, DEFAULT_MAX_MS)
    }
}

impl DelayProvider for UniformJitter {
    fn pick(&self) -> Duration {
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }
}
