// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime settings for the input pump.

use std::time::Duration;

/// Settings for [`InputPump`](crate::InputPump).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// How long to wait for a final commit's acknowledgment before forcing
    /// the gesture machine back to idle.
    ///
    /// [`None`] waits forever: an unacknowledged commit keeps the machine
    /// in its finishing phase and further pointer input is ignored.
    pub commit_timeout: Option<Duration>,
    /// Capacity of the input channel. Senders block while it is full.
    pub channel_capacity: usize,
    /// Number of recent commands kept for [`InputPump::dump`](crate::InputPump::dump).
    pub history_capacity: usize,
}

impl RuntimeConfig {
    /// Default input channel capacity.
    pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

    /// Default command history length.
    pub const DEFAULT_HISTORY_CAPACITY: usize = 16;

    /// Defaults: no commit timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commit_timeout: None,
            channel_capacity: Self::DEFAULT_CHANNEL_CAPACITY,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Returns `self` with a commit timeout.
    #[must_use]
    pub const fn with_commit_timeout(mut self, timeout: Duration) -> Self {
        self.commit_timeout = Some(timeout);
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}
