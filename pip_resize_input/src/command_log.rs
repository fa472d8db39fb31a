// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;
use std::fmt;

use pip_resize_core::gesture::GestureCommand;

/// Numbered record of the last few executed commands, for dumps.
///
/// Every command gets the next sequence number; only the most recent
/// `limit` are kept, so the first kept number tells how many were dropped.
#[derive(Debug)]
pub(crate) struct CommandLog {
    recent: VecDeque<(u64, GestureCommand)>,
    limit: usize,
    executed: u64,
}

impl CommandLog {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(limit),
            limit,
            executed: 0,
        }
    }

    pub(crate) fn push(&mut self, command: GestureCommand) {
        if self.limit == 0 {
            self.executed += 1;
            return;
        }
        if self.recent.len() == self.limit {
            self.recent.pop_front();
        }
        self.recent.push_back((self.executed, command));
        self.executed += 1;
    }

    pub(crate) fn write_to(&self, out: &mut impl fmt::Write, prefix: &str) -> fmt::Result {
        writeln!(
            out,
            "{prefix}recent_commands (last {} of {})",
            self.recent.len(),
            self.executed
        )?;
        for (seq, command) in &self.recent {
            writeln!(out, "{prefix}  #{seq} {command:?}")?;
        }
        Ok(())
    }
}
