// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable telemetry output.
//!
//! [`PrettyPrintSink`] implements [`EventSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use kurbo::Rect;
use pip_resize_core::telemetry::{
    CommitSettledEvent, EventSink, GestureAbortedEvent, GestureArmedEvent, ResizeCommittedEvent,
    ThresholdCrossedEvent,
};

/// Writes human-readable telemetry lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write + Send>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

struct Bounds(Rect);

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.0;
        write!(f, "({}, {}, {}, {}) {}x{}", r.x0, r.y0, r.x1, r.y1, r.width(), r.height())
    }
}

impl<W: Write> EventSink for PrettyPrintSink<W> {
    fn on_gesture_armed(&mut self, e: &GestureArmedEvent) {
        let _ = writeln!(
            self.writer,
            "[armed] mode={:?} control={:?} bounds={}",
            e.mode,
            e.control,
            Bounds(e.down_bounds),
        );
    }

    fn on_threshold_crossed(&mut self, e: &ThresholdCrossedEvent) {
        let _ = writeln!(self.writer, "[crossed] mode={:?}", e.mode);
    }

    fn on_resize_committed(&mut self, e: &ResizeCommittedEvent) {
        let _ = writeln!(
            self.writer,
            "[commit] ticket={} mode={:?} {} -> {}",
            e.ticket.get(),
            e.mode,
            Bounds(e.from),
            Bounds(e.to),
        );
    }

    fn on_gesture_aborted(&mut self, e: &GestureAbortedEvent) {
        let _ = writeln!(
            self.writer,
            "[aborted] mode={:?} reason={:?}",
            e.mode, e.reason
        );
    }

    fn on_commit_settled(&mut self, e: &CommitSettledEvent) {
        let _ = writeln!(
            self.writer,
            "[settled] ticket={} outcome={:?}",
            e.ticket.get(),
            e.outcome
        );
    }
}
