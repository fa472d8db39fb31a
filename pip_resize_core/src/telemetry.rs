// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Usage telemetry for resize gestures.
//!
//! This module provides an [`EventSink`] trait with one method per gesture
//! milestone. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn EventSink` and is what the
//! [`GestureMachine`](crate::gesture::GestureMachine) reports through. A
//! tracer built with [`Tracer::none`] costs one branch per event.
//!
//! Telemetry is separate from logging: `tracing` records diagnostics for
//! developers, while an `EventSink` receives the product-level events
//! (a gesture armed, a resize committed) that hosts count.

use kurbo::Rect;

use crate::control::ControlType;
use crate::gesture::{CommitTicket, GestureMode};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a gesture ended without a final commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// The window was unpinned mid-gesture.
    Unpinned,
    /// The system UI entered a state that disallows resizing.
    SystemUiInvalid,
    /// The window was stashed at the screen edge.
    Stashed,
    /// A second pointer landed and pinch resizing is unavailable.
    MultiTouch,
    /// A new gesture began before the previous one finished.
    Superseded,
    /// The gesture ended before the window changed size.
    NoChange,
}

/// How a final commit was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommitOutcome {
    /// The host applied the bounds and acknowledged.
    Completed,
    /// The host reported failure, or dropped the completion handle.
    Failed,
    /// No acknowledgment arrived before the configured deadline.
    TimedOut,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a gesture is armed.
#[derive(Clone, Copy, Debug)]
pub struct GestureArmedEvent {
    /// Drag or pinch.
    pub mode: GestureMode,
    /// Edges that will move.
    pub control: ControlType,
    /// Window bounds when the gesture started.
    pub down_bounds: Rect,
}

/// Emitted when a gesture crosses its threshold and claims the pointers.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdCrossedEvent {
    /// Drag or pinch.
    pub mode: GestureMode,
}

/// Emitted when a gesture ends with a final commit.
#[derive(Clone, Copy, Debug)]
pub struct ResizeCommittedEvent {
    /// Drag or pinch.
    pub mode: GestureMode,
    /// Ticket the host must acknowledge.
    pub ticket: CommitTicket,
    /// Window bounds when the gesture started.
    pub from: Rect,
    /// Bounds sent to the host.
    pub to: Rect,
}

/// Emitted when a gesture ends without a final commit.
#[derive(Clone, Copy, Debug)]
pub struct GestureAbortedEvent {
    /// Drag or pinch.
    pub mode: GestureMode,
    /// Why the gesture ended.
    pub reason: AbortReason,
}

/// Emitted when a final commit settles.
#[derive(Clone, Copy, Debug)]
pub struct CommitSettledEvent {
    /// Ticket of the commit.
    pub ticket: CommitTicket,
    /// How it settled.
    pub outcome: CommitOutcome,
}

// ---------------------------------------------------------------------------
// EventSink trait
// ---------------------------------------------------------------------------

/// Receives gesture telemetry.
pub trait EventSink {
    /// Called when a gesture is armed.
    fn on_gesture_armed(&mut self, e: &GestureArmedEvent) {
        _ = e;
    }

    /// Called when a gesture claims the pointer stream.
    fn on_threshold_crossed(&mut self, e: &ThresholdCrossedEvent) {
        _ = e;
    }

    /// Called when a gesture ends with a final commit.
    fn on_resize_committed(&mut self, e: &ResizeCommittedEvent) {
        _ = e;
    }

    /// Called when a gesture ends without a final commit.
    fn on_gesture_aborted(&mut self, e: &GestureAbortedEvent) {
        _ = e;
    }

    /// Called when a final commit settles.
    fn on_commit_settled(&mut self, e: &CommitSettledEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// An [`EventSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`EventSink`].
pub struct Tracer<'a> {
    sink: Option<&'a mut dyn EventSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("attached", &self.sink.is_some())
            .finish()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn EventSink) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self { sink: None }
    }

    /// Emits a [`GestureArmedEvent`].
    #[inline]
    pub fn gesture_armed(&mut self, e: &GestureArmedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_gesture_armed(e);
        }
    }

    /// Emits a [`ThresholdCrossedEvent`].
    #[inline]
    pub fn threshold_crossed(&mut self, e: &ThresholdCrossedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_threshold_crossed(e);
        }
    }

    /// Emits a [`ResizeCommittedEvent`].
    #[inline]
    pub fn resize_committed(&mut self, e: &ResizeCommittedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_resize_committed(e);
        }
    }

    /// Emits a [`GestureAbortedEvent`].
    #[inline]
    pub fn gesture_aborted(&mut self, e: &GestureAbortedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_gesture_aborted(e);
        }
    }

    /// Emits a [`CommitSettledEvent`].
    #[inline]
    pub fn commit_settled(&mut self, e: &CommitSettledEvent) {
        if let Some(s) = &mut self.sink {
            s.on_commit_settled(e);
        }
    }
}
