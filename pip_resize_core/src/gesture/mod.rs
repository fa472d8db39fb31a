// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The resize gesture state machine.
//!
//! [`GestureMachine`] consumes [`PointerEvent`]s and host-state changes and
//! produces [`GestureCommand`]s for the integration layer to execute. It is
//! a plain value: no threads, no callbacks, no I/O.
//!
//! ```text
//!            Down in hot zone           slop / pinch threshold
//!   Idle ─────────────────────► Armed ──────────────────────► Active
//!    ▲    2nd pointer (pinch)     │                             │
//!    │                            │ Up / Cancel                 │ Up / Cancel /
//!    │                            ▼                             │ pinch end
//!    │  no resize happened   ┌─────────┐                        │
//!    ├───────────────────────┤Finishing│◄───────────────────────┘
//!    │  commit acknowledged  └─────────┘
//!    └────────────────────────────┘
//! ```
//!
//! Host invalidation (unpin, system UI, stash) returns any open session to
//! `Idle` without a final commit.

mod event;
mod machine;
mod scale;

pub use event::{PointerAction, PointerEvent};
pub use machine::GestureMachine;
pub use scale::{ScaleDetector, ScaleSample};

use kurbo::Rect;

/// How a gesture resizes the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureMode {
    /// One finger dragging a corner.
    Drag,
    /// Two fingers pinching.
    Pinch,
}

/// Where the machine is in a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No gesture.
    Idle,
    /// A gesture may start; the pointer stream is not claimed yet.
    Armed(GestureMode),
    /// The gesture owns the pointer stream and is resizing.
    Active(GestureMode),
    /// A final commit is in flight.
    Finishing,
}

/// Which overlay dismissal to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayHide {
    /// A touch landed outside the window.
    Dismiss,
    /// A resize started; hide without animating the window.
    ForResize,
}

/// Identifies one final commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitTicket(u64);

impl CommitTicket {
    /// Creates a ticket from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Side effect requested by the gesture machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureCommand {
    /// Claim the in-flight pointer stream. Issued at most once per gesture.
    Pilfer,
    /// Hide the overlay menu if it is visible.
    HideOverlay(OverlayHide),
    /// Best-effort intermediate bounds.
    LiveUpdate {
        /// Bounds when the gesture started.
        old: Rect,
        /// Bounds for this sample.
        new: Rect,
    },
    /// Authoritative bounds at gesture end. The host must acknowledge
    /// `ticket` through
    /// [`GestureMachine::on_commit_complete`] or
    /// [`GestureMachine::on_commit_failed`].
    FinalCommit {
        /// Bounds to apply.
        bounds: Rect,
        /// Ticket to acknowledge.
        ticket: CommitTicket,
    },
}

/// Errors from commit acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    /// No final commit is in flight.
    #[error("no final commit is pending")]
    NoCommitPending,
    /// The acknowledged ticket is not the one in flight.
    #[error("stale commit ticket {received:?}, expected {expected:?}")]
    StaleTicket {
        /// Ticket in flight.
        expected: CommitTicket,
        /// Ticket acknowledged.
        received: CommitTicket,
    },
}
