// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input as the gesture machine sees it.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

/// What changed in a [`PointerEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The first pointer went down.
    Down,
    /// An additional pointer went down.
    PointerDown,
    /// One or more pointers moved.
    Move,
    /// A pointer lifted while others remain down.
    PointerUp,
    /// The last pointer lifted.
    Up,
    /// The platform cancelled the stream.
    Cancel,
}

/// One sample of the pointer stream.
///
/// `pointers` holds every pointer that is down at the time of the event,
/// including the one that just went down or is lifting. Index 0 is the
/// primary pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// What changed.
    pub action: PointerAction,
    /// Pointer positions in display coordinates.
    pub pointers: Vec<Point>,
}

impl PointerEvent {
    /// First pointer going down at `at`.
    #[must_use]
    pub fn down(at: Point) -> Self {
        Self {
            action: PointerAction::Down,
            pointers: vec![at],
        }
    }

    /// Second pointer going down; `first` is already down.
    #[must_use]
    pub fn pointer_down(first: Point, second: Point) -> Self {
        Self {
            action: PointerAction::PointerDown,
            pointers: vec![first, second],
        }
    }

    /// Single pointer moving to `to`.
    #[must_use]
    pub fn moved(to: Point) -> Self {
        Self {
            action: PointerAction::Move,
            pointers: vec![to],
        }
    }

    /// Two pointers moving.
    #[must_use]
    pub fn moved_pair(first: Point, second: Point) -> Self {
        Self {
            action: PointerAction::Move,
            pointers: vec![first, second],
        }
    }

    /// One of two pointers lifting.
    #[must_use]
    pub fn pointer_up(first: Point, second: Point) -> Self {
        Self {
            action: PointerAction::PointerUp,
            pointers: vec![first, second],
        }
    }

    /// Last pointer lifting at `at`.
    #[must_use]
    pub fn up(at: Point) -> Self {
        Self {
            action: PointerAction::Up,
            pointers: vec![at],
        }
    }

    /// Stream cancelled.
    #[must_use]
    pub fn cancel() -> Self {
        Self {
            action: PointerAction::Cancel,
            pointers: Vec::new(),
        }
    }

    /// The primary pointer, if any.
    #[must_use]
    pub fn primary(&self) -> Option<Point> {
        self.pointers.first().copied()
    }

    /// Number of pointers down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Distance between the first two pointers, if there are two.
    #[must_use]
    pub fn span(&self) -> Option<f64> {
        match self.pointers.as_slice() {
            [a, b, ..] => Some(a.distance(*b)),
            _ => None,
        }
    }

    /// Midpoint of the first two pointers, or the primary pointer.
    #[must_use]
    pub fn focus(&self) -> Option<Point> {
        match self.pointers.as_slice() {
            [a, b, ..] => Some(a.midpoint(*b)),
            [a] => Some(*a),
            [] => None,
        }
    }
}
