// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for window geometry.
//!
//! The engine does not own the window. It asks the host for the window's
//! current bounds when a gesture starts and for the movement bounds used to
//! work out which screen edges the window is pinned to.
//!
//! Everything that *acts* on the window (committing bounds, hiding the
//! overlay menu, claiming the pointer stream) is expressed as
//! [`GestureCommand`](crate::gesture::GestureCommand) values that the
//! integration layer executes.

use kurbo::Rect;

/// Read-only view of the window the engine resizes.
pub trait WindowHost {
    /// The window's authoritative bounds, or [`None`] if it has not been
    /// laid out yet.
    fn current_bounds(&self) -> Option<Rect>;

    /// The legal range of top-left positions for a window of
    /// `current_bounds`' size.
    fn movement_bounds(&self, current_bounds: Rect) -> Rect;
}

/// A [`WindowHost`] backed by fixed values, for tests and tools.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticWindowHost {
    /// Value returned by [`WindowHost::current_bounds`].
    pub bounds: Option<Rect>,
    /// Display rectangle the window must stay inside.
    pub display: Rect,
}

impl WindowHost for StaticWindowHost {
    fn current_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    fn movement_bounds(&self, current_bounds: Rect) -> Rect {
        Rect::new(
            self.display.x0,
            self.display.y0,
            (self.display.x1 - current_bounds.width()).max(self.display.x0),
            (self.display.y1 - current_bounds.height()).max(self.display.y0),
        )
    }
}
