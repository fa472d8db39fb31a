// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corner hit-testing for drag resize.
//!
//! A drag resize may only start from one of four small squares centred on
//! the corners of the window. Each square straddles the window border, so a
//! quarter of it overlaps the window and the rest lies outside:
//!
//! ```text
//!  _ _           _ _
//! |_|_|_________|_|_|
//! |_|_|         |_|_|
//!   |   WINDOW    |
//!  _|_           _|_
//! |_|_|_________|_|_|
//! |_|_|         |_|_|
//! ```

use kurbo::{Point, Rect};

use crate::geometry::is_usable;

/// The four corner squares of a window, computed from its bounds.
///
/// A `HotZone` is a plain value: it is rebuilt from the current bounds on
/// every hit-test, and the copy taken at pointer-down is the one the drag
/// resolver consults for the rest of that gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HotZone {
    /// Square centred on the top-left corner.
    pub top_left: Rect,
    /// Square centred on the top-right corner.
    pub top_right: Rect,
    /// Square centred on the bottom-left corner.
    pub bottom_left: Rect,
    /// Square centred on the bottom-right corner.
    pub bottom_right: Rect,
}

impl HotZone {
    /// Builds the corner squares of side `delta` around `bounds`.
    ///
    /// Returns [`None`] when `bounds` is degenerate or `delta` is not a
    /// positive finite size.
    #[must_use]
    pub fn around(bounds: Rect, delta: f64) -> Option<Self> {
        if !is_usable(bounds) || !(delta > 0.0 && delta.is_finite()) {
            return None;
        }
        let square = |x: f64, y: f64| {
            let half = delta / 2.0;
            Rect::new(x - half, y - half, x + half, y + half)
        };
        Some(Self {
            top_left: square(bounds.x0, bounds.y0),
            top_right: square(bounds.x1, bounds.y0),
            bottom_left: square(bounds.x0, bounds.y1),
            bottom_right: square(bounds.x1, bounds.y1),
        })
    }

    /// Returns `true` if `point` lies in any of the four squares.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.top_left.contains(point)
            || self.top_right.contains(point)
            || self.bottom_left.contains(point)
            || self.bottom_right.contains(point)
    }
}

/// Returns `true` if a touch at `point` may start a drag resize.
///
/// Fails closed when the window has not been laid out yet (`bounds` is
/// [`None`]) or its bounds are degenerate.
#[must_use]
pub fn is_within_touch_region(point: Point, bounds: Option<Rect>, delta: f64) -> bool {
    bounds
        .and_then(|bounds| HotZone::around(bounds, delta))
        .is_some_and(|zone| zone.contains(point))
}
