// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure bounds computation for drag and pinch resizes.
//!
//! [`compute_resized_bounds`] takes everything it needs by value and has no
//! side effects, so the gesture state machine can call it once per input
//! sample and tests can call it directly.
//!
//! # Steps
//!
//! 1. Derive a raw size from the gesture: the pointer delta moves the
//!    flagged edges of a drag, a pinch scales the whole down-bounds size.
//! 2. Clamp the size to the [`Limits`].
//! 3. Optionally keep the orientation the window had when the gesture
//!    started (drag only).
//! 4. If the limits carry an aspect ratio, re-fit through an
//!    [`AspectFitter`] and clamp again.
//! 5. Rebuild the rectangle: flagged edges move, the others stay exactly
//!    where they were in the down bounds.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

use crate::control::{ControlType, Edge};
use crate::geometry::{Limits, is_usable};

/// Smallest long-edge / short-edge ratio kept when preserving orientation.
pub const MIN_ORIENTATION_ASPECT: f64 = 1.2;

/// The gesture-specific part of a resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeInput {
    /// A corner drag.
    Drag {
        /// Current pointer position.
        pointer: Point,
        /// Position the resize is measured from.
        down_point: Point,
    },
    /// A two-finger pinch.
    Pinch {
        /// Cumulative scale factor since the pinch began.
        scale: f64,
    },
}

/// Re-fits a rectangle to an aspect ratio.
///
/// Implementations are expected to respect `limits`; the resize algorithm
/// still clamps their output so that a fitter can never push a window
/// outside its limits.
pub trait AspectFitter {
    /// Returns `bounds` re-shaped to `ratio` (width / height).
    ///
    /// `use_current_min_edge` selects the host's current minimum edge over
    /// the fitter's default one; `use_current_size` makes the current size
    /// of `bounds` the basis for the new size instead of the minimum edge.
    fn fit(
        &self,
        bounds: Rect,
        ratio: f64,
        limits: &Limits,
        use_current_min_edge: bool,
        use_current_size: bool,
    ) -> Rect;
}

/// The default [`AspectFitter`].
///
/// The shorter side of the result is the larger of the chosen minimum edge
/// and (with `use_current_size`) the shorter side of `bounds`; the longer
/// side follows from the ratio. The result is scaled down to fit
/// `max_size` and centred on `bounds`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimitAspectFitter {
    /// Minimum edge used when the caller does not ask for the current one.
    pub default_min_edge: f64,
}

impl Default for LimitAspectFitter {
    fn default() -> Self {
        Self {
            default_min_edge: 1.0,
        }
    }
}

impl AspectFitter for LimitAspectFitter {
    fn fit(
        &self,
        bounds: Rect,
        ratio: f64,
        limits: &Limits,
        use_current_min_edge: bool,
        use_current_size: bool,
    ) -> Rect {
        if !is_usable(bounds) || !(ratio > 0.0 && ratio.is_finite()) {
            return bounds;
        }
        let min = limits.min_size();
        let max = limits.max_size();
        let min_edge = if use_current_min_edge {
            min.width.min(min.height)
        } else {
            self.default_min_edge
        };
        let current_edge = if use_current_size {
            bounds.width().min(bounds.height())
        } else {
            0.0
        };
        let edge = min_edge.max(current_edge);

        let mut size = if ratio <= 1.0 {
            // Portrait: width is the short edge.
            Size::new(edge, (edge / ratio).round())
        } else {
            Size::new((edge * ratio).round(), edge)
        };
        if size.width > max.width {
            size = Size::new(max.width, (max.width / ratio).round());
        }
        if size.height > max.height {
            size = Size::new((max.height * ratio).round(), max.height);
        }
        Rect::from_center_size(bounds.center(), size)
    }
}

/// Computes the bounds for one resize sample.
///
/// `control` names the moving edges; every other edge keeps its position
/// from `down_bounds`. With `preserve_orientation`, a window that started in
/// landscape stays at least [`MIN_ORIENTATION_ASPECT`] wide per unit of
/// height (and the converse for portrait).
///
/// Returns `down_bounds` unchanged when it is degenerate or `control` is
/// [`ControlType::NONE`].
#[must_use]
pub fn compute_resized_bounds(
    input: ResizeInput,
    down_bounds: Rect,
    control: ControlType,
    limits: &Limits,
    fitter: &dyn AspectFitter,
    preserve_orientation: bool,
) -> Rect {
    if !is_usable(down_bounds) || control.is_none() {
        return down_bounds;
    }
    let start = down_bounds.size();

    let raw = match input {
        ResizeInput::Drag {
            pointer,
            down_point,
        } => {
            let delta = pointer - down_point;
            let (dx, dy) = (delta.x.round(), delta.y.round());
            let width = match control.horizontal() {
                Some(Edge::Left) => start.width - dx,
                Some(_) => start.width + dx,
                None => start.width,
            };
            let height = match control.vertical() {
                Some(Edge::Top) => start.height - dy,
                Some(_) => start.height + dy,
                None => start.height,
            };
            Size::new(width, height)
        }
        ResizeInput::Pinch { scale } => Size::new(
            (start.width * scale).trunc(),
            (start.height * scale).trunc(),
        ),
    };
    let raw = if raw.is_finite() { raw } else { start };

    let mut size = limits.clamp(raw);
    if preserve_orientation {
        size = limits.clamp(keep_orientation(size, start, limits));
    }
    if let Some(ratio) = limits.aspect_ratio() {
        let basis = Rect::from_origin_size(down_bounds.origin(), size);
        let fitted = fitter.fit(basis, ratio, limits, false, true);
        if fitted.size().is_finite() {
            size = limits.clamp(fitted.size());
        }
    }

    let b = down_bounds;
    let (y0, y1) = match control.vertical() {
        Some(Edge::Top) => (b.y1 - size.height, b.y1),
        _ => (b.y0, b.y0 + size.height),
    };
    let (x0, x1) = match control.horizontal() {
        Some(Edge::Left) => (b.x1 - size.width, b.x1),
        _ => (b.x0, b.x0 + size.width),
    };
    Rect::new(x0, y0, x1, y1)
}

/// Pulls `size` back towards the orientation of `start`.
///
/// Two candidates are built, one driven by the width and one by the height;
/// a growing gesture takes the larger, a shrinking one the smaller.
fn keep_orientation(size: Size, start: Size, limits: &Limits) -> Size {
    let landscape = start.width > start.height;
    // Clamped sizes always have a positive height.
    let aspect = size.width / size.height;
    if (landscape && aspect >= MIN_ORIENTATION_ASPECT)
        || (!landscape && aspect <= 1.0 / MIN_ORIENTATION_ASPECT)
    {
        return size;
    }

    let (min, max) = (limits.min_size(), limits.max_size());
    let ((w1, h1), (w2, h2)) = if landscape {
        let mut width = size.width.clamp(min.width, max.width);
        let mut height = size.height.min((width / MIN_ORIENTATION_ASPECT).round());
        if height < min.height {
            height = min.height;
            width = (height * MIN_ORIENTATION_ASPECT)
                .round()
                .clamp(min.width, max.width);
        }
        let width_driven = (width, height);

        let mut height = size.height.clamp(min.height, max.height);
        let mut width = size.width.max((height * MIN_ORIENTATION_ASPECT).round());
        if width < min.width {
            width = min.width;
            height = (width / MIN_ORIENTATION_ASPECT)
                .round()
                .clamp(min.height, max.height);
        }
        (width_driven, (width, height))
    } else {
        let mut width = size.width.clamp(min.width, max.width);
        let mut height = size.height.max((width * MIN_ORIENTATION_ASPECT).round());
        if height < min.height {
            height = min.height;
            width = (height / MIN_ORIENTATION_ASPECT)
                .round()
                .clamp(min.width, max.width);
        }
        let width_driven = (width, height);

        let mut height = size.height.clamp(min.height, max.height);
        let mut width = size.width.min((height / MIN_ORIENTATION_ASPECT).round());
        if width < min.width {
            width = min.width;
            height = (width * MIN_ORIENTATION_ASPECT)
                .round()
                .clamp(min.height, max.height);
        }
        (width_driven, (width, height))
    };

    let grows = size.width > start.width || size.height > start.height;
    if grows == (w1 * h1 > w2 * h2) {
        Size::new(w1, h1)
    } else {
        Size::new(w2, h2)
    }
}
