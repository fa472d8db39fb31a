// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window geometry and host-imposed size limits.
//!
//! All rectangles are [`kurbo::Rect`] values in window-manager pixels. The
//! engine never invents geometry of its own: the current window bounds and
//! the movement bounds come from the host (see [`WindowHost`]), and
//! [`Limits`] are read-only for the duration of a gesture.
//!
//! [`WindowHost`]: crate::host::WindowHost

use kurbo::{Rect, Size};
use thiserror::Error;

/// Reasons a [`Limits`] value can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum LimitsError {
    /// A minimum dimension was zero, negative, or not finite.
    #[error("minimum size must be positive and finite, got {0:?}")]
    NonPositiveMin(Size),
    /// A minimum dimension exceeded its maximum.
    #[error("minimum size {min:?} exceeds maximum size {max:?}")]
    MinExceedsMax {
        /// The rejected minimum.
        min: Size,
        /// The rejected maximum.
        max: Size,
    },
    /// The aspect ratio was zero, negative, or not finite.
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),
}

/// Size and shape constraints applied to every resize.
///
/// Invariant: `0 < min_size <= max_size` component-wise, and the aspect
/// ratio (width / height), when present, is positive and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    min_size: Size,
    max_size: Size,
    aspect_ratio: Option<f64>,
}

impl Limits {
    /// Creates validated limits.
    pub fn new(min_size: Size, max_size: Size, aspect_ratio: Option<f64>) -> Result<Self, LimitsError> {
        if !(min_size.width > 0.0 && min_size.height > 0.0 && min_size.is_finite()) {
            return Err(LimitsError::NonPositiveMin(min_size));
        }
        if min_size.width > max_size.width || min_size.height > max_size.height {
            return Err(LimitsError::MinExceedsMax {
                min: min_size,
                max: max_size,
            });
        }
        if let Some(ratio) = aspect_ratio {
            if !(ratio > 0.0 && ratio.is_finite()) {
                return Err(LimitsError::InvalidAspectRatio(ratio));
            }
        }
        Ok(Self {
            min_size,
            max_size,
            aspect_ratio,
        })
    }

    /// Returns a copy with a different aspect ratio.
    pub fn with_aspect_ratio(self, aspect_ratio: Option<f64>) -> Result<Self, LimitsError> {
        Self::new(self.min_size, self.max_size, aspect_ratio)
    }

    /// Smallest size a window may be resized to.
    #[must_use]
    pub const fn min_size(&self) -> Size {
        self.min_size
    }

    /// Largest size a window may be resized to.
    #[must_use]
    pub const fn max_size(&self) -> Size {
        self.max_size
    }

    /// Target width / height ratio, if the content requests one.
    #[must_use]
    pub const fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }

    /// Clamps each dimension of `size` into `[min_size, max_size]`.
    #[must_use]
    pub fn clamp(&self, size: Size) -> Size {
        size.clamp(self.min_size, self.max_size)
    }

    /// Returns `true` if `size` lies within the limits.
    #[must_use]
    pub fn contains(&self, size: Size) -> bool {
        size.width >= self.min_size.width
            && size.width <= self.max_size.width
            && size.height >= self.min_size.height
            && size.height <= self.max_size.height
    }
}

/// The rectangle the window may occupy on its display.
///
/// Built from the host's movement bounds (the legal range of top-left
/// positions at the current size) expanded by the window's own size, so
/// that comparing a window edge against the matching frame edge tells
/// whether the window is pinned to that side of the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayFrame(pub Rect);

impl DisplayFrame {
    /// Derives the frame from movement bounds and the window's current bounds.
    #[must_use]
    pub fn from_movement_bounds(movement_bounds: Rect, current_bounds: Rect) -> Self {
        Self(Rect::new(
            movement_bounds.x0,
            movement_bounds.y0,
            movement_bounds.x1 + current_bounds.width(),
            movement_bounds.y1 + current_bounds.height(),
        ))
    }

    /// Returns the underlying rectangle.
    #[must_use]
    pub const fn rect(self) -> Rect {
        self.0
    }
}

/// Returns `true` if `bounds` can be used for hit-testing and resolving.
///
/// Empty, inverted, or non-finite rectangles are unusable; every consumer
/// fails closed on them rather than reporting an error.
#[must_use]
pub fn is_usable(bounds: Rect) -> bool {
    bounds.is_finite() && bounds.width() > 0.0 && bounds.height() > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_reject_inverted_sizes() {
        let err = Limits::new(Size::new(200.0, 100.0), Size::new(100.0, 100.0), None);
        assert!(
            matches!(err, Err(LimitsError::MinExceedsMax { .. })),
            "min wider than max must be rejected"
        );
    }

    #[test]
    fn limits_reject_zero_min() {
        let err = Limits::new(Size::new(0.0, 10.0), Size::new(100.0, 100.0), None);
        assert_eq!(err, Err(LimitsError::NonPositiveMin(Size::new(0.0, 10.0))));
    }

    #[test]
    fn limits_reject_bad_ratio() {
        let err = Limits::new(Size::new(10.0, 10.0), Size::new(100.0, 100.0), Some(0.0));
        assert_eq!(err, Err(LimitsError::InvalidAspectRatio(0.0)));
    }

    #[test]
    fn clamp_is_component_wise() {
        let limits =
            Limits::new(Size::new(100.0, 75.0), Size::new(400.0, 300.0), None).unwrap();
        assert_eq!(limits.clamp(Size::new(10.0, 900.0)), Size::new(100.0, 300.0));
        assert!(limits.contains(Size::new(250.0, 200.0)));
        assert!(!limits.contains(Size::new(401.0, 200.0)));
    }

    #[test]
    fn display_frame_expands_by_window_size() {
        let movement = Rect::new(0.0, 0.0, 880.0, 1770.0);
        let bounds = Rect::new(0.0, 0.0, 200.0, 150.0);
        let frame = DisplayFrame::from_movement_bounds(movement, bounds);
        assert_eq!(frame.rect(), Rect::new(0.0, 0.0, 1080.0, 1920.0));
    }

    #[test]
    fn degenerate_bounds_are_unusable() {
        assert!(!is_usable(Rect::ZERO));
        assert!(!is_usable(Rect::new(10.0, 10.0, 5.0, 20.0)));
        assert!(!is_usable(Rect::new(0.0, 0.0, f64::NAN, 1.0)));
        assert!(is_usable(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }
}
