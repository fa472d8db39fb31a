// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture thresholds supplied by the host.

/// Default pinch threshold: the cumulative scale must leave `1 ± 0.05`
/// before a pinch claims the pointer stream.
pub const PINCH_THRESHOLD: f64 = 0.05;

/// Thresholds that shape how gestures start.
///
/// The host recomputes these whenever display density changes and hands
/// the new value to
/// [`GestureMachine::set_config`](crate::gesture::GestureMachine::set_config).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Side of each corner hot-zone square, in pixels.
    pub edge_size: f64,
    /// Distance a drag must travel before it claims the pointer stream.
    pub touch_slop: f64,
    /// Distance of the cumulative pinch scale from 1.0 before a pinch
    /// claims the pointer stream.
    pub pinch_threshold: f64,
}

impl GestureConfig {
    /// Thresholds for a baseline-density (1x) phone display.
    #[must_use]
    pub const fn phone() -> Self {
        Self {
            edge_size: 48.0,
            touch_slop: 8.0,
            pinch_threshold: PINCH_THRESHOLD,
        }
    }

    /// Thresholds for a baseline-density (1x) tablet display.
    #[must_use]
    pub const fn tablet() -> Self {
        Self {
            edge_size: 64.0,
            touch_slop: 8.0,
            pinch_threshold: PINCH_THRESHOLD,
        }
    }

    /// These thresholds scaled to a display density.
    ///
    /// Pixel sizes scale with density; the pinch threshold is unitless and
    /// does not. Non-positive or non-finite densities leave `self` as is.
    #[must_use]
    pub fn scaled(self, density: f64) -> Self {
        if !(density > 0.0 && density.is_finite()) {
            return self;
        }
        Self {
            edge_size: self.edge_size * density,
            touch_slop: self.touch_slop * density,
            pinch_threshold: self.pinch_threshold,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::phone()
    }
}
