// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger scale detection.
//!
//! The detector follows the distance between the first two pointers and
//! reports the ratio of each new span to the previous one. The gesture
//! machine multiplies those ratios into a cumulative scale.

use super::event::{PointerAction, PointerEvent};

/// What the detector saw in one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleSample {
    /// Nothing scale-related happened.
    None,
    /// Two pointers are now down; scaling has begun.
    Begin,
    /// The span changed by this factor since the previous sample.
    Scale(f64),
    /// Fewer than two pointers remain; scaling has ended.
    End,
}

/// Tracks the span between two pointers across events.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleDetector {
    previous_span: Option<f64>,
}

impl ScaleDetector {
    /// Creates an idle detector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous_span: None,
        }
    }

    /// Returns `true` between [`ScaleSample::Begin`] and [`ScaleSample::End`].
    #[must_use]
    pub const fn in_progress(&self) -> bool {
        self.previous_span.is_some()
    }

    /// Feeds one event.
    pub fn on_event(&mut self, event: &PointerEvent) -> ScaleSample {
        match event.action {
            PointerAction::Down => {
                self.previous_span = None;
                ScaleSample::None
            }
            PointerAction::PointerDown => {
                let began = !self.in_progress();
                // A third pointer restarts the span from the first two.
                self.previous_span = event.span().filter(|s| *s > 0.0);
                if began && self.in_progress() {
                    ScaleSample::Begin
                } else {
                    ScaleSample::None
                }
            }
            PointerAction::Move => {
                let (Some(previous), Some(span)) = (self.previous_span, event.span()) else {
                    return ScaleSample::None;
                };
                if span <= 0.0 {
                    return ScaleSample::None;
                }
                self.previous_span = Some(span);
                ScaleSample::Scale(span / previous)
            }
            PointerAction::PointerUp => {
                if !self.in_progress() {
                    return ScaleSample::None;
                }
                if event.pointer_count() <= 2 {
                    self.previous_span = None;
                    ScaleSample::End
                } else {
                    // Span of the survivors is unknown until the next move.
                    self.previous_span = event.span().filter(|s| *s > 0.0);
                    ScaleSample::None
                }
            }
            PointerAction::Up | PointerAction::Cancel => {
                if self.previous_span.take().is_some() {
                    ScaleSample::End
                } else {
                    ScaleSample::None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn reports_span_ratios() {
        let mut d = ScaleDetector::new();
        let a = Point::new(100.0, 100.0);
        assert_eq!(d.on_event(&PointerEvent::down(a)), ScaleSample::None);
        assert_eq!(
            d.on_event(&PointerEvent::pointer_down(a, Point::new(200.0, 100.0))),
            ScaleSample::Begin
        );
        assert_eq!(
            d.on_event(&PointerEvent::moved_pair(a, Point::new(250.0, 100.0))),
            ScaleSample::Scale(1.5)
        );
        assert_eq!(
            d.on_event(&PointerEvent::moved_pair(a, Point::new(175.0, 100.0))),
            ScaleSample::Scale(0.5)
        );
        assert_eq!(
            d.on_event(&PointerEvent::pointer_up(a, Point::new(175.0, 100.0))),
            ScaleSample::End
        );
        assert!(!d.in_progress());
    }

    #[test]
    fn zero_span_is_ignored() {
        let mut d = ScaleDetector::new();
        let a = Point::new(10.0, 10.0);
        d.on_event(&PointerEvent::pointer_down(a, Point::new(20.0, 10.0)));
        assert_eq!(
            d.on_event(&PointerEvent::moved_pair(a, a)),
            ScaleSample::None
        );
        assert_eq!(
            d.on_event(&PointerEvent::moved_pair(a, Point::new(30.0, 10.0))),
            ScaleSample::Scale(2.0)
        );
    }

    #[test]
    fn cancel_ends_scaling() {
        let mut d = ScaleDetector::new();
        d.on_event(&PointerEvent::pointer_down(Point::ZERO, Point::new(5.0, 0.0)));
        assert_eq!(d.on_event(&PointerEvent::cancel()), ScaleSample::End);
        assert_eq!(d.on_event(&PointerEvent::cancel()), ScaleSample::None);
    }

    #[test]
    fn single_pointer_moves_are_not_scale() {
        let mut d = ScaleDetector::new();
        d.on_event(&PointerEvent::down(Point::ZERO));
        assert_eq!(
            d.on_event(&PointerEvent::moved(Point::new(50.0, 50.0))),
            ScaleSample::None
        );
    }
}
