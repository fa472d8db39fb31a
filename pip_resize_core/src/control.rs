// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor resolution: which window edges move during a resize.
//!
//! A [`ControlType`] names the edges that follow the gesture. The opposite
//! edges stay anchored at their position from the start of the gesture.
//!
//! Two resolvers exist because the gestures start differently:
//!
//! - [`resolve_control_type`] runs at pointer-down for a corner drag and
//!   picks the corner under the pointer, refusing corners whose edges are
//!   pinned to the display frame.
//! - [`resolve_control_type_for_pinch`] runs once when a pinch begins and
//!   grows the window away from whichever screen edges it is pinned to.

use core::fmt;

use kurbo::{Point, Rect};

use crate::geometry::{DisplayFrame, is_usable};
use crate::hot_zone::HotZone;

/// One side of a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The top edge.
    Top,
    /// The bottom edge.
    Bottom,
    /// The left edge.
    Left,
    /// The right edge.
    Right,
}

impl Edge {
    const fn bit(self) -> u8 {
        match self {
            Self::Top => 1,
            Self::Bottom => 2,
            Self::Left => 4,
            Self::Right => 8,
        }
    }

    /// Returns `true` for [`Edge::Top`] and [`Edge::Bottom`].
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// A set of moving edges.
///
/// The empty set is [`ControlType::NONE`] (no active resize). Sets built by
/// [`corner`](Self::corner) or [`try_from_edges`](Self::try_from_edges) hold
/// at most one vertical and one horizontal edge. [`union`](Self::union) may
/// combine opposite edges when corner hot zones overlap on a very small
/// window; readers resolve such a conflict per axis through
/// [`vertical`](Self::vertical) and [`horizontal`](Self::horizontal), where
/// `Top` wins over `Bottom` and `Left` wins over `Right`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlType(u8);

/// Error returned when an edge list names both edges of one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("edges {0:?} and {1:?} are on the same axis")]
pub struct ConflictingEdges(pub Edge, pub Edge);

impl ControlType {
    /// No edges move.
    pub const NONE: Self = Self(0);

    /// The corner where `vertical` and `horizontal` meet.
    ///
    /// # Panics
    ///
    /// Panics if `vertical` is not [`Edge::Top`] / [`Edge::Bottom`] or
    /// `horizontal` is not [`Edge::Left`] / [`Edge::Right`].
    #[must_use]
    pub const fn corner(vertical: Edge, horizontal: Edge) -> Self {
        assert!(vertical.is_vertical(), "first edge must be Top or Bottom");
        assert!(!horizontal.is_vertical(), "second edge must be Left or Right");
        Self(vertical.bit() | horizontal.bit())
    }

    /// Builds a set from a list of edges, rejecting opposite pairs.
    pub fn try_from_edges(edges: &[Edge]) -> Result<Self, ConflictingEdges> {
        let mut set = Self::NONE;
        for &edge in edges {
            let opposite = match edge {
                Edge::Top => Edge::Bottom,
                Edge::Bottom => Edge::Top,
                Edge::Left => Edge::Right,
                Edge::Right => Edge::Left,
            };
            if set.contains(opposite) {
                return Err(ConflictingEdges(opposite, edge));
            }
            set.0 |= edge.bit();
        }
        Ok(set)
    }

    /// Combines two sets without validation.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if `edge` is in the set.
    #[must_use]
    pub const fn contains(self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    /// Returns `true` if no edge moves.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the set holds both edges of some axis.
    #[must_use]
    pub const fn is_conflicting(self) -> bool {
        (self.contains(Edge::Top) && self.contains(Edge::Bottom))
            || (self.contains(Edge::Left) && self.contains(Edge::Right))
    }

    /// The moving vertical edge, if any.
    #[must_use]
    pub const fn vertical(self) -> Option<Edge> {
        if self.contains(Edge::Top) {
            Some(Edge::Top)
        } else if self.contains(Edge::Bottom) {
            Some(Edge::Bottom)
        } else {
            None
        }
    }

    /// The moving horizontal edge, if any.
    #[must_use]
    pub const fn horizontal(self) -> Option<Edge> {
        if self.contains(Edge::Left) {
            Some(Edge::Left)
        } else if self.contains(Edge::Right) {
            Some(Edge::Right)
        } else {
            None
        }
    }
}

impl fmt::Debug for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("ControlType(NONE)");
        }
        let mut set = f.debug_set();
        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            if self.contains(edge) {
                set.entry(&edge);
            }
        }
        set.finish()
    }
}

/// Picks the moving corner for a drag that starts at `point`.
///
/// A corner qualifies when `point` is in its hot-zone square and neither of
/// the corner's edges is flush with the display frame. Qualifying corners
/// are combined with [`ControlType::union`].
#[must_use]
pub fn resolve_control_type(
    point: Point,
    hot_zone: &HotZone,
    display_frame: DisplayFrame,
    current_bounds: Rect,
) -> ControlType {
    if !is_usable(current_bounds) {
        return ControlType::NONE;
    }
    let frame = display_frame.rect();
    let b = current_bounds;
    let top_free = b.y0 != frame.y0;
    let bottom_free = b.y1 != frame.y1;
    let left_free = b.x0 != frame.x0;
    let right_free = b.x1 != frame.x1;

    let corners = [
        (hot_zone.top_left, top_free && left_free, Edge::Top, Edge::Left),
        (hot_zone.top_right, top_free && right_free, Edge::Top, Edge::Right),
        (hot_zone.bottom_right, bottom_free && right_free, Edge::Bottom, Edge::Right),
        (hot_zone.bottom_left, bottom_free && left_free, Edge::Bottom, Edge::Left),
    ];
    corners
        .into_iter()
        .filter(|(square, free, _, _)| *free && square.contains(point))
        .fold(ControlType::NONE, |acc, (_, _, v, h)| {
            acc.union(ControlType::corner(v, h))
        })
}

/// Picks the moving edges for a pinch, away from pinned screen edges.
#[must_use]
pub fn resolve_control_type_for_pinch(
    current_bounds: Rect,
    display_frame: DisplayFrame,
) -> ControlType {
    if !is_usable(current_bounds) {
        return ControlType::NONE;
    }
    let frame = display_frame.rect();
    let horizontal = if current_bounds.x0 == frame.x0 {
        Edge::Right
    } else {
        Edge::Left
    };
    let vertical = if current_bounds.y0 == frame.y0 {
        Edge::Bottom
    } else {
        Edge::Top
    };
    ControlType::corner(vertical, horizontal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DisplayFrame {
        DisplayFrame(Rect::new(0.0, 0.0, 1080.0, 1920.0))
    }

    #[test]
    fn corner_constructor_validates_axes() {
        let ct = ControlType::corner(Edge::Bottom, Edge::Right);
        assert_eq!(ct.vertical(), Some(Edge::Bottom));
        assert_eq!(ct.horizontal(), Some(Edge::Right));
        assert!(!ct.is_conflicting());
    }

    #[test]
    #[should_panic(expected = "first edge must be Top or Bottom")]
    fn corner_rejects_swapped_edges() {
        let _ = ControlType::corner(Edge::Left, Edge::Top);
    }

    #[test]
    fn try_from_edges_rejects_opposites() {
        assert_eq!(
            ControlType::try_from_edges(&[Edge::Left, Edge::Right]),
            Err(ConflictingEdges(Edge::Left, Edge::Right))
        );
        let ok = ControlType::try_from_edges(&[Edge::Top]).unwrap();
        assert_eq!(ok.vertical(), Some(Edge::Top));
        assert_eq!(ok.horizontal(), None);
    }

    #[test]
    fn union_conflicts_resolve_by_precedence() {
        let ct = ControlType::corner(Edge::Top, Edge::Left)
            .union(ControlType::corner(Edge::Top, Edge::Right));
        assert!(ct.is_conflicting());
        assert_eq!(ct.horizontal(), Some(Edge::Left));
        assert_eq!(ct.vertical(), Some(Edge::Top));
    }

    #[test]
    fn drag_resolves_bottom_right_when_pinned_top_left() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 150.0);
        let zone = HotZone::around(bounds, 40.0).unwrap();
        let ct = resolve_control_type(Point::new(198.0, 148.0), &zone, frame(), bounds);
        assert_eq!(ct, ControlType::corner(Edge::Bottom, Edge::Right));
    }

    #[test]
    fn drag_refuses_pinned_corner() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 150.0);
        let zone = HotZone::around(bounds, 40.0).unwrap();
        let ct = resolve_control_type(Point::new(2.0, 2.0), &zone, frame(), bounds);
        assert!(ct.is_none(), "top-left corner is flush with the frame");
    }

    #[test]
    fn drag_ors_overlapping_corners() {
        let bounds = Rect::new(100.0, 100.0, 130.0, 400.0);
        let zone = HotZone::around(bounds, 40.0).unwrap();
        let ct = resolve_control_type(Point::new(115.0, 105.0), &zone, frame(), bounds);
        assert!(ct.contains(Edge::Left) && ct.contains(Edge::Right));
        assert!(ct.contains(Edge::Top));
        assert!(ct.is_conflicting());
    }

    #[test]
    fn pinch_grows_away_from_pinned_edges() {
        let pinned = Rect::new(0.0, 0.0, 200.0, 150.0);
        assert_eq!(
            resolve_control_type_for_pinch(pinned, frame()),
            ControlType::corner(Edge::Bottom, Edge::Right)
        );
        let floating = Rect::new(500.0, 900.0, 700.0, 1050.0);
        assert_eq!(
            resolve_control_type_for_pinch(floating, frame()),
            ControlType::corner(Edge::Top, Edge::Left)
        );
    }

    #[test]
    fn degenerate_bounds_resolve_to_none() {
        let zone = HotZone::around(Rect::new(0.0, 0.0, 10.0, 10.0), 4.0).unwrap();
        assert!(resolve_control_type(Point::ZERO, &zone, frame(), Rect::ZERO).is_none());
        assert!(resolve_control_type_for_pinch(Rect::ZERO, frame()).is_none());
    }
}
