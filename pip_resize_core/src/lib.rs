// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture engine for resizing a floating picture-in-picture window.
//!
//! `pip_resize_core` turns a pointer stream into window bounds. A resize
//! starts either by dragging one of the window's corners or by pinching with
//! two fingers; each sample produces a best-effort live update and the end of
//! the gesture produces one acknowledged final commit. The crate is `no_std`
//! compatible (with `alloc`) and performs no I/O: everything it wants done is
//! returned as a [`GestureCommand`](gesture::GestureCommand).
//!
//! # Architecture
//!
//! ```text
//!   PointerEvent ──► GestureMachine::handle_event()
//!                        │         ▲
//!                        │         │ current_bounds(), movement_bounds()
//!                        │     WindowHost
//!                        ▼
//!   HotZone / resolve_control_type ──► compute_resized_bounds()
//!                                              │
//!                 ┌────────────────────────────┘
//!                 ▼
//!   Vec<GestureCommand> ──► integration layer (pilfer, overlay, commits)
//!                                              │
//!                 ┌────────────────────────────┘
//!                 ▼
//!   on_commit_complete(ticket) ──► Idle
//! ```
//!
//! **[`gesture`]**: The state machine, its commands, and pointer events.
//!
//! **[`algorithm`]**: Pure resize computation: edge deltas or pinch scale,
//! limit clamping, orientation keeping, and aspect fitting through the
//! [`AspectFitter`](algorithm::AspectFitter) trait.
//!
//! **[`control`]**: Which edges move, as a [`ControlType`](control::ControlType)
//! edge set, resolved for drags and for pinches.
//!
//! **[`hot_zone`]**: Corner squares where a drag may start.
//!
//! **[`geometry`]**: Size limits and the display frame.
//!
//! **[`host`]**: The [`WindowHost`](host::WindowHost) trait the engine reads
//! window geometry through.
//!
//! **[`config`]**: Gesture thresholds with per-device presets.
//!
//! **[`telemetry`]**: [`EventSink`](telemetry::EventSink) trait and event
//! types for usage reporting, with a [`Tracer`](telemetry::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod algorithm;
pub mod config;
pub mod control;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod hot_zone;
pub mod telemetry;
