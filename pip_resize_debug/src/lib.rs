// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Development sinks for `pip_resize` telemetry.
//!
//! This crate provides [`EventSink`](pip_resize_core::telemetry::EventSink)
//! implementations for watching gestures during development:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`]: one JSON object per line, for scripts and log
//!   pipelines.

pub mod json;
pub mod pretty;
