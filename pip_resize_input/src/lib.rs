// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input-thread integration for `pip_resize_core`.
//!
//! This crate runs a [`GestureMachine`](pip_resize_core::gesture::GestureMachine)
//! on a single input thread and connects it to the host:
//!
//! - [`InputPump`] receives pointer events and host-state changes over a
//!   bounded `flume` channel and executes the machine's commands.
//! - [`CommitPipeline`] forwards live updates and final commits to a
//!   [`WindowCommitter`]; final commits are acknowledged through a
//!   single-shot [`CommitCompletion`] that posts back to the pump.
//! - [`FeatureFlag`] carries the pinch-resize switch, sampled before each
//!   gesture.
//! - [`RuntimeConfig`] sets the channel capacity and the optional commit
//!   timeout.

mod command_log;
mod commit;
mod config;
mod flag;
mod pump;

pub use commit::{CommitCompletion, CommitError, CommitPipeline, Settlement, WindowCommitter};
pub use config::RuntimeConfig;
pub use flag::FeatureFlag;
pub use pump::{
    InputHandle, InputMessage, InputMonitor, InputPump, OverlayController, PumpError, PumpParts,
};
