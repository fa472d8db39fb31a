// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input thread.
//!
//! [`InputPump`] owns the [`GestureMachine`] and is the only code that calls
//! into it. Everything else talks to the pump through messages:
//!
//! ```text
//!   platform input ─┐
//!   host state ─────┼─► InputHandle ──flume (bounded)──┐
//!   config ─────────┘                                  ▼
//!                                                  InputPump ──► GestureMachine
//!   CommitCompletion ──flume (unbounded)──────────────▲  │
//!                                                        ▼
//!                        InputMonitor / OverlayController / CommitPipeline
//! ```
//!
//! Two ways to drive it:
//!
//! - [`InputPump::pump_pending`] handles whatever is queued and returns. Use
//!   it when the host already has an event loop.
//! - [`InputPump::run`] blocks, waking for messages and for the commit
//!   deadline, until [`InputHandle::shutdown`] or until every handle is
//!   dropped.

use std::time::Instant;

use flume::{Receiver, RecvError, Selector, Sender, TryRecvError};
use kurbo::Rect;
use pip_resize_core::config::GestureConfig;
use pip_resize_core::geometry::Limits;
use pip_resize_core::gesture::{
    GestureCommand, GestureMachine, OverlayHide, PointerAction, PointerEvent,
};
use pip_resize_core::host::WindowHost;
use pip_resize_core::telemetry::{EventSink, Tracer};
use tracing::{debug, trace, warn};

use crate::commit::{CommitError, CommitPipeline, Settlement, WindowCommitter};
use crate::config::RuntimeConfig;
use crate::flag::FeatureFlag;
use crate::command_log::CommandLog;

/// Controls the overlay menu drawn over the window.
pub trait OverlayController {
    /// Whether the menu is showing.
    fn is_visible(&self) -> bool;

    /// Hides the menu.
    fn hide(&mut self);

    /// Hides the menu without animating the window back to its old size.
    fn hide_without_resize(&mut self);
}

/// The platform's pointer-stream monitor.
pub trait InputMonitor {
    /// Claims the in-flight pointer stream so that no other consumer sees
    /// the rest of the gesture.
    fn pilfer_pointers(&mut self);
}

/// A message for the input thread.
#[derive(Clone, Debug, PartialEq)]
pub enum InputMessage {
    /// One pointer event.
    Pointer(PointerEvent),
    /// A window was pinned.
    Pinned,
    /// The window was unpinned.
    Unpinned,
    /// The system UI now does (`true`) or does not permit resizing.
    SystemUiState(bool),
    /// The window was stashed (`true`) or restored.
    Stashed(bool),
    /// New gesture thresholds.
    ConfigChanged(GestureConfig),
    /// New size limits.
    LimitsChanged(Limits),
    /// The host restored (`Some`) or invalidated (`None`) the user's bounds.
    UserResizeBounds(Option<Rect>),
    /// Stop [`InputPump::run`].
    Shutdown,
}

/// Errors from talking to the pump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PumpError {
    /// The pump has been dropped.
    #[error("input pump is gone")]
    Disconnected,
}

/// Sending side of the input channel. Cheap to clone.
#[derive(Clone, Debug)]
pub struct InputHandle {
    sender: Sender<InputMessage>,
}

impl InputHandle {
    /// Sends any message. Blocks while the channel is full.
    pub fn send(&self, message: InputMessage) -> Result<(), PumpError> {
        self.sender
            .send(message)
            .map_err(|_| PumpError::Disconnected)
    }

    /// Sends a pointer event.
    pub fn pointer(&self, event: PointerEvent) -> Result<(), PumpError> {
        self.send(InputMessage::Pointer(event))
    }

    /// Reports that a window was pinned.
    pub fn pinned(&self) -> Result<(), PumpError> {
        self.send(InputMessage::Pinned)
    }

    /// Reports that the window was unpinned.
    pub fn unpinned(&self) -> Result<(), PumpError> {
        self.send(InputMessage::Unpinned)
    }

    /// Reports a system UI state change.
    pub fn system_ui_state(&self, valid: bool) -> Result<(), PumpError> {
        self.send(InputMessage::SystemUiState(valid))
    }

    /// Reports that the window was stashed or restored.
    pub fn stashed(&self, stashed: bool) -> Result<(), PumpError> {
        self.send(InputMessage::Stashed(stashed))
    }

    /// Replaces the bounds the user last resized to.
    pub fn set_user_resize_bounds(&self, bounds: Rect) -> Result<(), PumpError> {
        self.send(InputMessage::UserResizeBounds(Some(bounds)))
    }

    /// Forgets the bounds the user last resized to.
    pub fn invalidate_user_resize_bounds(&self) -> Result<(), PumpError> {
        self.send(InputMessage::UserResizeBounds(None))
    }

    /// Asks [`InputPump::run`] to return.
    pub fn shutdown(&self) -> Result<(), PumpError> {
        self.send(InputMessage::Shutdown)
    }
}

/// Host-side collaborators of an [`InputPump`].
pub struct PumpParts {
    /// Window geometry.
    pub host: Box<dyn WindowHost + Send>,
    /// Applies bounds.
    pub committer: Box<dyn WindowCommitter + Send>,
    /// Overlay menu.
    pub overlay: Box<dyn OverlayController + Send>,
    /// Pointer-stream monitor.
    pub monitor: Box<dyn InputMonitor + Send>,
    /// Whether pinch resizing is enabled. Sampled before each gesture.
    pub pinch_flag: FeatureFlag,
    /// Usage telemetry.
    pub sink: Box<dyn EventSink + Send>,
}

impl core::fmt::Debug for PumpParts {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PumpParts")
            .field("pinch_flag", &self.pinch_flag)
            .finish_non_exhaustive()
    }
}

enum Wake {
    Input(Result<InputMessage, RecvError>),
    Settlement(Result<Settlement, RecvError>),
}

/// Drives a [`GestureMachine`] from the input channel.
pub struct InputPump {
    machine: GestureMachine,
    host: Box<dyn WindowHost + Send>,
    overlay: Box<dyn OverlayController + Send>,
    monitor: Box<dyn InputMonitor + Send>,
    pinch_flag: FeatureFlag,
    sink: Box<dyn EventSink + Send>,
    pipeline: CommitPipeline,
    inputs: Receiver<InputMessage>,
    settlements: Receiver<Settlement>,
    commands: CommandLog,
    shut_down: bool,
}

impl core::fmt::Debug for InputPump {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InputPump")
            .field("machine", &self.machine)
            .field("pipeline", &self.pipeline)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}

impl InputPump {
    /// Creates a pump and the handle that feeds it.
    #[must_use]
    pub fn new(
        machine: GestureMachine,
        config: RuntimeConfig,
        parts: PumpParts,
    ) -> (Self, InputHandle) {
        let (input_tx, inputs) = flume::bounded(config.channel_capacity.max(1));
        let (settlement_tx, settlements) = flume::unbounded();
        let pump = Self {
            machine,
            host: parts.host,
            overlay: parts.overlay,
            monitor: parts.monitor,
            pinch_flag: parts.pinch_flag,
            sink: parts.sink,
            pipeline: CommitPipeline::new(parts.committer, settlement_tx, config.commit_timeout),
            inputs,
            settlements,
            commands: CommandLog::new(config.history_capacity),
            shut_down: false,
        };
        (pump, InputHandle { sender: input_tx })
    }

    /// The gesture machine, for inspection.
    #[must_use]
    pub fn machine(&self) -> &GestureMachine {
        &self.machine
    }

    /// Whether a [`InputMessage::Shutdown`] has been handled.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Handles every queued message and expired deadline without blocking.
    ///
    /// Settlements are handled before input. Stops early after a shutdown
    /// message. Returns the number of messages handled.
    pub fn pump_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(settlement) = self.settlements.try_recv() {
            self.on_settlement(settlement);
            handled += 1;
        }
        self.expire_commits(Instant::now());
        while !self.shut_down {
            match self.inputs.try_recv() {
                Ok(message) => {
                    self.on_message(message);
                    handled += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
            // A synchronous committer settles during dispatch.
            while let Ok(settlement) = self.settlements.try_recv() {
                self.on_settlement(settlement);
                handled += 1;
            }
        }
        handled
    }

    /// Runs until shutdown or until every [`InputHandle`] is dropped.
    pub fn run(&mut self) {
        loop {
            self.pump_pending();
            if self.shut_down {
                debug!("input pump shut down");
                return;
            }
            let wake = {
                let selector = Selector::new()
                    .recv(&self.settlements, Wake::Settlement)
                    .recv(&self.inputs, Wake::Input);
                match self.pipeline.deadline() {
                    Some(deadline) => selector.wait_deadline(deadline).ok(),
                    None => Some(selector.wait()),
                }
            };
            match wake {
                // Deadline reached; the next pump_pending expires it.
                None => {}
                Some(Wake::Settlement(Ok(settlement))) => self.on_settlement(settlement),
                Some(Wake::Input(Ok(message))) => self.on_message(message),
                Some(Wake::Input(Err(RecvError::Disconnected))) => {
                    debug!("all input handles dropped; input pump exiting");
                    return;
                }
                // The pump holds a settlement sender, so this cannot disconnect.
                Some(Wake::Settlement(Err(RecvError::Disconnected))) => {}
            }
        }
    }

    /// Expires the outstanding final commit if its deadline is at or before
    /// `now`, returning the machine to idle.
    pub fn expire_commits(&mut self, now: Instant) {
        let Err(err @ CommitError::TimedOut { ticket, .. }) = self.pipeline.expire(now) else {
            return;
        };
        warn!(%err, "forcing gesture reset");
        let mut tracer = Tracer::new(&mut *self.sink);
        if let Err(err) = self.machine.on_commit_timed_out(ticket, &mut tracer) {
            debug!(%err, "timed-out commit was already settled");
        }
    }

    fn on_message(&mut self, message: InputMessage) {
        let mut tracer = Tracer::new(&mut *self.sink);
        match message {
            InputMessage::Pointer(event) => {
                if event.action == PointerAction::Down {
                    self.machine.set_pinch_enabled(self.pinch_flag.get());
                }
                let commands = self.machine.handle_event(&event, &*self.host, &mut tracer);
                drop(tracer);
                for command in commands {
                    self.execute(command);
                }
            }
            InputMessage::Pinned => self.machine.on_window_pinned(),
            InputMessage::Unpinned => self.machine.on_window_unpinned(&mut tracer),
            InputMessage::SystemUiState(valid) => {
                self.machine.on_system_ui_state_changed(valid, &mut tracer);
            }
            InputMessage::Stashed(stashed) => self.machine.set_stashed(stashed, &mut tracer),
            InputMessage::ConfigChanged(config) => self.machine.set_config(config),
            InputMessage::LimitsChanged(limits) => self.machine.set_limits(limits),
            InputMessage::UserResizeBounds(Some(bounds)) => {
                self.machine.set_user_resize_bounds(Some(bounds));
            }
            InputMessage::UserResizeBounds(None) => self.machine.invalidate_user_resize_bounds(),
            InputMessage::Shutdown => self.shut_down = true,
        }
    }

    fn execute(&mut self, command: GestureCommand) {
        trace!(?command, "executing");
        self.commands.push(command);
        match command {
            GestureCommand::Pilfer => self.monitor.pilfer_pointers(),
            GestureCommand::HideOverlay(kind) => {
                if self.overlay.is_visible() {
                    if kind == OverlayHide::ForResize {
                        self.overlay.hide_without_resize();
                    }
                    self.overlay.hide();
                }
            }
            GestureCommand::LiveUpdate { old, new } => self.pipeline.live_update(old, new),
            GestureCommand::FinalCommit { bounds, ticket } => {
                if let Err(err) = self.pipeline.final_commit(bounds, ticket, Instant::now()) {
                    warn!(%err, ?ticket, "final commit rejected");
                    let mut tracer = Tracer::new(&mut *self.sink);
                    if let Err(err) = self.machine.on_commit_failed(ticket, &mut tracer) {
                        debug!(%err, "rejected commit was already settled");
                    }
                }
            }
        }
    }

    fn on_settlement(&mut self, settlement: Settlement) {
        let ticket = settlement.ticket();
        if !self.pipeline.settle(ticket) {
            debug!(?settlement, "settlement for a commit no longer outstanding");
        }
        let mut tracer = Tracer::new(&mut *self.sink);
        let result = match settlement {
            Settlement::Completed(_) => self
                .machine
                .on_commit_complete(ticket, &mut tracer)
                .map(|bounds| debug!(?bounds, "window bounds committed")),
            Settlement::Failed(_) => self.machine.on_commit_failed(ticket, &mut tracer),
        };
        if let Err(err) = result {
            debug!(%err, "ignoring settlement");
        }
    }

    /// Writes the machine state and recent commands, one item per line.
    pub fn dump(&self, out: &mut impl core::fmt::Write, prefix: &str) -> core::fmt::Result {
        self.machine.dump(out, prefix)?;
        let inner = format!("{prefix}  ");
        writeln!(out, "{inner}commit_in_flight={:?}", self.pipeline.in_flight())?;
        self.commands.write_to(out, &inner)
    }

    /// Convenience wrapper around [`dump`](Self::dump).
    #[must_use]
    pub fn dump_to_string(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.dump(&mut out, "");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_reports_disconnect() {
        let (tx, rx) = flume::bounded(1);
        let handle = InputHandle { sender: tx };
        drop(rx);
        assert_eq!(handle.pinned(), Err(PumpError::Disconnected));
    }
}
