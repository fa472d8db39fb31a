// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use tracing::{debug, trace, warn};

use super::event::{PointerAction, PointerEvent};
use super::scale::{ScaleDetector, ScaleSample};
use super::{CommitTicket, GestureCommand, GestureError, GestureMode, GesturePhase, OverlayHide};
use crate::algorithm::{AspectFitter, LimitAspectFitter, ResizeInput, compute_resized_bounds};
use crate::config::GestureConfig;
use crate::control::{ControlType, resolve_control_type, resolve_control_type_for_pinch};
use crate::geometry::{DisplayFrame, Limits, is_usable};
use crate::host::WindowHost;
use crate::hot_zone::HotZone;
use crate::telemetry::{
    AbortReason, CommitOutcome, CommitSettledEvent, GestureAbortedEvent, GestureArmedEvent,
    ResizeCommittedEvent, ThresholdCrossedEvent, Tracer,
};

/// Per-gesture state, created when a gesture arms.
#[derive(Clone, Copy, Debug)]
struct Session {
    mode: GestureMode,
    down_point: Point,
    down_bounds: Rect,
    control: ControlType,
    threshold_crossed: bool,
    /// Cumulative pinch scale; stays 1.0 for drags.
    scale: f64,
}

#[derive(Clone, Copy, Debug)]
struct PendingCommit {
    ticket: CommitTicket,
    mode: GestureMode,
    bounds: Rect,
    previous_user_bounds: Option<Rect>,
}

/// Turns pointer events into resize commands.
///
/// All methods must be called from one context (the input thread). Methods
/// that can end a gesture take a [`Tracer`] for usage telemetry.
///
/// A freshly built machine is detached: call
/// [`on_window_pinned`](Self::on_window_pinned) before feeding events.
#[derive(Debug)]
pub struct GestureMachine<F = LimitAspectFitter> {
    config: GestureConfig,
    limits: Limits,
    fitter: F,
    attached: bool,
    system_ui_valid: bool,
    stashed: bool,
    pinch_enabled: bool,
    scale: ScaleDetector,
    session: Option<Session>,
    pending: Option<PendingCommit>,
    last_resize_bounds: Option<Rect>,
    user_resize_bounds: Option<Rect>,
    next_ticket: u64,
}

impl GestureMachine {
    /// Creates a detached machine using [`LimitAspectFitter`].
    #[must_use]
    pub fn new(config: GestureConfig, limits: Limits) -> Self {
        Self::with_fitter(config, limits, LimitAspectFitter::default())
    }
}

impl<F: AspectFitter> GestureMachine<F> {
    /// Creates a detached machine with a custom aspect fitter.
    #[must_use]
    pub fn with_fitter(config: GestureConfig, limits: Limits, fitter: F) -> Self {
        Self {
            config,
            limits,
            fitter,
            attached: false,
            system_ui_valid: true,
            stashed: false,
            pinch_enabled: false,
            scale: ScaleDetector::new(),
            session: None,
            pending: None,
            last_resize_bounds: None,
            user_resize_bounds: None,
            next_ticket: 1,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match (self.session, self.pending) {
            (Some(s), _) if s.threshold_crossed => GesturePhase::Active(s.mode),
            (Some(s), _) => GesturePhase::Armed(s.mode),
            (None, Some(_)) => GesturePhase::Finishing,
            (None, None) => GesturePhase::Idle,
        }
    }

    /// Current thresholds.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current size limits.
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Whether a pinned window is attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether pointer events are being processed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.attached
    }

    /// Whether a second pointer may start a pinch.
    #[must_use]
    pub const fn pinch_enabled(&self) -> bool {
        self.pinch_enabled
    }

    /// Bounds computed by the most recent sample of the current or last
    /// gesture. Cleared when a new gesture starts.
    #[must_use]
    pub const fn last_resize_bounds(&self) -> Option<Rect> {
        self.last_resize_bounds
    }

    /// Bounds the user last resized to, kept across gestures.
    #[must_use]
    pub const fn user_resize_bounds(&self) -> Option<Rect> {
        self.user_resize_bounds
    }

    // -- Host state ---------------------------------------------------------

    /// Replaces the gesture thresholds (density or resource change).
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Replaces the size limits. The next sample uses them.
    pub fn set_limits(&mut self, limits: Limits) {
        self.limits = limits;
    }

    /// Sets whether pinch resizing is available for the next gesture.
    pub fn set_pinch_enabled(&mut self, enabled: bool) {
        self.pinch_enabled = enabled;
    }

    /// Overrides the remembered user bounds.
    pub fn set_user_resize_bounds(&mut self, bounds: Option<Rect>) {
        self.user_resize_bounds = bounds;
    }

    /// Forgets the remembered user bounds, including the value a failed
    /// in-flight commit would restore.
    pub fn invalidate_user_resize_bounds(&mut self) {
        self.user_resize_bounds = None;
        if let Some(pending) = &mut self.pending {
            pending.previous_user_bounds = None;
        }
    }

    /// A window became pinned; start processing events.
    pub fn on_window_pinned(&mut self) {
        if !self.attached {
            debug!("window pinned; resize input enabled");
        }
        self.attached = true;
    }

    /// The window was unpinned; stop processing events and forget the
    /// user's bounds. An open gesture ends without a final commit.
    pub fn on_window_unpinned(&mut self, tracer: &mut Tracer<'_>) {
        self.attached = false;
        self.invalidate_user_resize_bounds();
        self.abort(AbortReason::Unpinned, tracer);
        debug!("window unpinned; resize input disabled");
    }

    /// The system UI entered or left a state that permits resizing.
    pub fn on_system_ui_state_changed(&mut self, valid: bool, tracer: &mut Tracer<'_>) {
        self.system_ui_valid = valid;
        if !valid {
            self.abort(AbortReason::SystemUiInvalid, tracer);
        }
    }

    /// The window was stashed at, or restored from, the screen edge.
    pub fn set_stashed(&mut self, stashed: bool, tracer: &mut Tracer<'_>) {
        self.stashed = stashed;
        if stashed {
            self.abort(AbortReason::Stashed, tracer);
        }
    }

    // -- Pointer input ------------------------------------------------------

    /// Feeds one pointer event and returns the commands to execute, in
    /// order.
    ///
    /// Events are ignored while detached, stashed, or while a final commit
    /// is in flight.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        host: &dyn WindowHost,
        tracer: &mut Tracer<'_>,
    ) -> Vec<GestureCommand> {
        let mut out = Vec::new();
        if !self.attached || self.stashed {
            trace!(action = ?event.action, "resize input disabled; ignoring");
            return out;
        }
        if self.pending.is_some() {
            trace!(action = ?event.action, "final commit in flight; ignoring");
            return out;
        }

        let sample = self.scale.on_event(event);
        match event.action {
            PointerAction::Down => {
                if let Some(point) = event.primary() {
                    self.on_down(point, host, tracer, &mut out);
                }
            }
            PointerAction::PointerDown => self.on_pointer_down(event, host, tracer, &mut out),
            PointerAction::Move => self.on_move(event, sample, tracer, &mut out),
            PointerAction::PointerUp => {
                let pinching = self.session.is_some_and(|s| s.mode == GestureMode::Pinch);
                if pinching && sample == ScaleSample::End {
                    self.finish(AbortReason::NoChange, tracer, &mut out);
                }
            }
            PointerAction::Up | PointerAction::Cancel => {
                self.finish(AbortReason::NoChange, tracer, &mut out);
            }
        }
        out
    }

    fn on_down(
        &mut self,
        point: Point,
        host: &dyn WindowHost,
        tracer: &mut Tracer<'_>,
        out: &mut Vec<GestureCommand>,
    ) {
        self.abort(AbortReason::Superseded, tracer);
        self.last_resize_bounds = None;

        let Some(bounds) = host.current_bounds().filter(|b| is_usable(*b)) else {
            trace!("window has no usable bounds; ignoring down");
            return;
        };

        if self.system_ui_valid
            && let Some(zone) = HotZone::around(bounds, self.config.edge_size)
            && zone.contains(point)
        {
            let frame = DisplayFrame::from_movement_bounds(host.movement_bounds(bounds), bounds);
            let control = resolve_control_type(point, &zone, frame, bounds);
            if control.is_none() {
                debug!(?point, "touched corner is pinned to the display edge");
            } else {
                self.arm(GestureMode::Drag, point, bounds, control, tracer);
            }
        }

        if !bounds.contains(point) {
            out.push(GestureCommand::HideOverlay(OverlayHide::Dismiss));
        }
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        host: &dyn WindowHost,
        tracer: &mut Tracer<'_>,
        out: &mut Vec<GestureCommand>,
    ) {
        match self.phase() {
            GesturePhase::Active(GestureMode::Drag) => {
                debug!("second pointer during drag resize; finishing");
                self.finish(AbortReason::MultiTouch, tracer, out);
            }
            GesturePhase::Idle | GesturePhase::Armed(GestureMode::Drag) => {
                let can_pinch =
                    self.pinch_enabled && self.system_ui_valid && event.pointer_count() == 2;
                if !can_pinch {
                    self.abort(AbortReason::MultiTouch, tracer);
                    return;
                }
                // A pinch replaces an armed drag without reporting an abort.
                self.session = None;
                self.last_resize_bounds = None;
                let Some(bounds) = host.current_bounds().filter(|b| is_usable(*b)) else {
                    trace!("window has no usable bounds; ignoring pinch");
                    return;
                };
                let frame = DisplayFrame::from_movement_bounds(host.movement_bounds(bounds), bounds);
                let control = resolve_control_type_for_pinch(bounds, frame);
                let focus = event.focus().unwrap_or_else(|| bounds.center());
                self.arm(GestureMode::Pinch, focus, bounds, control, tracer);
            }
            GesturePhase::Armed(GestureMode::Pinch)
            | GesturePhase::Active(GestureMode::Pinch)
            | GesturePhase::Finishing => {}
        }
    }

    fn on_move(
        &mut self,
        event: &PointerEvent,
        sample: ScaleSample,
        tracer: &mut Tracer<'_>,
        out: &mut Vec<GestureCommand>,
    ) {
        let Some(mut session) = self.session else {
            return;
        };
        let was_crossed = session.threshold_crossed;
        let input = match session.mode {
            GestureMode::Drag => {
                let Some(pointer) = event.primary() else {
                    return;
                };
                if !session.threshold_crossed
                    && (pointer - session.down_point).hypot() > self.config.touch_slop
                {
                    // Resizing is measured from where the slop was crossed.
                    session.down_point = pointer;
                    cross_threshold(&mut session, tracer, out);
                }
                ResizeInput::Drag {
                    pointer,
                    down_point: session.down_point,
                }
            }
            GestureMode::Pinch => {
                let ScaleSample::Scale(factor) = sample else {
                    return;
                };
                session.scale *= factor;
                let drift = session.scale - 1.0;
                let threshold = self.config.pinch_threshold;
                if !session.threshold_crossed && (drift > threshold || drift < -threshold) {
                    cross_threshold(&mut session, tracer, out);
                }
                ResizeInput::Pinch {
                    scale: session.scale,
                }
            }
        };

        if session.threshold_crossed {
            // An overlay shown mid-drag is hidden again; pinches hide it once.
            if session.mode == GestureMode::Drag || !was_crossed {
                out.push(GestureCommand::HideOverlay(OverlayHide::ForResize));
            }
            let bounds = compute_resized_bounds(
                input,
                session.down_bounds,
                session.control,
                &self.limits,
                &self.fitter,
                session.mode == GestureMode::Drag,
            );
            trace!(?bounds, "live resize");
            self.last_resize_bounds = Some(bounds);
            out.push(GestureCommand::LiveUpdate {
                old: session.down_bounds,
                new: bounds,
            });
        }
        self.session = Some(session);
    }

    fn arm(
        &mut self,
        mode: GestureMode,
        down_point: Point,
        down_bounds: Rect,
        control: ControlType,
        tracer: &mut Tracer<'_>,
    ) {
        debug!(?mode, ?control, ?down_bounds, "gesture armed");
        tracer.gesture_armed(&GestureArmedEvent {
            mode,
            control,
            down_bounds,
        });
        self.session = Some(Session {
            mode,
            down_point,
            down_bounds,
            control,
            threshold_crossed: false,
            scale: 1.0,
        });
    }

    /// Ends the open session, issuing a final commit if the window was
    /// resized. `reason` is reported when no commit is issued.
    fn finish(&mut self, reason: AbortReason, tracer: &mut Tracer<'_>, out: &mut Vec<GestureCommand>) {
        let Some(session) = self.session.take() else {
            return;
        };
        let Some(bounds) = self.last_resize_bounds else {
            debug!(mode = ?session.mode, ?reason, "gesture ended without resizing");
            tracer.gesture_aborted(&GestureAbortedEvent {
                mode: session.mode,
                reason,
            });
            return;
        };

        let ticket = CommitTicket::new(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(PendingCommit {
            ticket,
            mode: session.mode,
            bounds,
            previous_user_bounds: self.user_resize_bounds.replace(bounds),
        });
        debug!(?ticket, ?bounds, mode = ?session.mode, "final commit issued");
        tracer.resize_committed(&ResizeCommittedEvent {
            mode: session.mode,
            ticket,
            from: session.down_bounds,
            to: bounds,
        });
        out.push(GestureCommand::FinalCommit { bounds, ticket });
    }

    /// Drops the open session without a final commit.
    fn abort(&mut self, reason: AbortReason, tracer: &mut Tracer<'_>) {
        if let Some(session) = self.session.take() {
            debug!(mode = ?session.mode, ?reason, "gesture aborted");
            tracer.gesture_aborted(&GestureAbortedEvent {
                mode: session.mode,
                reason,
            });
        }
    }

    // -- Commit acknowledgment ----------------------------------------------

    /// The host applied the final commit for `ticket`. Returns the committed
    /// bounds and moves to [`GesturePhase::Idle`].
    pub fn on_commit_complete(
        &mut self,
        ticket: CommitTicket,
        tracer: &mut Tracer<'_>,
    ) -> Result<Rect, GestureError> {
        let pending = self.take_pending(ticket)?;
        debug!(?ticket, bounds = ?pending.bounds, "final commit acknowledged");
        tracer.commit_settled(&CommitSettledEvent {
            ticket,
            outcome: CommitOutcome::Completed,
        });
        Ok(pending.bounds)
    }

    /// The host could not apply the final commit for `ticket`. The machine
    /// returns to [`GesturePhase::Idle`] and the user bounds revert.
    pub fn on_commit_failed(
        &mut self,
        ticket: CommitTicket,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GestureError> {
        self.settle_unapplied(ticket, CommitOutcome::Failed, tracer)
    }

    /// No acknowledgment for `ticket` arrived in time. Behaves like
    /// [`on_commit_failed`](Self::on_commit_failed).
    pub fn on_commit_timed_out(
        &mut self,
        ticket: CommitTicket,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GestureError> {
        self.settle_unapplied(ticket, CommitOutcome::TimedOut, tracer)
    }

    fn settle_unapplied(
        &mut self,
        ticket: CommitTicket,
        outcome: CommitOutcome,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GestureError> {
        let pending = self.take_pending(ticket)?;
        warn!(?ticket, ?outcome, mode = ?pending.mode, "final commit not applied; resetting");
        self.user_resize_bounds = pending.previous_user_bounds;
        tracer.commit_settled(&CommitSettledEvent { ticket, outcome });
        Ok(())
    }

    fn take_pending(&mut self, ticket: CommitTicket) -> Result<PendingCommit, GestureError> {
        match self.pending {
            None => Err(GestureError::NoCommitPending),
            Some(p) if p.ticket != ticket => Err(GestureError::StaleTicket {
                expected: p.ticket,
                received: ticket,
            }),
            Some(p) => {
                self.pending = None;
                Ok(p)
            }
        }
    }

    // -- Diagnostics --------------------------------------------------------

    /// Writes a human-readable snapshot, one field per line.
    pub fn dump(&self, out: &mut impl fmt::Write, prefix: &str) -> fmt::Result {
        let threshold_crossed =
            self.session.is_some_and(|s| s.threshold_crossed) || self.pending.is_some();
        writeln!(out, "{prefix}GestureMachine")?;
        writeln!(out, "{prefix}  allow_gesture={}", self.session.is_some())?;
        writeln!(out, "{prefix}  attached={}", self.attached)?;
        writeln!(out, "{prefix}  enabled={}", self.is_enabled())?;
        writeln!(out, "{prefix}  pinch_enabled={}", self.pinch_enabled)?;
        writeln!(out, "{prefix}  threshold_crossed={threshold_crossed}")?;
        writeln!(out, "{prefix}  phase={:?}", self.phase())
    }
}

fn cross_threshold(session: &mut Session, tracer: &mut Tracer<'_>, out: &mut Vec<GestureCommand>) {
    session.threshold_crossed = true;
    debug!(mode = ?session.mode, "resize threshold crossed");
    tracer.threshold_crossed(&ThresholdCrossedEvent { mode: session.mode });
    out.push(GestureCommand::Pilfer);
}
