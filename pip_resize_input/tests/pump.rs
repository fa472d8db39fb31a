// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the input pump with recording host doubles.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use kurbo::{Point, Rect, Size};
use pip_resize_core::config::{GestureConfig, PINCH_THRESHOLD};
use pip_resize_core::geometry::Limits;
use pip_resize_core::gesture::{GestureMachine, GestureMode, GesturePhase, PointerEvent};
use pip_resize_core::host::StaticWindowHost;
use pip_resize_core::telemetry::{CommitOutcome, CommitSettledEvent, EventSink};
use pip_resize_input::{
    CommitCompletion, FeatureFlag, InputHandle, InputMonitor, InputPump, OverlayController,
    PumpParts, RuntimeConfig, WindowCommitter,
};

#[derive(Default)]
struct Log {
    live: Vec<Rect>,
    finals: Vec<Rect>,
    completions: Vec<CommitCompletion>,
    pilfers: u32,
    overlay_visible: bool,
    overlay_calls: Vec<&'static str>,
    settled: Vec<CommitOutcome>,
}

#[derive(Clone, Default)]
struct Shared(Arc<Mutex<Log>>);

impl Shared {
    fn log(&self) -> MutexGuard<'_, Log> {
        self.0.lock().unwrap()
    }
}

impl WindowCommitter for Shared {
    fn request_live_update(&mut self, _old: Rect, new: Rect) {
        self.log().live.push(new);
    }

    fn request_final_commit(&mut self, bounds: Rect, completion: CommitCompletion) {
        let mut log = self.log();
        log.finals.push(bounds);
        log.completions.push(completion);
    }
}

impl OverlayController for Shared {
    fn is_visible(&self) -> bool {
        self.log().overlay_visible
    }

    fn hide(&mut self) {
        let mut log = self.log();
        log.overlay_visible = false;
        log.overlay_calls.push("hide");
    }

    fn hide_without_resize(&mut self) {
        self.log().overlay_calls.push("hide_without_resize");
    }
}

impl InputMonitor for Shared {
    fn pilfer_pointers(&mut self) {
        self.log().pilfers += 1;
    }
}

impl EventSink for Shared {
    fn on_commit_settled(&mut self, e: &CommitSettledEvent) {
        self.log().settled.push(e.outcome);
    }
}

fn setup(config: RuntimeConfig, pinch: &FeatureFlag) -> (InputPump, InputHandle, Shared) {
    let shared = Shared::default();
    let gesture = GestureConfig {
        edge_size: 40.0,
        touch_slop: 8.0,
        pinch_threshold: PINCH_THRESHOLD,
    };
    let limits = Limits::new(Size::new(100.0, 75.0), Size::new(400.0, 300.0), None).unwrap();
    let parts = PumpParts {
        host: Box::new(StaticWindowHost {
            bounds: Some(Rect::new(0.0, 0.0, 200.0, 150.0)),
            display: Rect::new(0.0, 0.0, 1080.0, 1920.0),
        }),
        committer: Box::new(shared.clone()),
        overlay: Box::new(shared.clone()),
        monitor: Box::new(shared.clone()),
        pinch_flag: pinch.clone(),
        sink: Box::new(shared.clone()),
    };
    let (pump, handle) = InputPump::new(GestureMachine::new(gesture, limits), config, parts);
    handle.pinned().unwrap();
    (pump, handle, shared)
}

fn drag_to_max(handle: &InputHandle) {
    for event in [
        PointerEvent::down(Point::new(198.0, 148.0)),
        PointerEvent::moved(Point::new(208.0, 158.0)),
        PointerEvent::moved(Point::new(258.0, 208.0)),
        PointerEvent::moved(Point::new(500.0, 500.0)),
        PointerEvent::up(Point::new(500.0, 500.0)),
    ] {
        handle.pointer(event).unwrap();
    }
}

const MAX: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

#[test]
fn drag_commits_through_pipeline() {
    let (mut pump, handle, shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    drag_to_max(&handle);
    assert_eq!(pump.pump_pending(), 6);

    {
        let log = shared.log();
        assert_eq!(log.pilfers, 1);
        assert_eq!(log.live.last(), Some(&MAX));
        assert!(log.live.contains(&Rect::new(0.0, 0.0, 250.0, 200.0)));
        assert_eq!(log.finals, vec![MAX]);
    }
    assert_eq!(pump.machine().phase(), GesturePhase::Finishing);

    let completion = shared.log().completions.pop().unwrap();
    completion.complete();
    pump.pump_pending();
    assert_eq!(pump.machine().phase(), GesturePhase::Idle);
    assert_eq!(pump.machine().user_resize_bounds(), Some(MAX));
    assert_eq!(shared.log().settled, vec![CommitOutcome::Completed]);
}

#[test]
fn dropped_completion_resets_machine() {
    let (mut pump, handle, shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    drag_to_max(&handle);
    pump.pump_pending();

    shared.log().completions.clear();
    pump.pump_pending();
    assert_eq!(pump.machine().phase(), GesturePhase::Idle);
    assert_eq!(shared.log().settled, vec![CommitOutcome::Failed]);
}

#[test]
fn unacknowledged_commit_blocks_new_gestures() {
    let (mut pump, handle, shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    drag_to_max(&handle);
    pump.pump_pending();

    drag_to_max(&handle);
    pump.pump_pending();
    assert_eq!(shared.log().finals.len(), 1);
    assert_eq!(pump.machine().phase(), GesturePhase::Finishing);
}

#[test]
fn commit_timeout_forces_idle_and_ignores_late_ack() {
    let config = RuntimeConfig::new().with_commit_timeout(Duration::from_secs(1));
    let (mut pump, handle, shared) = setup(config, &FeatureFlag::default());
    drag_to_max(&handle);
    pump.pump_pending();

    pump.expire_commits(Instant::now() + Duration::from_secs(2));
    assert_eq!(pump.machine().phase(), GesturePhase::Idle);
    assert_eq!(shared.log().settled, vec![CommitOutcome::TimedOut]);

    let late = shared.log().completions.pop().unwrap();
    late.complete();
    pump.pump_pending();
    assert_eq!(pump.machine().phase(), GesturePhase::Idle);
    assert_eq!(shared.log().settled.len(), 1);

    drag_to_max(&handle);
    pump.pump_pending();
    assert_eq!(shared.log().finals.len(), 2, "new gestures work again");
}

#[test]
fn pinch_flag_is_sampled_before_each_gesture() {
    let flag = FeatureFlag::new(false);
    let (mut pump, handle, _shared) = setup(RuntimeConfig::default(), &flag);
    let a = Point::new(100.0, 100.0);
    let b = Point::new(150.0, 100.0);

    handle.pointer(PointerEvent::down(a)).unwrap();
    pump.pump_pending();
    flag.set(true);
    handle.pointer(PointerEvent::pointer_down(a, b)).unwrap();
    pump.pump_pending();
    assert_eq!(
        pump.machine().phase(),
        GesturePhase::Idle,
        "flag flipped mid-gesture applies to the next one"
    );

    handle.pointer(PointerEvent::cancel()).unwrap();
    handle.pointer(PointerEvent::down(a)).unwrap();
    handle.pointer(PointerEvent::pointer_down(a, b)).unwrap();
    pump.pump_pending();
    assert_eq!(
        pump.machine().phase(),
        GesturePhase::Armed(GestureMode::Pinch)
    );
}

#[test]
fn overlay_is_hidden_only_when_visible() {
    let (mut pump, handle, shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    handle.pointer(PointerEvent::down(Point::new(600.0, 600.0))).unwrap();
    pump.pump_pending();
    assert!(shared.log().overlay_calls.is_empty());

    shared.log().overlay_visible = true;
    handle.pointer(PointerEvent::down(Point::new(600.0, 600.0))).unwrap();
    pump.pump_pending();
    assert_eq!(shared.log().overlay_calls, vec!["hide"]);

    shared.log().overlay_visible = true;
    handle.pointer(PointerEvent::down(Point::new(198.0, 148.0))).unwrap();
    handle.pointer(PointerEvent::moved(Point::new(220.0, 170.0))).unwrap();
    pump.pump_pending();
    assert_eq!(
        shared.log().overlay_calls,
        vec!["hide", "hide_without_resize", "hide"]
    );

    shared.log().overlay_visible = true;
    handle.pointer(PointerEvent::moved(Point::new(240.0, 190.0))).unwrap();
    pump.pump_pending();
    assert_eq!(
        shared.log().overlay_calls,
        vec![
            "hide",
            "hide_without_resize",
            "hide",
            "hide_without_resize",
            "hide"
        ],
        "overlay shown mid-drag is hidden again"
    );
}

#[test]
fn run_returns_on_shutdown() {
    let (mut pump, handle, _shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    let worker = thread::spawn(move || {
        pump.run();
        pump
    });
    handle.stashed(true).unwrap();
    handle.shutdown().unwrap();
    let pump = worker.join().unwrap();
    assert!(pump.is_shut_down());
}

#[test]
fn run_returns_when_handles_are_dropped() {
    let (mut pump, handle, _shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    drop(handle);
    pump.run();
    assert!(!pump.is_shut_down());
    assert!(pump.machine().is_attached());
}

#[test]
fn run_wakes_for_commit_deadline() {
    let config = RuntimeConfig::new().with_commit_timeout(Duration::from_millis(20));
    let (mut pump, handle, shared) = setup(config, &FeatureFlag::default());
    let worker = thread::spawn(move || {
        pump.run();
        pump
    });
    drag_to_max(&handle);
    thread::sleep(Duration::from_millis(300));
    handle.shutdown().unwrap();
    let pump = worker.join().unwrap();

    assert_eq!(pump.machine().phase(), GesturePhase::Idle);
    assert_eq!(shared.log().settled, vec![CommitOutcome::TimedOut]);
}

#[test]
fn dump_includes_recent_commands() {
    let (mut pump, handle, _shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    drag_to_max(&handle);
    pump.pump_pending();
    let dump = pump.dump_to_string();
    assert!(dump.starts_with("GestureMachine\n"));
    assert!(dump.contains("  threshold_crossed=true\n"));
    assert!(dump.contains("  recent_commands (last "));
    assert!(dump.contains("    #0 Pilfer\n"));
    assert!(dump.contains("FinalCommit"));
}

#[test]
fn host_sets_and_invalidates_user_bounds() {
    let (mut pump, handle, _shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    let restored = Rect::new(0.0, 0.0, 300.0, 225.0);

    handle.set_user_resize_bounds(restored).unwrap();
    pump.pump_pending();
    assert_eq!(pump.machine().user_resize_bounds(), Some(restored));

    handle.invalidate_user_resize_bounds().unwrap();
    pump.pump_pending();
    assert_eq!(pump.machine().user_resize_bounds(), None);
}

#[test]
fn unpinned_window_keeps_no_bounds_after_failed_commit() {
    let (mut pump, handle, shared) = setup(RuntimeConfig::default(), &FeatureFlag::default());
    handle
        .set_user_resize_bounds(Rect::new(0.0, 0.0, 180.0, 135.0))
        .unwrap();
    drag_to_max(&handle);
    handle.unpinned().unwrap();
    pump.pump_pending();
    assert_eq!(pump.machine().user_resize_bounds(), None);

    shared.log().completions.pop().unwrap().fail();
    pump.pump_pending();
    assert_eq!(pump.machine().phase(), GesturePhase::Idle);
    assert_eq!(pump.machine().user_resize_bounds(), None);
    assert_eq!(shared.log().settled, vec![CommitOutcome::Failed]);
}
