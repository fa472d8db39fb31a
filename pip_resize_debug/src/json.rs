// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON Lines telemetry output.
//!
//! [`JsonLinesSink`] writes each event as one JSON object followed by a
//! newline. Every object has a monotonically increasing `seq` and an `event`
//! name; rectangles are `[x0, y0, x1, y1]` arrays.

use std::io::Write;

use kurbo::Rect;
use pip_resize_core::telemetry::{
    CommitSettledEvent, EventSink, GestureAbortedEvent, GestureArmedEvent, ResizeCommittedEvent,
    ThresholdCrossedEvent,
};
use serde_json::{Value, json};

/// Writes telemetry as JSON Lines.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    seq: u64,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer, seq: 0 }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, event: &str, mut fields: Value) {
        if let Value::Object(map) = &mut fields {
            map.insert("seq".into(), json!(self.seq));
            map.insert("event".into(), json!(event));
        }
        self.seq += 1;
        // Telemetry is best-effort; a failing writer drops the line.
        if serde_json::to_writer(&mut self.writer, &fields).is_ok() {
            let _ = self.writer.write_all(b"\n");
        }
    }
}

fn rect(r: Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn on_gesture_armed(&mut self, e: &GestureArmedEvent) {
        self.emit(
            "gesture_armed",
            json!({
                "mode": format!("{:?}", e.mode),
                "control": format!("{:?}", e.control),
                "down_bounds": rect(e.down_bounds),
            }),
        );
    }

    fn on_threshold_crossed(&mut self, e: &ThresholdCrossedEvent) {
        self.emit(
            "threshold_crossed",
            json!({ "mode": format!("{:?}", e.mode) }),
        );
    }

    fn on_resize_committed(&mut self, e: &ResizeCommittedEvent) {
        self.emit(
            "resize_committed",
            json!({
                "mode": format!("{:?}", e.mode),
                "ticket": e.ticket.get(),
                "from": rect(e.from),
                "to": rect(e.to),
            }),
        );
    }

    fn on_gesture_aborted(&mut self, e: &GestureAbortedEvent) {
        self.emit(
            "gesture_aborted",
            json!({
                "mode": format!("{:?}", e.mode),
                "reason": format!("{:?}", e.reason),
            }),
        );
    }

    fn on_commit_settled(&mut self, e: &CommitSettledEvent) {
        self.emit(
            "commit_settled",
            json!({
                "ticket": e.ticket.get(),
                "outcome": format!("{:?}", e.outcome),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pip_resize_core::gesture::{CommitTicket, GestureMode};
    use pip_resize_core::telemetry::{AbortReason, CommitOutcome};

    fn parse(sink: JsonLinesSink<Vec<u8>>) -> Vec<Value> {
        let text = String::from_utf8(sink.into_inner()).unwrap();
        text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn events_are_numbered_objects() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.on_gesture_aborted(&GestureAbortedEvent {
            mode: GestureMode::Drag,
            reason: AbortReason::NoChange,
        });
        sink.on_resize_committed(&ResizeCommittedEvent {
            mode: GestureMode::Pinch,
            ticket: CommitTicket::new(12),
            from: Rect::new(0.0, 0.0, 200.0, 150.0),
            to: Rect::new(0.0, 0.0, 300.0, 225.0),
        });
        sink.on_commit_settled(&CommitSettledEvent {
            ticket: CommitTicket::new(12),
            outcome: CommitOutcome::Failed,
        });

        let values = parse(sink);
        assert_eq!(values.len(), 3);
        assert_eq!(values[0]["seq"], 0);
        assert_eq!(values[0]["event"], "gesture_aborted");
        assert_eq!(values[0]["reason"], "NoChange");

        assert_eq!(values[1]["seq"], 1);
        assert_eq!(values[1]["ticket"], 12);
        assert_eq!(values[1]["to"], json!([0.0, 0.0, 300.0, 225.0]));

        assert_eq!(values[2]["event"], "commit_settled");
        assert_eq!(values[2]["outcome"], "Failed");
    }

    #[test]
    fn failing_writer_does_not_panic() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut sink = JsonLinesSink::new(Broken);
        sink.on_threshold_crossed(&ThresholdCrossedEvent {
            mode: GestureMode::Drag,
        });
        sink.on_threshold_crossed(&ThresholdCrossedEvent {
            mode: GestureMode::Drag,
        });
        assert_eq!(format!("{sink:?}"), "JsonLinesSink { seq: 2, .. }");
    }
}
