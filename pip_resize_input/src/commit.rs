// Copyright 2026 the Pip Resize Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds delivery to the window host.
//!
//! Live updates are fire-and-forget. A final commit carries a
//! [`CommitCompletion`] that the host signals once the bounds are applied;
//! the signal travels back to the input thread as a [`Settlement`] on an
//! unbounded channel, so signalling never blocks the committer.
//!
//! ```text
//!   InputPump ──request_final_commit(bounds, completion)──► WindowCommitter
//!       ▲                                                        │
//!       │              Settlement::Completed / Failed            │
//!       └───────────────── flume (unbounded) ◄── completion.complete()
//! ```

use std::time::{Duration, Instant};

use flume::Sender;
use kurbo::Rect;
use pip_resize_core::gesture::CommitTicket;
use tracing::{debug, warn};

/// Applies window bounds on the host side.
pub trait WindowCommitter {
    /// Best-effort intermediate bounds. Must not block.
    fn request_live_update(&mut self, old: Rect, new: Rect);

    /// Authoritative bounds. Signal `completion` once they are applied, from
    /// any thread.
    fn request_final_commit(&mut self, bounds: Rect, completion: CommitCompletion);
}

/// How a final commit settled, as seen by the input thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Settlement {
    /// The host applied the bounds.
    Completed(CommitTicket),
    /// The host could not apply the bounds.
    Failed(CommitTicket),
}

impl Settlement {
    /// Ticket of the settled commit.
    #[must_use]
    pub const fn ticket(self) -> CommitTicket {
        match self {
            Self::Completed(t) | Self::Failed(t) => t,
        }
    }
}

/// Single-shot acknowledgment handle for one final commit.
///
/// Consume it with [`complete`](Self::complete) or [`fail`](Self::fail).
/// Dropping it unsignalled reports failure.
#[derive(Debug)]
pub struct CommitCompletion {
    ticket: CommitTicket,
    sender: Option<Sender<Settlement>>,
}

impl CommitCompletion {
    pub(crate) fn new(ticket: CommitTicket, sender: Sender<Settlement>) -> Self {
        Self {
            ticket,
            sender: Some(sender),
        }
    }

    /// Ticket of the commit this handle settles.
    #[must_use]
    pub const fn ticket(&self) -> CommitTicket {
        self.ticket
    }

    /// Reports that the bounds were applied.
    pub fn complete(mut self) {
        self.signal(Settlement::Completed(self.ticket));
    }

    /// Reports that the bounds could not be applied.
    pub fn fail(mut self) {
        self.signal(Settlement::Failed(self.ticket));
    }

    fn signal(&mut self, settlement: Settlement) {
        if let Some(sender) = self.sender.take()
            && sender.send(settlement).is_err()
        {
            debug!(ticket = ?self.ticket, "input pump gone; settlement dropped");
        }
    }
}

impl Drop for CommitCompletion {
    fn drop(&mut self) {
        if self.sender.is_some() {
            warn!(ticket = ?self.ticket, "commit completion dropped without a signal");
            self.signal(Settlement::Failed(self.ticket));
        }
    }
}

/// Errors from the commit pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    /// A final commit is already outstanding.
    #[error("final commit {in_flight:?} is still outstanding")]
    AlreadyPending {
        /// The outstanding commit.
        in_flight: CommitTicket,
    },
    /// The outstanding commit was not acknowledged in time.
    #[error("final commit {ticket:?} not acknowledged within {after:?}")]
    TimedOut {
        /// The expired commit.
        ticket: CommitTicket,
        /// The configured timeout.
        after: Duration,
    },
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    ticket: CommitTicket,
    deadline: Option<Instant>,
}

/// Routes commit commands to a [`WindowCommitter`], allowing one
/// outstanding final commit at a time.
pub struct CommitPipeline {
    committer: Box<dyn WindowCommitter + Send>,
    settlements: Sender<Settlement>,
    timeout: Option<Duration>,
    in_flight: Option<InFlight>,
}

impl core::fmt::Debug for CommitPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommitPipeline")
            .field("timeout", &self.timeout)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl CommitPipeline {
    /// Creates a pipeline whose completions post to `settlements`.
    #[must_use]
    pub fn new(
        committer: Box<dyn WindowCommitter + Send>,
        settlements: Sender<Settlement>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            committer,
            settlements,
            timeout,
            in_flight: None,
        }
    }

    /// Ticket of the outstanding final commit, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<CommitTicket> {
        self.in_flight.map(|f| f.ticket)
    }

    /// When the outstanding commit expires, if a timeout is configured.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.in_flight.and_then(|f| f.deadline)
    }

    /// Forwards a live update.
    pub fn live_update(&mut self, old: Rect, new: Rect) {
        self.committer.request_live_update(old, new);
    }

    /// Issues a final commit. `now` starts the timeout clock.
    pub fn final_commit(
        &mut self,
        bounds: Rect,
        ticket: CommitTicket,
        now: Instant,
    ) -> Result<(), CommitError> {
        if let Some(in_flight) = self.in_flight {
            return Err(CommitError::AlreadyPending {
                in_flight: in_flight.ticket,
            });
        }
        self.in_flight = Some(InFlight {
            ticket,
            deadline: self.timeout.map(|t| now + t),
        });
        let completion = CommitCompletion::new(ticket, self.settlements.clone());
        self.committer.request_final_commit(bounds, completion);
        Ok(())
    }

    /// Records a settlement. Returns `false` if `ticket` is not outstanding.
    pub fn settle(&mut self, ticket: CommitTicket) -> bool {
        match self.in_flight {
            Some(f) if f.ticket == ticket => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }

    /// Expires the outstanding commit if its deadline has passed.
    pub fn expire(&mut self, now: Instant) -> Result<(), CommitError> {
        let (Some(f), Some(after)) = (self.in_flight, self.timeout) else {
            return Ok(());
        };
        match f.deadline {
            Some(deadline) if now >= deadline => {
                self.in_flight = None;
                Err(CommitError::TimedOut {
                    ticket: f.ticket,
                    after,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Holding(Arc<Mutex<Vec<CommitCompletion>>>);

    impl WindowCommitter for Holding {
        fn request_live_update(&mut self, _old: Rect, _new: Rect) {}

        fn request_final_commit(&mut self, _bounds: Rect, completion: CommitCompletion) {
            self.0.lock().unwrap().push(completion);
        }
    }

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    #[test]
    fn completion_posts_settlement() {
        let (tx, rx) = flume::unbounded();
        let held = Holding::default();
        let mut pipeline = CommitPipeline::new(Box::new(held.clone()), tx, None);
        let t = CommitTicket::new(1);

        pipeline.final_commit(BOUNDS, t, Instant::now()).unwrap();
        assert_eq!(pipeline.in_flight(), Some(t));
        assert_eq!(pipeline.deadline(), None);

        let completion = held.0.lock().unwrap().pop().unwrap();
        completion.complete();
        assert_eq!(rx.try_recv(), Ok(Settlement::Completed(t)));
        assert!(pipeline.settle(t));
        assert_eq!(pipeline.in_flight(), None);
    }

    #[test]
    fn dropped_completion_reports_failure_once() {
        let (tx, rx) = flume::unbounded();
        let held = Holding::default();
        let mut pipeline = CommitPipeline::new(Box::new(held.clone()), tx, None);
        let t = CommitTicket::new(7);
        pipeline.final_commit(BOUNDS, t, Instant::now()).unwrap();

        held.0.lock().unwrap().clear();
        assert_eq!(rx.try_recv(), Ok(Settlement::Failed(t)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn explicit_failure_is_not_doubled_by_drop() {
        let (tx, rx) = flume::unbounded();
        let completion = CommitCompletion::new(CommitTicket::new(3), tx);
        completion.fail();
        assert_eq!(rx.try_recv(), Ok(Settlement::Failed(CommitTicket::new(3))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn one_outstanding_commit() {
        let (tx, _rx) = flume::unbounded();
        let mut pipeline = CommitPipeline::new(Box::new(Holding::default()), tx, None);
        let first = CommitTicket::new(1);
        pipeline.final_commit(BOUNDS, first, Instant::now()).unwrap();
        assert_eq!(
            pipeline.final_commit(BOUNDS, CommitTicket::new(2), Instant::now()),
            Err(CommitError::AlreadyPending { in_flight: first })
        );
        assert!(!pipeline.settle(CommitTicket::new(2)));
        assert!(pipeline.settle(first));
    }

    #[test]
    fn deadline_expires_outstanding_commit() {
        let (tx, _rx) = flume::unbounded();
        let timeout = Duration::from_millis(500);
        let mut pipeline = CommitPipeline::new(Box::new(Holding::default()), tx, Some(timeout));
        let start = Instant::now();
        let t = CommitTicket::new(4);
        pipeline.final_commit(BOUNDS, t, start).unwrap();
        assert_eq!(pipeline.deadline(), Some(start + timeout));

        assert_eq!(pipeline.expire(start + Duration::from_millis(100)), Ok(()));
        assert_eq!(
            pipeline.expire(start + timeout),
            Err(CommitError::TimedOut { ticket: t, after: timeout })
        );
        assert_eq!(pipeline.in_flight(), None);
        assert!(!pipeline.settle(t), "late settlement finds nothing");
    }
}
