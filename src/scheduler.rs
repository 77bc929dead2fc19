//! Delayed callbacks.
//!
//! Everything time-based in the widget (keyboard animation allowances, the
//! busy-flag grace period, the greeting's "thinking" pauses, request
//! deadlines) goes through [`Scheduler`].  A scheduled timer is a plain value
//! that is handed back to the owner when it fires; timers cannot be cancelled,
//! so handlers must check that whatever the timer refers to still exists.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

/// Schedules a timer value to be delivered after a delay.
pub trait Scheduler<T> {
    /// Deliver `timer` once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, timer: T);
}

struct Scheduled<T> {
    due: Duration,
    seq: u64,
    timer: T,
}

/// A scheduler driven by virtual time.
///
/// Nothing fires until the owner calls [`ManualScheduler::run_for`],
/// [`ManualScheduler::pop_due`] or [`ManualScheduler::pop_next`].  Timers due at the same instant fire in the
/// order they were scheduled.
pub struct ManualScheduler<T> {
    now: Duration,
    seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> ManualScheduler<T> {
    /// Creates an empty scheduler at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            pending: Vec::new(),
        }
    }

    /// The current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired yet.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns true when no timers are waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The time at which the next timer fires, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Pops the earliest timer due at or before `until`, moving virtual time to
    /// the moment it fires.
    ///
    /// Timers scheduled after a pop are placed relative to that moment, so a
    /// handler that schedules a follow-up sees it here if it, too, is due by
    /// `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(idx, _)| idx)?;
        let scheduled = self.pending.swap_remove(idx);
        self.now = self.now.max(scheduled.due);
        Some(scheduled.timer)
    }

    /// Moves virtual time to `until` without firing anything.  Time never
    /// moves backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Runs virtual time forward by `by`, handing each timer to `fire` at its
    /// own due time.  Timers that `fire` schedules run too if they come due
    /// within the window.
    pub fn run_for<F: FnMut(&mut Self, T)>(&mut self, by: Duration, mut fire: F) {
        let until = self.now + by;
        while let Some(timer) = self.pop_due(until) {
            fire(self, timer);
        }
        self.advance_to(until);
    }

    /// Jumps to the earliest pending timer and returns it.
    pub fn pop_next(&mut self) -> Option<T> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(idx, _)| idx)?;
        let scheduled = self.pending.swap_remove(idx);
        if scheduled.due > self.now {
            self.now = scheduled.due;
        }
        Some(scheduled.timer)
    }
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> for ManualScheduler<T> {
    fn schedule(&mut self, delay: Duration, timer: T) {
        self.seq += 1;
        self.pending.push(Scheduled {
            due: self.now + delay,
            seq: self.seq,
            timer,
        });
    }
}

/// A scheduler backed by the tokio timer.
///
/// Each timer becomes a task that sleeps and then sends the timer, converted
/// into the loop's event type, down the event channel.  Timers that fire after
/// the receiver is gone are dropped.
pub struct TokioScheduler<E> {
    sender: UnboundedSender<E>,
}

impl<E> TokioScheduler<E> {
    /// Creates a scheduler that delivers into `sender`.
    pub fn new(sender: UnboundedSender<E>) -> Self {
        Self { sender }
    }
}

impl<E> Clone for TokioScheduler<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T, E> Scheduler<T> for TokioScheduler<E>
where
    T: Into<E> + Send + 'static,
    E: Send + 'static,
{
    fn schedule(&mut self, delay: Duration, timer: T) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(timer.into());
        });
    }
}
