// Trailing-edge throttle
//
// Bounds how often a handler runs while guaranteeing the latest payload is
// never lost: the first call in a quiet period runs immediately; calls
// landing inside the cooldown coalesce into a single pending payload that
// fires once when the cooldown elapses.

use crate::scheduler::Moment;
use std::time::Duration;

/// Outcome of submitting a call to the throttle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted<T> {
    /// Run the payload now
    Run(T),
    /// Payload parked; a trailing task must fire at the given moment
    Deferred { due: Moment, already_scheduled: bool },
}

/// Rate limiter with leading execution and one coalesced trailing call
#[derive(Debug)]
pub struct Throttle<T> {
    interval: Duration,
    last_run: Option<Moment>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Submit a call at `now`.
    ///
    /// Outside the cooldown the payload is returned for immediate
    /// execution. Inside it, the payload replaces any earlier pending one
    /// (latest wins) and the caller is told when the trailing edge is due —
    /// and whether a trailing task was already set up for this cooldown.
    pub fn submit(&mut self, now: Moment, payload: T) -> Submitted<T> {
        match self.last_run {
            Some(last) if now - last <= self.interval => {
                let already_scheduled = self.pending.is_some();
                self.pending = Some(payload);
                Submitted::Deferred {
                    due: last + self.interval,
                    already_scheduled,
                }
            }
            _ => {
                self.last_run = Some(now);
                Submitted::Run(payload)
            }
        }
    }

    /// Fire the trailing edge: take the pending payload and restart the
    /// cooldown from `now`. Returns None if nothing is pending.
    pub fn fire_trailing(&mut self, now: Moment) -> Option<T> {
        let payload = self.pending.take()?;
        self.last_run = Some(now);
        Some(payload)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
