// Single-threaded task scheduler
//
// The engine's replacement for browser timers and animation frames: a
// priority queue of tasks over a virtual millisecond clock. The runtime
// pops due tasks in (due, sequence) order, so two tasks scheduled for the
// same moment run in the order they were scheduled.

use marquee_page::ElementId;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::ops::{Add, Sub};
use std::time::Duration;

/// Interval between animation frames (~60fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A point on the engine's virtual wall clock, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Moment(u64);

impl Moment {
    pub const ZERO: Moment = Moment(0);

    pub fn from_millis(ms: u64) -> Self {
        Moment(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Elapsed time since `earlier`, zero if `earlier` is in the future
    pub fn since(&self, earlier: Moment) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Moment {
    type Output = Moment;

    fn add(self, rhs: Duration) -> Moment {
        Moment(self.0 + rhs.as_millis() as u64)
    }
}

impl Sub<Moment> for Moment {
    type Output = Duration;

    fn sub(self, rhs: Moment) -> Duration {
        self.since(rhs)
    }
}

/// Work the runtime can defer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Reveal one element (staggered group children arrive here)
    RevealElement(ElementId),
    /// Force-reveal everything still hidden (liveness fallback)
    FallbackSweep,
    /// Advance a running counter animation by one frame
    CounterFrame(ElementId),
    /// Advance a typewriter heading by one character
    TypewriterTick(ElementId),
    /// Remove the typewriter cursor after completion
    TypewriterCursorOff(ElementId),
    /// Start a progress bar's width transition after its delay
    ProgressStart(ElementId),
    /// Fire the trailing edge of the throttled scroll handler
    ScrollTrailing,
    /// Auto-dismiss a status message
    DismissMessage(ElementId),
    /// Remove a spent ripple element
    RippleCleanup(ElementId),
    /// Navigate to a confirmation URL
    Redirect(String),
    /// Fade the loading screen out
    LoadingFade,
    /// Drop the loading screen from layout
    LoadingRemove,
}

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled {
    due: Moment,
    seq: u64,
    task: Task,
}

// Ordering (and equality, for heap purposes) is by (due, seq); seq is
// unique, so no two entries ever compare equal.
impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.seq) == (other.due, other.seq)
    }
}

impl Eq for Scheduled {}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The task queue and virtual clock
pub struct Scheduler {
    now: Moment,
    queue: BinaryHeap<Reverse<Scheduled>>,
    cancelled: HashSet<u64>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: Moment::ZERO,
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
            next_seq: 0,
        }
    }

    pub fn now(&self) -> Moment {
        self.now
    }

    /// Schedule `task` to run at `due`. A due time in the past runs on the
    /// next advance.
    pub fn schedule_at(&mut self, due: Moment, task: Task) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled { due, seq, task }));
        TaskId(seq)
    }

    pub fn schedule_after(&mut self, delay: Duration, task: Task) -> TaskId {
        self.schedule_at(self.now + delay, task)
    }

    /// Cancel a scheduled task. Cancelling an already-run task is a no-op.
    pub fn cancel(&mut self, id: TaskId) {
        self.cancelled.insert(id.0);
    }

    /// Pop the next task due at or before `limit`, moving the clock to its
    /// due time. Returns None when nothing is due.
    pub fn pop_due(&mut self, limit: Moment) -> Option<(Moment, Task)> {
        loop {
            let is_due = self
                .queue
                .peek()
                .map(|entry| entry.0.due <= limit)
                .unwrap_or(false);
            if !is_due {
                return None;
            }
            let Some(Reverse(entry)) = self.queue.pop() else {
                return None;
            };
            if self.cancelled.remove(&entry.seq) {
                continue;
            }
            self.now = self.now.max(entry.due);
            return Some((entry.due, entry.task));
        }
    }

    /// Move the clock forward without running anything
    pub fn set_now(&mut self, now: Moment) {
        self.now = self.now.max(now);
    }

    /// Number of live (non-cancelled) scheduled tasks
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(entry)| !self.cancelled.contains(&entry.seq))
            .count()
    }

    /// Drop every scheduled task
    pub fn clear(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_pop_in_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule_at(Moment::from_millis(200), Task::FallbackSweep);
        sched.schedule_at(Moment::from_millis(100), Task::LoadingFade);

        let (due, task) = sched.pop_due(Moment::from_millis(500)).unwrap();
        assert_eq!(due, Moment::from_millis(100));
        assert_eq!(task, Task::LoadingFade);

        let (due, task) = sched.pop_due(Moment::from_millis(500)).unwrap();
        assert_eq!(due, Moment::from_millis(200));
        assert_eq!(task, Task::FallbackSweep);

        assert!(sched.pop_due(Moment::from_millis(500)).is_none());
    }

    #[test]
    fn test_same_due_runs_in_schedule_order() {
        let mut sched = Scheduler::new();
        let due = Moment::from_millis(50);
        sched.schedule_at(due, Task::RevealElement(ElementId(1)));
        sched.schedule_at(due, Task::RevealElement(ElementId(2)));

        assert_eq!(
            sched.pop_due(due).unwrap().1,
            Task::RevealElement(ElementId(1))
        );
        assert_eq!(
            sched.pop_due(due).unwrap().1,
            Task::RevealElement(ElementId(2))
        );
    }

    #[test]
    fn test_limit_holds_back_future_tasks() {
        let mut sched = Scheduler::new();
        sched.schedule_at(Moment::from_millis(300), Task::FallbackSweep);
        assert!(sched.pop_due(Moment::from_millis(299)).is_none());
        assert!(sched.pop_due(Moment::from_millis(300)).is_some());
    }

    #[test]
    fn test_cancel() {
        let mut sched = Scheduler::new();
        let id = sched.schedule_at(Moment::from_millis(10), Task::LoadingFade);
        sched.schedule_at(Moment::from_millis(20), Task::LoadingRemove);
        sched.cancel(id);

        let (_, task) = sched.pop_due(Moment::from_millis(100)).unwrap();
        assert_eq!(task, Task::LoadingRemove);
        assert!(sched.pop_due(Moment::from_millis(100)).is_none());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_clock_follows_pops() {
        let mut sched = Scheduler::new();
        sched.schedule_at(Moment::from_millis(120), Task::FallbackSweep);
        sched.pop_due(Moment::from_millis(500)).unwrap();
        assert_eq!(sched.now(), Moment::from_millis(120));
    }

    #[test]
    fn test_schedule_after_uses_current_clock() {
        let mut sched = Scheduler::new();
        sched.set_now(Moment::from_millis(100));
        sched.schedule_after(Duration::from_millis(16), Task::LoadingFade);
        let (due, _) = sched.pop_due(Moment::from_millis(200)).unwrap();
        assert_eq!(due, Moment::from_millis(116));
    }

    #[test]
    fn test_moment_arithmetic() {
        let start = Moment::from_millis(100);
        let later = start + Duration::from_millis(50);
        assert_eq!(later.as_millis(), 150);
        assert_eq!(later - start, Duration::from_millis(50));
        // Saturates rather than underflowing
        assert_eq!(start - later, Duration::ZERO);
    }
}
