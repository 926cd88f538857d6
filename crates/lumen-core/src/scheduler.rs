//! Virtual-time task queue
//!
//! Delayed work is posted as a message with a due time. Nothing fires on its
//! own: the owner advances the clock and receives whatever became due, in due
//! order, with ties resolved by posting order. Tests drive time explicitly;
//! the frontend drives it from a wall clock.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Whole milliseconds in `d`, saturating at `u64::MAX`
pub fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Handle of a posted task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A task that came due during [`Scheduler::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id: TimerId,

    /// Virtual time the task was due at
    pub due: Duration,

    pub payload: T,
}

#[derive(Debug)]
struct Timer<T> {
    due: Duration,
    id: TimerId,
    payload: T,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.id == other.id
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.id.cmp(&other.id))
    }
}

/// Task queue with a single notion of "now"
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<Reverse<Timer<T>>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create a scheduler with the clock at zero
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        millis(self.now)
    }

    /// Post `payload` to fire `delay` after now
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Timer {
            due: self.now + delay,
            id,
            payload,
        }));
        id
    }

    /// Number of tasks still waiting
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest waiting task
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(t)| t.due)
    }

    /// Move the clock forward by `by` and collect everything that came due
    pub fn advance(&mut self, by: Duration) -> Vec<Fired<T>> {
        let target = self.now + by;
        self.advance_to(target)
    }

    /// Move the clock to `target` (never backwards) and collect due tasks
    pub fn advance_to(&mut self, target: Duration) -> Vec<Fired<T>> {
        let mut fired = Vec::new();
        while let Some(Reverse(timer)) = self.queue.peek() {
            if timer.due > target {
                break;
            }
            let Some(Reverse(timer)) = self.queue.pop() else {
                break;
            };
            self.now = self.now.max(timer.due);
            fired.push(Fired {
                id: timer.id,
                due: timer.due,
                payload: timer.payload,
            });
        }
        self.now = self.now.max(target);
        fired
    }

    /// Drop every waiting task, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_nothing_fires_before_due() {
        let mut sched = Scheduler::new();
        sched.schedule(ms(100), "a");

        assert!(sched.advance(ms(99)).is_empty());
        assert_eq!(sched.now(), ms(99));
        assert_eq!(sched.pending(), 1);

        let fired = sched.advance(ms(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].due, ms(100));
    }

    #[test]
    fn test_fires_in_due_order_then_posting_order() {
        let mut sched = Scheduler::new();
        sched.schedule(ms(300), "late");
        sched.schedule(ms(100), "first");
        sched.schedule(ms(100), "second");

        let order: Vec<_> = sched.advance(ms(1000)).into_iter().map(|f| f.payload).collect();
        assert_eq!(order, vec!["first", "second", "late"]);
        assert_eq!(sched.now(), ms(1000));
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut sched = Scheduler::new();
        sched.advance(ms(500));
        sched.schedule(ms(100), ());
        assert_eq!(sched.next_due(), Some(ms(600)));
    }

    #[test]
    fn test_advance_to_never_rewinds() {
        let mut sched: Scheduler<()> = Scheduler::new();
        sched.advance(ms(50));
        sched.advance_to(ms(10));
        assert_eq!(sched.now(), ms(50));
    }

    #[test]
    fn test_cancel_all() {
        let mut sched = Scheduler::new();
        sched.schedule(ms(1), 1);
        sched.schedule(ms(2), 2);

        assert_eq!(sched.cancel_all(), 2);
        assert!(sched.advance(ms(10)).is_empty());
        assert_eq!(sched.next_due(), None);
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(ms(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);

        let mut sched: Scheduler<()> = Scheduler::new();
        sched.advance(Duration::from_secs(u64::MAX));
        assert_eq!(sched.now_ms(), u64::MAX);
    }
}
