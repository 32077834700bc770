//! Simulation clock and the deadline-ordered queue of deferred world events.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Convert a configured millisecond duration to clock microseconds.
pub fn ms_to_us(ms: u64) -> u64 {
    ms.saturating_mul(1_000)
}

/// Monotonic clock fed by frame deltas.
///
/// Reads in whole microseconds, but the fractional remainder of every delta
/// carries over, so `now_us` is always the floor of the summed deltas.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    elapsed_seconds: f64,
    now_us: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta_seconds` and return how many whole microseconds the clock moved.
    pub fn advance(&mut self, delta_seconds: f32) -> u64 {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return 0;
        }
        self.elapsed_seconds += f64::from(delta_seconds);
        let now = (self.elapsed_seconds * 1_000_000.0).floor() as u64;
        let step = now.saturating_sub(self.now_us);
        self.now_us = self.now_us.max(now);
        step
    }

    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    pub fn now_ms(&self) -> u64 {
        self.now_us / 1_000
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }
}

/// An event due at `deadline`. Ties fire in scheduling order.
#[derive(Debug, Clone)]
struct Scheduled<T> {
    deadline: u64,
    sequence: u64,
    event: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of timed events. Armed events cannot be cancelled.
///
/// The queue is unit-agnostic; the world keys it by clock microseconds.
#[derive(Debug)]
pub struct TimerQueue<T> {
    queue: BinaryHeap<Reverse<Scheduled<T>>>,
    next_sequence: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: u64, delay: u64, event: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(Reverse(Scheduled {
            deadline: now.saturating_add(delay),
            sequence,
            event,
        }));
    }

    /// Pop every event whose deadline is `<= now`, earliest first.
    pub fn drain_due(&mut self, now: u64) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.queue.peek() {
            if next.deadline > now {
                break;
            }
            if let Some(Reverse(scheduled)) = self.queue.pop() {
                due.push(scheduled.event);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
