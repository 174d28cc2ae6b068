//! Cancellable timers on a simulated clock.
//!
//! The queue never runs callbacks itself. Owners advance it with
//! [`TimerQueue::pop_due`] and dispatch each fired event; a timer cancelled
//! while another one is being dispatched will not fire.

use common::Millis;

/// Opaque handle returned by every scheduling call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer<E> {
    handle: TimerHandle,
    due: Millis,
    period: Option<Millis>,
    event: E,
}

/// A timer that reached its due time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<E> {
    pub handle: TimerHandle,
    pub at: Millis,
    pub event: E,
}

/// Pending one-shot and repeating timers ordered by due time.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Millis,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E: Clone> TimerQueue<E> {
    /// Creates an empty queue at time zero.
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedules `event` to fire once after `delay` milliseconds.
    pub fn schedule_once(&mut self, delay: Millis, event: E) -> TimerHandle {
        self.insert(delay, None, event)
    }

    /// Schedules `event` to fire after `delay`, then every `period` milliseconds.
    ///
    /// A zero period is bumped to one millisecond so the queue always drains.
    pub fn schedule_repeating(&mut self, delay: Millis, period: Millis, event: E) -> TimerHandle {
        self.insert(delay, Some(period.max(1)), event)
    }

    fn insert(&mut self, delay: Millis, period: Option<Millis>, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            due: self.now + delay,
            period,
            event,
        });
        handle
    }

    /// Cancels a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Returns `true` while the timer may still fire.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Pops the earliest timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time. Repeating timers are
    /// rescheduled one period later. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<E>> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle))
            .map(|(i, _)| i)?;
        let at = self.timers[idx].due;
        self.now = self.now.max(at);
        let fired = match self.timers[idx].period {
            Some(period) => {
                let timer = &mut self.timers[idx];
                timer.due += period;
                Fired {
                    handle: timer.handle,
                    at,
                    event: timer.event.clone(),
                }
            }
            None => {
                let timer = self.timers.swap_remove(idx);
                Fired {
                    handle: timer.handle,
                    at,
                    event: timer.event,
                }
            }
        };
        Some(fired)
    }

    /// Moves the clock forward to `until` once all due timers were popped.
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

}

impl<E: Clone> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
