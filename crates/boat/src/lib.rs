//! Visiting boat that docks at the end of the pier on a fixed schedule.

use clock::{TimerHandle, TimerQueue};
use common::Millis;
use serde::Deserialize;

/// Where the boat is in its visit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoatState {
    Arriving,
    Docked,
    Leaving,
    #[default]
    Gone,
}

/// Timer events driving the boat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoatEvent {
    /// A new visit begins.
    Arrive,
    /// The boat moved to the given phase of the current visit.
    Phase(BoatState),
}

/// Visit timings in milliseconds.
///
/// The phase offsets are measured from the start of a visit. They are tuned
/// by hand to the length of the backing track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoatTimings {
    /// Delay between entering play and the first visit.
    pub first_arrival_ms: Millis,
    pub docked_at_ms: Millis,
    pub leaving_at_ms: Millis,
    pub gone_at_ms: Millis,
    /// Idle time between the boat leaving and the next visit.
    pub gap_ms: Millis,
}

impl Default for BoatTimings {
    fn default() -> Self {
        Self {
            first_arrival_ms: 5000,
            docked_at_ms: 3000,
            leaving_at_ms: 10000,
            gone_at_ms: 13000,
            gap_ms: 20000,
        }
    }
}

impl BoatTimings {
    /// Time from one arrival to the next.
    pub fn cycle_ms(&self) -> Millis {
        self.gone_at_ms + self.gap_ms
    }
}

/// Schedules boat visits on a shared [`TimerQueue`].
#[derive(Debug, Default)]
pub struct BoatScheduler {
    timings: BoatTimings,
    state: BoatState,
    handles: Vec<TimerHandle>,
}

impl BoatScheduler {
    /// Creates an idle scheduler with the boat gone.
    pub fn new(timings: BoatTimings) -> Self {
        Self {
            timings,
            state: BoatState::Gone,
            handles: Vec::new(),
        }
    }

    /// Current boat state.
    pub fn state(&self) -> BoatState {
        self.state
    }

    /// Returns `true` while fish can be sold.
    pub fn is_docked(&self) -> bool {
        self.state == BoatState::Docked
    }

    /// Returns `true` while visits are scheduled.
    pub fn is_running(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Starts the visit cycle. Any previous schedule is cancelled first.
    pub fn start<E>(&mut self, queue: &mut TimerQueue<E>)
    where
        E: Clone + From<BoatEvent>,
    {
        self.stop(queue);
        self.state = BoatState::Gone;
        let h = queue.schedule_repeating(
            self.timings.first_arrival_ms,
            self.timings.cycle_ms(),
            BoatEvent::Arrive.into(),
        );
        self.handles.push(h);
    }

    /// Cancels every pending boat timer.
    pub fn stop<E: Clone>(&mut self, queue: &mut TimerQueue<E>) {
        for h in self.handles.drain(..) {
            queue.cancel(h);
        }
    }

    /// Applies a fired boat event.
    ///
    /// Events from timers this scheduler no longer owns are ignored.
    pub fn handle<E>(&mut self, queue: &mut TimerQueue<E>, handle: TimerHandle, event: BoatEvent)
    where
        E: Clone + From<BoatEvent>,
    {
        if !self.handles.contains(&handle) {
            return;
        }
        match event {
            BoatEvent::Arrive => {
                self.handles.retain(|h| queue.is_pending(*h));
                self.set_state(BoatState::Arriving);
                for (delay, phase) in [
                    (self.timings.docked_at_ms, BoatState::Docked),
                    (self.timings.leaving_at_ms, BoatState::Leaving),
                    (self.timings.gone_at_ms, BoatState::Gone),
                ] {
                    let h = queue.schedule_once(delay, BoatEvent::Phase(phase).into());
                    self.handles.push(h);
                }
            }
            BoatEvent::Phase(phase) => self.set_state(phase),
        }
    }

    fn set_state(&mut self, state: BoatState) {
        if self.state != state {
            tracing::info!(from = ?self.state, to = ?state, "boat");
            self.state = state;
        }
    }
}
