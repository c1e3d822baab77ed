use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use crate::{error::TimerError, util::format_mm_ss};

/// Source of monotonic instants for the timer.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`]
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-cranked clock for simulated time.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to the timer.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TimerState {
    Idle,
    Running,
    Finished,
}

/// Read-only view of the timer handed to renderers and notifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub state: TimerState,
}

impl TimerSnapshot {
    pub fn formatted(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }

    /// Fraction of the countdown already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return if self.state == TimerState::Finished {
                1.0
            } else {
                0.0
            };
        }
        let elapsed = self.total_seconds - self.remaining_seconds;
        f64::from(elapsed) / f64::from(self.total_seconds)
    }
}

/// Countdown engine.
///
/// Remaining time is always derived from the instant captured by
/// [`Timer::start`], so irregular or late calls to [`Timer::update`] never
/// lose or gain seconds.
#[derive(Debug)]
pub struct Timer<C: Clock = MonotonicClock> {
    total_seconds: u32,
    remaining_seconds: u32,
    state: TimerState,
    start_timestamp: Option<Instant>,
    clock: C,
}

impl Timer<MonotonicClock> {
    pub fn new(total_seconds: u32) -> Self {
        Self::with_clock(total_seconds, MonotonicClock)
    }
}

impl<C: Clock> Timer<C> {
    pub fn with_clock(total_seconds: u32, clock: C) -> Self {
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            state: TimerState::Idle,
            start_timestamp: None,
            clock,
        }
    }

    /// Begin counting down. Only valid from [`TimerState::Idle`].
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.state != TimerState::Idle {
            return Err(TimerError::NotIdle { state: self.state });
        }
        self.start_timestamp = Some(self.clock.now());
        self.state = TimerState::Running;
        Ok(())
    }

    /// Recompute the remaining time. A no-op unless running.
    pub fn update(&mut self) -> TimerSnapshot {
        if self.state != TimerState::Running {
            return self.snapshot();
        }
        let Some(started) = self.start_timestamp else {
            return self.snapshot();
        };

        let elapsed_secs = self.clock.now().saturating_duration_since(started).as_secs();
        let remaining = u64::from(self.total_seconds).saturating_sub(elapsed_secs);
        // remaining <= total_seconds, so this never truncates
        self.remaining_seconds = remaining as u32;

        if self.remaining_seconds == 0 {
            self.state = TimerState::Finished;
        }
        self.snapshot()
    }

    /// Back to [`TimerState::Idle`] with the full duration, from any state.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.state = TimerState::Idle;
        self.start_timestamp = None;
    }

    pub fn is_finished(&self) -> bool {
        self.state == TimerState::Finished
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn formatted_time(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.start_timestamp
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
            state: self.state,
        }
    }
}
