//! Fixed-period tick scheduling.
//!
//! The scheduler does no I/O and owns no clock; callers pass `Instant`s in.
//! A tick moves through `Idle -> Sampling -> Publishing -> Idle` and only one
//! tick is ever in flight. When a tick overruns its period the next one is
//! due immediately, and runs once.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Sampling,
    Publishing,
    Terminated,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    period: Duration,
    state: SchedulerState,
    next_due: Instant,
    quit_requested: bool,
    ticks: u64,
    overruns: u64,
}

impl Scheduler {
    /// First tick is due at `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            state: SchedulerState::Idle,
            next_due: now,
            quit_requested: false,
            ticks: 0,
            overruns: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SchedulerState::Terminated
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.state == SchedulerState::Idle && now >= self.next_due
    }

    /// How long the caller may wait for input before the next tick.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        match self.state {
            SchedulerState::Idle => self.next_due.saturating_duration_since(now),
            _ => Duration::ZERO,
        }
    }

    /// `Idle -> Sampling` when a tick is due. Returns false otherwise.
    pub fn begin_tick(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.state = SchedulerState::Sampling;
        self.next_due = now + self.period;
        self.ticks += 1;
        trace!(tick = self.ticks, "Tick started");
        true
    }

    /// `Sampling -> Publishing`.
    pub fn begin_publish(&mut self) {
        if self.state == SchedulerState::Sampling {
            self.state = SchedulerState::Publishing;
        }
    }

    /// `Publishing -> Idle`, or `Terminated` if quit arrived mid-tick.
    pub fn finish_tick(&mut self, now: Instant) {
        if !matches!(
            self.state,
            SchedulerState::Sampling | SchedulerState::Publishing
        ) {
            return;
        }

        if now > self.next_due {
            self.overruns += 1;
            debug!(
                tick = self.ticks,
                overrun_ms = (now - self.next_due).as_millis() as u64,
                "Tick overran its period, next tick deferred to now"
            );
        }

        self.state = if self.quit_requested {
            SchedulerState::Terminated
        } else {
            SchedulerState::Idle
        };
    }

    /// Stops future ticks. An in-flight tick is allowed to finish.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Terminated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(1);

    fn run_tick(s: &mut Scheduler, start: Instant, took: Duration) -> bool {
        if !s.begin_tick(start) {
            return false;
        }
        assert_eq!(s.state(), SchedulerState::Sampling);
        s.begin_publish();
        assert_eq!(s.state(), SchedulerState::Publishing);
        s.finish_tick(start + took);
        true
    }

    #[test]
    fn test_first_tick_is_immediate() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(PERIOD, t0);
        assert!(s.is_due(t0));
        assert!(run_tick(&mut s, t0, Duration::from_millis(100)));
        assert_eq!(s.state(), SchedulerState::Idle);
        assert_eq!(s.ticks(), 1);
    }

    #[test]
    fn test_waits_for_period() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(PERIOD, t0);
        run_tick(&mut s, t0, Duration::from_millis(100));

        let t = t0 + Duration::from_millis(400);
        assert!(!s.begin_tick(t));
        assert_eq!(s.time_until_due(t), Duration::from_millis(600));
        assert!(s.begin_tick(t0 + PERIOD));
    }

    #[test]
    fn test_no_second_tick_while_in_flight() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(PERIOD, t0);
        assert!(s.begin_tick(t0));
        assert!(!s.begin_tick(t0 + Duration::from_secs(5)));
        assert_eq!(s.time_until_due(t0), Duration::ZERO);
    }

    #[test]
    fn test_overrun_defers_one_tick() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(PERIOD, t0);

        // Tick takes 3.5 periods.
        run_tick(&mut s, t0, Duration::from_millis(3500));
        assert_eq!(s.overruns(), 1);

        let after = t0 + Duration::from_millis(3500);
        assert!(s.is_due(after));
        assert!(run_tick(&mut s, after, Duration::from_millis(50)));

        // The missed periods are not replayed.
        assert!(!s.is_due(after + Duration::from_millis(60)));
        assert_eq!(s.ticks(), 2);
    }

    #[test]
    fn test_quit_when_idle_terminates() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(PERIOD, t0);
        s.request_quit();
        assert!(s.is_terminated());
        assert!(!s.begin_tick(t0));
    }

    #[test]
    fn test_quit_mid_tick_lets_tick_finish() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(PERIOD, t0);
        assert!(s.begin_tick(t0));
        s.request_quit();
        assert_eq!(s.state(), SchedulerState::Sampling);

        s.begin_publish();
        s.finish_tick(t0 + Duration::from_millis(10));
        assert!(s.is_terminated());
        assert!(!s.begin_tick(t0 + PERIOD));
    }
}
