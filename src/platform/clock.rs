//! Game clock
//!
//! Turns the host's raw frame delta into the simulated delta: pause,
//! single-step and time scale are applied here and nowhere else. The clock's
//! running total is shared read-only through [`ClockHandle`].

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::SLOW_TIME_SCALE;

/// Read-only view of the game clock's total simulated seconds
#[derive(Debug, Clone)]
pub struct ClockHandle {
    total: Rc<Cell<f64>>,
}

impl ClockHandle {
    /// Simulated seconds since the clock was created
    pub fn total_seconds(&self) -> f64 {
        self.total.get()
    }
}

/// Repeating timer over a [`ClockHandle`]
#[derive(Debug, Clone)]
pub struct BlinkTimer {
    clock: ClockHandle,
    period: f32,
}

impl BlinkTimer {
    pub fn new(clock: ClockHandle, period: f32) -> Self {
        Self { clock, period }
    }

    /// Position within the current period, in `[0, 1)`
    pub fn elapsed_fraction(&self) -> f32 {
        if self.period <= 0.0 {
            return 0.0;
        }
        let period = self.period as f64;
        (self.clock.total_seconds().rem_euclid(period) / period) as f32
    }
}

/// Frame clock with pause, single-step and time scale
#[derive(Debug)]
pub struct GameClock {
    total: Rc<Cell<f64>>,
    paused: bool,
    step_pending: bool,
    time_scale: f32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            total: Rc::new(Cell::new(0.0)),
            paused: false,
            step_pending: false,
            time_scale: 1.0,
        }
    }

    pub fn handle(&self) -> ClockHandle {
        ClockHandle {
            total: Rc::clone(&self.total),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn total_seconds(&self) -> f64 {
        self.total.get()
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.step_pending = false;
        log::debug!("Clock {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Run exactly one frame, then stay paused
    pub fn step_single_frame(&mut self) {
        self.paused = true;
        self.step_pending = true;
    }

    /// Set the time scale; only `SLOW_TIME_SCALE..=1.0` is accepted
    pub fn set_time_scale(&mut self, scale: f32) -> bool {
        if !(SLOW_TIME_SCALE..=1.0).contains(&scale) {
            log::warn!("Rejected time scale {} (must be within {}..=1.0)", scale, SLOW_TIME_SCALE);
            return false;
        }
        self.time_scale = scale;
        true
    }

    /// Advance by a raw frame delta, returning the simulated delta (0 while paused)
    pub fn advance(&mut self, raw_dt: f32) -> f32 {
        if raw_dt <= 0.0 || !raw_dt.is_finite() {
            return 0.0;
        }
        if self.paused && !self.step_pending {
            return 0.0;
        }
        self.step_pending = false;

        let dt = raw_dt * self.time_scale;
        self.total.set(self.total.get() + dt as f64);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_stops_time() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance(0.5), 0.5);
        clock.toggle_pause();
        assert_eq!(clock.advance(0.5), 0.0);
        assert_eq!(clock.total_seconds(), 0.5);
        clock.toggle_pause();
        assert_eq!(clock.advance(0.25), 0.25);
    }

    #[test]
    fn test_single_step_runs_one_frame() {
        let mut clock = GameClock::new();
        clock.step_single_frame();
        assert_eq!(clock.advance(0.1), 0.1);
        assert_eq!(clock.advance(0.1), 0.0);
        assert!(clock.is_paused());
    }

    #[test]
    fn test_time_scale_bounds() {
        let mut clock = GameClock::new();
        assert!(clock.set_time_scale(SLOW_TIME_SCALE));
        assert!((clock.advance(1.0) - SLOW_TIME_SCALE).abs() < 1e-6);
        assert!(!clock.set_time_scale(0.0));
        assert!(!clock.set_time_scale(2.0));
        assert_eq!(clock.time_scale(), SLOW_TIME_SCALE);
    }

    #[test]
    fn test_blink_timer_follows_clock() {
        let mut clock = GameClock::new();
        let blink = BlinkTimer::new(clock.handle(), 1.0);
        clock.advance(0.25);
        assert!((blink.elapsed_fraction() - 0.25).abs() < 1e-5);
        clock.advance(1.0);
        assert!((blink.elapsed_fraction() - 0.25).abs() < 1e-5);
    }
}
