//! Frame clock
//!
//! Turns monotonic elapsed-time samples into two independent tick cadences.
//! Time only accumulates while the clock is running; a frozen or resyncing
//! clock records the sample and throws the delta away.

use serde::{Deserialize, Serialize};

use crate::consts::SLOW_TICK_INTERVAL;

/// What one update produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockStep {
    /// Running seconds since the previous sample
    pub dt: f32,
    pub fast_tick: bool,
    pub slow_tick: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    fast_interval: f64,
    last_sample: Option<f64>,
    fast_accum: f64,
    slow_accum: f64,
}

impl Clock {
    pub fn new(fast_interval: f64) -> Self {
        Self {
            fast_interval,
            last_sample: None,
            fast_accum: 0.0,
            slow_accum: 0.0,
        }
    }

    pub fn fast_interval(&self) -> f64 {
        self.fast_interval
    }

    fn delta(&mut self, now: f64) -> f64 {
        let dt = match self.last_sample {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_sample = Some(now);
        dt
    }

    /// Drop all accumulated time and re-anchor on `now` (pre-start countdown)
    pub fn resync(&mut self, now: f64) {
        self.last_sample = Some(now);
        self.fast_accum = 0.0;
        self.slow_accum = 0.0;
    }

    /// Record `now` without accumulating (paused or ended)
    pub fn freeze(&mut self, now: f64) {
        self.last_sample = Some(now);
    }

    /// Accumulate time since the last sample; fires at most one tick of each kind
    pub fn advance(&mut self, now: f64) -> ClockStep {
        let dt = self.delta(now);
        self.fast_accum += dt;
        self.slow_accum += dt;

        let fast_tick = self.fast_accum >= self.fast_interval;
        if fast_tick {
            self.fast_accum = 0.0;
        }
        let slow_tick = self.slow_accum >= SLOW_TICK_INTERVAL;
        if slow_tick {
            self.slow_accum = 0.0;
        }

        ClockStep {
            dt: dt as f32,
            fast_tick,
            slow_tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_anchors() {
        let mut clock = Clock::new(0.05);
        let step = clock.advance(100.0);
        assert_eq!(step, ClockStep::default());
    }

    #[test]
    fn test_fast_and_slow_cadence() {
        let mut clock = Clock::new(0.05);
        clock.advance(0.0);

        let mut fast = 0;
        let mut slow = 0;
        // 50 fps for 2.5 seconds
        for frame in 1..=125 {
            let step = clock.advance(frame as f64 / 50.0);
            fast += step.fast_tick as u32;
            slow += step.slow_tick as u32;
        }
        // 0.02s frames: every 3rd frame crosses 0.05s
        assert_eq!(fast, 41);
        assert_eq!(slow, 2);
    }

    #[test]
    fn test_both_can_fire_together() {
        let mut clock = Clock::new(0.05);
        clock.advance(0.0);
        let step = clock.advance(1.0);
        assert!(step.fast_tick);
        assert!(step.slow_tick);
    }

    #[test]
    fn test_long_frame_no_burst() {
        let mut clock = Clock::new(0.05);
        clock.advance(0.0);
        assert!(clock.advance(10.0).fast_tick);
        // Remainder was dropped, next short frame does not tick again
        assert!(!clock.advance(10.01).fast_tick);
    }

    #[test]
    fn test_freeze_discards_time() {
        let mut clock = Clock::new(0.05);
        clock.advance(0.0);
        clock.advance(0.04);
        clock.freeze(30.0);
        let step = clock.advance(30.005);
        assert!((step.dt - 0.005).abs() < 1e-6);
        assert!(!step.fast_tick);
        assert!(!step.slow_tick);
    }

    #[test]
    fn test_resync_clears_accumulators() {
        let mut clock = Clock::new(0.05);
        clock.advance(0.0);
        clock.advance(0.9);
        clock.resync(5.0);
        let step = clock.advance(5.2);
        assert!(!step.slow_tick);
    }
}
