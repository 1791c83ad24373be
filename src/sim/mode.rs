//! Game modes and the termination rule
//!
//! A session runs until its mode says otherwise:
//! - `Timed`: a countdown driven by slow ticks
//! - `Hittable`: a budget of hits the player may take

use serde::{Deserialize, Serialize};

/// Termination rule for a session (immutable once the session starts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Ends when the countdown reaches zero
    Timed { seconds: u32 },
    /// Ends when the player has taken this many hits
    Hittable { max_hits: u32 },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Hittable { max_hits: 1 }
    }
}

/// Running or terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeState {
    Running,
    Ended,
}

/// Watches ticks and taken hits and decides when the session is over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeController {
    mode: GameMode,
    state: ModeState,
    /// Seconds left (Timed mode only)
    countdown: Option<i64>,
}

impl ModeController {
    pub fn new(mode: GameMode) -> Self {
        let countdown = match mode {
            GameMode::Timed { seconds } => Some(seconds as i64),
            GameMode::Hittable { .. } => None,
        };
        Self {
            mode,
            state: ModeState::Running,
            countdown,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn has_ended(&self) -> bool {
        self.state == ModeState::Ended
    }

    /// Remaining seconds, clamped at zero (None outside Timed mode)
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.countdown.map(|c| c.max(0) as u32)
    }

    /// Advance the countdown by one slow tick. Returns true on the tick that ends the session.
    pub fn on_slow_tick(&mut self) -> bool {
        if self.has_ended() {
            return false;
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return false;
        };
        *countdown -= 1;
        if *countdown <= 0 {
            self.state = ModeState::Ended;
            return true;
        }
        false
    }

    /// Observe a new `hits_taken` value. Returns true when it exhausts the hit budget.
    pub fn on_hits_taken(&mut self, hits_taken: u32) -> bool {
        if self.has_ended() {
            return false;
        }
        match self.mode {
            GameMode::Hittable { max_hits } if hits_taken >= max_hits => {
                self.state = ModeState::Ended;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_ends_on_last_tick() {
        let mut mode = ModeController::new(GameMode::Timed { seconds: 3 });
        assert_eq!(mode.countdown_remaining(), Some(3));

        assert!(!mode.on_slow_tick());
        assert!(!mode.on_slow_tick());
        assert_eq!(mode.countdown_remaining(), Some(1));
        assert!(!mode.has_ended());

        assert!(mode.on_slow_tick());
        assert!(mode.has_ended());
        assert_eq!(mode.countdown_remaining(), Some(0));

        // Terminal: further ticks change nothing
        assert!(!mode.on_slow_tick());
        assert_eq!(mode.countdown_remaining(), Some(0));
    }

    #[test]
    fn test_hittable_ignores_ticks() {
        let mut mode = ModeController::new(GameMode::Hittable { max_hits: 2 });
        for _ in 0..100 {
            assert!(!mode.on_slow_tick());
        }
        assert_eq!(mode.countdown_remaining(), None);
        assert!(!mode.on_hits_taken(1));
        assert!(mode.on_hits_taken(2));
        assert_eq!(mode.state(), ModeState::Ended);
        assert!(!mode.on_hits_taken(3));
    }

    #[test]
    fn test_timed_ignores_hits() {
        let mut mode = ModeController::new(GameMode::Timed { seconds: 10 });
        assert!(!mode.on_hits_taken(50));
        assert_eq!(mode.state(), ModeState::Running);
    }
}
