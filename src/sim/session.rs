//! Session lifecycle: score, risk buffer and game over

use serde::{Deserialize, Serialize};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Active,
    /// Risk buffer depleted; terminal until restart
    GameOver,
}

/// What a collision did to the risk buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Buffer absorbed the hit
    Absorbed { remaining: u32 },
    /// Buffer hit zero, session is over
    Depleted,
    /// Session already over, nothing changed
    Ignored,
}

/// Score and risk buffer for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    /// Remaining "emergency fund" hits, `0..=max_risk_buffer`
    pub risk_buffer: u32,
    pub max_risk_buffer: u32,
    pub phase: GamePhase,
}

impl Session {
    pub fn new(max_risk_buffer: u32) -> Self {
        Self {
            score: 0,
            risk_buffer: max_risk_buffer,
            max_risk_buffer,
            phase: GamePhase::Active,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Spend `cost` from the risk buffer; reaching zero ends the session
    pub fn apply_hit(&mut self, cost: u32) -> HitOutcome {
        if self.is_game_over() {
            return HitOutcome::Ignored;
        }
        self.risk_buffer = self.risk_buffer.saturating_sub(cost);
        if self.risk_buffer == 0 {
            self.phase = GamePhase::GameOver;
            HitOutcome::Depleted
        } else {
            HitOutcome::Absorbed {
                remaining: self.risk_buffer,
            }
        }
    }

    /// Add points
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Subtract a penalty, floored at zero. Returns what was actually taken.
    pub fn penalize(&mut self, penalty: u64) -> u64 {
        let taken = penalty.min(self.score);
        self.score -= taken;
        taken
    }

    /// Back to a fresh active session
    pub fn reset(&mut self) {
        self.score = 0;
        self.risk_buffer = self.max_risk_buffer;
        self.phase = GamePhase::Active;
    }
}

/// Points for a correct answer: `floor(base * multiplier) + bonus`
pub fn quiz_points(base: u64, bonus: u64, multiplier: f64) -> u64 {
    (base as f64 * multiplier).floor() as u64 + bonus
}
