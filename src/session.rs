//! Session statistics and the active/inactive state machine.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a new game: at startup and after the last life is lost.
    Inactive,
    Active,
}

/// What losing a life led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeLost {
    /// Lives remain; the board is reset and play pauses briefly.
    Respawn,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub score: u32,
    /// Best score of the process lifetime; never lowered.
    pub high_score: u32,
    pub level: u32,
    pub lives_left: u32,
    pub state: SessionState,
    /// Ticks of dead time left after a craft hit.
    pub pause_ticks: u32,
}

impl Session {
    pub fn new(ship_limit: u32) -> Self {
        let mut session = Session {
            score: 0,
            high_score: 0,
            level: 1,
            lives_left: 0,
            state: SessionState::Inactive,
            pause_ticks: 0,
        };
        session.reset_stats(ship_limit);
        session
    }

    /// Reset everything a new game resets.  `high_score` is left alone.
    pub fn reset_stats(&mut self, ship_limit: u32) {
        self.lives_left = ship_limit;
        self.score = 0;
        self.level = 1;
        self.pause_ticks = 0;
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn is_paused(&self) -> bool {
        self.pause_ticks > 0
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.check_high_score();
    }

    pub fn check_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Take one life away and decide whether play continues.
    pub fn lose_life(&mut self, pause_ticks: u32) -> LifeLost {
        self.lives_left = self.lives_left.saturating_sub(1);
        if self.lives_left > 0 {
            self.pause_ticks = pause_ticks;
            LifeLost::Respawn
        } else {
            self.state = SessionState::Inactive;
            self.pause_ticks = 0;
            LifeLost::GameOver
        }
    }
}
