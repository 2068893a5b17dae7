//! Level, lives and wave bookkeeping

use crate::tuning::Tuning;

/// Result of clearing a wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub bonus_life: bool,
}

/// Campaign counters for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    /// Wave size for the current level
    pub stations_per_level: u32,
    /// Kills in the current wave (reset on advance)
    pub destroyed_this_level: u32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            lives: tuning.starting_lives,
            stations_per_level: tuning.stations_per_level(1),
            destroyed_this_level: 0,
        }
    }

    pub fn record_kill(&mut self) {
        self.destroyed_this_level += 1;
    }

    /// Move to the next level; the caller spawns the new wave
    pub fn advance(&mut self, tuning: &Tuning) -> LevelUp {
        self.level += 1;
        self.stations_per_level = tuning.stations_per_level(self.level);
        self.destroyed_this_level = 0;

        let bonus_life = tuning.is_bonus_life_level(self.level);
        if bonus_life {
            self.lives += 1;
        }
        LevelUp {
            level: self.level,
            bonus_life,
        }
    }

    /// Take a life (never below zero); returns what is left
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    #[inline]
    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}
