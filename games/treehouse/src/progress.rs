/// Where the game is in its level sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// The exit was reached; level `to` loads at the start of the next step.
    LevelTransition { to: usize },
    /// Terminal. Every level is done.
    Victory,
    /// Terminal. Level data could not be loaded.
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Never decreases.
    pub level_index: usize,
    pub phase: Phase,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            level_index: 0,
            phase: Phase::Playing,
        }
    }

    pub fn is_victory(&self) -> bool {
        self.phase == Phase::Victory
    }

    pub fn is_halted(&self) -> bool {
        self.phase == Phase::Halted
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::LevelTransition { .. })
    }

    /// Move to the next level index. Ignored outside `Playing`.
    pub fn advance(&mut self) -> Option<usize> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.level_index += 1;
        self.phase = Phase::LevelTransition { to: self.level_index };
        Some(self.level_index)
    }

    /// A level finished loading.
    pub fn playing(&mut self, index: usize) {
        self.level_index = index;
        self.phase = Phase::Playing;
    }

    /// Returns true only on the first call.
    pub fn enter_victory(&mut self) -> bool {
        if self.is_victory() {
            return false;
        }
        self.phase = Phase::Victory;
        true
    }

    pub fn halt(&mut self) {
        self.phase = Phase::Halted;
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
