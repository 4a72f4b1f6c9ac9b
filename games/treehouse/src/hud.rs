//! Score, level and message state for the host UI.
//!
//! Changes are queued as [`GameEvent`]s and handed to the engine context
//! once per step. Nothing in the simulation reads them back.

use canopy_engine::{EngineContext, GameEvent, MessageBoard};

/// Event kinds written to the game event buffer.
pub mod event_kind {
    /// a = collected, b = total.
    pub const SCORE: f32 = 1.0;
    /// a = level number, counted from 1.
    pub const LEVEL: f32 = 2.0;
    /// a = notice code, b = duration in ms (0 when persistent).
    pub const MESSAGE: f32 = 3.0;
    /// a = 1 when the title and score panel should be shown.
    pub const UI_VISIBLE: f32 = 4.0;
    pub const VICTORY: f32 = 5.0;
}

/// Transient notifications shown on the message line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    Welcome,
    StarCollected,
    LostInWood,
    /// Carries the number of the level being entered.
    Ascending(usize),
    LevelDataError,
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Self::Welcome => "Welcome to the treehouse!".to_string(),
            Self::StarCollected => "Star collected!".to_string(),
            Self::LostInWood => "Lost in the dream wood...".to_string(),
            Self::Ascending(n) => format!("Ascending to Canopy {}...", n),
            Self::LevelDataError => "Error loading level data!".to_string(),
        }
    }

    /// How long the notice stays up; `None` keeps it until replaced.
    pub fn duration_ms(&self) -> Option<f64> {
        match self {
            Self::Welcome => Some(2500.0),
            Self::StarCollected => Some(1200.0),
            Self::LostInWood | Self::Ascending(_) => Some(2000.0),
            Self::LevelDataError => None,
        }
    }

    fn code(&self) -> f32 {
        match self {
            Self::Welcome => 1.0,
            Self::StarCollected => 2.0,
            Self::LostInWood => 3.0,
            Self::Ascending(_) => 4.0,
            Self::LevelDataError => 5.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Hud {
    pub collected: usize,
    pub total: usize,
    pub level_number: usize,
    pub gameplay_visible: bool,
    messages: MessageBoard,
    pending: Vec<GameEvent>,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            collected: 0,
            total: 0,
            level_number: 0,
            gameplay_visible: true,
            messages: MessageBoard::new(),
            pending: Vec::new(),
        }
    }

    /// Update the score. Emits an event only when it changed.
    pub fn set_score(&mut self, collected: usize, total: usize) {
        if (collected, total) == (self.collected, self.total) {
            return;
        }
        self.collected = collected;
        self.total = total;
        self.pending.push(GameEvent::new(
            event_kind::SCORE,
            collected as f32,
            total as f32,
            0.0,
        ));
    }

    pub fn set_level(&mut self, level_number: usize) {
        self.level_number = level_number;
        self.pending
            .push(GameEvent::new(event_kind::LEVEL, level_number as f32, 0.0, 0.0));
    }

    pub fn notify(&mut self, notice: Notice, now_ms: f64) {
        match notice.duration_ms() {
            Some(duration) => self.messages.show(notice.text(), now_ms, duration),
            None => self.messages.show_persistent(notice.text()),
        }
        self.pending.push(GameEvent::new(
            event_kind::MESSAGE,
            notice.code(),
            notice.duration_ms().unwrap_or(0.0) as f32,
            0.0,
        ));
    }

    pub fn clear_message(&mut self) {
        self.messages.clear();
    }

    pub fn set_gameplay_visible(&mut self, visible: bool) {
        if self.gameplay_visible == visible {
            return;
        }
        self.gameplay_visible = visible;
        self.pending.push(GameEvent::new(
            event_kind::UI_VISIBLE,
            if visible { 1.0 } else { 0.0 },
            0.0,
            0.0,
        ));
    }

    pub fn announce_victory(&mut self) {
        self.pending
            .push(GameEvent::new(event_kind::VICTORY, 0.0, 0.0, 0.0));
    }

    /// The message line at `now_ms`.
    pub fn message(&self, now_ms: f64) -> Option<&str> {
        self.messages.current(now_ms)
    }

    pub fn score_text(&self) -> String {
        format!("Stars: {} / {}", self.collected, self.total)
    }

    pub fn level_text(&self) -> String {
        format!("Canopy: {}", self.level_number)
    }

    /// Move queued events into the context.
    pub fn flush(&mut self, ctx: &mut EngineContext) {
        for event in self.pending.drain(..) {
            ctx.emit_event(event);
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}
