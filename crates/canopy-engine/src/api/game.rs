use crate::api::types::GameEvent;
use crate::core::rng::Rng;
use crate::input::event::InputEvent;
use crate::renderer::instance::RenderBuffer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Upper bound on simulation steps per frame callback (default: 1).
    pub max_steps_per_frame: u32,
    /// Accumulator cap in steps, so a long stall cannot snowball (default: 5).
    pub max_catch_up_steps: u32,
    /// Viewport width in game units.
    pub world_width: f32,
    /// Viewport height in game units.
    pub world_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the context RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 1,
            max_catch_up_steps: 5,
            world_width: 600.0,
            world_height: 400.0,
            max_instances: 512,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Apply one input event. Called synchronously as events arrive, between
    /// simulation steps, so edge-triggered actions do not wait for a tick.
    fn input(&mut self, ctx: &mut EngineContext, event: InputEvent);

    /// One fixed simulation step.
    fn update(&mut self, ctx: &mut EngineContext);

    /// Optional read-only render pass filling the render buffer.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Scroll offset of the viewport, in world units.
    fn camera_x(&self) -> f32 {
        0.0
    }

    /// Transient status line for the host UI, if any is live at `now_ms`.
    fn message(&self, _now_ms: f64) -> Option<&str> {
        None
    }
}

/// Mutable access to engine state, passed to `Game::init`, `Game::input`
/// and `Game::update`.
pub struct EngineContext {
    /// Wall-clock time of the current frame in milliseconds.
    pub now_ms: f64,
    /// Number of simulation steps executed so far.
    pub tick: u64,
    pub events: Vec<GameEvent>,
    pub rng: Rng,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            now_ms: 0.0,
            tick: 0,
            events: Vec::with_capacity(config.max_events),
            rng: Rng::new(config.seed),
            max_events: config.max_events,
        }
    }

    /// Emit a game event to be forwarded to the host. Events beyond the
    /// per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::warn!("event buffer full, dropping kind={}", event.kind);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for filling the per-frame render buffer.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    /// Wall-clock time of the frame being drawn, in milliseconds.
    pub now_ms: f64,
}
