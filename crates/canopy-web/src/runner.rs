use canopy_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, RenderBuffer, FixedTimestep,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    /// Timestamp of the previous frame callback.
    last_frame_ms: Option<f64>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::with_limits(
            config.fixed_dt,
            config.max_steps_per_frame,
            config.max_catch_up_steps,
        );

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            timestep,
            config,
            initialized: false,
            last_frame_ms: None,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Apply an input event to the game immediately.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.initialized {
            return;
        }
        self.game.input(&mut self.ctx, event);
    }

    /// Run one frame callback at wall-clock `now_ms`: zero or more fixed
    /// steps, then a fresh render buffer.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.now_ms = now_ms;

        // The very first callback steps immediately.
        let steps = match self.last_frame_ms {
            None => 1,
            Some(last) => self.timestep.accumulate(((now_ms - last) / 1000.0) as f32),
        };
        self.last_frame_ms = Some(now_ms);

        for _ in 0..steps {
            self.game.update(&mut self.ctx);
            self.ctx.tick += 1;
        }

        self.render_buffer.clear();
        let mut render_ctx = RenderContext {
            render_buffer: &mut self.render_buffer,
            now_ms,
        };
        self.game.render(&mut render_ctx);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn steps_run(&self) -> u64 {
        self.ctx.tick
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn camera_x(&self) -> f32 {
        self.game.camera_x()
    }

    pub fn message(&self) -> String {
        self.game
            .message(self.ctx.now_ms)
            .map(str::to_owned)
            .unwrap_or_default()
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}
