use canopy_engine::api::game::GameConfig;
use canopy_engine::*;
use glam::Vec2;

use crate::anim::{self, build_animation};
use crate::config::{HUE_SHIFT_PER_STEP, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::error::LevelError;
use crate::hud::{Hud, Notice};
use crate::level::LevelPack;
use crate::physics;
use crate::player::Player;
use crate::progress::{Phase, Progress};
use crate::render;
use crate::victory::VictoryShow;
use crate::world::World;

const PLAYER_SHEET: &str = include_str!("../assets/player.json");
const MAX_INSTANCES: usize = 512;

/// The treehouse platformer: owns every piece of simulation state and is
/// driven one fixed step at a time by the engine runner.
pub struct Treehouse {
    levels: LevelPack,
    world: World,
    input: InputState,
    camera: ScrollCamera,
    progress: Progress,
    hud: Hud,
    victory: Option<VictoryShow>,
    /// Cosmetic hue rotation in degrees.
    hue_shift: f32,
    sheet: Option<SheetLayout>,
    viewport: Vec2,
    greeted: bool,
}

impl Treehouse {
    pub fn new() -> Self {
        Self::with_levels(LevelPack::builtin())
    }

    /// Parse a JSON level pack and build a game around it.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(Self::with_levels(LevelPack::from_json(json)?))
    }

    /// Levels are validated as they load, so a bad pack halts the game at
    /// that level instead of failing here.
    pub fn with_levels(levels: LevelPack) -> Self {
        let manifest = match SpriteSheetManifest::from_json(PLAYER_SHEET) {
            Ok(manifest) => Some(manifest),
            Err(err) => {
                log::warn!("player sprite sheet unreadable, drawing placeholders: {}", err);
                None
            }
        };
        let player = Player::new(levels.tuning(), build_animation(manifest.as_ref()));

        Self {
            levels,
            world: World::new(player),
            input: InputState::new(),
            camera: ScrollCamera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            progress: Progress::new(),
            hud: Hud::new(),
            victory: None,
            hue_shift: 0.0,
            sheet: manifest.as_ref().map(SpriteSheetManifest::layout),
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            greeted: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    pub fn camera(&self) -> &ScrollCamera {
        &self.camera
    }

    pub fn victory(&self) -> Option<&VictoryShow> {
        self.victory.as_ref()
    }

    pub fn hue_shift(&self) -> f32 {
        self.hue_shift
    }

    /// Load level `index`, or enter victory when past the last one.
    fn load_level(&mut self, index: usize, ctx: &mut EngineContext) {
        if self.levels.is_empty() {
            log::warn!("{}", LevelError::Empty);
            self.halt(ctx.now_ms);
            return;
        }
        if let Err(err) = self.world.player.tuning.validate() {
            log::warn!("{}", err);
            self.halt(ctx.now_ms);
            return;
        }
        let Some(level) = self.levels.get(index) else {
            self.enter_victory(ctx);
            return;
        };
        if let Err(err) = level.validate(index) {
            log::warn!("{}", err);
            self.halt(ctx.now_ms);
            return;
        }

        self.world.load(level, &mut ctx.rng);
        self.progress.playing(index);

        self.hud.set_gameplay_visible(true);
        self.hud.set_level(index + 1);
        self.hud
            .set_score(self.world.collected_count(), self.world.total_collectibles());

        let player = &self.world.player;
        self.camera.set_world_width(self.world.width);
        self.camera.place(player.pos.x - self.viewport.x / 3.0);
        self.camera.follow(player.pos.x + player.tuning.draw_width() / 2.0);

        log::info!(
            "canopy {}: {} platforms, {} stars",
            index + 1,
            self.world.platforms.len(),
            self.world.total_collectibles()
        );
    }

    fn enter_victory(&mut self, ctx: &mut EngineContext) {
        if !self.progress.enter_victory() {
            return;
        }
        self.input.clear();
        self.hud.clear_message();
        self.hud.set_gameplay_visible(false);
        self.hud.announce_victory();
        self.camera.clear_world();
        self.victory = Some(VictoryShow::start(self.viewport, ctx.now_ms, &mut ctx.rng));
        log::info!("victory after {} canopies", self.levels.len());
    }

    fn halt(&mut self, now_ms: f64) {
        self.progress.halt();
        self.hud.notify(Notice::LevelDataError, now_ms);
    }

    /// One simulation step while playing.
    fn step(&mut self, ctx: &mut EngineContext) {
        let now_ms = ctx.now_ms;
        self.hue_shift = (self.hue_shift + HUE_SHIFT_PER_STEP) % 360.0;

        let report = physics::step_player(
            &mut self.world.player,
            &self.input,
            &mut self.world.platforms,
            self.world.width,
            now_ms,
        );
        if let Some(index) = report.bounced_on {
            log::debug!("bounced on platform {}", index);
        }

        let player = &self.world.player;
        if player.pos.y > self.viewport.y + player.tuning.draw_height() {
            log::info!("fell out of canopy {}, reloading", self.progress.level_index + 1);
            self.hud.notify(Notice::LostInWood, now_ms);
            self.load_level(self.progress.level_index, ctx);
            return;
        }

        let hitbox = self.world.player.hitbox();
        let picked = self
            .world
            .collectibles
            .iter_mut()
            .map(|c| c.try_collect(&hitbox))
            .filter(|&picked| picked)
            .count();
        if picked > 0 {
            log::debug!("collected {} star(s)", picked);
            self.hud.notify(Notice::StarCollected, now_ms);
        }
        self.hud
            .set_score(self.world.collected_count(), self.world.total_collectibles());

        if self.world.exit.reached(&hitbox, self.world.all_collected()) {
            if let Some(next) = self.progress.advance() {
                log::debug!("exit reached, heading to level index {}", next);
            }
        }

        for platform in &mut self.world.platforms {
            platform.tick_squash();
        }

        let player = &mut self.world.player;
        anim::update(&mut player.animation, player.on_ground, player.vel.x);
        self.camera
            .follow(player.pos.x + player.tuning.draw_width() / 2.0);
    }
}

impl Default for Treehouse {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Treehouse {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            world_width: VIEWPORT_WIDTH,
            world_height: VIEWPORT_HEIGHT,
            max_instances: MAX_INSTANCES,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.load_level(0, ctx);
        log::info!("treehouse: {} canopies loaded", self.levels.len());
    }

    fn input(&mut self, _ctx: &mut EngineContext, event: InputEvent) {
        if !self.progress.accepts_input() {
            return;
        }
        if self.input.apply(&event, self.viewport) {
            self.world.player.try_jump();
        }
    }

    fn update(&mut self, ctx: &mut EngineContext) {
        if !self.greeted {
            self.greeted = true;
            if !self.progress.is_halted() {
                self.hud.notify(Notice::Welcome, ctx.now_ms);
            }
        }

        match self.progress.phase {
            Phase::Halted => {}
            Phase::Victory => {
                self.hue_shift = (self.hue_shift + HUE_SHIFT_PER_STEP) % 360.0;
                if let Some(show) = &mut self.victory {
                    show.update(ctx.now_ms);
                }
            }
            Phase::LevelTransition { to } => {
                self.load_level(to, ctx);
                if self.progress.phase == Phase::Playing {
                    self.hud.notify(Notice::Ascending(to + 1), ctx.now_ms);
                    self.step(ctx);
                }
            }
            Phase::Playing => self.step(ctx),
        }

        self.hud.flush(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        match &self.victory {
            Some(show) => render::draw_victory(ctx.render_buffer, show, self.hue_shift),
            None => render::draw_world(
                ctx.render_buffer,
                &self.world,
                &self.camera,
                self.hue_shift,
                self.sheet.as_ref(),
            ),
        }
    }

    fn camera_x(&self) -> f32 {
        self.camera.x
    }

    fn message(&self, now_ms: f64) -> Option<&str> {
        self.hud.message(now_ms)
    }
}
