use canopy_engine::{AnimationComponent, Rect};
use glam::Vec2;

use crate::anim::MotionAnim;
use crate::config::PlayerTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// The player character. `pos` is the top-left corner of both the hitbox
/// and the drawn sprite.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    /// Re-derived from collisions on every step.
    pub on_ground: bool,
    pub is_jumping: bool,
    pub jump_hold_frames: u32,
    /// Wall-clock deadline (ms) until which non-trampoline landings are
    /// skipped, set while dropping through a platform.
    pub ignore_platforms_until_ms: Option<f64>,
    pub tuning: PlayerTuning,
    pub animation: AnimationComponent<MotionAnim>,
}

impl Player {
    pub fn new(tuning: PlayerTuning, animation: AnimationComponent<MotionAnim>) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            facing: Facing::Right,
            on_ground: false,
            is_jumping: false,
            jump_hold_frames: 0,
            ignore_platforms_until_ms: None,
            tuning,
            animation,
        }
    }

    pub fn width(&self) -> f32 {
        self.tuning.hitbox_width()
    }

    pub fn height(&self) -> f32 {
        self.tuning.hitbox_height()
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::new(self.width(), self.height()))
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height()
    }

    /// Put the player at `spawn`, airborne and at rest.
    pub fn reset_to(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.is_jumping = true;
        self.jump_hold_frames = 0;
        self.ignore_platforms_until_ms = None;
        self.animation.play(MotionAnim::Idle);
    }

    /// Start a jump if standing on something. Returns true if it started.
    pub fn try_jump(&mut self) -> bool {
        if self.is_jumping || !self.on_ground {
            return false;
        }
        self.vel.y = self.tuning.jump_strength;
        self.is_jumping = true;
        self.on_ground = false;
        self.jump_hold_frames = 0;
        self.ignore_platforms_until_ms = None;
        true
    }

    /// Stand on a surface whose top edge is at `top`.
    pub fn land_on(&mut self, top: f32) {
        self.pos.y = top - self.height();
        self.vel.y = 0.0;
        self.is_jumping = false;
        self.on_ground = true;
        self.jump_hold_frames = 0;
        self.ignore_platforms_until_ms = None;
    }

    /// Launch upward off a trampoline.
    pub fn bounce(&mut self, strength: f32) {
        self.vel.y = strength;
        self.is_jumping = true;
        self.on_ground = false;
        self.jump_hold_frames = 0;
        self.ignore_platforms_until_ms = None;
        self.animation.play(MotionAnim::Jump);
    }

    /// Whether landings on solid platforms are suspended at `now_ms`.
    pub fn is_dropping(&self, now_ms: f64) -> bool {
        self.ignore_platforms_until_ms.is_some_and(|until| now_ms <= until)
    }

    /// Bump into an underside whose bottom edge is at `bottom`.
    pub fn hit_ceiling(&mut self, bottom: f32, rebound: f32) {
        self.pos.y = bottom;
        self.vel.y = rebound;
        self.ignore_platforms_until_ms = None;
    }
}
