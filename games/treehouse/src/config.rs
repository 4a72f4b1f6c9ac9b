//! Tunables and fixed layout constants.

use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// Visible canvas size in world units.
pub const VIEWPORT_WIDTH: f32 = 600.0;
pub const VIEWPORT_HEIGHT: f32 = 400.0;

/// Thickness of the ground strips in the built-in level.
pub const GROUND_THICKNESS: f32 = 40.0;

/// Collectible star edge length.
pub const STAR_SIZE: f32 = 12.0 * 1.3;

/// How far below a platform top a falling player may already be and still
/// land on it. Also used for ceiling hits.
pub const CONTACT_TOLERANCE: f32 = 2.5;

/// Downward speed given after bumping a ceiling, so the hit cannot repeat.
pub const CEILING_REBOUND: f32 = 0.1;

/// Horizontal speed below which the player counts as standing still for
/// animation purposes.
pub const WALK_THRESHOLD: f32 = 0.1;

/// Cosmetic hue rotation per simulation step, in degrees.
pub const HUE_SHIFT_PER_STEP: f32 = 0.8;

/// Default trampoline parameters.
pub const TRAMPOLINE_BOUNCE: f32 = -20.0;
pub const TRAMPOLINE_SQUASH_FACTOR: f32 = 0.5;
pub const TRAMPOLINE_SQUASH_TICKS: u32 = 15;

/// Default moving platform parameters.
pub const MOVING_RANGE: f32 = 100.0;
pub const MOVING_SPEED: f32 = 1.0;

/// Player physics and body dimensions. Every field can be overridden from a
/// level pack; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub acceleration: f32,
    /// Multiplier applied to horizontal speed on steps with no direction held.
    pub friction: f32,
    pub max_speed: f32,
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up).
    pub jump_strength: f32,
    /// Extra upward push per step while up is held during a jump.
    pub jump_hold_force: f32,
    pub max_jump_hold_frames: u32,
    /// Horizontal speeds below this snap to zero.
    pub stop_epsilon: f32,
    /// Downward speed given when dropping through a platform.
    pub drop_speed: f32,
    /// Wall-clock window during which landings are ignored after a drop.
    pub drop_window_ms: f64,
    /// Sprite sheet frame width in pixels.
    pub frame_width: f32,
    /// Height of one of the three stacked sprite parts in pixels.
    pub part_height: f32,
    pub scale: f32,
    /// Hitbox width as a fraction of the drawn width.
    pub hitbox_width_factor: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.35,
            friction: 0.83,
            max_speed: 3.8,
            gravity: 0.5,
            jump_strength: -13.0,
            jump_hold_force: 0.25,
            max_jump_hold_frames: 15,
            stop_epsilon: 0.1,
            drop_speed: 3.0,
            drop_window_ms: 50.0,
            frame_width: 117.0,
            part_height: 68.0,
            scale: 0.7,
            hitbox_width_factor: 0.75,
        }
    }
}

impl PlayerTuning {
    pub const PARTS: u32 = 3;

    pub fn draw_width(&self) -> f32 {
        self.frame_width * self.scale
    }

    pub fn draw_height(&self) -> f32 {
        self.part_height * Self::PARTS as f32 * self.scale
    }

    pub fn hitbox_width(&self) -> f32 {
        self.frame_width * self.hitbox_width_factor * self.scale
    }

    pub fn hitbox_height(&self) -> f32 {
        self.draw_height()
    }

    /// Reject values the step cannot integrate: non-finite numbers, a
    /// non-positive speed cap, gravity or body size, and friction outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<(), LevelError> {
        let checks: [(&'static str, f64, fn(f64) -> bool); 13] = [
            ("acceleration", self.acceleration as f64, non_negative),
            ("friction", self.friction as f64, |v| (0.0..=1.0).contains(&v)),
            ("max_speed", self.max_speed as f64, positive),
            ("gravity", self.gravity as f64, positive),
            ("jump_strength", self.jump_strength as f64, f64::is_finite),
            ("jump_hold_force", self.jump_hold_force as f64, non_negative),
            ("stop_epsilon", self.stop_epsilon as f64, non_negative),
            ("drop_speed", self.drop_speed as f64, non_negative),
            ("drop_window_ms", self.drop_window_ms, non_negative),
            ("frame_width", self.frame_width as f64, positive),
            ("part_height", self.part_height as f64, positive),
            ("scale", self.scale as f64, positive),
            ("hitbox_width_factor", self.hitbox_width_factor as f64, positive),
        ];
        match checks.iter().find(|(_, value, ok)| !value.is_finite() || !ok(*value)) {
            Some(&(field, value, _)) => Err(LevelError::BadTuning { field, value }),
            None => Ok(()),
        }
    }
}

fn positive(v: f64) -> bool {
    v > 0.0
}

fn non_negative(v: f64) -> bool {
    v >= 0.0
}
