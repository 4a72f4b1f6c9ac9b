//! Level blueprints.
//!
//! Templates are read-only; every load deep-copies them into runtime state,
//! so reloading a level always starts from the authored geometry.

use canopy_engine::Rect;
use serde::{Deserialize, Serialize};

use crate::config::{
    PlayerTuning, GROUND_THICKNESS, MOVING_RANGE, MOVING_SPEED, STAR_SIZE, TRAMPOLINE_BOUNCE,
    TRAMPOLINE_SQUASH_FACTOR, TRAMPOLINE_SQUASH_TICKS, VIEWPORT_HEIGHT,
};
use crate::error::LevelError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Variant-specific platform fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlatformVariant {
    Static,
    Moving {
        #[serde(default = "default_range")]
        range: f32,
        /// Angular speed in radians per second.
        #[serde(default = "default_speed")]
        speed: f32,
    },
    Trampoline {
        /// Vertical velocity given on bounce; negative is up.
        #[serde(default = "default_bounce")]
        bounce_strength: f32,
        #[serde(default = "default_squash_factor")]
        squash_factor: f32,
        #[serde(default = "default_squash_ticks")]
        squash_ticks: u32,
    },
}

fn default_range() -> f32 {
    MOVING_RANGE
}

fn default_speed() -> f32 {
    MOVING_SPEED
}

fn default_bounce() -> f32 {
    TRAMPOLINE_BOUNCE
}

fn default_squash_factor() -> f32 {
    TRAMPOLINE_SQUASH_FACTOR
}

fn default_squash_ticks() -> u32 {
    TRAMPOLINE_SQUASH_TICKS
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformTemplate {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(flatten)]
    pub variant: PlatformVariant,
}

impl PlatformTemplate {
    pub fn fixed(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            variant: PlatformVariant::Static,
        }
    }

    pub fn moving(x: f32, y: f32, width: f32, height: f32, range: f32, speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            variant: PlatformVariant::Moving { range, speed },
        }
    }

    pub fn trampoline(x: f32, y: f32, width: f32, height: f32, bounce_strength: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            variant: PlatformVariant::Trampoline {
                bounce_strength,
                squash_factor: TRAMPOLINE_SQUASH_FACTOR,
                squash_ticks: TRAMPOLINE_SQUASH_TICKS,
            },
        }
    }
}

/// One stage of the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTemplate {
    /// World width; the player is kept inside `[0, width]`.
    pub width: f32,
    pub spawn: Point,
    pub platforms: Vec<PlatformTemplate>,
    #[serde(default)]
    pub collectibles: Vec<Rect>,
    pub exit: Rect,
}

impl LevelTemplate {
    /// Check that the level can be loaded. `level` is only used in errors.
    pub fn validate(&self, level: usize) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(LevelError::BadWidth { level, width: self.width });
        }
        if !(self.spawn.x.is_finite() && self.spawn.y.is_finite()) {
            return Err(LevelError::BadSpawn {
                level,
                x: self.spawn.x,
                y: self.spawn.y,
            });
        }
        for (index, platform) in self.platforms.iter().enumerate() {
            if !platform.rect.is_well_formed() {
                return Err(LevelError::BadRect { level, what: "platform", index });
            }
            match platform.variant {
                PlatformVariant::Moving { range, .. } if range < 0.0 => {
                    return Err(LevelError::NegativeRange { level, index, range });
                }
                PlatformVariant::Trampoline { bounce_strength, .. } if bounce_strength >= 0.0 => {
                    return Err(LevelError::BadBounce {
                        level,
                        index,
                        strength: bounce_strength,
                    });
                }
                _ => {}
            }
        }
        for (index, item) in self.collectibles.iter().enumerate() {
            if !item.is_well_formed() {
                return Err(LevelError::BadRect { level, what: "collectible", index });
            }
        }
        if !self.exit.is_well_formed() {
            return Err(LevelError::BadExit { level });
        }
        Ok(())
    }
}

/// The ordered list of levels plus optional physics overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<LevelTemplate>,
    #[serde(default)]
    pub tuning: Option<PlayerTuning>,
}

impl LevelPack {
    /// Parse and validate a pack from JSON.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let pack: LevelPack = serde_json::from_str(json)?;
        pack.validate()?;
        Ok(pack)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.levels.is_empty() {
            return Err(LevelError::Empty);
        }
        if let Some(tuning) = &self.tuning {
            tuning.validate()?;
        }
        self.levels
            .iter()
            .enumerate()
            .try_for_each(|(i, level)| level.validate(i))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelTemplate> {
        self.levels.get(index)
    }

    pub fn tuning(&self) -> PlayerTuning {
        self.tuning.unwrap_or_default()
    }

    /// The hand-authored levels that ship with the game.
    pub fn builtin() -> Self {
        Self {
            levels: builtin_levels(),
            tuning: None,
        }
    }
}

/// Built-in levels, laid out for the default player body.
pub fn builtin_levels() -> Vec<LevelTemplate> {
    vec![canopy_one(&PlayerTuning::default())]
}

/// A star resting `lift` units above a surface at `surface_y`.
fn star(x: f32, surface_y: f32, lift: f32) -> Rect {
    Rect::new(x, surface_y - STAR_SIZE - lift, STAR_SIZE, STAR_SIZE)
}

fn canopy_one(tuning: &PlayerTuning) -> LevelTemplate {
    let h = VIEWPORT_HEIGHT;
    let ground = h - GROUND_THICKNESS;

    // Portal sits on the final ground strip.
    let portal_width = 50.0;
    let portal_height = 100.0;
    let portal_x = 2350.0 - (portal_width - 10.0) / 2.0;

    LevelTemplate {
        width: 2400.0,
        spawn: Point {
            x: 80.0,
            y: ground - tuning.hitbox_height(),
        },
        platforms: vec![
            PlatformTemplate::fixed(0.0, ground, 400.0, GROUND_THICKNESS),
            PlatformTemplate::fixed(450.0, h - 100.0, 150.0, 20.0),
            PlatformTemplate::trampoline(300.0, h - 60.0, 70.0, 20.0, TRAMPOLINE_BOUNCE),
            PlatformTemplate::fixed(650.0, h - 160.0, 120.0, 20.0),
            PlatformTemplate::fixed(400.0, h - 220.0, 100.0, 20.0),
            PlatformTemplate::fixed(800.0, ground, 300.0, GROUND_THICKNESS),
            PlatformTemplate::trampoline(1000.0, h - 60.0, 70.0, 20.0, -22.0),
            PlatformTemplate::fixed(1150.0, h - 120.0, 130.0, 20.0),
            PlatformTemplate::fixed(1350.0, h - 180.0, 150.0, 20.0),
            PlatformTemplate::fixed(1200.0, h - 250.0, 100.0, 20.0),
            PlatformTemplate::moving(1550.0, h - 150.0, 100.0, 20.0, 150.0, 0.7),
            PlatformTemplate::fixed(1850.0, ground, 550.0, GROUND_THICKNESS),
            PlatformTemplate::fixed(2000.0, h - 200.0, 150.0, 20.0),
            PlatformTemplate::trampoline(1850.0, h - 60.0, 70.0, 20.0, -25.0),
            PlatformTemplate::fixed(2200.0, h - 140.0, 100.0, 20.0),
        ],
        collectibles: vec![
            star(200.0, ground, 30.0),
            star(480.0, h - 100.0, 10.0),
            star(750.0, h - 160.0, 20.0),
            star(430.0, h - 220.0, 10.0),
            star(850.0, ground, 70.0),
            star(1180.0, h - 120.0, 10.0),
            star(1250.0, h - 250.0, 10.0),
            star(1600.0, h - 150.0, 40.0),
            star(1900.0, ground, 80.0),
            star(2250.0, h - 140.0, 10.0),
        ],
        exit: Rect::new(portal_x, ground - portal_height, portal_width, portal_height),
    }
}
