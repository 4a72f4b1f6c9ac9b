//! The closing star show played after the last level.

use std::f32::consts::{FRAC_PI_2, TAU};

use canopy_engine::Rng;
use glam::Vec2;

use crate::config::STAR_SIZE;

pub const STAR_COUNT: usize = 10;
/// Time each star spends orbiting before it starts to rise.
pub const ORBIT_MS: f64 = 7000.0;
/// Fade-out time while rising.
pub const ASCEND_MS: f64 = 4000.0;
/// Start delay between consecutive stars.
pub const STAGGER_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarPhase {
    Orbiting,
    Ascending,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VictoryStar {
    pub base_hue: f32,
    pub size: f32,
    pub angle: f32,
    pub radius: f32,
    /// Centre in viewport coordinates.
    pub pos: Vec2,
    pub alpha: f32,
    pub phase: StarPhase,
    /// Radians per step.
    pub orbit_speed: f32,
    /// Units per step.
    pub ascend_speed: f32,
    pub delay_ms: f64,
}

#[derive(Debug, Clone)]
pub struct VictoryShow {
    pub stars: Vec<VictoryStar>,
    center: Vec2,
    started_at_ms: f64,
    active: bool,
}

impl VictoryShow {
    pub fn start(viewport: Vec2, now_ms: f64, rng: &mut Rng) -> Self {
        let center = viewport / 2.0;
        let base_radius = viewport.x.min(viewport.y) / 2.8;
        let step = TAU / STAR_COUNT as f32;

        let stars = (0..STAR_COUNT)
            .map(|i| VictoryStar {
                base_hue: (i as f32 * 360.0 / STAR_COUNT as f32) % 360.0,
                size: STAR_SIZE * 1.2,
                angle: step * i as f32 + FRAC_PI_2,
                radius: base_radius + rng.range_f32(-0.5, 0.5) * base_radius * 0.2,
                pos: center,
                alpha: 1.0,
                phase: StarPhase::Orbiting,
                orbit_speed: rng.range_f32(0.01, 0.02),
                ascend_speed: rng.range_f32(1.0, 2.0),
                delay_ms: i as f64 * STAGGER_MS,
            })
            .collect();

        Self {
            stars,
            center,
            started_at_ms: now_ms,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance every started star by one step. The show ends once every star
    /// has faded.
    pub fn update(&mut self, now_ms: f64) {
        if !self.active {
            return;
        }
        let elapsed = now_ms - self.started_at_ms;
        let mut all_faded = true;

        for star in &mut self.stars {
            if star.alpha <= 0.0 {
                continue;
            }
            all_faded = false;
            if elapsed < star.delay_ms {
                continue;
            }
            let star_elapsed = elapsed - star.delay_ms;

            match star.phase {
                StarPhase::Orbiting => {
                    star.angle += star.orbit_speed;
                    star.pos = self.center + Vec2::from_angle(star.angle) * star.radius;
                    if star_elapsed > ORBIT_MS {
                        star.phase = StarPhase::Ascending;
                    }
                }
                StarPhase::Ascending => {
                    star.pos.y -= star.ascend_speed;
                    star.radius += 0.3;
                    star.pos.x = self.center.x + star.angle.cos() * star.radius;
                    let progress = ((star_elapsed - ORBIT_MS) / ASCEND_MS) as f32;
                    star.alpha = (1.0 - progress).max(0.0);
                    if star.pos.y < -star.size {
                        star.alpha = 0.0;
                    }
                }
            }
        }

        if all_faded {
            self.active = false;
        }
    }
}
