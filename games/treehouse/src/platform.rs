//! Runtime platforms.

use canopy_engine::Rect;

use crate::level::{PlatformTemplate, PlatformVariant};

/// Horizontal oscillation of a moving platform around its authored x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub initial_x: f32,
    pub range: f32,
    /// Radians per second of wall-clock time.
    pub speed: f32,
    /// Actual x after the previous advance.
    pub prev_x: f32,
}

impl Oscillation {
    /// Position at wall-clock `now_ms`.
    pub fn x_at(&self, now_ms: f64) -> f32 {
        let phase = now_ms * 0.001 * self.speed as f64;
        (self.initial_x as f64 + phase.sin() * self.range as f64) as f32
    }
}

/// Visual squash played after a bounce. Never touches collision geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Squash {
    /// Drawn height at full squash, as a fraction of the real height.
    pub factor: f32,
    /// Length of the squash in steps.
    pub duration: u32,
    pub timer: u32,
    pub active: bool,
}

impl Squash {
    fn new(factor: f32, duration: u32) -> Self {
        Self {
            factor,
            duration,
            timer: 0,
            active: false,
        }
    }

    pub fn trigger(&mut self) {
        self.active = true;
        self.timer = 0;
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.timer += 1;
        if self.timer >= self.duration {
            self.active = false;
            self.timer = 0;
        }
    }

    /// How far the top edge is pushed down right now.
    pub fn offset(&self, height: f32) -> f32 {
        if !self.active || self.duration == 0 {
            return 0.0;
        }
        let progress = (self.timer as f32 / self.duration as f32 * std::f32::consts::PI).sin();
        height * (1.0 - self.factor) * progress
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trampoline {
    /// Vertical velocity given on bounce (negative).
    pub bounce_strength: f32,
    pub squash: Squash,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformKind {
    Static,
    Moving(Oscillation),
    Trampoline(Trampoline),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    /// Fresh runtime state from a template: oscillation anchored at the
    /// authored x, squash idle.
    pub fn from_template(template: &PlatformTemplate) -> Self {
        let rect = template.rect;
        let kind = match template.variant {
            PlatformVariant::Static => PlatformKind::Static,
            PlatformVariant::Moving { range, speed } => PlatformKind::Moving(Oscillation {
                initial_x: rect.x,
                range,
                speed,
                prev_x: rect.x,
            }),
            PlatformVariant::Trampoline {
                bounce_strength,
                squash_factor,
                squash_ticks,
            } => PlatformKind::Trampoline(Trampoline {
                bounce_strength,
                squash: Squash::new(squash_factor, squash_ticks),
            }),
        };
        Self { rect, kind }
    }

    pub fn bounce_strength(&self) -> Option<f32> {
        match self.kind {
            PlatformKind::Trampoline(t) => Some(t.bounce_strength),
            _ => None,
        }
    }

    /// Move a moving platform to its position at `now_ms`. Returns how far it
    /// moved since the previous advance; zero for other kinds.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let PlatformKind::Moving(osc) = &mut self.kind else {
            return 0.0;
        };
        let x = osc.x_at(now_ms);
        let delta = x - osc.prev_x;
        osc.prev_x = x;
        self.rect.x = x;
        delta
    }

    pub fn trigger_squash(&mut self) {
        if let PlatformKind::Trampoline(t) = &mut self.kind {
            t.squash.trigger();
        }
    }

    pub fn tick_squash(&mut self) {
        if let PlatformKind::Trampoline(t) = &mut self.kind {
            t.squash.tick();
        }
    }

    /// Rectangle as drawn. Squashed trampolines keep their bottom edge.
    pub fn drawn_rect(&self) -> Rect {
        match self.kind {
            PlatformKind::Trampoline(t) => {
                let dip = t.squash.offset(self.rect.height);
                Rect::new(self.rect.x, self.rect.y + dip, self.rect.width, self.rect.height - dip)
            }
            _ => self.rect,
        }
    }
}
