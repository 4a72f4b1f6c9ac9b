use canopy_engine::Rect;

/// A star waiting to be picked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub rect: Rect,
    pub collected: bool,
    /// Cosmetic base hue in degrees.
    pub hue: f32,
}

impl Collectible {
    pub fn new(rect: Rect, hue: f32) -> Self {
        Self {
            rect,
            collected: false,
            hue,
        }
    }

    /// Mark collected if `hitbox` overlaps. Returns true only on the step the
    /// flag flips.
    pub fn try_collect(&mut self, hitbox: &Rect) -> bool {
        if self.collected || !self.rect.overlaps(hitbox) {
            return false;
        }
        self.collected = true;
        true
    }
}

/// Portal to the next level; only usable once every star is collected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitPortal {
    pub rect: Rect,
}

impl ExitPortal {
    pub fn reached(&self, hitbox: &Rect, all_collected: bool) -> bool {
        all_collected && self.rect.overlaps(hitbox)
    }
}
