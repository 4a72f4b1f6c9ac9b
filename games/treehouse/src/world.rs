//! Mutable per-level state, rebuilt from a template on every load.

use canopy_engine::{Rect, Rng};
use glam::Vec2;

use crate::level::LevelTemplate;
use crate::pickup::{Collectible, ExitPortal};
use crate::platform::Platform;
use crate::player::Player;

#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub exit: ExitPortal,
    pub width: f32,
    pub spawn: Vec2,
}

impl World {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            platforms: Vec::new(),
            collectibles: Vec::new(),
            exit: ExitPortal { rect: Rect::default() },
            width: 0.0,
            spawn: Vec2::ZERO,
        }
    }

    /// Replace all runtime state with fresh copies of `level`. Stars get a
    /// new random hue each time.
    pub fn load(&mut self, level: &LevelTemplate, rng: &mut Rng) {
        self.width = level.width;
        self.spawn = Vec2::new(level.spawn.x, level.spawn.y);
        self.player.reset_to(self.spawn);
        self.platforms = level.platforms.iter().map(Platform::from_template).collect();
        self.collectibles = level
            .collectibles
            .iter()
            .map(|rect| Collectible::new(*rect, rng.range_f32(0.0, 360.0)))
            .collect();
        self.exit = ExitPortal { rect: level.exit };
    }

    pub fn collected_count(&self) -> usize {
        self.collectibles.iter().filter(|c| c.collected).count()
    }

    pub fn total_collectibles(&self) -> usize {
        self.collectibles.len()
    }

    pub fn all_collected(&self) -> bool {
        self.collectibles.iter().all(|c| c.collected)
    }
}
