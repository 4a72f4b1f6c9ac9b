//! Render snapshot builder.
//!
//! Fills the engine's flat instance buffer with everything the host needs to
//! draw a frame. Geometry is in world units; the host subtracts the camera
//! offset. Nothing here mutates game state.

use canopy_engine::{RenderBuffer, RenderInstance, ScrollCamera, SheetLayout};

use crate::platform::PlatformKind;
use crate::player::{Facing, Player};
use crate::victory::VictoryShow;
use crate::world::World;

/// Draw kinds understood by the host renderer.
pub mod draw_kind {
    /// a = texture seed.
    pub const PLATFORM: f32 = 1.0;
    /// a = authored x, used as a stable texture seed.
    pub const MOVING_PLATFORM: f32 = 2.0;
    /// Drawn (squashed) rectangle.
    pub const TRAMPOLINE: f32 = 3.0;
    /// a = hue in degrees.
    pub const COLLECTIBLE: f32 = 4.0;
    /// a = hue shift in degrees.
    pub const EXIT: f32 = 5.0;
    /// a, b = sheet region; c = 1 facing right, -1 facing left.
    pub const PLAYER: f32 = 6.0;
    /// Solid stand-in for a sprite that cannot be drawn.
    pub const PLACEHOLDER: f32 = 7.0;
    /// a = hue, b = alpha.
    pub const VICTORY_STAR: f32 = 8.0;
}

fn instance(x: f32, y: f32, width: f32, height: f32, kind: f32, a: f32, b: f32, c: f32) -> RenderInstance {
    RenderInstance { x, y, width, height, kind, a, b, c }
}

/// Push the level and the player, culling what the camera cannot see.
pub fn draw_world(
    buffer: &mut RenderBuffer,
    world: &World,
    camera: &ScrollCamera,
    hue_shift: f32,
    sheet: Option<&SheetLayout>,
) {
    for platform in &world.platforms {
        let r = platform.drawn_rect();
        if !camera.is_rect_visible(&platform.rect) {
            continue;
        }
        let (kind, seed) = match platform.kind {
            PlatformKind::Static => (draw_kind::PLATFORM, r.x),
            PlatformKind::Moving(osc) => (draw_kind::MOVING_PLATFORM, osc.initial_x),
            PlatformKind::Trampoline(_) => (draw_kind::TRAMPOLINE, 0.0),
        };
        buffer.push(instance(r.x, r.y, r.width, r.height, kind, seed, 0.0, 0.0));
    }

    for item in world.collectibles.iter().filter(|c| !c.collected) {
        let r = item.rect;
        if !camera.is_rect_visible(&r) {
            continue;
        }
        let hue = (item.hue + hue_shift) % 360.0;
        buffer.push(instance(r.x, r.y, r.width, r.height, draw_kind::COLLECTIBLE, hue, 0.0, 0.0));
    }

    let exit = world.exit.rect;
    if camera.is_rect_visible(&exit) {
        buffer.push(instance(exit.x, exit.y, exit.width, exit.height, draw_kind::EXIT, hue_shift, 0.0, 0.0));
    }

    buffer.push(player_instance(&world.player, sheet));
}

/// The player's sprite, or a placeholder over the hitbox when the sheet is
/// unavailable or the frame falls outside it.
pub fn player_instance(player: &Player, sheet: Option<&SheetLayout>) -> RenderInstance {
    let frame = player.animation.current_frame();
    match (sheet, frame) {
        (Some(layout), Some(region)) if layout.contains(region) => {
            let facing = match player.facing {
                Facing::Right => 1.0,
                Facing::Left => -1.0,
            };
            instance(
                player.pos.x,
                player.pos.y,
                player.tuning.draw_width(),
                player.tuning.draw_height(),
                draw_kind::PLAYER,
                region.x,
                region.y,
                facing,
            )
        }
        _ => {
            let hb = player.hitbox();
            instance(hb.x, hb.y, hb.width, hb.height, draw_kind::PLACEHOLDER, 0.0, 0.0, 0.0)
        }
    }
}

/// Push the stars of the victory show that are still visible.
pub fn draw_victory(buffer: &mut RenderBuffer, show: &VictoryShow, hue_shift: f32) {
    for star in show.stars.iter().filter(|s| s.alpha > 0.0) {
        let half = star.size / 2.0;
        buffer.push(instance(
            star.pos.x - half,
            star.pos.y - half,
            star.size,
            star.size,
            draw_kind::VICTORY_STAR,
            (star.base_hue + hue_shift) % 360.0,
            star.alpha,
            0.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::build_animation;
    use crate::config::PlayerTuning;
    use crate::level::LevelPack;
    use canopy_engine::{Rng, SpriteSheetManifest};
    use glam::Vec2;

    fn world() -> World {
        let manifest = SpriteSheetManifest::from_json(include_str!("../assets/player.json")).unwrap();
        let player = Player::new(PlayerTuning::default(), build_animation(Some(&manifest)));
        let mut world = World::new(player);
        world.load(&LevelPack::builtin().levels[0], &mut Rng::new(5));
        world
    }

    fn camera_at(x: f32) -> ScrollCamera {
        let mut cam = ScrollCamera::new(600.0, 400.0);
        cam.set_world_width(2400.0);
        cam.place(x);
        cam
    }

    fn sheet() -> SheetLayout {
        SheetLayout {
            sheet_width: 1024.0,
            sheet_height: 1024.0,
            frame_width: 117.0,
            part_height: 68.0,
            parts: 3,
        }
    }

    #[test]
    fn offscreen_objects_are_culled() {
        let world = world();
        let mut buffer = RenderBuffer::new();
        draw_world(&mut buffer, &world, &camera_at(0.0), 0.0, Some(&sheet()));

        let platforms = buffer
            .instances
            .iter()
            .filter(|i| i.kind == draw_kind::PLATFORM || i.kind == draw_kind::TRAMPOLINE)
            .count();
        assert_eq!(platforms, 4);
        assert!(buffer.instances.iter().all(|i| i.kind != draw_kind::EXIT));
        assert_eq!(buffer.instances.last().map(|i| i.kind), Some(draw_kind::PLAYER));
    }

    #[test]
    fn collected_stars_are_not_drawn() {
        let mut world = world();
        let mut buffer = RenderBuffer::new();
        draw_world(&mut buffer, &world, &camera_at(0.0), 0.0, Some(&sheet()));
        let before = buffer.instances.iter().filter(|i| i.kind == draw_kind::COLLECTIBLE).count();

        world.collectibles[0].collected = true;
        buffer.clear();
        draw_world(&mut buffer, &world, &camera_at(0.0), 0.0, Some(&sheet()));
        let after = buffer.instances.iter().filter(|i| i.kind == draw_kind::COLLECTIBLE).count();
        assert_eq!(after + 1, before);
    }

    #[test]
    fn player_facing_and_frame_are_encoded() {
        let mut world = world();
        world.player.facing = Facing::Left;
        let inst = player_instance(&world.player, Some(&sheet()));
        assert_eq!(inst.kind, draw_kind::PLAYER);
        assert_eq!((inst.a, inst.b, inst.c), (24.0, 14.0, -1.0));
        assert!((inst.width - 81.9).abs() < 1e-3);
    }

    #[test]
    fn out_of_sheet_frame_becomes_placeholder() {
        let world = world();
        let small = SheetLayout { sheet_width: 64.0, ..sheet() };
        let inst = player_instance(&world.player, Some(&small));
        assert_eq!(inst.kind, draw_kind::PLACEHOLDER);
        assert!((inst.width - world.player.width()).abs() < 1e-3);

        let inst = player_instance(&world.player, None);
        assert_eq!(inst.kind, draw_kind::PLACEHOLDER);
    }

    #[test]
    fn faded_victory_stars_are_skipped() {
        let mut show = VictoryShow::start(Vec2::new(600.0, 400.0), 0.0, &mut Rng::new(2));
        show.stars[0].alpha = 0.0;
        let mut buffer = RenderBuffer::new();
        draw_victory(&mut buffer, &show, 10.0);
        assert_eq!(buffer.instance_count(), 9);
        assert_eq!(buffer.instances[0].a, 46.0);
    }
}
