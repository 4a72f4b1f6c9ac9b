//! Player integration and platform collision.
//!
//! One call to [`step_player`] advances the player by exactly one fixed step.
//! Collision is discrete: positions jump by the full velocity each step and
//! overlaps are resolved afterwards, platform by platform in list order.

use canopy_engine::InputState;

use crate::config::{CEILING_REBOUND, CONTACT_TOLERANCE};
use crate::platform::{Platform, PlatformKind};
use crate::player::{Facing, Player};

/// What the player touched during a step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Last solid platform landed on.
    pub landed_on: Option<usize>,
    /// Last trampoline bounced on.
    pub bounced_on: Option<usize>,
    pub hit_ceiling: bool,
}

/// Leave the platform underfoot. Landings on solid platforms are skipped
/// until the drop window closes. Returns true if a drop started.
pub fn begin_drop_through(player: &mut Player, now_ms: f64) -> bool {
    if !player.on_ground || player.is_jumping {
        return false;
    }
    player.on_ground = false;
    player.is_jumping = true;
    player.vel.y = player.tuning.drop_speed;
    player.ignore_platforms_until_ms = Some(now_ms + player.tuning.drop_window_ms);
    true
}

pub fn integrate_horizontal(player: &mut Player, input: &InputState) {
    let t = player.tuning;
    if input.left {
        player.vel.x -= t.acceleration;
        player.facing = Facing::Left;
    } else if input.right {
        player.vel.x += t.acceleration;
        player.facing = Facing::Right;
    } else {
        player.vel.x *= t.friction;
    }
    if player.vel.x.abs() < t.stop_epsilon {
        player.vel.x = 0.0;
    }
    player.vel.x = player.vel.x.clamp(-t.max_speed, t.max_speed);
    player.pos.x += player.vel.x;
}

/// Holding up during a jump stretches it, for a limited number of steps.
pub fn apply_jump_hold(player: &mut Player, up_held: bool) {
    if up_held && player.is_jumping && player.jump_hold_frames < player.tuning.max_jump_hold_frames {
        player.vel.y -= player.tuning.jump_hold_force;
        player.jump_hold_frames += 1;
    }
}

/// Gravity has no terminal velocity. Grounding is cleared here and only
/// restored by a landing in [`resolve_platforms`].
pub fn integrate_vertical(player: &mut Player) {
    player.vel.y += player.tuning.gravity;
    player.pos.y += player.vel.y;
    player.on_ground = false;
}

/// Keep the hitbox inside `[0, width]` horizontally.
pub fn clamp_to_world(player: &mut Player, width: f32) {
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = 0.0;
    }
    let max_x = width - player.width();
    if player.pos.x > max_x {
        player.pos.x = max_x;
        player.vel.x = 0.0;
    }
}

/// Advance moving platforms to `now_ms` and resolve overlaps against each
/// platform in order. Each check sees the player as left by the previous one.
pub fn resolve_platforms(player: &mut Player, platforms: &mut [Platform], now_ms: f64) -> StepReport {
    let mut report = StepReport::default();

    for (index, platform) in platforms.iter_mut().enumerate() {
        let delta = platform.advance(now_ms);
        let rect = platform.rect;
        let hitbox = player.hitbox();
        if !hitbox.overlaps(&rect) {
            continue;
        }

        let vy = player.vel.y;
        let vx = player.vel.x;
        let bounce = platform.bounce_strength();
        let tolerance = if bounce.is_some() { rect.height } else { CONTACT_TOLERANCE };

        let was_above = hitbox.bottom() - vy <= rect.top() + tolerance;
        let was_below = hitbox.top() - vy >= rect.bottom() - CONTACT_TOLERANCE;

        if vy >= 0.0 && was_above && (bounce.is_some() || !player.is_dropping(now_ms)) {
            match platform.kind {
                PlatformKind::Trampoline(trampoline) => {
                    player.bounce(trampoline.bounce_strength);
                    platform.trigger_squash();
                    report.bounced_on = Some(index);
                }
                PlatformKind::Moving(_) => {
                    player.land_on(rect.top());
                    player.pos.x += delta;
                    report.landed_on = Some(index);
                }
                PlatformKind::Static => {
                    player.land_on(rect.top());
                    report.landed_on = Some(index);
                }
            }
        } else if vy < 0.0 && was_below {
            player.hit_ceiling(rect.bottom(), CEILING_REBOUND);
            report.hit_ceiling = true;
        } else if !player.on_ground || bounce.is_some_and(|strength| vy < strength * 0.5) {
            if vx > 0.0 && hitbox.right() - vx <= rect.left() {
                player.pos.x = rect.left() - player.width();
                player.vel.x = 0.0;
            } else if vx < 0.0 && hitbox.left() - vx >= rect.right() {
                player.pos.x = rect.right();
                player.vel.x = 0.0;
            }
        }
    }

    report
}

/// One full physics step for the player.
pub fn step_player(
    player: &mut Player,
    input: &InputState,
    platforms: &mut [Platform],
    world_width: f32,
    now_ms: f64,
) -> StepReport {
    if input.down {
        begin_drop_through(player, now_ms);
    }
    integrate_horizontal(player, input);
    apply_jump_hold(player, input.up);
    integrate_vertical(player);
    clamp_to_world(player, world_width);
    resolve_platforms(player, platforms, now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::build_animation;
    use crate::config::PlayerTuning;
    use crate::level::PlatformTemplate;
    use canopy_engine::Rng;
    use glam::Vec2;

    const EPS: f32 = 1e-3;
    const STEP_MS: f64 = 1000.0 / 60.0;

    fn player() -> Player {
        Player::new(PlayerTuning::default(), build_animation(None))
    }

    fn standing_on(platform: &Platform, x: f32) -> Player {
        let mut p = player();
        p.pos.x = x;
        p.land_on(platform.rect.top());
        p
    }

    fn holding(left: bool, right: bool) -> InputState {
        InputState { left, right, up: false, down: false }
    }

    #[test]
    fn friction_decays_to_exact_zero_without_sign_change() {
        let mut p = player();
        p.vel.x = 3.8;
        let idle = InputState::default();
        let mut last = p.vel.x;
        for _ in 0..60 {
            integrate_horizontal(&mut p, &idle);
            assert!(p.vel.x >= 0.0);
            assert!(p.vel.x <= last);
            last = p.vel.x;
        }
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn speed_never_exceeds_max() {
        let mut p = player();
        let mut rng = Rng::new(7);
        let mut platforms: Vec<Platform> = Vec::new();
        for step in 0..2000 {
            let input = InputState {
                left: rng.next_int(3) == 0,
                right: rng.next_int(2) == 0,
                up: rng.next_int(4) == 0,
                down: false,
            };
            step_player(&mut p, &input, &mut platforms, 1.0e6, step as f64 * STEP_MS);
            assert!(p.vel.x.abs() <= p.tuning.max_speed, "step {}: vx = {}", step, p.vel.x);
        }
    }

    #[test]
    fn held_direction_sets_facing() {
        let mut p = player();
        integrate_horizontal(&mut p, &holding(true, false));
        assert_eq!(p.facing, Facing::Left);
        assert!((p.vel.x + 0.35).abs() < EPS);
        integrate_horizontal(&mut p, &holding(false, true));
        assert_eq!(p.facing, Facing::Right);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn landing_on_static_platform_snaps_to_top() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::fixed(0.0, 360.0, 400.0, 40.0))];
        let mut p = player();
        p.is_jumping = true;
        p.pos = Vec2::new(100.0, 359.0 - p.height());
        p.vel.y = 2.0;

        let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 1000.0);
        assert_eq!(report.landed_on, Some(0));
        assert!(p.on_ground);
        assert!(!p.is_jumping);
        assert_eq!(p.vel.y, 0.0);
        assert!((p.bottom() - 360.0).abs() < EPS);
    }

    #[test]
    fn fast_fall_past_tolerance_does_not_land() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::fixed(0.0, 360.0, 400.0, 40.0))];
        let mut p = player();
        p.pos = Vec2::new(100.0, 364.0 - p.height());
        p.vel.y = 2.0;
        let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 1000.0);
        assert_eq!(report.landed_on, None);
        assert!(!p.on_ground);
    }

    #[test]
    fn trampoline_bounces_every_time_even_mid_squash() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::trampoline(300.0, 340.0, 70.0, 20.0, -20.0))];
        let mut p = player();

        for attempt in 0..3 {
            p.pos = Vec2::new(310.0, 338.0 - p.height());
            p.vel.y = 5.0;
            let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 1000.0 + attempt as f64);
            assert_eq!(report.bounced_on, Some(0));
            assert_eq!(p.vel.y, -20.0);
            assert!(!p.on_ground);
            assert!(p.is_jumping);
            platforms[0].tick_squash();
        }
        match platforms[0].kind {
            PlatformKind::Trampoline(t) => assert!(t.squash.active),
            _ => unreachable!(),
        }
    }

    #[test]
    fn trampoline_ignores_drop_window() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::trampoline(300.0, 340.0, 70.0, 20.0, -22.0))];
        let mut p = player();
        p.pos = Vec2::new(310.0, 338.0 - p.height());
        p.vel.y = 5.0;
        p.ignore_platforms_until_ms = Some(5000.0);
        step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 1000.0);
        assert_eq!(p.vel.y, -22.0);
        assert_eq!(p.ignore_platforms_until_ms, None);
    }

    #[test]
    fn moving_platform_carries_rider_by_its_delta() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::moving(1550.0, 250.0, 100.0, 20.0, 150.0, 0.7))];
        platforms[0].advance(2000.0);
        let mut p = standing_on(&platforms[0], platforms[0].rect.x + 20.0);

        let mut now = 2000.0;
        for _ in 0..30 {
            let before_platform = platforms[0].rect.x;
            let before_player = p.pos.x;
            now += STEP_MS;
            let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, now);
            let delta = platforms[0].rect.x - before_platform;
            assert_eq!(report.landed_on, Some(0));
            assert!(p.on_ground);
            assert!((p.pos.x - before_player - delta).abs() < EPS);
        }
    }

    #[test]
    fn drop_through_sets_velocity_and_deadline() {
        let ground = Platform::from_template(&PlatformTemplate::fixed(0.0, 360.0, 400.0, 40.0));
        let mut p = standing_on(&ground, 100.0);
        assert!(begin_drop_through(&mut p, 1000.0));
        assert!(!p.on_ground);
        assert!(p.is_jumping);
        assert_eq!(p.vel.y, 3.0);
        assert_eq!(p.ignore_platforms_until_ms, Some(1050.0));
        assert!(!begin_drop_through(&mut p, 1001.0));
    }

    #[test]
    fn drop_through_passes_the_platform_beneath() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::fixed(0.0, 360.0, 400.0, 40.0))];
        let mut p = standing_on(&platforms[0], 100.0);
        let down = InputState { down: true, ..InputState::default() };

        let report = step_player(&mut p, &down, &mut platforms, 2400.0, 1000.0);
        assert_eq!(report.landed_on, None);
        assert!(!p.on_ground);
        assert!((p.vel.y - 3.5).abs() < EPS);
        assert!(p.hitbox().overlaps(&platforms[0].rect));

        let report = step_player(&mut p, &down, &mut platforms, 2400.0, 1000.0 + STEP_MS);
        assert_eq!(report.landed_on, None);
        assert!(p.bottom() > 360.0 + CONTACT_TOLERANCE);
    }

    #[test]
    fn landing_resumes_only_after_drop_window_closes() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::fixed(0.0, 360.0, 400.0, 40.0))];
        let mut p = standing_on(&platforms[0], 100.0);
        assert!(begin_drop_through(&mut p, 1000.0));

        let descend = |p: &mut Player| {
            p.pos = Vec2::new(100.0, 359.0 - p.height());
            p.vel.y = 2.0;
        };

        descend(&mut p);
        let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 1050.0);
        assert_eq!(report.landed_on, None);
        assert!(!p.on_ground);
        assert_eq!(p.ignore_platforms_until_ms, Some(1050.0));

        descend(&mut p);
        let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 1051.0);
        assert_eq!(report.landed_on, Some(0));
        assert!(p.on_ground);
        assert_eq!(p.vel.y, 0.0);
        assert!((p.bottom() - 360.0).abs() < EPS);
        assert_eq!(p.ignore_platforms_until_ms, None);
    }

    #[test]
    fn ceiling_stops_ascent() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::fixed(400.0, 180.0, 100.0, 20.0))];
        let mut p = player();
        p.is_jumping = true;
        p.pos = Vec2::new(420.0, 205.0);
        p.vel.y = -8.0;

        let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 1000.0);
        assert!(report.hit_ceiling);
        assert!((p.pos.y - 200.0).abs() < EPS);
        assert!((p.vel.y - 0.1).abs() < EPS);
    }

    #[test]
    fn airborne_player_is_pushed_out_of_platform_side() {
        let mut platforms = vec![Platform::from_template(&PlatformTemplate::fixed(650.0, 240.0, 120.0, 20.0))];
        let mut p = player();
        p.pos = Vec2::new(648.0 - p.width(), 200.0);
        p.vel = Vec2::new(3.8, 1.0);

        step_player(&mut p, &holding(false, true), &mut platforms, 2400.0, 1000.0);
        assert!((p.hitbox().right() - 650.0).abs() < EPS);
        assert_eq!(p.vel.x, 0.0);

        let mut p = player();
        p.pos = Vec2::new(772.0, 200.0);
        p.vel = Vec2::new(-3.8, 1.0);
        step_player(&mut p, &holding(true, false), &mut platforms, 2400.0, 1000.0);
        assert!((p.pos.x - 770.0).abs() < EPS);
        assert_eq!(p.vel.x, 0.0);
    }

    // Pinned: a grounded player is only pushed by a trampoline side while
    // moving up faster than half its bounce strength. Walking into a raised
    // trampoline therefore passes through it.
    #[test]
    fn grounded_player_is_not_pushed_by_trampoline_side() {
        let mut platforms = vec![
            Platform::from_template(&PlatformTemplate::fixed(0.0, 360.0, 1000.0, 40.0)),
            Platform::from_template(&PlatformTemplate::trampoline(300.0, 300.0, 70.0, 20.0, -20.0)),
        ];
        let mut p = standing_on(&platforms[0], 299.0 - PlayerTuning::default().hitbox_width());
        p.vel.x = 2.0;

        let report = step_player(&mut p, &holding(false, true), &mut platforms, 2400.0, 1000.0);
        assert_eq!(report.landed_on, Some(0));
        assert_eq!(report.bounced_on, None);
        assert!(p.hitbox().right() > 300.0);
        assert!(p.vel.x > 0.0);

        let mut p = player();
        p.pos = Vec2::new(299.0 - p.width(), 200.0);
        p.vel = Vec2::new(2.0, 1.0);
        step_player(&mut p, &holding(false, true), &mut platforms[1..], 2400.0, 1000.0);
        assert!((p.hitbox().right() - 300.0).abs() < EPS);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn world_bounds_stop_the_player() {
        let mut p = player();
        p.pos.x = 1.0;
        p.vel.x = -3.0;
        step_player(&mut p, &holding(true, false), &mut [], 500.0, 0.0);
        assert_eq!(p.pos.x, 0.0);
        assert_eq!(p.vel.x, 0.0);

        p.pos.x = 500.0 - p.width() - 1.0;
        p.vel.x = 3.0;
        step_player(&mut p, &holding(false, true), &mut [], 500.0, 0.0);
        assert!((p.hitbox().right() - 500.0).abs() < EPS);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn holding_up_extends_a_jump_for_limited_steps() {
        let mut p = player();
        p.on_ground = true;
        assert!(p.try_jump());
        let up = InputState { up: true, ..InputState::default() };

        step_player(&mut p, &up, &mut [], 2400.0, 0.0);
        assert!((p.vel.y - (-13.0 - 0.25 + 0.5)).abs() < EPS);
        for _ in 0..30 {
            step_player(&mut p, &up, &mut [], 2400.0, 0.0);
        }
        assert_eq!(p.jump_hold_frames, 15);
    }

    #[test]
    fn platforms_resolve_in_list_order() {
        let upper = PlatformTemplate::fixed(0.0, 360.0, 400.0, 40.0);
        let lower = PlatformTemplate::fixed(0.0, 361.0, 400.0, 40.0);
        let start = |p: &mut Player| {
            p.pos = Vec2::new(100.0, 359.0 - p.height());
            p.vel.y = 2.0;
        };

        // The upper floor snaps the player clear of the lower one.
        let mut platforms = vec![Platform::from_template(&upper), Platform::from_template(&lower)];
        let mut p = player();
        start(&mut p);
        let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 0.0);
        assert_eq!(report.landed_on, Some(0));
        assert!((p.bottom() - 360.0).abs() < EPS);

        // Reversed, the lower floor lands first and the upper one then
        // lifts the already-grounded player.
        let mut platforms = vec![Platform::from_template(&lower), Platform::from_template(&upper)];
        let mut p = player();
        start(&mut p);
        let report = step_player(&mut p, &InputState::default(), &mut platforms, 2400.0, 0.0);
        assert_eq!(report.landed_on, Some(1));
        assert!((p.bottom() - 360.0).abs() < EPS);
    }
}
