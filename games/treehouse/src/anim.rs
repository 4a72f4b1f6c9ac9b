//! Animation selection for the player sprite.
//!
//! The selected state only feeds rendering; physics never reads it.

use std::collections::HashMap;

use canopy_engine::{AnimationComponent, AnimationDef, SpriteRegion, SpriteSheetManifest};

use crate::config::WALK_THRESHOLD;

/// Visual motion state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionAnim {
    Idle,
    Walk,
    Jump,
}

impl MotionAnim {
    /// Sequence name in the sprite sheet manifest.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Jump => "jump",
        }
    }
}

/// Airborne wins over walking; walking needs more than a trickle of speed.
pub fn select(on_ground: bool, vx: f32) -> MotionAnim {
    if !on_ground {
        MotionAnim::Jump
    } else if vx.abs() > WALK_THRESHOLD {
        MotionAnim::Walk
    } else {
        MotionAnim::Idle
    }
}

/// Ticks per frame of the last-resort sequence.
const FALLBACK_DURATION: u32 = 10;

/// Build the player's animation set. Missing walk or jump sequences reuse
/// idle; a missing idle becomes a single frame at the sheet origin.
pub fn build_animation(manifest: Option<&SpriteSheetManifest>) -> AnimationComponent<MotionAnim> {
    let lookup = |state: MotionAnim| manifest.and_then(|m| m.sequence(state.name()));

    let idle = lookup(MotionAnim::Idle).unwrap_or_else(|| {
        log::warn!("player sprite has no idle sequence, using a single placeholder frame");
        AnimationDef::new(vec![SpriteRegion::new(0.0, 0.0)], FALLBACK_DURATION)
    });
    let walk = lookup(MotionAnim::Walk).unwrap_or_else(|| idle.clone());
    let jump = lookup(MotionAnim::Jump).unwrap_or_else(|| idle.clone());

    let mut sequences = HashMap::new();
    sequences.insert(MotionAnim::Idle, idle);
    sequences.insert(MotionAnim::Walk, walk);
    sequences.insert(MotionAnim::Jump, jump);
    AnimationComponent::new(sequences, MotionAnim::Idle)
}

/// Pick the state for this step, restarting on change, then advance a tick.
pub fn update(anim: &mut AnimationComponent<MotionAnim>, on_ground: bool, vx: f32) {
    anim.play_if_different(select(on_ground, vx));
    anim.tick();
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = include_str!("../assets/player.json");

    #[test]
    fn selection_priority() {
        assert_eq!(select(false, 3.0), MotionAnim::Jump);
        assert_eq!(select(true, 3.0), MotionAnim::Walk);
        assert_eq!(select(true, -0.2), MotionAnim::Walk);
        assert_eq!(select(true, 0.1), MotionAnim::Idle);
        assert_eq!(select(true, 0.0), MotionAnim::Idle);
    }

    #[test]
    fn bundled_sheet_has_all_sequences() {
        let manifest = SpriteSheetManifest::from_json(SHEET).unwrap();
        let anim = build_animation(Some(&manifest));
        assert_eq!(anim.sequences[&MotionAnim::Idle].duration, 25);
        assert_eq!(anim.sequences[&MotionAnim::Walk].frame_count(), 9);
        assert_eq!(anim.sequences[&MotionAnim::Jump].duration, 60);
        let layout = manifest.layout();
        for def in anim.sequences.values() {
            assert!(def.frames.iter().all(|f| layout.contains(*f)));
        }
    }

    #[test]
    fn missing_sequences_fall_back_to_idle() {
        let manifest = SpriteSheetManifest::from_json(
            r#"{ "path": "p.png", "sheet_width": 256, "sheet_height": 256,
                 "frame_width": 32, "part_height": 16,
                 "animations": { "idle": { "frames": [{ "x": 4, "y": 8 }], "duration": 7 },
                                 "jump": { "frames": [], "duration": 3 } } }"#,
        )
        .unwrap();
        let anim = build_animation(Some(&manifest));
        assert_eq!(anim.sequences[&MotionAnim::Walk], anim.sequences[&MotionAnim::Idle]);
        assert_eq!(anim.sequences[&MotionAnim::Jump].duration, 7);
    }

    #[test]
    fn no_manifest_gives_origin_frame() {
        let anim = build_animation(None);
        let idle = &anim.sequences[&MotionAnim::Idle];
        assert_eq!(idle.frames, vec![SpriteRegion::new(0.0, 0.0)]);
        assert_eq!(idle.duration, 10);
        assert_eq!(anim.sequences[&MotionAnim::Jump], *idle);
    }

    #[test]
    fn state_change_restarts_sequence() {
        let manifest = SpriteSheetManifest::from_json(SHEET).unwrap();
        let mut anim = build_animation(Some(&manifest));
        for _ in 0..20 {
            update(&mut anim, true, 3.0);
        }
        assert_eq!(anim.current, MotionAnim::Walk);
        assert_eq!(anim.frame_index, 2);
        update(&mut anim, false, 3.0);
        assert_eq!(anim.current, MotionAnim::Jump);
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.frame_timer, 1);
    }
}
