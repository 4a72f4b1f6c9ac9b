//! Animation component for sprite frame sequences.
//!
//! Frames advance on simulation ticks, not seconds: each sequence holds every
//! frame for a fixed number of steps and wraps around.

use std::collections::HashMap;
use std::hash::Hash;

use crate::components::sprite::SpriteRegion;

/// Definition of a single animation sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    /// Sheet regions, played in order and looped.
    pub frames: Vec<SpriteRegion>,
    /// Ticks each frame is held for.
    pub duration: u32,
}

impl AnimationDef {
    pub fn new(frames: Vec<SpriteRegion>, duration: u32) -> Self {
        Self { frames, duration }
    }

    /// Get the number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Animation state keyed by a game-defined state type.
#[derive(Debug, Clone)]
pub struct AnimationComponent<S> {
    /// Sequences available for this entity.
    pub sequences: HashMap<S, AnimationDef>,
    /// Currently playing state.
    pub current: S,
    /// Current frame index.
    pub frame_index: usize,
    /// Ticks accumulated in the current frame.
    pub frame_timer: u32,
}

impl<S: Copy + Eq + Hash> AnimationComponent<S> {
    pub fn new(sequences: HashMap<S, AnimationDef>, initial: S) -> Self {
        Self {
            sequences,
            current: initial,
            frame_index: 0,
            frame_timer: 0,
        }
    }

    /// Switch to `state` and restart from its first frame.
    pub fn play(&mut self, state: S) {
        self.current = state;
        self.frame_index = 0;
        self.frame_timer = 0;
    }

    /// Switch only if `state` differs from the current one. Returns true on a
    /// switch.
    pub fn play_if_different(&mut self, state: S) -> bool {
        if self.current != state {
            self.play(state);
            true
        } else {
            false
        }
    }

    /// Get current animation definition.
    pub fn current_def(&self) -> Option<&AnimationDef> {
        self.sequences.get(&self.current)
    }

    /// Region for the current frame, if the sequence has any frames.
    pub fn current_frame(&self) -> Option<SpriteRegion> {
        let def = self.current_def()?;
        if def.frames.is_empty() {
            return None;
        }
        def.frames.get(self.frame_index % def.frames.len()).copied()
    }

    /// Advance by one tick. Returns true if the frame changed.
    pub fn tick(&mut self) -> bool {
        self.frame_timer += 1;
        let Some(def) = self.sequences.get(&self.current) else {
            return false;
        };
        if def.frames.is_empty() || self.frame_timer < def.duration {
            return false;
        }
        self.frame_timer = 0;
        self.frame_index += 1;
        if self.frame_index >= def.frames.len() {
            self.frame_index = 0;
        }
        true
    }
}
