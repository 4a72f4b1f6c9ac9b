use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::components::animation::AnimationDef;
use crate::components::sprite::{SheetLayout, SpriteRegion};

/// Sprite sheet manifest: the sheet's size, how frames are cut, and the named
/// frame sequences. Loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSheetManifest {
    /// Relative path to the image (e.g., "player_spritesheet.png").
    pub path: String,
    /// Sheet size in pixels.
    pub sheet_width: f32,
    pub sheet_height: f32,
    /// Width of one frame in pixels.
    pub frame_width: f32,
    /// Height of one vertical part of a frame in pixels.
    pub part_height: f32,
    /// Number of stacked parts per frame (default: 1).
    #[serde(default = "default_parts")]
    pub parts: u32,
    /// Named sequences: name → frames + hold duration.
    #[serde(default)]
    pub animations: HashMap<String, SequenceDescriptor>,
}

/// Describes one frame sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceDescriptor {
    pub frames: Vec<SpriteRegion>,
    /// Ticks per frame.
    pub duration: u32,
}

fn default_parts() -> u32 {
    1
}

impl SpriteSheetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn layout(&self) -> SheetLayout {
        SheetLayout {
            sheet_width: self.sheet_width,
            sheet_height: self.sheet_height,
            frame_width: self.frame_width,
            part_height: self.part_height,
            parts: self.parts,
        }
    }

    /// Named sequence as an animation definition. Missing or empty
    /// sequences yield `None`.
    pub fn sequence(&self, name: &str) -> Option<AnimationDef> {
        self.animations
            .get(name)
            .filter(|seq| !seq.frames.is_empty())
            .map(|seq| AnimationDef::new(seq.frames.clone(), seq.duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sequences() {
        let json = r#"{
            "path": "hero.png",
            "sheet_width": 256, "sheet_height": 128,
            "frame_width": 32, "part_height": 16, "parts": 2,
            "animations": {
                "idle": { "frames": [{ "x": 0, "y": 0 }], "duration": 10 },
                "walk": { "frames": [{ "x": 32, "y": 0 }, { "x": 64, "y": 0 }], "duration": 4 }
            }
        }"#;
        let manifest = SpriteSheetManifest::from_json(json).unwrap();
        assert_eq!(manifest.animations.len(), 2);
        let walk = manifest.sequence("walk").unwrap();
        assert_eq!(walk.frame_count(), 2);
        assert_eq!(walk.duration, 4);
        assert_eq!(manifest.layout().frame_height(), 32.0);
    }

    #[test]
    fn empty_or_missing_sequences_are_none() {
        let json = r#"{
            "path": "hero.png",
            "sheet_width": 64, "sheet_height": 64,
            "frame_width": 32, "part_height": 32,
            "animations": { "jump": { "frames": [], "duration": 60 } }
        }"#;
        let manifest = SpriteSheetManifest::from_json(json).unwrap();
        assert_eq!(manifest.parts, 1);
        assert!(manifest.sequence("jump").is_none());
        assert!(manifest.sequence("walk").is_none());
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        assert!(SpriteSheetManifest::from_json("{ \"path\": 3 }").is_err());
    }
}
