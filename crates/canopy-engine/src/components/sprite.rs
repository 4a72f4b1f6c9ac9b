use serde::{Deserialize, Serialize};

/// Top-left corner of a frame inside a sprite sheet, in sheet pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpriteRegion {
    pub x: f32,
    pub y: f32,
}

impl SpriteRegion {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How frames are cut out of a sheet.
///
/// A frame is `frame_width` wide and made of `parts` vertically stacked
/// strips of `part_height` each, starting at the region's corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub sheet_width: f32,
    pub sheet_height: f32,
    pub frame_width: f32,
    pub part_height: f32,
    pub parts: u32,
}

impl SheetLayout {
    /// Full height of one frame.
    pub fn frame_height(&self) -> f32 {
        self.part_height * self.parts as f32
    }

    /// Whether every part of the frame at `region` lies inside the sheet.
    pub fn contains(&self, region: SpriteRegion) -> bool {
        region.x >= 0.0
            && region.y >= 0.0
            && region.x + self.frame_width <= self.sheet_width
            && region.y + self.frame_height() <= self.sheet_height
    }
}
