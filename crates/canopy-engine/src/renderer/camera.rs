use crate::core::geometry::Rect;

/// Horizontal side-scrolling camera.
/// Tracks a single scroll offset: the world X shown at the left edge of the
/// viewport.
#[derive(Debug, Clone)]
pub struct ScrollCamera {
    /// Scroll offset in world units (left edge of the viewport).
    pub x: f32,
    /// Visible width in world units.
    pub viewport_width: f32,
    /// Visible height in world units.
    pub viewport_height: f32,
    /// Fraction of the remaining distance covered per step (0.0..=1.0).
    pub follow_rate: f32,
    /// Width of the world being scrolled, if known.
    world_width: Option<f32>,
}

impl ScrollCamera {
    pub const DEFAULT_FOLLOW_RATE: f32 = 0.08;

    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            x: 0.0,
            viewport_width,
            viewport_height,
            follow_rate: Self::DEFAULT_FOLLOW_RATE,
            world_width: None,
        }
    }

    /// Set the world width used for clamping.
    pub fn set_world_width(&mut self, width: f32) {
        self.world_width = Some(width);
    }

    /// Forget the world bounds; the camera then pins to zero.
    pub fn clear_world(&mut self) {
        self.world_width = None;
        self.x = 0.0;
    }

    /// Largest legal scroll offset.
    pub fn max_x(&self) -> f32 {
        match self.world_width {
            Some(w) => (w - self.viewport_width).max(0.0),
            None => 0.0,
        }
    }

    /// Place the camera without smoothing or clamping. The next `follow`
    /// clamps it.
    pub fn place(&mut self, x: f32) {
        self.x = x;
    }

    /// Ease toward keeping `focus_x` (a world X) in the middle of the view.
    pub fn follow(&mut self, focus_x: f32) {
        if self.world_width.is_none() {
            self.x = 0.0;
            return;
        }
        let target = focus_x - self.viewport_width / 2.0;
        self.x += (target - self.x) * self.follow_rate;
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        self.x = self.x.clamp(0.0, self.max_x());
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, rect: &Rect) -> bool {
        rect.right() >= self.x
            && rect.left() <= self.x + self.viewport_width
            && rect.bottom() >= 0.0
            && rect.top() <= self.viewport_height
    }

    /// Convert a world X into a viewport X.
    pub fn to_view_x(&self, world_x: f32) -> f32 {
        world_x - self.x.floor()
    }
}
