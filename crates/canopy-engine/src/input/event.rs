/// Input event types the engine understands.
/// Generic, with no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at canvas coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at canvas coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released (DOM `keyCode`).
    KeyUp { key_code: u32 },
}

/// DOM key codes for the keys the engine maps.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
}
