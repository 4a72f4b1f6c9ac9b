pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::GameEvent;
pub use core::geometry::Rect;
pub use core::rng::Rng;
pub use core::time::FixedTimestep;
pub use components::animation::{AnimationComponent, AnimationDef};
pub use components::sprite::{SheetLayout, SpriteRegion};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::ScrollCamera;
pub use input::event::{keys, InputEvent};
pub use input::state::{Action, InputState};
pub use assets::manifest::SpriteSheetManifest;
pub use systems::message::{ExpiringMessage, MessageBoard};
