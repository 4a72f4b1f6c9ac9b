use wasm_bindgen::prelude::*;
use canopy_engine::*;

pub mod anim;
pub mod config;
pub mod error;
pub mod game;
pub mod hud;
pub mod level;
pub mod physics;
pub mod pickup;
pub mod platform;
pub mod player;
pub mod progress;
pub mod render;
pub mod victory;
pub mod world;

pub use error::LevelError;
pub use game::Treehouse;
pub use level::{builtin_levels, LevelPack, LevelTemplate, PlatformTemplate, PlatformVariant};

canopy_web::export_game!(Treehouse, "treehouse");
