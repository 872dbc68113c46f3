//! Isometric tile map viewer: coordinate transforms, a zooming camera, tile picking, view
//! culling, and a frame loop that turns input into draw calls.
//!
//! Everything here is headless. The SDL window lives in the `isoview` binary behind the `sdl`
//! feature.

pub mod assets;
pub mod camera;
pub mod config;
pub mod cull;
pub mod error;
pub mod game;
pub mod map;
pub mod math;
pub mod misc;
pub mod picker;
pub mod render;
pub mod sprites;
pub mod transform;

pub use camera::{Camera, FocusMode};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use game::{GameState, InputEvent, InputSnapshot, MoveKeys};
pub use map::{TileKind, TileMap};
pub use transform::TileIndex;
