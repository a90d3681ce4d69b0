pub mod renderer;

pub use renderer::{tile_map, Renderer, TileKind};
