//! Core game logic module for Snake
//!
//! Everything here is plain state and arithmetic with no terminal, timer or
//! rendering dependency. The host feeds [`GameScene`] frame deltas and input,
//! and reads the entities back out to draw them.

pub mod clock;
pub mod config;
pub mod direction;
pub mod field;
pub mod food;
pub mod scene;
pub mod snake;

// Re-export commonly used types
pub use clock::TickClock;
pub use config::{GameConfig, Viewport};
pub use direction::Direction;
pub use field::GameField;
pub use food::{Food, FoodKind};
pub use scene::{classify_swipe, CollisionType, GameScene, TickReport};
pub use snake::{Position, Snake};
