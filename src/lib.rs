//! Golden Snake - a terminal Snake game with regular and golden apples
//!
//! This library provides:
//! - Core game logic (game module): field, snake, apples, tick loop
//! - Key and mouse-swipe input mapping (input module)
//! - TUI rendering (render module)
//! - Session counters (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
