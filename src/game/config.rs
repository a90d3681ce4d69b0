use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest accepted viewport side, in pixels after scaling
pub const MAX_VIEWPORT_EXTENT: u32 = 1 << 20;

/// Size of the drawing surface in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scale both dimensions by a device pixel ratio
    pub fn scaled(&self, pixel_ratio: f32) -> Self {
        Self {
            width: (self.width as f32 * pixel_ratio).round() as u32,
            height: (self.height as f32 * pixel_ratio).round() as u32,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(480, 640)
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical viewport the field is centred in
    pub viewport: Viewport,
    /// Device pixel ratio applied on top of the viewport
    pub pixel_ratio: f32,
    /// Number of grid rows
    pub rows: u32,
    /// Number of grid columns
    pub cols: u32,
    /// Time between two snake moves, in milliseconds
    pub move_interval_ms: u64,
    /// Chance per tick that a golden apple appears while none exists
    pub golden_apple_chance: f64,
    /// Minimum drag length, in pixels, for a swipe to count
    pub min_swipe_distance: f32,
    /// How much the dominant axis must outweigh the other one
    pub swipe_angle_tolerance: f32,
    /// Fixed RNG seed; entropy is used when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            pixel_ratio: 1.0,
            rows: 15,
            cols: 11,
            move_interval_ms: 200,
            golden_apple_chance: 0.1,
            min_swipe_distance: 50.0,
            swipe_angle_tolerance: 0.5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// The viewport after applying the pixel ratio
    pub fn effective_viewport(&self) -> Viewport {
        self.viewport.scaled(self.pixel_ratio)
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.rows > 0 && self.cols > 0, "grid must have at least one row and column");
        ensure!(
            self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0,
            "pixel ratio must be positive, got {}",
            self.pixel_ratio
        );

        let viewport = self.effective_viewport();
        ensure!(
            viewport.width >= self.cols && viewport.height >= self.rows,
            "viewport {}x{} is too small for a {}x{} grid",
            viewport.width,
            viewport.height,
            self.cols,
            self.rows
        );
        ensure!(
            viewport.width <= MAX_VIEWPORT_EXTENT && viewport.height <= MAX_VIEWPORT_EXTENT,
            "viewport {}x{} exceeds the {} pixel limit",
            viewport.width,
            viewport.height,
            MAX_VIEWPORT_EXTENT
        );

        ensure!(self.move_interval_ms > 0, "move interval must be non-zero");
        ensure!(
            (0.0..=1.0).contains(&self.golden_apple_chance),
            "golden apple chance must be within [0, 1], got {}",
            self.golden_apple_chance
        );
        ensure!(
            self.min_swipe_distance >= 0.0,
            "minimum swipe distance cannot be negative"
        );
        ensure!(
            self.swipe_angle_tolerance > 0.0,
            "swipe angle tolerance must be positive"
        );
        Ok(())
    }
}
