use anyhow::{Context, Result, ensure};
use rand::Rng;

use super::config::{MAX_VIEWPORT_EXTENT, Viewport};
use super::snake::Position;

/// The playing grid, centred inside the viewport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameField {
    viewport: Viewport,
    rows: u32,
    cols: u32,
    tile_size: i32,
    offset_x: i32,
    offset_y: i32,
}

impl GameField {
    /// Lay out `rows` x `cols` square tiles as large as the viewport allows
    pub fn new(viewport: Viewport, rows: u32, cols: u32) -> Result<Self> {
        ensure!(rows > 0 && cols > 0, "grid must have at least one row and column");
        ensure!(
            viewport.width <= MAX_VIEWPORT_EXTENT && viewport.height <= MAX_VIEWPORT_EXTENT,
            "viewport {}x{} exceeds the {} pixel limit",
            viewport.width,
            viewport.height,
            MAX_VIEWPORT_EXTENT
        );

        let width = i32::try_from(viewport.width).context("viewport width out of range")?;
        let height = i32::try_from(viewport.height).context("viewport height out of range")?;
        let tile_size = (width / cols as i32).min(height / rows as i32);
        ensure!(
            tile_size > 0,
            "viewport {}x{} cannot fit a {}x{} grid",
            viewport.width,
            viewport.height,
            cols,
            rows
        );

        let offset_x = (width - cols as i32 * tile_size) / 2;
        let offset_y = (height - rows as i32 * tile_size) / 2;

        Ok(Self {
            viewport,
            rows,
            cols,
            tile_size,
            offset_x,
            offset_y,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Width of the grid in pixels
    pub fn pixel_width(&self) -> i32 {
        self.cols as i32 * self.tile_size
    }

    /// Height of the grid in pixels
    pub fn pixel_height(&self) -> i32 {
        self.rows as i32 * self.tile_size
    }

    /// Centre of the viewport, where a new snake starts
    pub fn viewport_center(&self) -> Position {
        Position::new(
            self.viewport.width as i32 / 2,
            self.viewport.height as i32 / 2,
        )
    }

    /// Pixel centre of the tile at (col, row)
    pub fn cell_center(&self, col: u32, row: u32) -> Position {
        Position::new(
            self.offset_x + col as i32 * self.tile_size + self.tile_size / 2,
            self.offset_y + row as i32 * self.tile_size + self.tile_size / 2,
        )
    }

    /// Centre of a uniformly chosen tile. Occupancy is not considered, so the
    /// result may land on the snake or on another apple.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let col = rng.gen_range(0..self.cols);
        let row = rng.gen_range(0..self.rows);
        self.cell_center(col, row)
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= self.offset_x
            && pos.x < self.offset_x + self.pixel_width()
            && pos.y >= self.offset_y
            && pos.y < self.offset_y + self.pixel_height()
    }

    /// Grid cell (col, row) containing a pixel position
    pub fn cell_at(&self, pos: Position) -> Option<(u32, u32)> {
        if !self.is_within_bounds(pos) {
            return None;
        }
        let col = (pos.x - self.offset_x) / self.tile_size;
        let row = (pos.y - self.offset_y) / self.tile_size;
        Some((col as u32, row as u32))
    }
}
