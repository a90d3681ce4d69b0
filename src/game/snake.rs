use anyhow::{Result, ensure};

use super::direction::Direction;

/// A point in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True when both axes are less than `reach` apart
    pub fn is_near(&self, other: Position, reach: i32) -> bool {
        (self.x - other.x).abs() < reach && (self.y - other.y).abs() < reach
    }
}

/// The player's snake.
///
/// Segments are kept head first. Every move shifts each segment into the
/// spot its predecessor held, so the body traces the head's path exactly.
/// A direction change locks further changes until the next move, which keeps
/// two quick turns within one tick from folding the snake onto itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    tile_size: i32,
    can_change_direction: bool,
}

impl Snake {
    /// The starting snake: head at `center` heading right, followed by two
    /// segments stacked one tile behind it
    pub fn spawn(center: Position, tile_size: i32) -> Self {
        let tail = center.moved_by(-tile_size, 0);
        Self {
            body: vec![center, tail, tail],
            direction: Direction::Right,
            tile_size,
            can_change_direction: true,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(
        body: Vec<Position>,
        direction: Direction,
        tile_size: i32,
    ) -> Result<Self> {
        ensure!(!body.is_empty(), "a snake needs at least a head segment");
        Ok(Self {
            body,
            direction,
            tile_size,
            can_change_direction: true,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn can_change_direction(&self) -> bool {
        self.can_change_direction
    }

    /// Request a new heading. Reversals are refused, as is any second change
    /// before the next move. Returns whether the request was applied.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.can_change_direction || self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        self.can_change_direction = false;
        true
    }

    /// Advance the head one tile and drag the body behind it
    pub fn move_forward(&mut self) {
        let (dx, dy) = self.direction.delta();
        let new_head = self.head().moved_by(dx * self.tile_size, dy * self.tile_size);

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = new_head;
        self.can_change_direction = true;
    }

    /// Append `amount` segments on top of the current tail
    pub fn grow(&mut self, amount: usize) {
        let tail = self.body[self.body.len() - 1];
        self.body.extend(std::iter::repeat(tail).take(amount));
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
