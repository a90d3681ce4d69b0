use rand::Rng;

use super::field::GameField;
use super::snake::{Position, Snake};

/// What kind of apple a food item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Regular,
    Golden,
}

impl FoodKind {
    /// Segments added to the snake when eaten
    pub fn grow_amount(&self) -> usize {
        match self {
            FoodKind::Regular => 1,
            FoodKind::Golden => 3,
        }
    }

    /// Score awarded when eaten
    pub fn points(&self) -> u32 {
        match self {
            FoodKind::Regular => 1,
            FoodKind::Golden => 3,
        }
    }

    /// Display colour as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            FoodKind::Regular => 0xff0000,
            FoodKind::Golden => 0xffff00,
        }
    }
}

/// An apple sitting on one tile of the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    /// Place a new apple on a random tile
    pub fn spawn<R: Rng + ?Sized>(kind: FoodKind, field: &GameField, rng: &mut R) -> Self {
        Self::new(field.random_position(rng), kind)
    }

    /// Feed the snake, move to a fresh tile, and return the points earned
    pub fn consume<R: Rng + ?Sized>(
        &mut self,
        snake: &mut Snake,
        field: &GameField,
        rng: &mut R,
    ) -> u32 {
        snake.grow(self.kind.grow_amount());
        self.position = field.random_position(rng);
        self.kind.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::Viewport;
    use crate::game::direction::Direction;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_kind_effects() {
        assert_eq!(FoodKind::Regular.grow_amount(), 1);
        assert_eq!(FoodKind::Golden.grow_amount(), 3);
        assert_eq!(FoodKind::Regular.points(), 1);
        assert_eq!(FoodKind::Golden.points(), 3);
        assert_ne!(FoodKind::Regular.color(), FoodKind::Golden.color());
    }

    #[test]
    fn test_consume_grows_and_relocates() {
        let field = GameField::new(Viewport::new(480, 640), 15, 11).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut snake = Snake::spawn(field.viewport_center(), field.tile_size());

        let mut apple = Food::new(field.cell_center(0, 0), FoodKind::Regular);
        assert_eq!(apple.consume(&mut snake, &field, &mut rng), 1);
        assert_eq!(snake.len(), 4);
        assert!(field.is_within_bounds(apple.position));

        let mut golden = Food::spawn(FoodKind::Golden, &field, &mut rng);
        assert_eq!(golden.consume(&mut snake, &field, &mut rng), 3);
        assert_eq!(snake.len(), 7);
        assert_eq!(snake.direction(), Direction::Right);
    }
}
