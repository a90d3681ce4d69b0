use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;
use tracing::{debug, info};

use super::{
    clock::TickClock,
    config::GameConfig,
    direction::Direction,
    field::GameField,
    food::{Food, FoodKind},
    snake::Snake,
};

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the field
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Apples eaten this tick, regular before golden
    pub eaten: Vec<FoodKind>,
    /// Set when the round ended and was restarted
    pub collision: Option<CollisionType>,
    /// Whether a golden apple appeared this tick
    pub golden_spawned: bool,
}

/// Owns one running game: the field, the snake, both apples and the score.
///
/// A collision is never a terminal state. It throws away every entity and
/// starts a fresh round with the score back at zero.
pub struct GameScene {
    config: GameConfig,
    field: GameField,
    snake: Snake,
    apple: Food,
    golden_apple: Option<Food>,
    score: u32,
    round: u32,
    clock: TickClock,
    rng: StdRng,
}

impl GameScene {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = GameField::new(config.effective_viewport(), config.rows, config.cols)?;
        let snake = Snake::spawn(field.viewport_center(), field.tile_size());
        let apple = Food::spawn(FoodKind::Regular, &field, &mut rng);
        let clock = TickClock::new(config.move_interval());

        debug!(
            tile_size = field.tile_size(),
            offset = ?field.offset(),
            "Scene created"
        );

        Ok(Self {
            config,
            field,
            snake,
            apple,
            golden_apple: None,
            score: 0,
            round: 1,
            clock,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &GameField {
        &self.field
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Food {
        &self.apple
    }

    pub fn golden_apple(&self) -> Option<&Food> {
        self.golden_apple.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 1-based number of the current round
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Feed frame time in; runs a tick once a full move interval has passed
    pub fn update(&mut self, delta: Duration) -> Option<TickReport> {
        if self.clock.advance(delta) {
            Some(self.tick())
        } else {
            None
        }
    }

    /// Advance the simulation by exactly one move
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        self.snake.move_forward();
        let head = self.snake.head();

        if let Some(collision) = self.check_collision() {
            info!(
                ?collision,
                score = self.score,
                length = self.snake.len(),
                "Collision detected, restarting round"
            );
            self.restart();
            report.collision = Some(collision);
            return report;
        }

        let reach = self.field.tile_size();

        if head.is_near(self.apple.position, reach) {
            self.score += self
                .apple
                .consume(&mut self.snake, &self.field, &mut self.rng);
            report.eaten.push(FoodKind::Regular);
        }

        if let Some(golden) = self.golden_apple.as_mut() {
            if head.is_near(golden.position, reach) {
                self.score += golden.consume(&mut self.snake, &self.field, &mut self.rng);
                report.eaten.push(FoodKind::Golden);
            }
        }

        if !report.eaten.is_empty() {
            debug!(score = self.score, length = self.snake.len(), "Apple eaten");
        }

        if self.golden_apple.is_none() && self.rng.gen_bool(self.config.golden_apple_chance) {
            let golden = Food::spawn(FoodKind::Golden, &self.field, &mut self.rng);
            debug!(x = golden.position.x, y = golden.position.y, "Golden apple spawned");
            self.golden_apple = Some(golden);
            report.golden_spawned = true;
        }

        report
    }

    fn check_collision(&self) -> Option<CollisionType> {
        if !self.field.is_within_bounds(self.snake.head()) {
            return Some(CollisionType::Wall);
        }

        if self.snake.check_self_collision() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Discard the round and start over with a fresh snake and apples
    pub fn restart(&mut self) {
        self.snake = Snake::spawn(self.field.viewport_center(), self.field.tile_size());
        self.apple = Food::spawn(FoodKind::Regular, &self.field, &mut self.rng);
        self.golden_apple = None;
        self.score = 0;
        self.round += 1;
        self.clock.reset();
    }

    /// Arrow-key steering: only turns onto the axis the snake is not moving
    /// along are considered
    pub fn handle_key(&mut self, direction: Direction) -> bool {
        let current = self.snake.direction();
        let allowed = if direction.is_vertical() {
            current.is_horizontal()
        } else {
            current.is_vertical()
        };
        allowed && self.snake.set_direction(direction)
    }

    /// Swipe steering from a drag of (dx, dy) pixels
    pub fn handle_swipe(&mut self, dx: f32, dy: f32) -> bool {
        match classify_swipe(
            dx,
            dy,
            self.config.min_swipe_distance,
            self.config.swipe_angle_tolerance,
        ) {
            Some(direction) => self.snake.set_direction(direction),
            None => false,
        }
    }
}

/// Map a drag to a direction. Drags no longer than `min_distance` on both
/// axes are ignored; the horizontal axis wins whenever it outweighs the
/// vertical one by the tolerance factor.
pub fn classify_swipe(dx: f32, dy: f32, min_distance: f32, tolerance: f32) -> Option<Direction> {
    let (abs_dx, abs_dy) = (dx.abs(), dy.abs());

    if abs_dx <= min_distance && abs_dy <= min_distance {
        return None;
    }

    if abs_dx > abs_dy * tolerance {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if abs_dy > abs_dx * tolerance {
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::snake::Position;

    fn quiet_config() -> GameConfig {
        GameConfig {
            seed: Some(42),
            golden_apple_chance: 0.0,
            ..Default::default()
        }
    }

    fn scene() -> GameScene {
        let mut scene = GameScene::new(quiet_config()).unwrap();
        // Park the apple in a corner so it stays out of the snake's way
        scene.apple.position = scene.field.cell_center(0, 0);
        scene
    }

    fn tile_ahead(scene: &GameScene) -> Position {
        let (dx, dy) = scene.snake.direction().delta();
        let tile = scene.field.tile_size();
        scene.snake.head().moved_by(dx * tile, dy * tile)
    }

    #[test]
    fn test_new_scene() {
        let scene = GameScene::new(quiet_config()).unwrap();
        assert_eq!(scene.score(), 0);
        assert_eq!(scene.round(), 1);
        assert_eq!(scene.snake().len(), 3);
        assert_eq!(scene.snake().head(), scene.field().viewport_center());
        assert!(scene.golden_apple().is_none());
        assert!(scene.field().is_within_bounds(scene.apple().position));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(GameScene::new(config).is_err());

        let oversized = GameConfig {
            pixel_ratio: 1.0e9,
            ..Default::default()
        };
        assert!(GameScene::new(oversized).is_err());
    }

    #[test]
    fn test_plain_tick_moves_one_tile() {
        let mut scene = scene();
        let before = scene.snake.head();

        let report = scene.tick();

        assert_eq!(report, TickReport::default());
        assert_eq!(
            scene.snake.head(),
            before.moved_by(scene.field.tile_size(), 0)
        );
        assert_eq!(scene.snake.len(), 3);
    }

    #[test]
    fn test_apple_consumption() {
        let mut scene = scene();
        scene.apple.position = tile_ahead(&scene);

        let report = scene.tick();

        assert_eq!(report.eaten, vec![FoodKind::Regular]);
        assert_eq!(scene.score(), 1);
        assert_eq!(scene.snake.len(), 4);
    }

    #[test]
    fn test_golden_apple_consumption() {
        let mut scene = scene();
        let ahead = tile_ahead(&scene);
        scene.golden_apple = Some(Food::new(ahead, FoodKind::Golden));

        let report = scene.tick();

        assert_eq!(report.eaten, vec![FoodKind::Golden]);
        assert_eq!(scene.score(), 3);
        assert_eq!(scene.snake.len(), 6);
        // The golden apple stays in play at a new spot
        assert!(scene.golden_apple().is_some());
    }

    #[test]
    fn test_both_apples_on_one_tile() {
        let mut scene = scene();
        let ahead = tile_ahead(&scene);
        scene.apple.position = ahead;
        scene.golden_apple = Some(Food::new(ahead, FoodKind::Golden));

        let report = scene.tick();

        assert_eq!(report.eaten, vec![FoodKind::Regular, FoodKind::Golden]);
        assert_eq!(scene.score(), 4);
        assert_eq!(scene.snake.len(), 7);
    }

    #[test]
    fn test_apple_within_tile_reach() {
        let mut scene = scene();
        let ahead = tile_ahead(&scene);
        scene.apple.position = ahead.moved_by(scene.field.tile_size() - 1, 0);

        scene.tick();
        assert_eq!(scene.score(), 1);
    }

    #[test]
    fn test_wall_collision_restarts() {
        let mut scene = scene();
        let tile = scene.field.tile_size();
        let last_col = scene.field.cols() - 1;
        let head = scene.field.cell_center(last_col, 3);
        scene.snake = Snake::from_segments(
            vec![head, head.moved_by(-tile, 0), head.moved_by(-2 * tile, 0)],
            Direction::Right,
            tile,
        )
        .unwrap();
        scene.score = 9;
        scene.golden_apple = Some(Food::new(scene.field.cell_center(1, 1), FoodKind::Golden));

        let report = scene.tick();

        assert_eq!(report.collision, Some(CollisionType::Wall));
        assert!(report.eaten.is_empty());
        assert_eq!(scene.score(), 0);
        assert_eq!(scene.round(), 2);
        assert_eq!(scene.snake().len(), 3);
        assert_eq!(scene.snake().head(), scene.field().viewport_center());
        assert!(scene.golden_apple().is_none());
    }

    #[test]
    fn test_leaving_through_the_top() {
        let mut scene = scene();
        let tile = scene.field.tile_size();
        let head = scene.field.cell_center(4, 0);
        scene.snake =
            Snake::from_segments(vec![head, head.moved_by(0, tile)], Direction::Up, tile).unwrap();

        let report = scene.tick();
        assert_eq!(report.collision, Some(CollisionType::Wall));
    }

    #[test]
    fn test_self_collision_restarts() {
        let mut scene = scene();
        let f = scene.field.clone();
        scene.snake = Snake::from_segments(
            vec![
                f.cell_center(5, 7),
                f.cell_center(6, 7),
                f.cell_center(6, 8),
                f.cell_center(5, 8),
                f.cell_center(4, 8),
            ],
            Direction::Down,
            f.tile_size(),
        )
        .unwrap();
        scene.score = 5;

        let report = scene.tick();

        assert_eq!(report.collision, Some(CollisionType::SelfCollision));
        assert_eq!(scene.score(), 0);
        assert_eq!(scene.snake().len(), 3);
    }

    #[test]
    fn test_golden_apple_spawns() {
        let mut scene = GameScene::new(GameConfig {
            golden_apple_chance: 1.0,
            ..quiet_config()
        })
        .unwrap();
        scene.apple.position = scene.field.cell_center(0, 0);

        let report = scene.tick();
        assert!(report.golden_spawned);
        assert_eq!(
            scene.golden_apple().map(|food| food.kind),
            Some(FoodKind::Golden)
        );

        // Never more than one golden apple
        let report = scene.tick();
        assert!(!report.golden_spawned);
    }

    #[test]
    fn test_no_golden_apple_at_zero_chance() {
        let mut scene = scene();
        for _ in 0..4 {
            scene.tick();
        }
        assert!(scene.golden_apple().is_none());
    }

    #[test]
    fn test_update_follows_move_interval() {
        let mut scene = scene();
        let start = scene.snake.head();

        assert!(scene.update(Duration::from_millis(120)).is_none());
        assert_eq!(scene.snake.head(), start);
        assert!(scene.update(Duration::from_millis(80)).is_some());
        assert_ne!(scene.snake.head(), start);
    }

    #[test]
    fn test_keys_respect_axis() {
        let mut scene = scene();

        // Moving right: horizontal keys are ignored
        assert!(!scene.handle_key(Direction::Left));
        assert!(!scene.handle_key(Direction::Right));
        assert!(scene.handle_key(Direction::Up));
        assert_eq!(scene.snake.direction(), Direction::Up);

        // Locked until the next move
        assert!(!scene.handle_key(Direction::Left));
        scene.tick();
        assert!(!scene.handle_key(Direction::Down));
        assert!(scene.handle_key(Direction::Left));
    }

    #[test]
    fn test_classify_swipe() {
        assert_eq!(classify_swipe(80.0, 10.0, 50.0, 0.5), Some(Direction::Right));
        assert_eq!(classify_swipe(-80.0, 10.0, 50.0, 0.5), Some(Direction::Left));
        assert_eq!(classify_swipe(10.0, 80.0, 50.0, 0.5), Some(Direction::Down));
        assert_eq!(classify_swipe(10.0, -80.0, 50.0, 0.5), Some(Direction::Up));
        assert_eq!(classify_swipe(30.0, -40.0, 50.0, 0.5), None);
        assert_eq!(classify_swipe(50.0, 50.0, 50.0, 0.5), None);

        // Diagonal drags favour the horizontal axis
        assert_eq!(classify_swipe(60.0, 60.0, 50.0, 0.5), Some(Direction::Right));
        // A strict tolerance leaves near-diagonals unresolved
        assert_eq!(classify_swipe(60.0, 60.0, 50.0, 1.0), None);
    }

    #[test]
    fn test_swipe_steers_snake() {
        let mut scene = scene();
        assert!(!scene.handle_swipe(-120.0, 0.0));
        assert!(!scene.handle_swipe(20.0, 20.0));
        assert!(scene.handle_swipe(5.0, 90.0));
        assert_eq!(scene.snake.direction(), Direction::Down);
    }

    #[test]
    fn test_manual_restart() {
        let mut scene = scene();
        scene.apple.position = tile_ahead(&scene);
        scene.tick();
        assert_eq!(scene.score(), 1);

        scene.restart();
        assert_eq!(scene.score(), 0);
        assert_eq!(scene.snake().len(), 3);
        assert_eq!(scene.round(), 2);
    }

    #[test]
    fn test_seeded_scenes_agree() {
        let a = GameScene::new(quiet_config()).unwrap();
        let b = GameScene::new(quiet_config()).unwrap();
        assert_eq!(a.apple(), b.apple());
    }
}
