use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{FoodKind, GameScene, Position};
use crate::metrics::GameMetrics;

/// What occupies one tile on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    SnakeHead,
    SnakeBody,
    Food(FoodKind),
}

/// Rasterise the scene into rows of tiles. Entities outside the field are
/// skipped; the head is painted last so it always shows.
pub fn tile_map(scene: &GameScene) -> Vec<Vec<TileKind>> {
    let field = scene.field();
    let mut tiles = vec![vec![TileKind::Empty; field.cols() as usize]; field.rows() as usize];

    let mut paint = |pos: Position, kind: TileKind| {
        if let Some((col, row)) = field.cell_at(pos) {
            tiles[row as usize][col as usize] = kind;
        }
    };

    paint(scene.apple().position, TileKind::Food(FoodKind::Regular));
    if let Some(golden) = scene.golden_apple() {
        paint(golden.position, TileKind::Food(FoodKind::Golden));
    }
    for &segment in &scene.snake().segments()[1..] {
        paint(segment, TileKind::SnakeBody);
    }
    paint(scene.snake().head(), TileKind::SnakeHead);

    tiles
}

fn food_color(kind: FoodKind) -> Color {
    let rgb = kind.color();
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, scene: &GameScene, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], scene, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(chunks[1], scene);
        frame.render_widget(grid, chunks[1]);

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, scene: &GameScene) -> Paragraph<'_> {
        let lines: Vec<Line> = tile_map(scene)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|tile| match tile {
                        TileKind::SnakeHead => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::LightGreen)
                                .add_modifier(Modifier::BOLD),
                        ),
                        TileKind::SnakeBody => {
                            Span::styled("□ ", Style::default().fg(Color::Green))
                        }
                        TileKind::Food(FoodKind::Regular) => Span::styled(
                            "● ",
                            Style::default()
                                .fg(food_color(FoodKind::Regular))
                                .add_modifier(Modifier::BOLD),
                        ),
                        TileKind::Food(FoodKind::Golden) => Span::styled(
                            "★ ",
                            Style::default()
                                .fg(food_color(FoodKind::Golden))
                                .add_modifier(Modifier::BOLD),
                        ),
                        TileKind::Empty => {
                            Span::styled(". ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Gray))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        scene: &GameScene,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    scene.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Round: ", Style::default().fg(Color::Yellow)),
                Span::styled(scene.round().to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled(
                    "Apples: ",
                    Style::default().fg(food_color(FoodKind::Regular)),
                ),
                Span::styled(
                    metrics.apples_eaten.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled(
                    "Golden: ",
                    Style::default().fg(food_color(FoodKind::Golden)),
                ),
                Span::styled(
                    metrics.golden_apples_eaten.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / mouse swipe to turn | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
