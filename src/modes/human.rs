use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::game::{GameConfig, GameScene};
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render cadence; the scene keeps its own move cadence on top of this
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct HumanMode {
    scene: GameScene,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe_tracker: SwipeTracker,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let scene = GameScene::new(config).context("Failed to create game scene")?;

        Ok(Self {
            scene,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipe_tracker: SwipeTracker::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = enter_screen(stderr)?;

        info!(seed = ?self.scene.config().seed, "Starting game");

        let result = self.run_game_loop(&mut terminal).await;
        let restored = restore_terminal(terminal.backend_mut());

        info!(
            high_score = self.metrics.high_score,
            rounds = self.metrics.rounds_finished,
            apples = self.metrics.apples_eaten,
            golden_apples = self.metrics.golden_apples_eaten,
            "Game closed"
        );

        result.and(restored)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Advance the scene by the real time since the last frame, then draw
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.update_game(now - last_frame);
                    last_frame = now;

                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.scene, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => {
                        if self.scene.handle_key(direction) {
                            debug!(?direction, "Turn accepted");
                        }
                    }
                    KeyAction::Restart => self.restart_round(),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                let tile_size = self.scene.field().tile_size();
                if let Some(swipe) = self.swipe_tracker.handle_mouse_event(mouse, tile_size) {
                    let accepted = self.scene.handle_swipe(swipe.dx, swipe.dy);
                    debug!(dx = swipe.dx, dy = swipe.dy, accepted, "Swipe");
                }
            }
            // ratatui picks up the new size on the next draw
            Event::Resize(width, height) => debug!(width, height, "Terminal resized"),
            _ => {}
        }
    }

    fn update_game(&mut self, delta: Duration) {
        let score_before = self.scene.score();

        let Some(report) = self.scene.update(delta) else {
            return;
        };

        self.metrics.record_tick(&report);
        if report.collision.is_some() {
            self.metrics.on_round_end(score_before);
        } else {
            self.metrics.observe_score(self.scene.score());
        }
    }

    fn restart_round(&mut self) {
        info!(score = self.scene.score(), "Manual restart");
        self.metrics.on_round_end(self.scene.score());
        self.scene.restart();
    }
}

/// Switch a fresh `open()` handle to the alternate screen and build the
/// terminal on it. When any step fails the terminal is restored through a
/// second handle before the error is returned.
fn enter_screen<W: Write>(open: impl Fn() -> W) -> Result<Terminal<CrosstermBackend<W>>> {
    let setup = || -> Result<Terminal<CrosstermBackend<W>>> {
        let mut out = open();
        execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)
            .context("Failed to enter alternate screen")?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(out)).context("Failed to create terminal")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    };

    setup().inspect_err(|_| {
        if let Err(err) = restore_terminal(&mut open()) {
            warn!(error = %err, "Failed to restore terminal after setup error");
        }
    })
}

/// Undo raw mode and the screen setup. Every step runs even if an earlier
/// one fails; the first error is returned.
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    let raw_mode = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show)
        .context("Failed to leave alternate screen");
    raw_mode.and(screen)
}
