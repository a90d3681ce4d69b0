use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use golden_snake::game::{GameConfig, Viewport};
use golden_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "golden_snake")]
#[command(version, about = "Snake with regular and golden apples")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in virtual pixels
    #[arg(long)]
    viewport_width: Option<u32>,

    /// Viewport height in virtual pixels
    #[arg(long)]
    viewport_height: Option<u32>,

    /// Device pixel ratio applied to the viewport
    #[arg(long)]
    pixel_ratio: Option<f32>,

    /// Milliseconds between snake moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Chance per tick that a golden apple appears
    #[arg(long)]
    golden_chance: Option<f64>,

    /// RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard or mouse
    Human,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        config.viewport = Viewport::new(
            self.viewport_width.unwrap_or(config.viewport.width),
            self.viewport_height.unwrap_or(config.viewport.height),
        );
        if let Some(ratio) = self.pixel_ratio {
            config.pixel_ratio = ratio;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.move_interval_ms = tick_ms;
        }
        if let Some(chance) = self.golden_chance {
            config.golden_apple_chance = chance;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
    }

    Ok(())
}
