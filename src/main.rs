use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::{AutoplayConfig, AutoplayMode, HumanMode, HumanOutcome};
use grid_snake::rl::QuitRequested;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid Snake for keyboard play and agent stepping")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Grid cell size in pixels
    #[arg(long)]
    block_size: Option<i32>,

    /// Starting ticks per second
    #[arg(long)]
    speed: Option<u32>,

    /// Episodes to play in autoplay mode
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Run autoplay without drawing or frame pacing
    #[arg(long)]
    headless: bool,

    /// Seed for food placement in autoplay mode
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Watch a scripted pilot drive the agent environment
    Autoplay,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(speed) = self.speed {
            config.base_speed = speed;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    Ok(())
}

async fn run_human(config: GameConfig) -> Result<()> {
    let mut human_mode = HumanMode::new(config)?;
    match human_mode.run().await? {
        HumanOutcome::GameOver { score } => println!("Final Score {}", score),
        HumanOutcome::Quit => {}
    }
    Ok(())
}

async fn run_autoplay(config: AutoplayConfig, headless: bool) -> Result<()> {
    let mode = AutoplayMode::new(config);
    let stats = tokio::task::spawn_blocking(move || {
        if headless {
            mode.run_headless()
        } else {
            mode.run_in_terminal()
        }
    })
    .await
    .context("Autoplay task panicked")??;

    println!("{}", stats.format_summary());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    let config = cli.game_config()?;
    info!(
        "starting {}x{} board, block {}, speed {}",
        config.width, config.height, config.block_size, config.base_speed
    );

    let result = match cli.mode {
        Mode::Human => run_human(config).await,
        Mode::Autoplay => {
            let autoplay = AutoplayConfig {
                game_config: config,
                episodes: cli.episodes,
                seed: cli.seed,
            };
            run_autoplay(autoplay, cli.headless).await
        }
    };

    // Closing the window ends the program without a report
    match result {
        Err(err) if err.is::<QuitRequested>() => {
            info!("quit requested");
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_classic_board() {
        let cli = Cli::parse_from(["grid_snake"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config, GameConfig::default());
        assert!(matches!(cli.mode, Mode::Human));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "grid_snake",
            "--mode",
            "autoplay",
            "--width",
            "400",
            "--height",
            "200",
            "--speed",
            "25",
            "--headless",
        ]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 200);
        assert_eq!(config.base_speed, 25);
        assert!(cli.headless);
    }

    #[test]
    fn test_flags_fix_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "width": 410, "base_speed": 15 }}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["grid_snake", "--config", path]);
        assert!(cli.game_config().is_err());

        let cli = Cli::parse_from(["grid_snake", "--config", path, "--width", "400"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.width, 400);
        assert_eq!(config.base_speed, 15);
    }

    #[test]
    fn test_bad_board_rejected() {
        let cli = Cli::parse_from(["grid_snake", "--block-size", "30"]);
        assert!(cli.game_config().is_err());
    }
}
