mod config;
mod input;
mod key_map;
mod terminal_renderer;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use common::games::snake::{run_session, ConfigError, IntervalScheduler};
use common::{logger, log, InputEvent, SessionRng, SnakeConfigOverrides, SnakeGame};
use tokio::sync::mpsc;

use config::get_config_manager;
use terminal_renderer::TerminalRenderer;

#[derive(Parser)]
#[command(name = "snake_client", about = "Single-player snake on a wrapping grid")]
struct Args {
    /// YAML config file; defaults to snake_client_config.yaml next to the binary
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<u32>,

    #[arg(long)]
    cols: Option<u32>,

    /// Ticks per second
    #[arg(long)]
    speed: Option<u32>,

    #[arg(long)]
    win_food_count: Option<u32>,

    /// Fixed seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Start playing without waiting for `p`
    #[arg(long)]
    autoplay: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = match get_config_manager(args.config.clone()).get_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let prefix = if args.use_log_prefix || file_config.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let overrides = SnakeConfigOverrides {
        rows_count: args.rows,
        cols_count: args.cols,
        speed: args.speed,
        win_food_count: args.win_food_count,
    };
    let game_config = match file_config.game_config(&overrides) {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    log!("Using seed {}", rng.seed());

    let mut renderer = TerminalRenderer::new(
        game_config.cols_count() as usize,
        game_config.rows_count() as usize,
    );
    if let Err(e) = renderer.enter() {
        eprintln!("Failed to prepare terminal: {}", e);
        return ExitCode::FAILURE;
    }
    let (scheduler, tick_rx) = IntervalScheduler::new();

    // dropping the renderer on error restores the terminal before reporting
    let game = match SnakeGame::new(game_config, renderer, scheduler, rng) {
        Ok(game) => game,
        Err(e) => {
            report_config_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    if args.autoplay {
        let _ = input_tx.send(InputEvent::PlayToggleRequested);
    }
    tokio::spawn(input::read_terminal(input_tx));

    // the game and its renderer are dropped when the session ends, which
    // leaves the alternate screen before the summary is printed
    let summary = run_session(game, tick_rx, input_rx).await;
    log!(
        "Session over after {} ticks: {:?}, score {}",
        summary.ticks,
        summary.status,
        summary.score
    );
    println!("Final score: {}", summary.score);

    ExitCode::SUCCESS
}

fn report_config_error(error: &ConfigError) {
    eprintln!("Invalid game settings:");
    for message in &error.errors {
        eprintln!("  - {}", message);
    }
}
