mod command_sender;
mod config;
mod offline;
mod state;
mod ui;

use clap::Parser;
use eframe::egui;
use snake_common::logger::init_logger;
use snake_common::{SessionRng, SnakeGameState, log, log_error};
use std::path::PathBuf;
use tokio::sync::mpsc;

use command_sender::CommandSender;
use config::{Config, get_config_manager};
use offline::{SessionTimings, local_game_task};
use state::SharedState;
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "snake")]
struct Args {
    /// Path to the YAML config. Defaults to a file next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    init_logger(prefix);

    let config = match get_config_manager(args.config).get_config() {
        Ok(config) => config,
        Err(e) => {
            log_error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Starting with seed {}", rng.seed());

    let game = SnakeGameState::new(&config.game, rng)?;
    let shared_state = SharedState::new(game);
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let shared_state_clone = shared_state.clone();
    let timings = SessionTimings::from(&config);
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log_error!("Failed to start async runtime: {}", e);
                return;
            }
        };
        rt.block_on(local_game_task(shared_state_clone, timings, command_rx));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_title("Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "Snake",
        options,
        Box::new(|_cc| {
            Ok(Box::new(SnakeApp::new(
                shared_state,
                CommandSender::new(command_tx),
            )))
        }),
    )?;

    Ok(())
}
