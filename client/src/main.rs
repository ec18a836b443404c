mod broadcaster;
mod colors;
mod config;
mod game_runner;
mod state;
mod ui;

use std::time::Duration;

use clap::Parser;
use common::config::ConfigManager;
use common::game::GameMode;
use eframe::egui;
use tokio::sync::mpsc;

use config::get_config_manager;
use game_runner::game_loop_task;
use state::{ClientCommand, MenuCommand, SharedState};
use ui::MenuApp;

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Tic-tac-toe desktop client")]
struct Args {
    /// Path to the client config file
    #[arg(long)]
    config: Option<String>,

    /// Skip the mode screen and start a session: "bot" or "friend"
    #[arg(long)]
    mode: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    common::logger::init_logger(None);

    let config_manager = match args.config {
        Some(ref path) => ConfigManager::from_yaml_file(path),
        None => get_config_manager(),
    };
    let config = config_manager.get_config()?;
    let bot_delay = Duration::from_millis(config.bot.delay_ms);

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    if let Some(ref mode) = args.mode {
        let mode = match mode.as_str() {
            "bot" => GameMode::Bot,
            "friend" => GameMode::Friend,
            other => return Err(format!("Unknown mode '{}', expected bot or friend", other).into()),
        };
        command_tx.send(ClientCommand::Menu(MenuCommand::SelectMode(mode)))?;
    }

    let shared_state_clone = shared_state.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(game_loop_task(shared_state_clone, command_rx, bot_delay));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(|_cc| Ok(Box::new(MenuApp::new(shared_state, command_tx, config_manager)))),
    )?;

    Ok(())
}
