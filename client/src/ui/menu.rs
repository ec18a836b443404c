use std::time::Duration;

use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};
use common::game::GameMode;
use eframe::egui;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::state::{AppState, ClientCommand, MenuCommand, SharedState};
use super::game::TicTacToeGameUi;

type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub struct MenuApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<ClientCommand>,
    config_manager: ClientConfigManager,
    game_ui: TicTacToeGameUi,
    last_mode: Option<GameMode>,
}

impl MenuApp {
    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<ClientCommand>,
        config_manager: ClientConfigManager,
    ) -> Self {
        let last_mode = config_manager
            .get_config()
            .ok()
            .and_then(|config| config.last_mode);

        Self {
            shared_state,
            command_tx,
            config_manager,
            game_ui: TicTacToeGameUi::new(),
            last_mode,
        }
    }

    fn render_mode_select(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading("Tic-Tac-Toe");
            ui.add_space(30.0);

            let button_size = egui::vec2(220.0, 48.0);

            if ui
                .add(egui::Button::new("Play with Bot").min_size(button_size))
                .clicked()
            {
                self.select_mode(GameMode::Bot);
            }

            ui.add_space(10.0);

            if ui
                .add(egui::Button::new("Play with Friend").min_size(button_size))
                .clicked()
            {
                self.select_mode(GameMode::Friend);
            }

            if let Some(last_mode) = self.last_mode {
                ui.add_space(20.0);
                ui.weak(format!("Last played: {}", last_mode));
            }
        });
    }

    fn select_mode(&mut self, mode: GameMode) {
        let _ = self
            .command_tx
            .send(ClientCommand::Menu(MenuCommand::SelectMode(mode)));
        self.last_mode = Some(mode);

        match self.config_manager.get_config() {
            Ok(mut config) => {
                config.last_mode = Some(mode);
                if let Err(e) = self.config_manager.set_config(&config) {
                    self.shared_state.set_error(format!("Failed to save config: {}", e));
                }
            }
            Err(e) => {
                self.shared_state.set_error(format!("Failed to load config: {}", e));
            }
        }
    }

    fn render_error_window(&self, ctx: &egui::Context) {
        let Some(error) = self.shared_state.get_error() else {
            return;
        };

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(error);
                if ui.button("Dismiss").clicked() {
                    self.shared_state.clear_error();
                }
            });
    }
}

impl eframe::App for MenuApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // State changes arrive from the game task, not from UI events.
        ctx.request_repaint_after(Duration::from_millis(100));

        let state = self.shared_state.get_state();

        egui::CentralPanel::default().show(ctx, |ui| match state {
            AppState::ModeSelect => self.render_mode_select(ui),
            AppState::InGame { update } => {
                self.game_ui.render_game(ui, &update, &self.command_tx)
            }
        });

        self.render_error_window(ctx);
    }
}
