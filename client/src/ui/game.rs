use common::game::{GameCommand, GameMode, GameStateUpdate, GameStatus, Mark};
use eframe::egui;
use tokio::sync::mpsc;

use crate::colors::mark_color;
use crate::state::{ClientCommand, MenuCommand};

const GRID_SIZE: usize = 3;

pub struct TicTacToeGameUi {
    last_hover: Option<usize>,
}

impl TicTacToeGameUi {
    const BOARD_PADDING: f32 = 24.0;
    const INFO_PANEL_WIDTH: f32 = 180.0;
    const MIN_CELL_SIZE: f32 = 60.0;
    const MAX_CELL_SIZE: f32 = 140.0;
    const LINE_WIDTH: f32 = 2.0;

    pub fn new() -> Self {
        Self { last_hover: None }
    }

    fn calculate_cell_size(available_width: f32, available_height: f32) -> f32 {
        let board_width =
            available_width - Self::INFO_PANEL_WIDTH - (Self::BOARD_PADDING * 2.0);
        let board_height = available_height - (Self::BOARD_PADDING * 2.0);

        let cell_size = (board_width / GRID_SIZE as f32).min(board_height / GRID_SIZE as f32);

        cell_size.clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE)
    }

    pub fn render_game(
        &mut self,
        ui: &mut egui::Ui,
        update: &Option<GameStateUpdate>,
        command_tx: &mpsc::UnboundedSender<ClientCommand>,
    ) {
        let Some(update) = update else {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Starting round...");
                    ui.spinner();
                });
            });
            return;
        };

        let cell_size = Self::calculate_cell_size(ui.available_width(), ui.available_height());
        let board_size = cell_size * GRID_SIZE as f32;

        ui.horizontal(|ui| {
            ui.allocate_ui(
                egui::vec2(board_size + Self::BOARD_PADDING * 2.0, ui.available_height()),
                |ui| {
                    self.render_board(ui, update, cell_size, command_tx);
                },
            );

            ui.separator();

            ui.vertical(|ui| {
                render_info_panel(ui, update, command_tx);
            });
        });
    }

    fn render_board(
        &mut self,
        ui: &mut egui::Ui,
        update: &GameStateUpdate,
        cell_size: f32,
        command_tx: &mpsc::UnboundedSender<ClientCommand>,
    ) {
        let board_size = cell_size * GRID_SIZE as f32;

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(board_size, board_size), egui::Sense::click());

        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        for i in 0..=GRID_SIZE {
            let x = rect.left() + i as f32 * cell_size;
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK),
            );

            let y = rect.top() + i as f32 * cell_size;
            painter.line_segment(
                [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
                egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK),
            );
        }

        for (index, &mark) in update.cells.iter().enumerate() {
            let cell_rect = cell_rect(rect, index, cell_size);
            match mark {
                Mark::X => draw_x(painter, cell_rect),
                Mark::O => draw_o(painter, cell_rect),
                Mark::Empty => {}
            }
        }

        let accepting_clicks = update.status == GameStatus::InProgress
            && !(update.mode == GameMode::Bot && update.current_mark == Mark::O);

        if accepting_clicks {
            self.last_hover = None;

            if let Some(hover_pos) = response.hover_pos() {
                let x = ((hover_pos.x - rect.left()) / cell_size) as usize;
                let y = ((hover_pos.y - rect.top()) / cell_size) as usize;

                if x < GRID_SIZE && y < GRID_SIZE {
                    let index = y * GRID_SIZE + x;

                    if update.cells[index] == Mark::Empty {
                        painter.rect_filled(
                            cell_rect(rect, index, cell_size),
                            0.0,
                            egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
                        );
                        self.last_hover = Some(index);
                    }
                }
            }

            if response.clicked()
                && let Some(index) = self.last_hover
            {
                let _ = command_tx.send(ClientCommand::Game(GameCommand::PlaceMark { index }));
            }
        }

        if let Some(winning_line) = update.winning_line {
            let start = cell_rect(rect, winning_line.cells[0], cell_size).center();
            let end = cell_rect(rect, winning_line.cells[2], cell_size).center();
            painter.line_segment(
                [start, end],
                egui::Stroke::new(6.0, egui::Color32::from_rgba_unmultiplied(50, 200, 50, 200)),
            );
        }
    }
}

fn cell_rect(board_rect: egui::Rect, index: usize, cell_size: f32) -> egui::Rect {
    let x = index % GRID_SIZE;
    let y = index / GRID_SIZE;
    egui::Rect::from_min_size(
        egui::pos2(
            board_rect.left() + x as f32 * cell_size,
            board_rect.top() + y as f32 * cell_size,
        ),
        egui::vec2(cell_size, cell_size),
    )
}

fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
    let padding = rect.width() * 0.2;
    let stroke = egui::Stroke::new(4.0, mark_color(Mark::X));

    painter.line_segment(
        [
            egui::pos2(rect.left() + padding, rect.top() + padding),
            egui::pos2(rect.right() - padding, rect.bottom() - padding),
        ],
        stroke,
    );

    painter.line_segment(
        [
            egui::pos2(rect.right() - padding, rect.top() + padding),
            egui::pos2(rect.left() + padding, rect.bottom() - padding),
        ],
        stroke,
    );
}

fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
    let padding = rect.width() * 0.2;
    let radius = (rect.width() / 2.0) - padding;
    let stroke = egui::Stroke::new(4.0, mark_color(Mark::O));

    painter.circle_stroke(rect.center(), radius, stroke);
}

fn render_info_panel(
    ui: &mut egui::Ui,
    update: &GameStateUpdate,
    command_tx: &mpsc::UnboundedSender<ClientCommand>,
) {
    ui.heading("Tic-Tac-Toe");

    let mode_label = match update.mode {
        GameMode::Bot => "Playing with bot",
        GameMode::Friend => "Playing with friend",
    };
    ui.label(mode_label);

    ui.separator();

    match update.status {
        GameStatus::InProgress => {
            ui.colored_label(
                mark_color(update.current_mark),
                format!("Turn: {}", update.current_mark),
            );
            if update.bot_thinking {
                ui.label("Bot is thinking...");
            }
        }
        GameStatus::XWon => {
            ui.colored_label(mark_color(Mark::X), "Player X Won");
        }
        GameStatus::OWon => {
            ui.colored_label(mark_color(Mark::O), "Player O Won");
        }
        GameStatus::Draw => {
            ui.label("Tie");
        }
    }

    ui.separator();

    if ui.button("New Round").clicked() {
        let _ = command_tx.send(ClientCommand::Game(GameCommand::NewRound));
    }

    if ui.button("Change Mode").clicked() {
        let _ = command_tx.send(ClientCommand::Menu(MenuCommand::LeaveGame));
    }
}
