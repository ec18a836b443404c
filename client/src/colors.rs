use common::game::Mark;
use eframe::egui;

pub fn mark_color(mark: Mark) -> egui::Color32 {
    match mark {
        Mark::X => egui::Color32::from_rgb(220, 50, 50),
        Mark::O => egui::Color32::from_rgb(50, 50, 220),
        Mark::Empty => egui::Color32::GRAY,
    }
}
