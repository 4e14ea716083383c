//! Top navigation bar: previous/next, jump field, favorites button.

use eframe::egui;

use crate::app::events::{ToggleFavoritesWindowEvent, ToggleHelpEvent};
use crate::core::event_bus::BoxedEvent;
use crate::core::session_events::{JumpTextEvent, NextEvent, PreviousEvent};

/// Navigation bar state (jump field text survives across frames)
#[derive(Default)]
pub struct NavBar {
    pub jump_text: String,
    focus_requested: bool,
}

impl NavBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus the jump field on the next render
    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    pub fn render(&mut self, ui: &mut egui::Ui, favorites_count: usize, mut dispatch: impl FnMut(BoxedEvent)) {
        ui.horizontal(|ui| {
            if ui.button("◀ Prev").on_hover_text("Previous (Left)").clicked() {
                dispatch(Box::new(PreviousEvent));
            }
            if ui.button("Next ▶").on_hover_text("Next (Right)").clicked() {
                dispatch(Box::new(NextEvent));
            }

            ui.separator();

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.jump_text)
                    .hint_text("No.")
                    .desired_width(64.0),
            );
            if self.focus_requested {
                response.request_focus();
                self.focus_requested = false;
            }

            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Go").clicked() || enter {
                // Non-numeric text is dropped by the session
                dispatch(Box::new(JumpTextEvent(self.jump_text.clone())));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("?").on_hover_text("Help (F1)").clicked() {
                    dispatch(Box::new(ToggleHelpEvent));
                }
                let label = format!("★ Favorites ({})", favorites_count);
                if ui.button(label).on_hover_text("Ctrl+F").clicked() {
                    dispatch(Box::new(ToggleFavoritesWindowEvent));
                }
            });
        });
    }
}
