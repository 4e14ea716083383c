//! Favorites window: sorted list of favorite numbers, click to jump.

use std::collections::BTreeSet;

use eframe::egui;

use crate::app::events::SelectFavoriteEvent;
use crate::core::event_bus::BoxedEvent;
use crate::core::session_events::ToggleFavoriteEvent;

pub fn render_favorites_window(
    ctx: &egui::Context,
    open: &mut bool,
    favorites: &BTreeSet<u32>,
    current_id: u32,
    mut dispatch: impl FnMut(BoxedEvent),
) {
    egui::Window::new("Favorites")
        .open(open)
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            if favorites.is_empty() {
                ui.label("No favorites yet. Press ☆ or F on a record.");
                return;
            }

            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                for &id in favorites {
                    ui.horizontal(|ui| {
                        let text = egui::RichText::new(format!("#{:04}", id)).monospace();
                        let text = if id == current_id { text.strong() } else { text };
                        if ui.button(text).on_hover_text("Open").clicked() {
                            dispatch(Box::new(SelectFavoriteEvent(id)));
                        }
                        if ui.small_button("✕").on_hover_text("Remove").clicked() {
                            dispatch(Box::new(ToggleFavoriteEvent(id)));
                        }
                    });
                }
            });
        });
}
