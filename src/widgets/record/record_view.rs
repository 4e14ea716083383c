//! Central record panel.
//!
//! Renders one of three views depending on the session's fetch state:
//! spinner while pending, error text with a Retry button on failure, or the
//! record itself (sprite, name, number, height, weight, types) on success.

use eframe::egui;

use crate::core::event_bus::BoxedEvent;
use crate::core::session_events::{RetryEvent, ToggleFavoriteEvent};
use crate::core::{FetchState, Record, Session};

/// Displayed sprite edge length in points
const SPRITE_SIZE: f32 = 192.0;

pub fn render_record_view(ui: &mut egui::Ui, session: &Session, mut dispatch: impl FnMut(BoxedEvent)) {
    ui.vertical_centered(|ui| match session.state() {
        FetchState::Idle => {
            ui.label("Nothing loaded yet");
        }
        FetchState::Pending { id } => {
            ui.add_space(SPRITE_SIZE / 2.0);
            ui.spinner();
            ui.label(format!("Loading #{:04}…", id));
        }
        FetchState::Failure(err) => {
            ui.add_space(SPRITE_SIZE / 2.0);
            ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
            ui.add_space(8.0);
            if ui.button("Retry").on_hover_text("R").clicked() {
                dispatch(Box::new(RetryEvent));
            }
        }
        FetchState::Success(record) => {
            let favorite = session.is_favorite(record.id);
            render_record(ui, record, favorite, &mut dispatch);
        }
    });
}

fn render_record(ui: &mut egui::Ui, record: &Record, favorite: bool, dispatch: &mut impl FnMut(BoxedEvent)) {
    match &record.sprite {
        Some(url) => {
            ui.add(
                egui::Image::new(url.as_str())
                    .fit_to_exact_size(egui::vec2(SPRITE_SIZE, SPRITE_SIZE))
                    .texture_options(egui::TextureOptions::NEAREST),
            );
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(SPRITE_SIZE, SPRITE_SIZE), egui::Sense::hover());
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "no sprite",
                egui::FontId::proportional(14.0),
                egui::Color32::GRAY,
            );
        }
    }

    ui.horizontal(|ui| {
        ui.heading(record.display_name());
        ui.monospace(format!("#{:04}", record.id));

        let (star, hint) = if favorite {
            ("★", "Remove from favorites (F)")
        } else {
            ("☆", "Add to favorites (F)")
        };
        if ui.button(star).on_hover_text(hint).clicked() {
            dispatch(Box::new(ToggleFavoriteEvent(record.id)));
        }
    });

    ui.add_space(4.0);

    egui::Grid::new("record_stats").num_columns(2).spacing([24.0, 4.0]).show(ui, |ui| {
        ui.label("Height");
        ui.monospace(format!("{:.1} m", record.height_m()));
        ui.end_row();

        ui.label("Weight");
        ui.monospace(format!("{:.1} kg", record.weight_kg()));
        ui.end_row();

        if !record.types.is_empty() {
            ui.label("Types");
            ui.monospace(record.types.join(" / "));
            ui.end_row();
        }
    });
}
