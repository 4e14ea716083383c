use eframe::egui;

use crate::core::{FetchState, Session};

/// Status bar at the bottom of the window
pub struct StatusBar {
    api_port: Option<u16>,
}

impl StatusBar {
    pub fn new(api_port: Option<u16>) -> Self {
        Self { api_port }
    }

    /// Short description of the fetch state
    pub fn state_text(state: &FetchState) -> String {
        match state {
            FetchState::Idle => "idle".to_string(),
            FetchState::Pending { id } => format!("loading #{}", id),
            FetchState::Success(rec) => format!("loaded {}", rec),
            FetchState::Failure(err) => format!("error: {}", err.kind()),
        }
    }

    pub fn render(&self, ctx: &egui::Context, session: &Session) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(format!("#{:04}", session.current_id()));
                ui.separator();

                if session.is_loading() {
                    ui.spinner();
                }
                ui.monospace(Self::state_text(session.state()));
                ui.separator();

                ui.monospace(format!("★ {}", session.favorites().len()));

                if let Some(port) = self.api_port {
                    ui.separator();
                    ui.monospace(format!("API :{}", port));
                }
            });
        });
    }
}
