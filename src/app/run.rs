//! Main application loop - eframe::App implementation.

use std::time::Duration;

use eframe::egui;

use crate::app::DexApp;
use crate::help::render_help_window;
use crate::widgets::favorites::render_favorites_window;
use crate::widgets::record::render_record_view;

/// Repaint interval while a request is pending (spinner animation)
const LOADING_REPAINT: Duration = Duration::from_millis(100);

impl eframe::App for DexApp {
    /// Flow per frame:
    /// 1. Start API server (lazy init)
    /// 2. Apply finished fetches
    /// 3. Forward API commands and process events
    /// 4. Render panels and windows
    /// 5. Handle keyboard input (applied next frame)
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.start_api_server(ctx);

        self.session.poll();
        self.handle_api_commands();
        self.handle_events();
        self.update_api_state();

        let emitter = self.event_bus.emitter();
        let favorites = self.session.favorites();

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            self.nav_bar.render(ui, favorites.len(), |e| emitter.emit_boxed(e));
        });

        self.status_bar.render(ctx, &self.session);

        egui::CentralPanel::default().show(ctx, |ui| {
            render_record_view(ui, &self.session, |e| emitter.emit_boxed(e));
        });

        if self.show_favorites {
            let mut open = true;
            render_favorites_window(
                ctx,
                &mut open,
                &favorites,
                self.session.current_id(),
                |e| emitter.emit_boxed(e),
            );
            self.show_favorites = open;
        }

        if self.show_help {
            render_help_window(ctx, &mut self.show_help);
        }

        self.handle_keyboard_input(ctx);

        // Events emitted this frame are handled on the next one
        if self.event_bus.queue_len() > 0 {
            ctx.request_repaint();
        } else if self.session.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT);
        }
    }
}
