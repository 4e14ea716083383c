//! REST API handling for DexApp.
//!
//! - Starting the API server (start_api_server)
//! - Updating the session snapshot (update_api_state)
//! - Turning API commands into bus events (handle_api_commands)

use super::DexApp;
use crate::core::session_events::*;
use crate::server::{ApiCommand, ApiServer, SessionSnapshot};

use eframe::egui;
use std::sync::Arc;

impl DexApp {
    /// Start REST API server if a port was configured.
    pub fn start_api_server(&mut self, ctx: &egui::Context) {
        if self.api_command_rx.is_some() {
            return; // Already started
        }
        let Some(port) = self.config.api_port else {
            return;
        };

        let ctx = ctx.clone();
        *self.api_state.waker.write().unwrap_or_else(|e| e.into_inner()) =
            Some(Arc::new(move || ctx.request_repaint()));

        log::info!("Starting REST API server on port {}", port);
        self.api_command_rx = Some(ApiServer::start(port, Arc::clone(&self.api_state)));
    }

    /// Publish the session snapshot for remote clients.
    pub fn update_api_state(&mut self) {
        if self.api_command_rx.is_none() {
            return;
        }
        let snapshot = SessionSnapshot::capture(&self.session);
        *self.api_state.session.write().unwrap_or_else(|e| e.into_inner()) = snapshot;
    }

    /// Forward queued API commands onto the event bus.
    pub fn handle_api_commands(&mut self) {
        let Some(rx) = self.api_command_rx.as_ref() else {
            return;
        };

        let emitter = self.event_bus.emitter();
        while let Ok(cmd) = rx.try_recv() {
            log::debug!("Handling API command: {:?}", cmd);
            match cmd {
                ApiCommand::Next => emitter.emit(NextEvent),
                ApiCommand::Previous => emitter.emit(PreviousEvent),
                ApiCommand::Goto(id) => emitter.emit(LoadIdEvent(id)),
                ApiCommand::ToggleFavorite(id) => emitter.emit(ToggleFavoriteEvent(id)),
                ApiCommand::Retry => emitter.emit(RetryEvent),
            }
        }
    }
}
