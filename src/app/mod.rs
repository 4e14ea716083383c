//! Application module - DexApp and related functionality.
//!
//! - `events` - event pump and keyboard shortcuts
//! - `api` - REST API server wiring
//! - `run` - eframe::App implementation (per-frame update)

mod api;
pub mod events;
mod run;

use std::sync::{Arc, mpsc};

use eframe::egui;

use crate::config::ViewerConfig;
use crate::core::event_bus::EventBus;
use crate::core::fetcher::RecordFetcher;
use crate::core::session::Session;
use crate::server::{ApiCommand, SharedApiState};
use crate::widgets::nav::NavBar;
use crate::widgets::status::StatusBar;

/// Main application state.
///
/// Owns the single [`Session`]; widgets only see it by reference and talk
/// back through the event bus.
pub struct DexApp {
    pub config: ViewerConfig,
    pub session: Session,
    pub event_bus: EventBus,
    pub nav_bar: NavBar,
    pub status_bar: StatusBar,
    pub show_favorites: bool,
    pub show_help: bool,
    /// Snapshot shared with the REST API thread
    pub api_state: Arc<SharedApiState>,
    pub api_command_rx: Option<mpsc::Receiver<ApiCommand>>,
}

impl DexApp {
    /// Build the app around a fetcher. No request is issued until
    /// [`DexApp::initialize`].
    pub fn new(config: ViewerConfig, fetcher: Arc<dyn RecordFetcher>) -> Self {
        let session = Session::new(fetcher, config.workers).with_start_id(config.start_id);
        let status_bar = StatusBar::new(config.api_port);

        Self {
            config,
            session,
            event_bus: EventBus::new(),
            nav_bar: NavBar::new(),
            status_bar,
            show_favorites: false,
            show_help: false,
            api_state: Arc::new(SharedApiState::default()),
            api_command_rx: None,
        }
    }

    /// Hook repaints to fetch completions and issue the first fetch.
    pub fn initialize(&mut self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        self.session.set_waker(Arc::new(move || ctx.request_repaint()));
        self.session.initialize();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::{FetchError, Record};

    struct Offline;

    impl RecordFetcher for Offline {
        fn fetch(&self, id: u32) -> Result<Record, FetchError> {
            Err(FetchError::Transport {
                id,
                message: "offline".into(),
            })
        }
    }

    pub(crate) fn test_app() -> DexApp {
        DexApp::new(ViewerConfig::default(), Arc::new(Offline))
    }

    #[test]
    fn test_new_app_uses_config() {
        let config = ViewerConfig {
            start_id: 3000,
            api_port: Some(9876),
            ..ViewerConfig::default()
        };
        let app = DexApp::new(config, Arc::new(Offline));
        assert_eq!(app.session.current_id(), 1025);
        assert!(!app.session.is_loading());
        assert!(app.api_command_rx.is_none());
    }
}
