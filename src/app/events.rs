//! UI events and the per-frame event pump.
//!
//! Session intents (`core::session_events`) are applied to the session;
//! the window toggles below only touch app state.

use eframe::egui;
use log::trace;

use super::DexApp;
use crate::core::event_bus::downcast_event;
use crate::core::session_events::{
    LoadIdEvent, NextEvent, PreviousEvent, RetryEvent, ToggleCurrentFavoriteEvent,
    handle_session_event,
};
use crate::core::{MAX_ID, MIN_ID};

#[derive(Clone, Debug)]
pub struct ToggleFavoritesWindowEvent;

#[derive(Clone, Debug)]
pub struct ToggleHelpEvent;

/// Favorite picked from the Favorites window: jump and close the window
#[derive(Clone, Debug)]
pub struct SelectFavoriteEvent(pub u32);

#[derive(Clone, Debug)]
pub struct FocusJumpEvent;

impl DexApp {
    /// Drain the event bus and apply every event.
    pub fn handle_events(&mut self) {
        for event in self.event_bus.poll() {
            if handle_session_event(&event, &mut self.session) {
                continue;
            }

            if downcast_event::<ToggleFavoritesWindowEvent>(&event).is_some() {
                self.show_favorites = !self.show_favorites;
            } else if downcast_event::<ToggleHelpEvent>(&event).is_some() {
                self.show_help = !self.show_help;
            } else if let Some(SelectFavoriteEvent(id)) = downcast_event::<SelectFavoriteEvent>(&event) {
                self.session.load_id(*id as i64);
                self.show_favorites = false;
            } else if downcast_event::<FocusJumpEvent>(&event).is_some() {
                self.nav_bar.request_focus();
            } else {
                trace!("Unhandled event: {}", (*event).type_name());
            }
        }
    }

    /// Map keyboard shortcuts to events. Skipped while a widget has focus.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let emitter = self.event_bus.emitter();
        ctx.input(|i| {
            let ctrl = i.modifiers.command;
            if i.key_pressed(egui::Key::F1) {
                emitter.emit(ToggleHelpEvent);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                emitter.emit(NextEvent);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                emitter.emit(PreviousEvent);
            }
            if i.key_pressed(egui::Key::Home) {
                emitter.emit(LoadIdEvent(MIN_ID as i64));
            }
            if i.key_pressed(egui::Key::End) {
                emitter.emit(LoadIdEvent(MAX_ID as i64));
            }
            if i.key_pressed(egui::Key::F) {
                if ctrl {
                    emitter.emit(ToggleFavoritesWindowEvent);
                } else {
                    emitter.emit(ToggleCurrentFavoriteEvent);
                }
            }
            if i.key_pressed(egui::Key::R) && !ctrl {
                emitter.emit(RetryEvent);
            }
            if i.key_pressed(egui::Key::G) {
                emitter.emit(FocusJumpEvent);
            }
        });
    }
}
