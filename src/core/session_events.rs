//! Session intents and their dispatch.
//!
//! UI widgets and the remote control server emit these through the event
//! bus; [`handle_session_event`] applies one to the session. UI-only events
//! (window toggles) live in `app::events` and are not handled here.

use log::trace;

use super::event_bus::{BoxedEvent, downcast_event};
use super::session::Session;

#[derive(Clone, Debug)]
pub struct NextEvent;

#[derive(Clone, Debug)]
pub struct PreviousEvent;

/// Jump to an id (clamped by the session)
#[derive(Clone, Debug)]
pub struct LoadIdEvent(pub i64);

/// Free-text jump from the "Go" field
#[derive(Clone, Debug)]
pub struct JumpTextEvent(pub String);

#[derive(Clone, Debug)]
pub struct RetryEvent;

#[derive(Clone, Debug)]
pub struct ToggleFavoriteEvent(pub u32);

/// Toggle favorite status of whatever id is current
#[derive(Clone, Debug)]
pub struct ToggleCurrentFavoriteEvent;

/// Apply a session event. Returns false if the event is not a session intent.
pub fn handle_session_event(event: &BoxedEvent, session: &mut Session) -> bool {
    if downcast_event::<NextEvent>(event).is_some() {
        session.next();
    } else if downcast_event::<PreviousEvent>(event).is_some() {
        session.previous();
    } else if let Some(LoadIdEvent(id)) = downcast_event::<LoadIdEvent>(event) {
        session.load_id(*id);
    } else if let Some(JumpTextEvent(text)) = downcast_event::<JumpTextEvent>(event) {
        session.jump_text(text);
    } else if downcast_event::<RetryEvent>(event).is_some() {
        session.retry();
    } else if let Some(ToggleFavoriteEvent(id)) = downcast_event::<ToggleFavoriteEvent>(event) {
        session.toggle_favorite(*id);
    } else if downcast_event::<ToggleCurrentFavoriteEvent>(event).is_some() {
        let id = session.current_id();
        session.toggle_favorite(id);
    } else {
        return false;
    }
    trace!("Handled {}", (**event).type_name());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::EventBus;
    use crate::core::fetcher::{FetchError, RecordFetcher};
    use crate::core::record::Record;
    use crate::core::session::{MAX_ID, MIN_ID};
    use std::sync::Arc;

    struct NotFound;

    impl RecordFetcher for NotFound {
        fn fetch(&self, id: u32) -> Result<Record, FetchError> {
            Err(FetchError::Status { id, status: 404 })
        }
    }

    fn dispatch(bus: &EventBus, session: &mut Session) -> Vec<bool> {
        bus.poll()
            .iter()
            .map(|ev| handle_session_event(ev, session))
            .collect()
    }

    #[test]
    fn test_navigation_events() {
        let bus = EventBus::new();
        let mut session = Session::new(Arc::new(NotFound), 1);

        bus.emit(PreviousEvent);
        dispatch(&bus, &mut session);
        assert_eq!(session.current_id(), MAX_ID);

        bus.emit(NextEvent);
        dispatch(&bus, &mut session);
        assert_eq!(session.current_id(), MIN_ID);

        bus.emit(LoadIdEvent(300));
        bus.emit(JumpTextEvent("not a number".into()));
        dispatch(&bus, &mut session);
        assert_eq!(session.current_id(), 300);

        bus.emit(JumpTextEvent("42".into()));
        bus.emit(RetryEvent);
        dispatch(&bus, &mut session);
        assert_eq!(session.current_id(), 42);
        assert!(session.is_loading());
    }

    #[test]
    fn test_favorite_events() {
        let bus = EventBus::new();
        let mut session = Session::new(Arc::new(NotFound), 1);
        session.load_id(17);

        bus.emit(ToggleCurrentFavoriteEvent);
        bus.emit(ToggleFavoriteEvent(3));
        dispatch(&bus, &mut session);
        assert_eq!(session.favorites().into_iter().collect::<Vec<_>>(), vec![3, 17]);

        bus.emit(ToggleFavoriteEvent(17));
        dispatch(&bus, &mut session);
        assert!(!session.is_favorite(17));
    }

    #[test]
    fn test_unknown_event_not_handled() {
        #[derive(Clone)]
        struct Other;

        let bus = EventBus::new();
        let mut session = Session::new(Arc::new(NotFound), 1);
        bus.emit(Other);
        bus.emit(NextEvent);
        assert_eq!(dispatch(&bus, &mut session), vec![false, true]);
    }
}
