//! Core engine modules - fetcher, session, workers, events
//!
//! These modules hold all behavior and are independent of the UI.

pub mod event_bus;
pub mod fetcher;
pub mod record;
pub mod session;
pub mod session_events;
pub mod workers;

// Re-exports for convenience
pub use event_bus::{BoxedEvent, EventBus, EventEmitter};
pub use fetcher::{FetchError, HttpFetcher, RecordFetcher};
pub use record::Record;
pub use session::{FetchState, MAX_ID, MIN_ID, Session};
pub use workers::Workers;
