//! DEXVIEW - Pokédex record viewer library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (fetcher, session, workers, events)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod headless;
pub mod help;
pub mod server;
pub mod widgets;

// Re-export commonly used types from core
pub use self::core::event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};
pub use self::core::fetcher::{FetchError, HttpFetcher, RecordFetcher};
pub use self::core::record::Record;
pub use self::core::session::{FetchState, MAX_ID, MIN_ID, Session};
