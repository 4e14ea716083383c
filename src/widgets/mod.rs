//! UI Widgets - self-contained egui components
//!
//! Widgets read the session by reference and communicate via EventBus

pub mod favorites;
pub mod nav;
pub mod record;
pub mod status;
