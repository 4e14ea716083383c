//! REST API server for remote control of the viewer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐       mpsc::channel        ┌──────────────────────┐
//! │   API Server Thread     │  ───── ApiCommand ──────▶  │   UI Thread          │
//! │   (rouille HTTP)        │                            │   (egui loop)        │
//! │                         │                            │                      │
//! │  POST /api/next         │  ──▶ ApiCommand::Next ──▶  │  emit(NextEvent)     │
//! │  POST /api/goto/25      │  ──▶ Goto(25) ─────────▶   │  emit(LoadIdEvent)   │
//! └─────────────────────────┘                            └──────────────────────┘
//!          │                                                      │
//!          │  Arc<SharedApiState>                                 │
//!          │◀──────────── read snapshots ─────────────────────────│
//!          │                                             updates each frame
//! ```
//!
//! # Endpoints
//!
//! | Method | Path                  | Description                      |
//! |--------|-----------------------|----------------------------------|
//! | GET    | `/api/status`         | Session snapshot                 |
//! | GET    | `/api/favorites`      | Sorted favorite ids              |
//! | GET    | `/api/health`         | Health check                     |
//! | POST   | `/api/next`           | Next id (wraps)                  |
//! | POST   | `/api/previous`       | Previous id (wraps)              |
//! | POST   | `/api/goto/{id}`      | Jump to id (clamped)             |
//! | POST   | `/api/favorite/{id}`  | Toggle favorite                  |
//! | POST   | `/api/retry`          | Re-fetch current id              |
//!
//! The server binds to localhost only.

mod api;

pub use api::{ApiCommand, ApiServer, ErrorSnapshot, SessionSnapshot, SharedApiState};
