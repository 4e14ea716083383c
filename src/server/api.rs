//! REST API implementation using rouille.
//!
//! # Key types
//!
//! - [`ApiServer`] - HTTP server runner, spawns background thread
//! - [`ApiCommand`] - session intents sent to the UI thread
//! - [`SharedApiState`] - session snapshot updated by the UI thread each frame
//!
//! # Thread safety
//!
//! - `SharedApiState` is an `RwLock` - UI thread writes, handlers read
//! - `ApiCommand` goes through `mpsc::Sender`; the UI thread drains it
//! - CORS headers on every response for browser access

use rouille::{Request, Response};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, mpsc};
use std::thread;

use crate::core::session::{Session, Waker};
use crate::core::Record;

/// Commands sent from API handlers to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    Next,
    Previous,
    /// Jump to id (clamped by the session)
    Goto(i64),
    /// Toggle favorite status of an id
    ToggleFavorite(u32),
    /// Re-fetch the current id
    Retry,
}

/// Failure as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSnapshot {
    pub kind: String,
    pub message: String,
}

/// Session state snapshot for API responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_id: u32,
    pub loading: bool,
    pub record: Option<Record>,
    pub error: Option<ErrorSnapshot>,
    pub favorites: Vec<u32>,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            current_id: session.current_id(),
            loading: session.is_loading(),
            record: session.record().cloned(),
            error: session.error().map(|e| ErrorSnapshot {
                kind: e.kind().to_string(),
                message: e.to_string(),
            }),
            favorites: session.favorites().into_iter().collect(),
        }
    }
}

/// Shared state readable by API handlers (updated by the UI thread)
#[derive(Default)]
pub struct SharedApiState {
    pub session: RwLock<SessionSnapshot>,
    /// Wakes the UI so queued commands are handled without user input
    pub waker: RwLock<Option<Waker>>,
}

impl SharedApiState {
    fn wake(&self) {
        if let Some(wake) = self.waker.read().unwrap_or_else(|e| e.into_inner()).as_ref() {
            wake();
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        self.session.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Generic API response
#[derive(Serialize)]
struct ApiResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiResponse {
    fn ok() -> Self {
        Self { success: true, message: None, error: None }
    }

    fn ok_msg(msg: &str) -> Self {
        Self { success: true, message: Some(msg.to_string()), error: None }
    }

    fn err(msg: &str) -> Self {
        Self { success: false, message: None, error: Some(msg.to_string()) }
    }
}

/// REST API server
pub struct ApiServer {
    port: u16,
    state: Arc<SharedApiState>,
    command_tx: mpsc::Sender<ApiCommand>,
}

impl ApiServer {
    /// Start the API server in a background thread.
    /// Returns the command receiver for the UI thread to poll.
    pub fn start(port: u16, state: Arc<SharedApiState>) -> mpsc::Receiver<ApiCommand> {
        let (tx, rx) = mpsc::channel();

        let server = ApiServer {
            port,
            state,
            command_tx: tx,
        };

        let spawned = thread::Builder::new()
            .name("dexview-api".to_string())
            .spawn(move || server.run());
        if let Err(e) = spawned {
            log::error!("Failed to spawn API server thread: {}", e);
        }

        rx
    }

    fn run(self) {
        let addr = format!("127.0.0.1:{}", self.port);
        let state = self.state;
        let tx = self.command_tx;

        let server = rouille::Server::new(&addr, move |request| {
            Self::handle_request(request, &state, &tx)
        });

        match server {
            Ok(server) => {
                log::info!("API server listening on http://{}", server.server_addr());
                server.run();
            }
            Err(e) => log::error!("API server failed to bind {}: {}", addr, e),
        }
    }

    pub(crate) fn handle_request(
        request: &Request,
        state: &Arc<SharedApiState>,
        tx: &mpsc::Sender<ApiCommand>,
    ) -> Response {
        // Handle preflight
        if request.method() == "OPTIONS" {
            return Response::empty_204()
                .with_additional_header("Access-Control-Allow-Origin", "*")
                .with_additional_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
                .with_additional_header("Access-Control-Allow-Headers", "Content-Type");
        }

        // Paths with parameters are matched by hand
        let path = request.url();
        if request.method() == "POST" {
            if let Some(id_str) = path.strip_prefix("/api/goto/") {
                let response = match id_str.parse::<i64>() {
                    Ok(id) => Self::send_command(state, tx, ApiCommand::Goto(id)),
                    Err(_) => Response::json(&ApiResponse::err("Invalid id")).with_status_code(400),
                };
                return response.with_additional_header("Access-Control-Allow-Origin", "*");
            }
            if let Some(id_str) = path.strip_prefix("/api/favorite/") {
                let response = match id_str.parse::<u32>() {
                    Ok(id) => Self::send_command(state, tx, ApiCommand::ToggleFavorite(id)),
                    Err(_) => Response::json(&ApiResponse::err("Invalid id")).with_status_code(400),
                };
                return response.with_additional_header("Access-Control-Allow-Origin", "*");
            }
        }

        let response = rouille::router!(request,
            (GET) ["/api/status"] => {
                Response::json(&state.snapshot())
            },
            (GET) ["/api/favorites"] => {
                Response::json(&state.snapshot().favorites)
            },
            (GET) ["/api/health"] => {
                Response::json(&ApiResponse::ok_msg("dexview API server"))
            },

            (POST) ["/api/next"] => {
                Self::send_command(state, tx, ApiCommand::Next)
            },
            (POST) ["/api/previous"] => {
                Self::send_command(state, tx, ApiCommand::Previous)
            },
            (POST) ["/api/retry"] => {
                Self::send_command(state, tx, ApiCommand::Retry)
            },
            (POST) ["/api/goto"] => {
                Response::json(&ApiResponse::err("Missing id")).with_status_code(400)
            },

            _ => {
                Response::json(&ApiResponse::err("Not found")).with_status_code(404)
            }
        );

        response.with_additional_header("Access-Control-Allow-Origin", "*")
    }

    fn send_command(
        state: &Arc<SharedApiState>,
        tx: &mpsc::Sender<ApiCommand>,
        cmd: ApiCommand,
    ) -> Response {
        log::debug!("API command: {:?}", cmd);
        match tx.send(cmd) {
            Ok(_) => {
                state.wake();
                Response::json(&ApiResponse::ok())
            }
            Err(e) => Response::json(&ApiResponse::err(&format!("Failed to send command: {}", e)))
                .with_status_code(500),
        }
    }
}
