//! Record fetcher: one blocking GET per identifier.
//!
//! The session never talks HTTP directly; it holds an `Arc<dyn RecordFetcher>`
//! and runs `fetch()` on a worker thread. `HttpFetcher` is the production
//! implementation over `reqwest::blocking`; tests plug in stubs.
//!
//! # Error classes
//!
//! - [`FetchError::Status`] - any status other than 200 (id + code in message)
//! - [`FetchError::Timeout`] - request (headers or body) exceeded the timeout
//! - [`FetchError::Decode`] - body is not the expected JSON shape
//! - [`FetchError::Transport`] - connect/DNS/TLS failure
//!
//! No retries and no caching: every call goes to the network.

use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, trace};
use reqwest::StatusCode;

use super::record::Record;

/// Default PokéAPI host
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("dexview/", env!("CARGO_PKG_VERSION"));

/// Classified fetch failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// Remote answered with a status other than 200
    Status { id: u32, status: u16 },
    /// No complete response within the timeout
    Timeout { id: u32, after: Duration },
    /// Body missing required fields or not JSON
    Decode { id: u32, message: String },
    /// Connection-level failure (refused, DNS, TLS, ...)
    Transport { id: u32, message: String },
}

impl FetchError {
    /// Identifier the failed request was for
    pub fn id(&self) -> u32 {
        match self {
            FetchError::Status { id, .. }
            | FetchError::Timeout { id, .. }
            | FetchError::Decode { id, .. }
            | FetchError::Transport { id, .. } => *id,
        }
    }

    /// Short class label for status bar / API snapshots
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Status { status: 404, .. } => "not_found",
            FetchError::Status { .. } => "remote_error",
            FetchError::Timeout { .. } => "timeout",
            FetchError::Decode { .. } => "decode",
            FetchError::Transport { .. } => "transport",
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Status { id, status: 404 } => {
                write!(f, "Pokémon #{} not found (HTTP 404)", id)
            }
            FetchError::Status { id, status } => {
                write!(f, "Remote error for Pokémon #{} (HTTP {})", id, status)
            }
            FetchError::Timeout { id, after } => {
                write!(
                    f,
                    "Request for Pokémon #{} timed out after {:.1}s",
                    id,
                    after.as_secs_f32()
                )
            }
            FetchError::Decode { id, message } => {
                write!(f, "Could not decode Pokémon #{}: {}", id, message)
            }
            FetchError::Transport { id, message } => {
                write!(f, "Network error for Pokémon #{}: {}", id, message)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Source of records. Must be callable from worker threads.
pub trait RecordFetcher: Send + Sync {
    fn fetch(&self, id: u32) -> Result<Record, FetchError>;
}

/// PokéAPI fetcher over a blocking reqwest client
pub struct HttpFetcher {
    api_base: String,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher for `{api_base}/api/v2/pokemon/{id}`.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_base = api_base.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        debug!("HttpFetcher: base={} timeout={:?}", api_base, timeout);

        Ok(Self {
            api_base,
            timeout,
            client,
        })
    }

    /// Request URL for an identifier
    pub fn url_for(&self, id: u32) -> String {
        format!("{}/api/v2/pokemon/{}", self.api_base.trim_end_matches('/'), id)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, id: u32, err: reqwest::Error) -> FetchError {
        // A stalled body is decode-kind with a timeout source; check timeout first
        if err.is_timeout() {
            FetchError::Timeout {
                id,
                after: self.timeout,
            }
        } else if err.is_decode() {
            FetchError::Decode {
                id,
                message: err.to_string(),
            }
        } else {
            FetchError::Transport {
                id,
                message: err.to_string(),
            }
        }
    }
}

impl RecordFetcher for HttpFetcher {
    fn fetch(&self, id: u32) -> Result<Record, FetchError> {
        let url = self.url_for(id);
        trace!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| self.classify(id, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("GET {} -> {}", url, status);
            return Err(FetchError::Status {
                id,
                status: status.as_u16(),
            });
        }

        // Body read is covered by the same client timeout
        let body = response.text().map_err(|e| self.classify(id, e))?;
        Record::from_json(&body).map_err(|message| FetchError::Decode { id, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rouille::Response;
    use std::sync::mpsc;

    /// Start a mock API on an ephemeral port. Keep the sender alive for the test.
    fn serve<F>(handler: F) -> (String, mpsc::Sender<()>)
    where
        F: Fn(&rouille::Request) -> Response + Send + Sync + 'static,
    {
        let server = rouille::Server::new("127.0.0.1:0", handler).expect("bind mock server");
        let base = format!("http://{}", server.server_addr());
        let (_handle, stop) = server.stoppable();
        (base, stop)
    }

    fn pokemon_handler(request: &rouille::Request) -> Response {
        match request.url().as_str() {
            "/api/v2/pokemon/1" => Response::from_data(
                "application/json",
                r#"{"id":1,"name":"bulbasaur","height":7,"weight":69,
                    "sprites":{"front_default":"http://x/1.png"}}"#,
            ),
            "/api/v2/pokemon/2" => Response::from_data(
                "application/json",
                r#"{"id":2,"name":"ivysaur","height":10,"weight":130,"sprites":{}}"#,
            ),
            "/api/v2/pokemon/3" => Response::from_data("application/json", r#"{"id":3}"#),
            "/api/v2/pokemon/4" => Response::text("oops").with_status_code(500),
            _ => Response::empty_404(),
        }
    }

    #[test]
    fn test_url_template() {
        let fetcher = HttpFetcher::new("https://pokeapi.co/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(fetcher.url_for(25), "https://pokeapi.co/api/v2/pokemon/25");
        assert_eq!(fetcher.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_fetch_success_with_sprite() {
        let (base, _stop) = serve(pokemon_handler);
        let fetcher = HttpFetcher::new(base, Duration::from_secs(5)).unwrap();

        let rec = fetcher.fetch(1).unwrap();
        assert_eq!(rec.name, "bulbasaur");
        assert_eq!(rec.sprite.as_deref(), Some("http://x/1.png"));
    }

    #[test]
    fn test_fetch_success_empty_sprites() {
        let (base, _stop) = serve(pokemon_handler);
        let fetcher = HttpFetcher::new(base, Duration::from_secs(5)).unwrap();

        let rec = fetcher.fetch(2).unwrap();
        assert_eq!(rec.id, 2);
        assert_eq!(rec.sprite, None);
    }

    #[test]
    fn test_fetch_not_found_message() {
        let (base, _stop) = serve(pokemon_handler);
        let fetcher = HttpFetcher::new(base, Duration::from_secs(5)).unwrap();

        let err = fetcher.fetch(999999).unwrap_err();
        assert_eq!(err, FetchError::Status { id: 999999, status: 404 });
        assert_eq!(err.kind(), "not_found");
        let msg = err.to_string();
        assert!(msg.contains("999999"), "{}", msg);
        assert!(msg.contains("404"), "{}", msg);
    }

    #[test]
    fn test_fetch_server_error() {
        let (base, _stop) = serve(pokemon_handler);
        let fetcher = HttpFetcher::new(base, Duration::from_secs(5)).unwrap();

        let err = fetcher.fetch(4).unwrap_err();
        assert_eq!(err, FetchError::Status { id: 4, status: 500 });
        assert_eq!(err.kind(), "remote_error");
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_fetch_decode_error() {
        let (base, _stop) = serve(pokemon_handler);
        let fetcher = HttpFetcher::new(base, Duration::from_secs(5)).unwrap();

        match fetcher.fetch(3) {
            Err(FetchError::Decode { id, message }) => {
                assert_eq!(id, 3);
                assert!(message.contains("name"), "{}", message);
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_timeout() {
        let (base, _stop) = serve(|_request| {
            std::thread::sleep(Duration::from_secs(2));
            Response::text("late")
        });
        let fetcher = HttpFetcher::new(base, Duration::from_millis(300)).unwrap();

        let started = std::time::Instant::now();
        let err = fetcher.fetch(1).unwrap_err();
        assert_eq!(
            err,
            FetchError::Timeout {
                id: 1,
                after: Duration::from_millis(300)
            }
        );
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_fetch_body_stall_is_timeout() {
        use std::io::{Read, Write};

        // Headers and part of the body arrive, the rest never does
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                      Content-Length: 100\r\n\r\n{\"id\":1,\"na",
                );
                let _ = stream.flush();
                std::thread::sleep(Duration::from_secs(2));
            }
        });

        let fetcher = HttpFetcher::new(base, Duration::from_millis(300)).unwrap();
        let started = std::time::Instant::now();
        let err = fetcher.fetch(1).unwrap_err();
        assert!(matches!(err, FetchError::Timeout { id: 1, .. }), "{:?}", err);
        assert_eq!(err.kind(), "timeout");
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_fetch_connection_refused() {
        // Grab a free port, then close it so nothing listens there
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let fetcher =
            HttpFetcher::new(format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();

        let err = fetcher.fetch(7).unwrap_err();
        assert!(matches!(err, FetchError::Transport { id: 7, .. }), "{:?}", err);
        assert_eq!(err.id(), 7);
    }
}
