//! Runtime configuration resolved from CLI arguments and environment.
//!
//! Priority for the API base URL: `--api-base` → `DEXVIEW_API_BASE` →
//! built-in default. Nothing is persisted; the only file we ever write is
//! the optional log.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Args;
use crate::core::fetcher::{DEFAULT_API_BASE, DEFAULT_TIMEOUT};
use crate::core::session::{DEFAULT_WORKERS, MIN_ID};

/// Environment override for the API base URL
pub const API_BASE_ENV: &str = "DEXVIEW_API_BASE";

/// Upper bound for `--timeout`
pub const MAX_TIMEOUT: Duration = Duration::from_secs(3600);

/// Effective viewer settings
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub api_base: String,
    pub timeout: Duration,
    pub workers: usize,
    /// Unclamped; the session clamps
    pub start_id: i64,
    pub api_port: Option<u16>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            start_id: MIN_ID as i64,
            api_port: None,
        }
    }
}

impl ViewerConfig {
    /// Build from parsed arguments plus process environment.
    pub fn from_env_and_cli(args: &Args) -> Self {
        Self::resolve(args, std::env::var(API_BASE_ENV).ok())
    }

    /// Same as `from_env_and_cli` with the environment value passed in.
    pub fn resolve(args: &Args, env_api_base: Option<String>) -> Self {
        let defaults = Self::default();

        let api_base = args
            .api_base
            .clone()
            .or(env_api_base)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base);

        // Anything not in (0, MAX_TIMEOUT] falls back to the default
        let timeout = match Duration::try_from_secs_f64(args.timeout_secs) {
            Ok(t) if !t.is_zero() && t <= MAX_TIMEOUT => t,
            _ => {
                log::warn!("Invalid timeout {}, using default", args.timeout_secs);
                defaults.timeout
            }
        };

        Self {
            api_base,
            timeout,
            workers: args.workers.max(1),
            start_id: args.start_id.unwrap_or(defaults.start_id),
            api_port: args.api_port,
        }
    }
}

/// Data directory for logs
///
/// - Linux: ~/.local/share/dexview
/// - macOS: ~/Library/Application Support/dexview
/// - Windows: %APPDATA%\dexview
pub fn data_dir() -> PathBuf {
    dirs_next::data_dir()
        .map(|dir| dir.join("dexview"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of a file inside the data directory
pub fn data_file(name: &str) -> PathBuf {
    data_dir().join(name)
}

/// Create the data directory if missing.
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["dexview"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = ViewerConfig::resolve(&args(&[]), None);
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.api_base, "https://pokeapi.co");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.start_id, 1);
    }

    #[test]
    fn test_api_base_priority() {
        let env = Some("http://env.local".to_string());

        let cfg = ViewerConfig::resolve(&args(&["--api-base", "http://cli.local"]), env.clone());
        assert_eq!(cfg.api_base, "http://cli.local");

        let cfg = ViewerConfig::resolve(&args(&[]), env);
        assert_eq!(cfg.api_base, "http://env.local");

        let cfg = ViewerConfig::resolve(&args(&[]), Some("   ".to_string()));
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_timeout_and_workers_sanitized() {
        let cfg = ViewerConfig::resolve(&args(&["-t", "0", "-w", "0"]), None);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert_eq!(cfg.workers, 1);

        for bad in ["1e30", "NaN", "inf", "7200", "1e-12"] {
            let cfg = ViewerConfig::resolve(&args(&["-t", bad]), None);
            assert_eq!(cfg.timeout, DEFAULT_TIMEOUT, "timeout {}", bad);
        }

        let cfg = ViewerConfig::resolve(&args(&["-t", "3600"]), None);
        assert_eq!(cfg.timeout, MAX_TIMEOUT);

        let cfg = ViewerConfig::resolve(&args(&["-t", "0.5", "150", "--api-port", "9000"]), None);
        assert_eq!(cfg.timeout, Duration::from_millis(500));
        assert_eq!(cfg.start_id, 150);
        assert_eq!(cfg.api_port, Some(9000));
    }

    #[test]
    fn test_data_file_under_data_dir() {
        let path = data_file("dexview.log");
        assert!(path.ends_with("dexview.log"));
        assert_eq!(path.parent(), Some(data_dir().as_path()));
    }
}
