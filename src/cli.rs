use clap::Parser;
use std::path::PathBuf;

// Build version with backend info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "API:    PokéAPI v2 (", crate::core::fetcher::DEFAULT_API_BASE, ")\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Pokédex record viewer
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Pokédex number to open first (clamped to 1..=1025)
    #[arg(value_name = "ID")]
    pub start_id: Option<i64>,

    /// API base URL (default: $DEXVIEW_API_BASE or https://pokeapi.co)
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long = "timeout", value_name = "SECS", default_value_t = 10.0)]
    pub timeout_secs: f64,

    /// Fetch worker threads
    #[arg(short = 'w', long = "workers", value_name = "N", default_value_t = 2)]
    pub workers: usize,

    /// Fetch one record, print it as JSON and exit (no window)
    #[arg(long = "fetch", value_name = "ID", allow_negative_numbers = true)]
    pub fetch: Option<i64>,

    /// Enable the remote control REST server on this port
    #[arg(long = "api-port", value_name = "PORT")]
    pub api_port: Option<u16>,

    /// Enable debug logging to file (default: dexview.log in the data dir)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["dexview"]).unwrap();
        assert_eq!(args.start_id, None);
        assert_eq!(args.timeout_secs, 10.0);
        assert_eq!(args.workers, 2);
        assert!(args.fetch.is_none());
        assert!(args.api_port.is_none());
        assert!(args.log_file.is_none());
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_full_command_line() {
        let args = Args::try_parse_from([
            "dexview", "25", "--api-base", "http://localhost:8000", "-t", "2.5", "-w", "4",
            "--api-port", "9877", "-vv", "--log",
        ])
        .unwrap();
        assert_eq!(args.start_id, Some(25));
        assert_eq!(args.api_base.as_deref(), Some("http://localhost:8000"));
        assert_eq!(args.timeout_secs, 2.5);
        assert_eq!(args.workers, 4);
        assert_eq!(args.api_port, Some(9877));
        assert_eq!(args.verbosity, 2);
        assert_eq!(args.log_file, Some(None));
    }

    #[test]
    fn test_negative_ids_accepted() {
        let args = Args::try_parse_from(["dexview", "--fetch", "-5"]).unwrap();
        assert_eq!(args.fetch, Some(-5));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Args::try_parse_from(["dexview", "pikachu"]).is_err());
        assert!(Args::try_parse_from(["dexview", "--api-port", "99999"]).is_err());
    }
}
