use dexview::app::DexApp;
use dexview::cli::Args;
use dexview::config::{self, ViewerConfig};
use dexview::core::fetcher::HttpFetcher;
use dexview::headless;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::{debug, info};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = match log_path_opt {
            Some(path) => path.clone(),
            None => {
                config::ensure_data_dir()?;
                config::data_file("dexview.log")
            }
        };

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .filter_module("reqwest", log::LevelFilter::Info)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info)
            .filter_module("reqwest", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }

    debug!("Command-line args: {:?}", args);

    let config = ViewerConfig::from_env_and_cli(&args);
    info!(
        "API base: {} (timeout {:?}, {} workers)",
        config.api_base, config.timeout, config.workers
    );

    let fetcher = Arc::new(HttpFetcher::new(config.api_base.clone(), config.timeout)?);

    if let Some(id) = args.fetch {
        let record = headless::fetch_one(fetcher, id, config.timeout)?;
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Dexview v{} • F1 for help", env!("CARGO_PKG_VERSION")))
            .with_inner_size([420.0, 520.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dexview",
        native_options,
        Box::new(move |cc| {
            // Sprites are loaded straight from their URLs
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut app = DexApp::new(config, fetcher);
            app.initialize(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    info!("Application exiting");
    Ok(())
}
