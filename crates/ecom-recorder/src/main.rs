//! Ecom-Recorder: continuous packing-station recorder driven by a barcode scanner.

mod app;
mod config;
mod console;
mod error;
mod fs_media_store;
mod process_recorder;

pub(crate) use {
    app::App,
    console::Console,
    error::{AppError, Result as AppResult},
    fs_media_store::FsMediaStore,
    process_recorder::ProcessRecorder,
};

use crate::config::{Config, LoggingConfig};

use ecom_recorder_core::{ControllerEvent, RecordingController};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "ecom_recorder=debug,ecom_recorder_core=debug";

/// Application entry point.
fn main() {
    let (config, config_path) = match Config::default_path().and_then(|path| {
        let config = Config::load_from(&path)?;
        Ok((config, path))
    }) {
        Ok(loaded) => loaded,
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);
    info!(config_path = ?config_path, "Configuration ready");

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(source) => {
            let e = AppError::RuntimeError {
                reason: format!("Failed to create tokio runtime: {}", source),
                location: ErrorLocation::from(Location::caller()),
            };
            error!("{:?}", e);
            std::process::exit(1);
        }
    };

    let result = rt.block_on(async move {
        let (event_tx, event_rx) = mpsc::channel(32);
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let backend = ProcessRecorder::new(
            config.recorder.clone(),
            event_tx.clone(),
            config.capture.muted,
        );
        let media_store = FsMediaStore::new(config.storage.root.clone());
        info!(root = ?media_store.root(), "Media store ready");

        let controller = RecordingController::new(backend, media_store, config.capture.clone());

        let console_input = Console::new(event_tx.clone());
        let console_shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            if let Err(e) = console_input.run(console_shutdown).await {
                error!(error = ?e, "Console error");
            }
        });

        let printer = tokio::spawn(console::print_notices(notice_rx));

        let ctrl_c_tx = event_tx;
        let mut ctrl_c_shutdown = shutdown_rx;
        tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        warn!(error = ?e, "Failed to listen for Ctrl-C");
                        return;
                    }
                    info!("Ctrl-C received, discarding recording in flight");
                    if ctrl_c_tx.send(ControllerEvent::ActivityDestroyed).await.is_err() {
                        warn!("Event queue closed before Ctrl-C could be delivered");
                    }
                }
                _ = ctrl_c_shutdown.changed() => {}
            }
        });

        let app = App {
            controller,
            config,
            config_path: Some(config_path),
            event_rx,
            notice_tx,
            shutdown_tx,
        };

        let result = app.run().await;

        // The app owned the notice sender, so the printer drains and ends.
        if let Err(e) = printer.await {
            warn!(error = ?e, "Notice printer task panicked");
        }

        result
    });

    // Stdin reads occupy a blocking thread that cannot be cancelled.
    rt.shutdown_timeout(Duration::from_secs(1));

    if let Err(e) = result {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries operator notices.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
