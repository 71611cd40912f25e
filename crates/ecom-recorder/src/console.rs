//! Operator console.
//!
//! Reads stdin line by line. A keyboard-wedge scanner types the code and
//! presses enter, so every line is fed through the keystroke decoder.
//! Lines starting with `/` are operator commands.

use crate::{AppError, AppResult};

use ecom_recorder_core::{ControllerEvent, KeyInput, KeystrokeDecoder, Notice};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, watch},
};
use tracing::{debug, info, instrument, warn};

/// What one console line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Forward to the controller.
    Event(ControllerEvent),
    /// Shut the station down.
    Quit,
    /// Unrecognized `/command`.
    Unknown(String),
    /// Nothing to do.
    Nothing,
}

/// Interpret one stdin line.
pub fn parse_line(decoder: &mut KeystrokeDecoder, line: &str) -> ConsoleInput {
    if let Some(command) = line.trim().strip_prefix('/') {
        decoder.clear();

        return match command.trim().to_ascii_lowercase().as_str() {
            "start" => ConsoleInput::Event(ControllerEvent::StartRequested),
            "stop" => ConsoleInput::Event(ControllerEvent::StopRequested),
            "pause" => ConsoleInput::Event(ControllerEvent::PauseRequested),
            "resume" => ConsoleInput::Event(ControllerEvent::ResumeRequested),
            "mute" => ConsoleInput::Event(ControllerEvent::MuteRequested(true)),
            "unmute" => ConsoleInput::Event(ControllerEvent::MuteRequested(false)),
            "background" | "discard" => ConsoleInput::Event(ControllerEvent::AppBackgrounded),
            "quit" | "exit" => ConsoleInput::Quit,
            other => ConsoleInput::Unknown(other.to_string()),
        };
    }

    for c in line.chars() {
        let key = if c.is_control() {
            KeyInput::Other
        } else {
            KeyInput::Char(c)
        };
        decoder.push(key);
    }

    match decoder.push(KeyInput::Enter) {
        Some(scan) => ConsoleInput::Event(scan.into()),
        None => ConsoleInput::Nothing,
    }
}

/// Stdin reader feeding the controller's event queue.
pub struct Console {
    events_tx: mpsc::Sender<ControllerEvent>,
}

impl Console {
    /// Create a console sending into `events_tx`.
    pub fn new(events_tx: mpsc::Sender<ControllerEvent>) -> Self {
        Self { events_tx }
    }

    /// Read stdin until `/quit`, end of input, or shutdown.
    ///
    /// `/quit` and end of input both destroy the station so the recording
    /// in flight is discarded before the process exits.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut decoder = KeystrokeDecoder::new();

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Console shutting down");
                    break;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("Console input closed");
                        self.send(ControllerEvent::ActivityDestroyed).await?;
                        break;
                    };

                    match parse_line(&mut decoder, &line) {
                        ConsoleInput::Event(event) => self.send(event).await?,
                        ConsoleInput::Quit => {
                            info!("Quit requested from console");
                            self.send(ControllerEvent::ActivityDestroyed).await?;
                            break;
                        }
                        ConsoleInput::Unknown(command) => {
                            warn!(command = %command, "Unknown console command");
                            println!(
                                "Unknown command /{} (try /start /stop /pause /resume /mute /unmute /discard /background /quit)",
                                command
                            );
                        }
                        ConsoleInput::Nothing => debug!("Empty console line"),
                    }
                }
            }
        }

        Ok(())
    }

    async fn send(&self, event: ControllerEvent) -> AppResult<()> {
        self.events_tx
            .send(event)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send console event: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Print operator notices until the sending side is dropped.
pub async fn print_notices(mut notice_rx: mpsc::UnboundedReceiver<Notice>) {
    while let Some(notice) = notice_rx.recv().await {
        println!("{}", notice);
    }
}
