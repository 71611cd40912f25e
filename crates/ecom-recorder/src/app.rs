use crate::{AppResult, config::Config};

use ecom_recorder_core::{
    ControllerEvent, MediaStore, Notice, RecorderBackend, RecordingController, SessionState,
};

use std::path::PathBuf;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Main application state.
///
/// Owns the recording controller and drains the single event queue into it,
/// so every scan, operator command and backend callback is processed in
/// arrival order.
pub struct App<B, M> {
    pub(crate) controller: RecordingController<B, M>,
    pub(crate) config: Config,
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) event_rx: mpsc::Receiver<ControllerEvent>,
    pub(crate) notice_tx: mpsc::UnboundedSender<Notice>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl<B: RecorderBackend, M: MediaStore> App<B, M> {
    /// Run the main application event loop.
    ///
    /// Returns once the controller is closed and its last recording has
    /// been finalized, or when every event sender is gone.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(mode = ?self.config.capture.mode, "Ecom-Recorder starting");

        loop {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);

                    if self.controller.is_closed() && self.controller.state() == SessionState::Idle {
                        info!("Station closed and idle, shutting down");
                        break;
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        let _ = self.shutdown_tx.send(true);
        info!("Ecom-Recorder shut down successfully");

        Ok(())
    }

    /// Feed one event to the controller and publish its notices.
    pub(crate) fn handle_event(&mut self, event: ControllerEvent) {
        let mute_change = match &event {
            ControllerEvent::MuteRequested(muted) => Some(*muted),
            _ => None,
        };

        let notices = self.controller.handle_event(event);

        if let Some(muted) = mute_change {
            self.persist_mute(muted);
        }

        for notice in notices {
            info!(notice = %notice, "Operator notice");
            if self.notice_tx.send(notice).is_err() {
                debug!("Notice receiver dropped");
            }
        }
    }

    fn persist_mute(&mut self, muted: bool) {
        if self.config.capture.muted == muted {
            return;
        }
        self.config.capture.muted = muted;

        let Some(path) = &self.config_path else {
            return;
        };

        if let Err(e) = self.config.save_to(path) {
            warn!(error = ?e, "Failed to persist mute setting");
        }
    }
}
