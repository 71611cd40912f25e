//! Continuous-capture recording state machine.
//!
//! The controller is the only mutator of the active [`RecordingSession`].
//! It is driven one event at a time, issues commands to the recorder
//! backend, and consults the naming policy on every finalize. Operations
//! never return errors: failures are logged and surfaced as [`Notice`]s,
//! and the controller falls back to `Idle`.

use crate::{
    CaptureError,
    backend::{
        BackendEvent, BackendEventKind, FinalizeOutcome, MediaStore, MediaUri, OutputTarget,
        RecorderBackend, RecordingHandle,
    },
    controller::{ControllerEvent, DiscardReason, Notice},
    naming::{decide, file_name, timestamp_name},
    scan::{SanitizedCode, ScanEvent},
    session::{CaptureSettings, PendingRename, RecordingSession, SessionId, SessionState},
};

use std::panic::Location;

use chrono::Local;
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Owns the recording session and serializes everything that touches it.
///
/// # Thread Safety
///
/// Not thread-safe. The host drains a single event queue into
/// [`handle_event`](Self::handle_event), one event at a time.
pub struct RecordingController<B, M> {
    backend: B,
    media_store: M,
    settings: CaptureSettings,
    session: Option<RecordingSession>,
    next_session_id: u64,
    closed: bool,
    notices: Vec<Notice>,
}

impl<B: RecorderBackend, M: MediaStore> RecordingController<B, M> {
    /// Create an idle controller.
    pub fn new(backend: B, media_store: M, settings: CaptureSettings) -> Self {
        Self {
            backend,
            media_store,
            settings,
            session: None,
            next_session_id: 1,
            closed: false,
            notices: Vec::new(),
        }
    }

    /// Process one event and return the notices it produced.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: ControllerEvent) -> Vec<Notice> {
        match event {
            ControllerEvent::StartRequested => self.start_recording(),
            ControllerEvent::StopRequested => self.stop(),
            ControllerEvent::PauseRequested => self.pause(),
            ControllerEvent::ResumeRequested => self.resume(),
            ControllerEvent::MuteRequested(muted) => self.set_muted(muted),
            ControllerEvent::Scan(scan) => self.on_scan(scan),
            ControllerEvent::AppBackgrounded => self.app_backgrounded(),
            ControllerEvent::ActivityDestroyed => self.activity_destroyed(),
            ControllerEvent::Backend(BackendEvent { handle, kind }) => match kind {
                BackendEventKind::Started => self.on_start_confirmed(handle),
                BackendEventKind::Paused => self.on_paused(handle),
                BackendEventKind::Resumed => self.on_resumed(handle),
                BackendEventKind::Finalized(outcome) => self.on_finalize(handle, outcome),
            },
        }

        self.take_notices()
    }

    /// Drain notices produced by direct operation calls.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Current state; `Idle` when no session exists.
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, RecordingSession::state)
    }

    /// The session in flight, if any.
    pub fn session(&self) -> Option<&RecordingSession> {
        self.session.as_ref()
    }

    /// Settings applied to the next session.
    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    /// Whether the controller refuses new recordings after a destroy.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The recorder backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The media store.
    pub fn media_store(&self) -> &M {
        &self.media_store
    }

    /// Start a new untagged session. Ignored unless `Idle`.
    #[instrument(skip(self))]
    pub fn start_recording(&mut self) {
        self.start_session(None);
    }

    /// Backend confirmed capture: `Starting -> Recording`.
    #[instrument(skip(self))]
    pub fn on_start_confirmed(&mut self, handle: RecordingHandle) {
        let Some(session) = current_session(&mut self.session, handle, "start") else {
            return;
        };

        if session.state() != SessionState::Starting {
            debug!(session_id = %session.id(), state = %session.state(), "Late start confirmation ignored");
            return;
        }

        session.set_state(SessionState::Recording);
        let session_id = session.id();

        if let Err(e) = self.backend.mute(handle, session.muted()) {
            warn!(session_id = %session_id, error = ?e, "Failed to apply mute setting");
        }

        info!(session_id = %session_id, "Recording started");
        self.notices.push(Notice::RecordingStarted { session_id });
    }

    /// `Recording -> Paused`.
    #[instrument(skip(self))]
    pub fn pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            debug!("Pause ignored, no session");
            return;
        };

        if session.state() != SessionState::Recording {
            debug!(state = %session.state(), "Pause ignored");
            return;
        }

        match self.backend.pause(session.handle()) {
            Ok(()) => {
                session.set_state(SessionState::Paused);
                info!(session_id = %session.id(), "Recording paused");
                self.notices.push(Notice::Paused);
            }
            Err(e) => {
                warn!(session_id = %session.id(), error = ?e, "Pause rejected by backend");
                self.notices.push(Notice::CommandFailed {
                    command: "pause",
                    reason: e.to_string(),
                });
            }
        }
    }

    /// `Paused -> Recording`.
    #[instrument(skip(self))]
    pub fn resume(&mut self) {
        let Some(session) = self.session.as_mut() else {
            debug!("Resume ignored, no session");
            return;
        };

        if session.state() != SessionState::Paused {
            debug!(state = %session.state(), "Resume ignored");
            return;
        }

        match self.backend.resume(session.handle()) {
            Ok(()) => {
                session.set_state(SessionState::Recording);
                info!(session_id = %session.id(), "Recording resumed");
                self.notices.push(Notice::Resumed);
            }
            Err(e) => {
                warn!(session_id = %session.id(), error = ?e, "Resume rejected by backend");
                self.notices.push(Notice::CommandFailed {
                    command: "resume",
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Backend reports a pause. Reconciles a pause the controller did not ask for.
    pub fn on_paused(&mut self, handle: RecordingHandle) {
        let Some(session) = current_session(&mut self.session, handle, "pause") else {
            return;
        };

        if session.state() == SessionState::Recording {
            session.set_state(SessionState::Paused);
            info!(session_id = %session.id(), "Backend paused recording");
            self.notices.push(Notice::Paused);
        }
    }

    /// Backend reports a resume. Reconciles a resume the controller did not ask for.
    pub fn on_resumed(&mut self, handle: RecordingHandle) {
        let Some(session) = current_session(&mut self.session, handle, "resume") else {
            return;
        };

        if session.state() == SessionState::Paused {
            session.set_state(SessionState::Recording);
            info!(session_id = %session.id(), "Backend resumed recording");
            self.notices.push(Notice::Resumed);
        }
    }

    /// `Recording|Paused -> Stopping`. A repeated stop is a no-op.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        match self.session.as_ref() {
            Some(session) if session.state().is_active() => self.request_stop(),
            Some(session) => {
                debug!(session_id = %session.id(), state = %session.state(), "Stop ignored");
            }
            None => debug!("Stop ignored, no session"),
        }
    }

    /// Apply a scan code.
    ///
    /// Continuous mode tags the running recording and cuts it with a forced
    /// restart; a scan with nothing to tag is dropped. Single-shot modes
    /// start a pre-tagged capture when idle and ignore scans otherwise.
    #[instrument(skip(self), fields(code = %event.code()))]
    pub fn on_scan(&mut self, event: ScanEvent) {
        let code = SanitizedCode::new(event.code());

        if self.session.is_none() && !self.settings.mode.is_continuous() {
            info!(code = %code, "Scan starts tagged capture");
            self.start_session(Some(PendingRename::new(code, false)));
            return;
        }

        let tagged = match self.session.as_mut() {
            Some(session) if session.mode().is_continuous() => {
                session.attach_pending_rename(PendingRename::new(code.clone(), true))
            }
            _ => false,
        };

        if tagged {
            info!(code = %code, "Scan tagged recording, cutting segment");
            self.request_stop();
        } else {
            debug!(code = %code, state = %self.state(), "Scan ignored");
            self.notices.push(Notice::ScanIgnored {
                code: code.to_string(),
            });
        }
    }

    /// Update the mute preference and apply it to the live session.
    #[instrument(skip(self))]
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;

        if let Some(session) = self.session.as_mut() {
            session.set_muted(muted);

            if session.state().is_active() {
                if let Err(e) = self.backend.mute(session.handle(), muted) {
                    warn!(session_id = %session.id(), error = ?e, "Mute rejected by backend");
                    self.notices.push(Notice::CommandFailed {
                        command: "mute",
                        reason: e.to_string(),
                    });
                    return;
                }
            }
        }

        info!(muted, "Mute setting changed");
        self.notices.push(Notice::Muted(muted));
    }

    /// Station left the foreground: discard the recording in flight.
    #[instrument(skip(self))]
    pub fn app_backgrounded(&mut self) {
        self.cancel_session();
    }

    /// Station is shutting down: discard the recording in flight and refuse
    /// any further start.
    #[instrument(skip(self))]
    pub fn activity_destroyed(&mut self) {
        self.closed = true;
        self.cancel_session();
    }

    /// Process a finalize outcome: keep or discard the artifact, then start
    /// the next segment when a restart is queued.
    #[instrument(skip(self, outcome), fields(success = outcome.success()))]
    pub fn on_finalize(&mut self, handle: RecordingHandle, outcome: FinalizeOutcome) {
        if current_session(&mut self.session, handle, "finalize").is_none() {
            return;
        }
        let Some(mut session) = self.session.take() else {
            return;
        };

        session.set_state(SessionState::Finalizing);
        let session_id = session.id();
        let media_uri = outcome
            .media()
            .cloned()
            .unwrap_or_else(|| session.media_uri().clone());

        if !outcome.success() {
            let reason = outcome.error().unwrap_or("unknown backend error").to_string();
            let err = CaptureError::BackendFinalizeError {
                reason: reason.clone(),
                location: ErrorLocation::from(Location::caller()),
            };
            error!(session_id = %session_id, error = ?err, "Recording failed, discarding partial artifact");

            self.backend.close(handle);
            self.delete_artifact(&media_uri);
            self.notices.push(Notice::FinalizeFailed { reason });
            return;
        }

        let pending_rename = session.take_pending_rename();
        let decision = decide(
            pending_rename.as_ref(),
            &outcome,
            session.mode().extension(),
        );

        match decision.final_name.filter(|_| decision.keep) {
            Some(final_name) => {
                self.keep_artifact(session_id, &media_uri, session.temp_name(), &final_name);
            }
            None => {
                let reason = if session.is_discarded() {
                    DiscardReason::LeftApp
                } else {
                    DiscardReason::NotScanned
                };
                self.delete_artifact(&media_uri);
                info!(session_id = %session_id, reason = ?reason, "Recording discarded");
                self.notices.push(Notice::Discarded { reason });
            }
        }

        info!(
            session_id = %session_id,
            duration_ms = session.started_at().elapsed().as_millis(),
            "Session finalized"
        );

        if decision.restart {
            if self.closed {
                info!(session_id = %session_id, "Queued restart dropped, controller closed");
            } else {
                debug!(session_id = %session_id, "Starting next segment");
                self.start_recording();
            }
        }
    }

    fn start_session(&mut self, pending_rename: Option<PendingRename>) {
        if self.closed {
            warn!("Start refused, controller closed");
            return;
        }

        if let Some(session) = &self.session {
            debug!(session_id = %session.id(), state = %session.state(), "Start ignored, session in progress");
            return;
        }

        let session_id = SessionId::new(self.next_session_id);
        self.next_session_id += 1;

        let settings = self.settings.clone();
        let mode = settings.mode;
        let base_name = timestamp_name(&Local::now());
        let temp_name = file_name(&base_name, mode.extension());

        // Single-shot captures are kept even without a scan, under their
        // timestamp name.
        let pending_rename = match pending_rename {
            Some(rename) => Some(rename),
            None if !mode.is_continuous() => {
                Some(PendingRename::new(SanitizedCode::new(&base_name), false))
            }
            None => None,
        };

        let media_uri = match self.media_store.create_pending_file(
            &temp_name,
            mode.mime_type(),
            &mode.relative_path(),
        ) {
            Ok(uri) => uri,
            Err(e) => {
                error!(session_id = %session_id, error = ?e, "Failed to create pending file");
                self.notices.push(Notice::StartFailed {
                    reason: e.to_string(),
                });
                return;
            }
        };

        let target = OutputTarget {
            uri: media_uri.clone(),
            display_name: temp_name.clone(),
            mime_type: mode.mime_type(),
            relative_path: mode.relative_path(),
            quality: settings.quality,
        };

        let handle = match self.backend.prepare(&target, settings.audio_permitted) {
            Ok(handle) => handle,
            Err(e) => {
                self.fail_start(session_id, &media_uri, e);
                return;
            }
        };

        if let Err(e) = self.backend.start(handle) {
            self.backend.close(handle);
            self.fail_start(session_id, &media_uri, e);
            return;
        }

        info!(
            session_id = %session_id,
            handle = %handle,
            temp_name = %temp_name,
            mode = ?mode,
            "Recording session starting"
        );

        self.session = Some(RecordingSession::new(
            session_id,
            &settings,
            handle,
            media_uri,
            temp_name,
            pending_rename,
        ));
    }

    fn fail_start(&mut self, session_id: SessionId, media_uri: &MediaUri, err: CaptureError) {
        error!(session_id = %session_id, error = ?err, "Failed to start recording");

        self.delete_artifact(media_uri);

        let notice = match &err {
            CaptureError::PermissionDenied { permission, .. } => Notice::PermissionDenied {
                permission: permission.clone(),
            },
            _ => Notice::StartFailed {
                reason: err.to_string(),
            },
        };
        self.notices.push(notice);
    }

    fn request_stop(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match self.backend.stop(session.handle()) {
            Ok(()) => {
                session.set_state(SessionState::Stopping);
                info!(
                    session_id = %session.id(),
                    tagged = session.pending_rename().is_some(),
                    "Recording stopping"
                );
            }
            Err(e) => self.abandon_session(e),
        }
    }

    /// Backend could not stop: release it and fall back to `Idle`.
    fn abandon_session(&mut self, err: CaptureError) {
        let Some(session) = self.session.take() else {
            return;
        };

        error!(session_id = %session.id(), error = ?err, "Failed to stop recording");
        self.backend.close(session.handle());

        if session.pending_rename().is_none() {
            self.delete_artifact(session.media_uri());
        } else {
            warn!(
                session_id = %session.id(),
                uri = %session.media_uri(),
                "Tagged artifact kept under temporary name"
            );
        }

        self.notices.push(Notice::CommandFailed {
            command: "stop",
            reason: err.to_string(),
        });
    }

    /// Discard-forcing stop. Always wins over a queued restart.
    fn cancel_session(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let state = session.state();
        if state.is_cancellable() {
            session.mark_discard();
            info!(session_id = %session.id(), state = %state, "Cancelling recording");
            self.request_stop();
        } else if state == SessionState::Stopping {
            session.cancel_restart();
            info!(session_id = %session.id(), "Queued restart cancelled");
        }
    }

    fn keep_artifact(
        &mut self,
        session_id: SessionId,
        media_uri: &MediaUri,
        temp_name: &str,
        final_name: &str,
    ) {
        if final_name == temp_name {
            info!(session_id = %session_id, name = %media_uri.file_name(), "Recording saved");
            self.notices.push(Notice::SavedAs {
                name: media_uri.file_name().to_string(),
            });
            return;
        }

        match self.media_store.rename(media_uri, final_name) {
            Ok(renamed) => {
                info!(session_id = %session_id, name = %renamed.file_name(), "Recording saved");
                self.notices.push(Notice::SavedAs {
                    name: renamed.file_name().to_string(),
                });
            }
            Err(e) => {
                warn!(
                    session_id = %session_id,
                    error = ?e,
                    "Rename failed, artifact kept under temporary name"
                );
                self.notices.push(Notice::SavedRenameFailed {
                    name: media_uri.file_name().to_string(),
                });
            }
        }
    }

    fn delete_artifact(&mut self, media_uri: &MediaUri) {
        if let Err(e) = self.media_store.delete(media_uri) {
            warn!(uri = %media_uri, error = ?e, "Failed to delete artifact, left orphaned");
        }
    }
}

/// The session `handle` belongs to, or `None` for stale callbacks.
fn current_session<'a>(
    session: &'a mut Option<RecordingSession>,
    handle: RecordingHandle,
    kind: &str,
) -> Option<&'a mut RecordingSession> {
    let Some(current) = session.as_mut() else {
        warn!(kind, handle = %handle, "Backend event without session ignored");
        return None;
    };

    if current.handle() != handle {
        warn!(
            kind,
            handle = %handle,
            current = %current.handle(),
            "Stale backend event ignored"
        );
        return None;
    }

    Some(current)
}
