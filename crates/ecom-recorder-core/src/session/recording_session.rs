use crate::{
    backend::{MediaUri, RecordingHandle},
    naming::CaptureMode,
    session::{CaptureSettings, PendingRename, QualityHint, SessionState},
};

use std::{fmt, time::Instant};

/// Monotonic session number, unique for the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The session number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One physical capture attempt, owned by the recording controller.
///
/// Lives from `start_recording` until its finalize outcome is processed.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    id: SessionId,
    started_at: Instant,
    state: SessionState,
    mode: CaptureMode,
    muted: bool,
    quality: QualityHint,
    handle: RecordingHandle,
    media_uri: MediaUri,
    temp_name: String,
    pending_rename: Option<PendingRename>,
    discard: bool,
}

impl RecordingSession {
    pub(crate) fn new(
        id: SessionId,
        settings: &CaptureSettings,
        handle: RecordingHandle,
        media_uri: MediaUri,
        temp_name: String,
        pending_rename: Option<PendingRename>,
    ) -> Self {
        Self {
            id,
            started_at: Instant::now(),
            state: SessionState::Starting,
            mode: settings.mode,
            muted: settings.muted,
            quality: settings.quality,
            handle,
            media_uri,
            temp_name,
            pending_rename,
            discard: false,
        }
    }

    /// Session number.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// When the session was created.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Capture mode snapshotted at creation.
    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Whether the microphone is muted.
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Quality requested at creation.
    pub fn quality(&self) -> QualityHint {
        self.quality
    }

    /// Backend recording handle.
    pub fn handle(&self) -> RecordingHandle {
        self.handle
    }

    /// Pending artifact in the media store.
    pub fn media_uri(&self) -> &MediaUri {
        &self.media_uri
    }

    /// Temporary file name of the artifact, extension included.
    pub fn temp_name(&self) -> &str {
        &self.temp_name
    }

    /// Tag waiting for finalize, if any.
    pub fn pending_rename(&self) -> Option<&PendingRename> {
        self.pending_rename.as_ref()
    }

    /// Whether a cancellation marked the artifact for discard.
    pub fn is_discarded(&self) -> bool {
        self.discard
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    pub(crate) fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Attach a tag. Refused unless the session is `Recording` or `Paused`
    /// and carries no tag yet.
    pub(crate) fn attach_pending_rename(&mut self, rename: PendingRename) -> bool {
        if !self.state.is_active() || self.pending_rename.is_some() {
            return false;
        }
        self.pending_rename = Some(rename);
        true
    }

    pub(crate) fn take_pending_rename(&mut self) -> Option<PendingRename> {
        self.pending_rename.take()
    }

    /// Clear the tag and mark the artifact for discard.
    pub(crate) fn mark_discard(&mut self) {
        self.pending_rename = None;
        self.discard = true;
    }

    pub(crate) fn cancel_restart(&mut self) {
        if let Some(rename) = self.pending_rename.as_mut() {
            rename.cancel_restart();
        }
    }
}
