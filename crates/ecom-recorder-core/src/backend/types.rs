use crate::{backend::FinalizeOutcome, session::QualityHint};

use std::fmt;

/// Location of a media artifact in the media store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaUri(String);

impl MediaUri {
    /// Wrap a store-specific locator.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The raw locator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, i.e. the artifact's display name.
    pub fn file_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }
}

impl fmt::Display for MediaUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of one prepared recording, minted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordingHandle(u64);

impl RecordingHandle {
    /// Wrap a backend-specific id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The backend-specific id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec-{}", self.0)
    }
}

/// Where and how the backend should write one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Pending entry created in the media store.
    pub uri: MediaUri,
    /// Temporary display name of the entry.
    pub display_name: String,
    /// MIME type of the artifact.
    pub mime_type: &'static str,
    /// Folder of the entry inside the media collection.
    pub relative_path: String,
    /// Requested capture quality.
    pub quality: QualityHint,
}

/// Lifecycle notification emitted asynchronously by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEvent {
    /// Recording the event belongs to.
    pub handle: RecordingHandle,
    /// What happened.
    pub kind: BackendEventKind,
}

/// Kinds of backend lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEventKind {
    /// Capture is running.
    Started,
    /// Capture is paused.
    Paused,
    /// Capture resumed after a pause.
    Resumed,
    /// Capture ended and the artifact is ready or failed.
    Finalized(FinalizeOutcome),
}

impl BackendEvent {
    /// Start confirmation for `handle`.
    pub fn started(handle: RecordingHandle) -> Self {
        Self {
            handle,
            kind: BackendEventKind::Started,
        }
    }

    /// Pause confirmation for `handle`.
    pub fn paused(handle: RecordingHandle) -> Self {
        Self {
            handle,
            kind: BackendEventKind::Paused,
        }
    }

    /// Resume confirmation for `handle`.
    pub fn resumed(handle: RecordingHandle) -> Self {
        Self {
            handle,
            kind: BackendEventKind::Resumed,
        }
    }

    /// Finalize notification for `handle`.
    pub fn finalized(handle: RecordingHandle, outcome: FinalizeOutcome) -> Self {
        Self {
            handle,
            kind: BackendEventKind::Finalized(outcome),
        }
    }
}
