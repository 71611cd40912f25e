use crate::backend::MediaUri;

use std::time::Duration;

/// Result reported by the recorder backend when a segment ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeOutcome {
    success: bool,
    media: Option<MediaUri>,
    duration_hint: Option<Duration>,
    error: Option<String>,
}

impl FinalizeOutcome {
    /// Segment written completely.
    pub fn succeeded(media: MediaUri, duration_hint: Option<Duration>) -> Self {
        Self {
            success: true,
            media: Some(media),
            duration_hint,
            error: None,
        }
    }

    /// Segment ended with an error. `media` is the partial artifact, if any.
    pub fn failed(reason: impl Into<String>, media: Option<MediaUri>) -> Self {
        Self {
            success: false,
            media,
            duration_hint: None,
            error: Some(reason.into()),
        }
    }

    /// Whether the artifact is complete.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Artifact written by the backend.
    pub fn media(&self) -> Option<&MediaUri> {
        self.media.as_ref()
    }

    /// Recorded duration, when the backend measures it.
    pub fn duration_hint(&self) -> Option<Duration> {
        self.duration_hint
    }

    /// Backend error description for failed outcomes.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
