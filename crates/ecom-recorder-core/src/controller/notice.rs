use crate::session::SessionId;

use std::fmt;

/// Why an artifact was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// Stopped without a tag.
    NotScanned,
    /// Cancelled because the station was backgrounded or closed.
    LeftApp,
}

/// Operator-visible outcome of a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Backend confirmed the start of a session.
    RecordingStarted {
        /// Session that started.
        session_id: SessionId,
    },
    /// Capture paused.
    Paused,
    /// Capture resumed.
    Resumed,
    /// Microphone muted (`true`) or unmuted.
    Muted(bool),
    /// Artifact kept under its tag.
    SavedAs {
        /// Final file name.
        name: String,
    },
    /// Artifact kept, but the tag could not be applied.
    SavedRenameFailed {
        /// Name the artifact kept.
        name: String,
    },
    /// Artifact deleted.
    Discarded {
        /// Why it was deleted.
        reason: DiscardReason,
    },
    /// A recording could not be started.
    StartFailed {
        /// Failure description.
        reason: String,
    },
    /// A capture permission is missing.
    PermissionDenied {
        /// Missing permission.
        permission: String,
    },
    /// Backend ended the recording with an error.
    FinalizeFailed {
        /// Failure description.
        reason: String,
    },
    /// A scan arrived when it could not tag anything.
    ScanIgnored {
        /// Sanitized code.
        code: String,
    },
    /// Backend rejected a pause, resume, stop or mute.
    CommandFailed {
        /// Rejected command.
        command: &'static str,
        /// Failure description.
        reason: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RecordingStarted { session_id } => {
                write!(f, "Recording... (session {})", session_id)
            }
            Notice::Paused => f.write_str("Paused"),
            Notice::Resumed => f.write_str("Recording..."),
            Notice::Muted(true) => f.write_str("Microphone muted"),
            Notice::Muted(false) => f.write_str("Microphone unmuted"),
            Notice::SavedAs { name } => write!(f, "Saved as {}", name),
            Notice::SavedRenameFailed { name } => write!(f, "Saved as {} (rename failed)", name),
            Notice::Discarded {
                reason: DiscardReason::NotScanned,
            } => f.write_str("Recording discarded (not scanned)"),
            Notice::Discarded {
                reason: DiscardReason::LeftApp,
            } => f.write_str("Recording discarded (left app)"),
            Notice::StartFailed { reason } => write!(f, "Could not start recording: {}", reason),
            Notice::PermissionDenied { permission } => {
                write!(f, "Permission required: {}", permission)
            }
            Notice::FinalizeFailed { reason } => write!(f, "Recording failed: {}", reason),
            Notice::ScanIgnored { code } => write!(f, "Scan {} ignored", code),
            Notice::CommandFailed { command, reason } => {
                write!(f, "Could not {}: {}", command, reason)
            }
        }
    }
}
