use error_location::ErrorLocation;
use thiserror::Error;

/// Capture pipeline errors with source location tracking.
///
/// `BackendStartFailure` and `PermissionDenied` end the current attempt.
/// `RenameFailure` and `DeleteFailure` are logged and never abort a session.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Recorder backend could not prepare or start a recording.
    #[error("Recorder backend failed to start: {reason} {location}")]
    BackendStartFailure {
        /// Description of the start failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recorder backend rejected a pause, resume, stop or mute command.
    #[error("Recorder backend command '{command}' failed: {reason} {location}")]
    BackendCommandFailed {
        /// Name of the rejected command.
        command: &'static str,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recorder backend finalized a segment with an error.
    #[error("Recording finalized with error: {reason} {location}")]
    BackendFinalizeError {
        /// Error reported by the backend.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Media artifact could not be renamed to its tag.
    #[error("Failed to rename {uri} to {new_name}: {reason} {location}")]
    RenameFailure {
        /// Artifact that kept its original name.
        uri: String,
        /// Name that could not be applied.
        new_name: String,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Untagged media artifact could not be deleted.
    #[error("Failed to delete {uri}: {reason} {location}")]
    DeleteFailure {
        /// Artifact left behind.
        uri: String,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Media store could not create the pending output entry.
    #[error("Failed to create pending file {name}: {reason} {location}")]
    PendingFileFailure {
        /// Requested display name.
        name: String,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A capture permission (camera, storage) is missing.
    #[error("Permission denied: {permission} {location}")]
    PermissionDenied {
        /// Name of the missing permission.
        permission: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CaptureError`].
pub type Result<T> = std::result::Result<T, CaptureError>;
