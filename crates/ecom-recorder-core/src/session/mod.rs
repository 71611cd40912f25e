mod capture_settings;
mod pending_rename;
mod recording_session;
mod session_state;

pub use {
    capture_settings::{CaptureSettings, QualityHint},
    pending_rename::PendingRename,
    recording_session::{RecordingSession, SessionId},
    session_state::SessionState,
};
