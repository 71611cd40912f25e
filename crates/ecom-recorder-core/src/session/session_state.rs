use std::fmt;

/// Recording controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No session exists.
    Idle,
    /// Backend asked to start, waiting for confirmation.
    Starting,
    /// Capture running.
    Recording,
    /// Capture paused.
    Paused,
    /// Backend asked to stop, waiting for finalize.
    Stopping,
    /// Finalize outcome being processed. Terminal for the session.
    Finalizing,
}

impl SessionState {
    /// `Recording` or `Paused`: the states a tag may be attached in.
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Recording | SessionState::Paused)
    }

    /// States that a discard-forcing cancellation stops.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            SessionState::Starting | SessionState::Recording | SessionState::Paused
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Recording => "recording",
            SessionState::Paused => "paused",
            SessionState::Stopping => "stopping",
            SessionState::Finalizing => "finalizing",
        };
        f.write_str(name)
    }
}
