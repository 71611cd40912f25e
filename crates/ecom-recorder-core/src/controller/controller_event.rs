use crate::{backend::BackendEvent, scan::ScanEvent};

/// Everything the recording controller reacts to.
///
/// Operator commands, scans, lifecycle signals and backend callbacks all
/// travel through one queue as this type, so the controller sees them one
/// at a time in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Operator asked to start recording.
    StartRequested,
    /// Operator asked to stop (and discard, unless tagged).
    StopRequested,
    /// Operator asked to pause.
    PauseRequested,
    /// Operator asked to resume.
    ResumeRequested,
    /// Operator toggled the microphone.
    MuteRequested(bool),
    /// A scan code arrived.
    Scan(ScanEvent),
    /// The station left the foreground.
    AppBackgrounded,
    /// The station is shutting down.
    ActivityDestroyed,
    /// Recorder backend callback.
    Backend(BackendEvent),
}

impl From<ScanEvent> for ControllerEvent {
    fn from(event: ScanEvent) -> Self {
        ControllerEvent::Scan(event)
    }
}

impl From<BackendEvent> for ControllerEvent {
    fn from(event: BackendEvent) -> Self {
        ControllerEvent::Backend(event)
    }
}
