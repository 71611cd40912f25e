//! Ecom Recorder Core Library
//!
//! Continuous-capture recording session state machine for packing and
//! returns stations. Scans tag the recording in flight; each tag cuts the
//! segment, names it after the scanned code and starts the next one.
//! Untagged segments are discarded.
//!
//! # Example
//!
//! ```no_run
//! use ecom_recorder_core::{
//!     CaptureSettings, ControllerEvent, MediaStore, RecorderBackend, RecordingController,
//!     ScanEvent,
//! };
//!
//! fn run<B: RecorderBackend, M: MediaStore>(backend: B, store: M) {
//!     let mut controller = RecordingController::new(backend, store, CaptureSettings::default());
//!
//!     controller.handle_event(ControllerEvent::StartRequested);
//!     // ... backend confirms the start through ControllerEvent::Backend ...
//!     let notices = controller.handle_event(ScanEvent::new("JT0123456789").into());
//!
//!     for notice in notices {
//!         println!("{}", notice);
//!     }
//! }
//! ```

mod backend;
mod controller;
mod error;
mod naming;
mod scan;
mod session;

pub use {
    backend::{
        BackendEvent, BackendEventKind, FinalizeOutcome, MediaStore, MediaUri, OutputTarget,
        RecorderBackend, RecordingHandle,
    },
    controller::{ControllerEvent, DiscardReason, Notice, RecordingController},
    error::{CaptureError, Result as CoreResult},
    naming::{
        CaptureMode, MEDIA_ROOT, SegmentDecision, TIMESTAMP_FORMAT, decide, file_name,
        timestamp_name,
    },
    scan::{KeyInput, KeystrokeDecoder, SanitizedCode, ScanEvent, decode_payload, sanitize},
    session::{
        CaptureSettings, PendingRename, QualityHint, RecordingSession, SessionId, SessionState,
    },
};

#[cfg(test)]
mod tests;
