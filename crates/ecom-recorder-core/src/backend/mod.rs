mod finalize_outcome;
mod traits;
mod types;

pub use {
    finalize_outcome::FinalizeOutcome,
    traits::{MediaStore, RecorderBackend},
    types::{BackendEvent, BackendEventKind, MediaUri, OutputTarget, RecordingHandle},
};
