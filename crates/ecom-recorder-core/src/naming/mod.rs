mod capture_mode;
mod filename;
mod policy;

pub use {
    capture_mode::{CaptureMode, MEDIA_ROOT},
    filename::{TIMESTAMP_FORMAT, file_name, timestamp_name},
    policy::{SegmentDecision, decide},
};
