mod controller_event;
mod notice;
mod recording_controller;

pub use {
    controller_event::ControllerEvent,
    notice::{DiscardReason, Notice},
    recording_controller::RecordingController,
};
