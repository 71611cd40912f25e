mod decoder;
mod sanitize;
mod scan_event;

pub use {
    decoder::{KeyInput, KeystrokeDecoder, decode_payload},
    sanitize::{SanitizedCode, sanitize},
    scan_event::ScanEvent,
};
