//! Scan input decoding.
//!
//! Keyboard-wedge scanners type the barcode followed by enter, so the
//! keystroke decoder accumulates characters until it sees the terminator.
//! Scanners with a callback API deliver the whole payload at once.

use crate::scan::ScanEvent;

use tracing::{debug, trace};

/// A single keystroke as seen by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A printable character.
    Char(char),
    /// The enter key, terminating a scan.
    Enter,
    /// Any other key (modifiers, navigation).
    Other,
}

/// Accumulates keystrokes into scan codes.
#[derive(Debug, Default)]
pub struct KeystrokeDecoder {
    buffer: String,
}

impl KeystrokeDecoder {
    /// Create a decoder with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one keystroke. Returns a scan event when enter completes a
    /// non-empty code.
    pub fn push(&mut self, key: KeyInput) -> Option<ScanEvent> {
        match key {
            KeyInput::Char(c) if is_code_char(c) => {
                self.buffer.push(c);
                None
            }
            KeyInput::Char(c) => {
                trace!(char = ?c, "Ignoring keystroke outside scan alphabet");
                None
            }
            KeyInput::Enter => {
                let code = self.buffer.trim().to_string();
                self.buffer.clear();

                if code.is_empty() {
                    return None;
                }

                debug!(code = %code, "Scan decoded from keystrokes");
                Some(ScanEvent::new(code))
            }
            KeyInput::Other => None,
        }
    }

    /// Characters accumulated since the last enter.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Drop any partial input.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Turn one hardware scanner payload into a scan event.
///
/// Blank payloads yield nothing.
pub fn decode_payload(payload: &str) -> Option<ScanEvent> {
    let code = payload.trim();
    if code.is_empty() {
        return None;
    }

    debug!(code = %code, "Scan decoded from scanner callback");
    Some(ScanEvent::new(code))
}

fn is_code_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.')
}
