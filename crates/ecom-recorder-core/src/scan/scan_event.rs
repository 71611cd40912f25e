use chrono::{DateTime, Local};

/// One decoded scan, consumed once by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    code: String,
    timestamp: DateTime<Local>,
}

impl ScanEvent {
    /// Create a scan event stamped with the current local time.
    pub fn new(code: impl Into<String>) -> Self {
        Self::at(code, Local::now())
    }

    /// Create a scan event with an explicit timestamp.
    pub fn at(code: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            code: code.into(),
            timestamp,
        }
    }

    /// Raw decoded code, not yet sanitized.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// When the scan was decoded.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}
