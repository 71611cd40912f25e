use serde::{Deserialize, Serialize};

/// Root of every capture folder in the media collection.
pub const MEDIA_ROOT: &str = "DCIM/Ecom";

/// Capture workflow the station runs in.
///
/// Each mode owns a media subfolder and decides how scans interact with
/// the session: `Continuous` tags and cuts running recordings, the
/// single-shot modes start one pre-tagged capture per scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Outbound packing, one clip per scanned order.
    Pack,
    /// Returns processing, one clip per scanned parcel.
    Return,
    /// Uninterrupted recording cut into segments by scans.
    #[default]
    Continuous,
    /// Single still image per scan.
    Image,
}

impl CaptureMode {
    /// Folder name under [`MEDIA_ROOT`].
    pub fn folder(self) -> &'static str {
        match self {
            CaptureMode::Pack => "Pack",
            CaptureMode::Return => "Return",
            CaptureMode::Continuous => "Continuous",
            CaptureMode::Image => "Image",
        }
    }

    /// Relative path of the mode's folder inside the media collection.
    pub fn relative_path(self) -> String {
        format!("{}/{}", MEDIA_ROOT, self.folder())
    }

    /// File extension of produced artifacts, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            CaptureMode::Image => "jpg",
            _ => "mp4",
        }
    }

    /// MIME type of produced artifacts.
    pub fn mime_type(self) -> &'static str {
        match self {
            CaptureMode::Image => "image/jpeg",
            _ => "video/mp4",
        }
    }

    /// Whether scans cut a running recording instead of starting one.
    pub fn is_continuous(self) -> bool {
        matches!(self, CaptureMode::Continuous)
    }
}
