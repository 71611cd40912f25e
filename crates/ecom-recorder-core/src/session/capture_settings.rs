use crate::naming::CaptureMode;

use serde::{Deserialize, Serialize};

/// Preferred capture resolution. The backend may fall back to another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityHint {
    /// 2160p.
    Uhd,
    /// 1080p.
    Fhd,
    /// 720p.
    #[default]
    Hd,
    /// 480p.
    Sd,
}

impl QualityHint {
    /// Frame size as `WIDTHxHEIGHT`.
    pub fn video_size(self) -> &'static str {
        match self {
            QualityHint::Uhd => "3840x2160",
            QualityHint::Fhd => "1920x1080",
            QualityHint::Hd => "1280x720",
            QualityHint::Sd => "720x480",
        }
    }
}

/// Station preferences, snapshotted into every new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Active capture workflow.
    #[serde(default)]
    pub mode: CaptureMode,
    /// Start recordings with the microphone muted.
    #[serde(default = "default_muted")]
    pub muted: bool,
    /// Requested capture quality.
    #[serde(default)]
    pub quality: QualityHint,
    /// Whether audio capture is permitted at all.
    #[serde(default = "default_audio_permitted")]
    pub audio_permitted: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            mode: CaptureMode::default(),
            muted: default_muted(),
            quality: QualityHint::default(),
            audio_permitted: default_audio_permitted(),
        }
    }
}

fn default_muted() -> bool {
    true
}

fn default_audio_permitted() -> bool {
    true
}
