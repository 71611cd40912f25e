use crate::config::{
    default_args, default_audio_args, default_image_output_args, default_output_args,
    default_program, default_stop_timeout_secs,
};

use serde::{Deserialize, Serialize};

/// External capture program.
///
/// Arguments are templates: `{output}` is replaced with the artifact path
/// and `{video_size}` with the frame size of the requested quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Program to spawn per segment.
    #[serde(default = "default_program")]
    pub program: String,
    /// Input arguments.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Appended after `args` when audio is recorded.
    #[serde(default = "default_audio_args")]
    pub audio_args: Vec<String>,
    /// Output arguments for video segments.
    #[serde(default = "default_output_args")]
    pub output_args: Vec<String>,
    /// Output arguments for still images. The program is expected to exit
    /// on its own once the frame is written.
    #[serde(default = "default_image_output_args")]
    pub image_output_args: Vec<String>,
    /// Seconds to wait after a stop request before killing the program.
    #[serde(default = "default_stop_timeout_secs")]
    pub stop_timeout_secs: u64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            audio_args: default_audio_args(),
            output_args: default_output_args(),
            image_output_args: default_image_output_args(),
            stop_timeout_secs: default_stop_timeout_secs(),
        }
    }
}
