#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod recorder_config;
mod storage_config;

pub(crate) use {
    config::Config, logging_config::LoggingConfig, recorder_config::RecorderConfig,
    storage_config::StorageConfig,
};

use std::path::PathBuf;

use directories::ProjectDirs;

pub(crate) const QUALIFIER: &str = "com";
pub(crate) const ORGANIZATION: &str = "accli";
pub(crate) const APPLICATION: &str = "Ecom-Recorder";

pub(crate) const DEFAULT_PROGRAM: &str = "ffmpeg";
pub(crate) const DEFAULT_STOP_TIMEOUT_SECS: u64 = 10;

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

pub(crate) fn default_media_root() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("media"))
        .unwrap_or_else(|| PathBuf::from("media"))
}

pub(crate) fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

pub(crate) fn default_args() -> Vec<String> {
    to_strings(&[
        "-y",
        "-f",
        "v4l2",
        "-video_size",
        "{video_size}",
        "-i",
        "/dev/video0",
    ])
}

pub(crate) fn default_audio_args() -> Vec<String> {
    to_strings(&["-f", "alsa", "-i", "default"])
}

pub(crate) fn default_output_args() -> Vec<String> {
    to_strings(&["-c:v", "libx264", "-preset", "veryfast", "{output}"])
}

pub(crate) fn default_image_output_args() -> Vec<String> {
    to_strings(&["-frames:v", "1", "{output}"])
}

pub(crate) fn default_stop_timeout_secs() -> u64 {
    DEFAULT_STOP_TIMEOUT_SECS
}

fn to_strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}
