//! Recorder backend that runs an external capture program per segment.
//!
//! Each started recording is owned by a supervisor task that emits
//! `Started` once the program runs and `Finalized` when it exits. A stop
//! writes `q` to the program's stdin, which is how `ffmpeg` quits cleanly;
//! programs that ignore it are killed after the configured timeout.

use crate::config::RecorderConfig;

use ecom_recorder_core::{
    BackendEvent, CaptureError, ControllerEvent, CoreResult, FinalizeOutcome, MediaUri,
    OutputTarget, QualityHint, RecorderBackend, RecordingHandle,
};

use std::{
    collections::HashMap,
    fs, io,
    panic::Location,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use tokio::{
    io::AsyncWriteExt,
    process::{Child, ChildStdin, Command},
    sync::mpsc,
};
use tracing::{debug, info, instrument, warn};

const OUTPUT_PLACEHOLDER: &str = "{output}";
const VIDEO_SIZE_PLACEHOLDER: &str = "{video_size}";

/// Spawns the configured capture program for every segment.
///
/// Must be used from within a tokio runtime: `start` spawns the program
/// and its supervisor task.
pub struct ProcessRecorder {
    config: RecorderConfig,
    events_tx: mpsc::Sender<ControllerEvent>,
    muted: bool,
    next_handle: u64,
    prepared: HashMap<RecordingHandle, PreparedRecording>,
    running: HashMap<RecordingHandle, RunningRecording>,
}

#[derive(Debug)]
struct PreparedRecording {
    output: PathBuf,
    args: Vec<String>,
}

#[derive(Debug)]
struct RunningRecording {
    control_tx: mpsc::UnboundedSender<RecorderControl>,
    pid: Option<u32>,
    paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecorderControl {
    Stop,
}

impl ProcessRecorder {
    /// Create a backend delivering lifecycle events into `events_tx`.
    ///
    /// `muted` is the initial microphone preference: audio arguments are
    /// only added to segments recorded unmuted.
    pub fn new(
        config: RecorderConfig,
        events_tx: mpsc::Sender<ControllerEvent>,
        muted: bool,
    ) -> Self {
        Self {
            config,
            events_tx,
            muted,
            next_handle: 0,
            prepared: HashMap::new(),
            running: HashMap::new(),
        }
    }

    fn running_mut(
        &mut self,
        handle: RecordingHandle,
        command: &'static str,
    ) -> CoreResult<&mut RunningRecording> {
        self.running
            .get_mut(&handle)
            .ok_or_else(|| command_failed(command, format!("unknown recording {}", handle)))
    }
}

impl RecorderBackend for ProcessRecorder {
    #[instrument(skip(self, target), fields(output = %target.uri))]
    fn prepare(
        &mut self,
        target: &OutputTarget,
        audio_enabled: bool,
    ) -> CoreResult<RecordingHandle> {
        // Supervisors drop their control receiver on exit.
        self.running
            .retain(|_, recording| !recording.control_tx.is_closed());

        let still_image = target.mime_type.starts_with("image/");
        let with_audio = audio_enabled && !self.muted && !still_image;
        let output = PathBuf::from(target.uri.as_str());
        let args = build_args(&self.config, &output, target.quality, with_audio, still_image);

        self.next_handle += 1;
        let handle = RecordingHandle::new(self.next_handle);

        debug!(handle = %handle, with_audio, "Recording prepared");
        self.prepared.insert(handle, PreparedRecording { output, args });

        Ok(handle)
    }

    #[instrument(skip(self))]
    fn start(&mut self, handle: RecordingHandle) -> CoreResult<()> {
        let prepared =
            self.prepared
                .remove(&handle)
                .ok_or_else(|| CaptureError::BackendStartFailure {
                    reason: format!("recording {} was not prepared", handle),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let mut child = Command::new(&self.config.program)
            .args(&prepared.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_failure(&self.config.program, &e))?;

        let pid = child.id();
        let stdin = child.stdin.take();
        let (control_tx, control_rx) = mpsc::unbounded_channel();

        let supervisor = Supervisor {
            handle,
            child,
            stdin,
            output: prepared.output,
            control_rx,
            events_tx: self.events_tx.clone(),
            stop_timeout: Duration::from_secs(self.config.stop_timeout_secs),
        };
        tokio::spawn(supervisor.run());

        info!(handle = %handle, pid = ?pid, program = %self.config.program, "Capture program started");

        self.running.insert(
            handle,
            RunningRecording {
                control_tx,
                pid,
                paused: false,
            },
        );

        Ok(())
    }

    #[instrument(skip(self))]
    fn pause(&mut self, handle: RecordingHandle) -> CoreResult<()> {
        let recording = self.running_mut(handle, "pause")?;
        suspend(recording.pid, true, "pause")?;
        recording.paused = true;
        Ok(())
    }

    #[instrument(skip(self))]
    fn resume(&mut self, handle: RecordingHandle) -> CoreResult<()> {
        let recording = self.running_mut(handle, "resume")?;
        suspend(recording.pid, false, "resume")?;
        recording.paused = false;
        Ok(())
    }

    #[instrument(skip(self))]
    fn stop(&mut self, handle: RecordingHandle) -> CoreResult<()> {
        let recording = self.running_mut(handle, "stop")?;

        // A suspended program cannot read the quit command.
        if recording.paused {
            suspend(recording.pid, false, "stop")?;
            recording.paused = false;
        }

        if recording.control_tx.send(RecorderControl::Stop).is_err() {
            debug!(handle = %handle, "Capture program already exited, finalize pending");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    fn mute(&mut self, handle: RecordingHandle, muted: bool) -> CoreResult<()> {
        if muted != self.muted {
            info!(handle = %handle, muted, "Mute change applies from the next segment");
        }
        self.muted = muted;
        Ok(())
    }

    #[instrument(skip(self))]
    fn close(&mut self, handle: RecordingHandle) {
        self.prepared.remove(&handle);

        // Dropping the control sender makes the supervisor kill the program.
        if self.running.remove(&handle).is_some() {
            debug!(handle = %handle, "Recording closed");
        }
    }
}

/// Expand the argument template for one segment.
pub(crate) fn build_args(
    config: &RecorderConfig,
    output: &Path,
    quality: QualityHint,
    with_audio: bool,
    still_image: bool,
) -> Vec<String> {
    let output = output.to_string_lossy();
    let audio: &[String] = if with_audio { &config.audio_args } else { &[] };
    let output_args = if still_image {
        &config.image_output_args
    } else {
        &config.output_args
    };

    config
        .args
        .iter()
        .chain(audio)
        .chain(output_args)
        .map(|arg| {
            arg.replace(OUTPUT_PLACEHOLDER, &output)
                .replace(VIDEO_SIZE_PLACEHOLDER, quality.video_size())
        })
        .collect()
}

/// Outcome of a finished capture program.
pub(crate) fn finalize_outcome(
    output: &Path,
    status: io::Result<ExitStatus>,
    elapsed: Duration,
) -> FinalizeOutcome {
    let uri = MediaUri::new(output.to_string_lossy().into_owned());

    let status = match status {
        Ok(status) => status,
        Err(e) => {
            return FinalizeOutcome::failed(
                format!("failed to wait for capture program: {}", e),
                Some(uri),
            );
        }
    };

    if !status.success() {
        let reason = format!("capture program exited with {}", status);
        return FinalizeOutcome::failed(reason, Some(uri));
    }

    match fs::metadata(output) {
        Ok(metadata) if metadata.len() > 0 => FinalizeOutcome::succeeded(uri, Some(elapsed)),
        Ok(_) => FinalizeOutcome::failed("capture program wrote no data", Some(uri)),
        Err(e) => FinalizeOutcome::failed(format!("output missing: {}", e), Some(uri)),
    }
}

struct Supervisor {
    handle: RecordingHandle,
    child: Child,
    stdin: Option<ChildStdin>,
    output: PathBuf,
    control_rx: mpsc::UnboundedReceiver<RecorderControl>,
    events_tx: mpsc::Sender<ControllerEvent>,
    stop_timeout: Duration,
}

enum Wake {
    Exited(io::Result<ExitStatus>),
    Control(Option<RecorderControl>),
}

impl Supervisor {
    async fn run(mut self) {
        let started_at = Instant::now();

        if self
            .events_tx
            .send(BackendEvent::started(self.handle).into())
            .await
            .is_err()
        {
            warn!(handle = %self.handle, "Event queue closed, killing capture program");
            self.kill().await;
            return;
        }

        let wake = tokio::select! {
            status = self.child.wait() => Wake::Exited(status),
            control = self.control_rx.recv() => Wake::Control(control),
        };

        let status = match wake {
            Wake::Exited(status) => {
                info!(handle = %self.handle, "Capture program exited on its own");
                status
            }
            Wake::Control(Some(RecorderControl::Stop)) => self.quit().await,
            Wake::Control(None) => {
                debug!(handle = %self.handle, "Recording closed, killing capture program");
                self.kill().await;
                return;
            }
        };

        let outcome = finalize_outcome(&self.output, status, started_at.elapsed());
        info!(handle = %self.handle, success = outcome.success(), "Capture program finished");

        if self
            .events_tx
            .send(BackendEvent::finalized(self.handle, outcome).into())
            .await
            .is_err()
        {
            warn!(handle = %self.handle, "Event queue closed, finalize dropped");
        }
    }

    async fn quit(&mut self) -> io::Result<ExitStatus> {
        if let Some(mut stdin) = self.stdin.take() {
            if let Err(e) = stdin.write_all(b"q\n").await {
                debug!(handle = %self.handle, error = ?e, "Failed to write quit command");
            }
            drop(stdin);
        }

        match tokio::time::timeout(self.stop_timeout, self.child.wait()).await {
            Ok(status) => status,
            Err(_) => {
                warn!(handle = %self.handle, "Capture program ignored quit, killing");
                self.child.kill().await?;
                self.child.wait().await
            }
        }
    }

    async fn kill(&mut self) {
        if let Err(e) = self.child.kill().await {
            warn!(handle = %self.handle, error = ?e, "Failed to kill capture program");
        }
    }
}

#[track_caller]
fn command_failed(command: &'static str, reason: impl Into<String>) -> CaptureError {
    CaptureError::BackendCommandFailed {
        command,
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn spawn_failure(program: &str, err: &io::Error) -> CaptureError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return CaptureError::PermissionDenied {
            permission: format!("execute {}", program),
            location: ErrorLocation::from(Location::caller()),
        };
    }

    CaptureError::BackendStartFailure {
        reason: format!("failed to spawn {}: {}", program, err),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Stop (`suspend = true`) or continue the capture program.
#[cfg(unix)]
fn suspend(pid: Option<u32>, suspend: bool, command: &'static str) -> CoreResult<()> {
    let pid = pid.ok_or_else(|| command_failed(command, "capture program already exited"))?;
    let signal = if suspend {
        libc::SIGSTOP
    } else {
        libc::SIGCONT
    };

    // SAFETY: kill only sends a signal; it has no memory-safety preconditions.
    let result = unsafe { libc::kill(pid as libc::pid_t, signal) };
    if result != 0 {
        return Err(command_failed(command, io::Error::last_os_error().to_string()));
    }

    Ok(())
}

#[cfg(not(unix))]
fn suspend(_pid: Option<u32>, _suspend: bool, command: &'static str) -> CoreResult<()> {
    Err(command_failed(
        command,
        "suspending the capture program requires unix signals",
    ))
}
