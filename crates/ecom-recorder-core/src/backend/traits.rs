//! Collaborator contracts consumed by the recording controller.
//!
//! Both traits are synchronous: commands return as soon as the request is
//! accepted. Capture itself runs on the backend's own worker, which reports
//! progress as [`BackendEvent`](crate::BackendEvent)s that the host feeds
//! back into the controller's event queue.

use crate::{
    CoreResult,
    backend::{MediaUri, OutputTarget, RecordingHandle},
};

/// Audio/video capture engine.
pub trait RecorderBackend {
    /// Allocate a recording writing to `target`.
    ///
    /// # Errors
    ///
    /// `BackendStartFailure` or `PermissionDenied` when capture cannot be set up.
    fn prepare(
        &mut self,
        target: &OutputTarget,
        audio_enabled: bool,
    ) -> CoreResult<RecordingHandle>;

    /// Begin capture. `Started` follows asynchronously.
    fn start(&mut self, handle: RecordingHandle) -> CoreResult<()>;

    /// Pause capture.
    fn pause(&mut self, handle: RecordingHandle) -> CoreResult<()>;

    /// Resume a paused capture.
    fn resume(&mut self, handle: RecordingHandle) -> CoreResult<()>;

    /// Request the end of capture. `Finalized` follows asynchronously.
    fn stop(&mut self, handle: RecordingHandle) -> CoreResult<()>;

    /// Mute or unmute the audio track of a running capture.
    fn mute(&mut self, handle: RecordingHandle, muted: bool) -> CoreResult<()>;

    /// Release every resource held for `handle`. Never fails.
    fn close(&mut self, handle: RecordingHandle);
}

/// Media collection the artifacts live in.
pub trait MediaStore {
    /// Create an empty entry for a segment about to be recorded.
    fn create_pending_file(
        &mut self,
        name: &str,
        mime_type: &str,
        relative_path: &str,
    ) -> CoreResult<MediaUri>;

    /// Rename an entry in place. Returns the entry's new locator, whose
    /// display name may differ from `new_name` when the store resolves a
    /// collision.
    fn rename(&mut self, uri: &MediaUri, new_name: &str) -> CoreResult<MediaUri>;

    /// Remove an entry.
    fn delete(&mut self, uri: &MediaUri) -> CoreResult<()>;
}
