//! Media store backed by a plain directory tree.
//!
//! The configured root stands in for the device media collection. Like a
//! media provider, the store never overwrites an existing entry: a display
//! name that is already taken gets a ` (n)` suffix.

use ecom_recorder_core::{CaptureError, CoreResult, MediaStore, MediaUri};

use std::{
    fs::{self, OpenOptions},
    io,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Filesystem implementation of [`MediaStore`].
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    /// Create a store rooted at `root`. Directories are created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root of the media tree.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MediaStore for FsMediaStore {
    #[instrument(skip(self))]
    fn create_pending_file(
        &mut self,
        name: &str,
        mime_type: &str,
        relative_path: &str,
    ) -> CoreResult<MediaUri> {
        let dir = self.root.join(relative_path);
        fs::create_dir_all(&dir).map_err(|e| pending_failure(name, &e))?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = dir.join(numbered_name(name, attempt));

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {
                    debug!(path = ?path, "Pending file created");
                    return Ok(uri_for(&path));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(pending_failure(name, &e)),
            }
        }

        Err(CaptureError::PendingFileFailure {
            name: name.to_string(),
            reason: "no free file name".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[instrument(skip(self))]
    fn rename(&mut self, uri: &MediaUri, new_name: &str) -> CoreResult<MediaUri> {
        let from = PathBuf::from(uri.as_str());
        let dir = from
            .parent()
            .ok_or_else(|| rename_failure(uri, new_name, "artifact has no parent directory"))?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let to = dir.join(numbered_name(new_name, attempt));

            if to == from {
                return Ok(uri.clone());
            }
            if to.exists() {
                continue;
            }

            fs::rename(&from, &to).map_err(|e| rename_failure(uri, new_name, &e.to_string()))?;
            info!(from = ?from, to = ?to, "Artifact renamed");
            return Ok(uri_for(&to));
        }

        Err(rename_failure(uri, new_name, "no free file name"))
    }

    #[instrument(skip(self))]
    fn delete(&mut self, uri: &MediaUri) -> CoreResult<()> {
        match fs::remove_file(uri.as_str()) {
            Ok(()) => {
                debug!("Artifact deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Artifact already gone");
                Ok(())
            }
            Err(e) => Err(CaptureError::DeleteFailure {
                uri: uri.to_string(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// `name` for the first attempt, then `stem (n).ext`.
pub(crate) fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => {
            format!("{} ({}).{}", stem, attempt, extension)
        }
        _ => format!("{} ({})", name, attempt),
    }
}

fn uri_for(path: &Path) -> MediaUri {
    MediaUri::new(path.to_string_lossy().into_owned())
}

#[track_caller]
fn pending_failure(name: &str, err: &io::Error) -> CaptureError {
    CaptureError::PendingFileFailure {
        name: name.to_string(),
        reason: err.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn rename_failure(uri: &MediaUri, new_name: &str, reason: &str) -> CaptureError {
    CaptureError::RenameFailure {
        uri: uri.to_string(),
        new_name: new_name.to_string(),
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
