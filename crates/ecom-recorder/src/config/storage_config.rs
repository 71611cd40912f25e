use crate::config::default_media_root;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where captures are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory standing in for the device media collection.
    /// Mode folders (`DCIM/Ecom/<Mode>`) are created below it.
    #[serde(default = "default_media_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
        }
    }
}
