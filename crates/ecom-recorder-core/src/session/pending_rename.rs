use crate::scan::SanitizedCode;

/// Tag waiting to be applied to a session's artifact on finalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRename {
    target_base_name: SanitizedCode,
    force_restart: bool,
}

impl PendingRename {
    /// Create a tag. `force_restart` queues a new recording once the tagged
    /// one is finalized.
    pub fn new(target_base_name: SanitizedCode, force_restart: bool) -> Self {
        Self {
            target_base_name,
            force_restart,
        }
    }

    /// Base name (without extension) the artifact will receive.
    pub fn target_base_name(&self) -> &SanitizedCode {
        &self.target_base_name
    }

    /// Whether a new recording starts right after finalize.
    pub fn force_restart(&self) -> bool {
        self.force_restart
    }

    /// Drop the queued restart, keeping the tag.
    pub fn cancel_restart(&mut self) {
        self.force_restart = false;
    }
}
