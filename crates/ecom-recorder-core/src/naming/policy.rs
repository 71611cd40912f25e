//! Segment naming policy.
//!
//! An untagged clip cannot be matched to a package later, so the default is
//! to discard it. Tagged clips are kept under their tag, and a tag that cut
//! a running recording asks for the next recording to start at once.

use crate::{backend::FinalizeOutcome, naming::file_name, session::PendingRename};

/// What to do with a finalized segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentDecision {
    /// Keep the artifact (otherwise delete it).
    pub keep: bool,
    /// Name to give the kept artifact.
    pub final_name: Option<String>,
    /// Start a new recording right away.
    pub restart: bool,
}

impl SegmentDecision {
    fn discard() -> Self {
        Self {
            keep: false,
            final_name: None,
            restart: false,
        }
    }
}

/// Decide the post-processing of a finalized segment.
///
/// Pure: no media store or backend access.
pub fn decide(
    pending_rename: Option<&PendingRename>,
    outcome: &FinalizeOutcome,
    extension: &str,
) -> SegmentDecision {
    if !outcome.success() {
        return SegmentDecision::discard();
    }

    match pending_rename {
        None => SegmentDecision::discard(),
        Some(rename) => SegmentDecision {
            keep: true,
            final_name: Some(file_name(rename.target_base_name().as_str(), extension)),
            restart: rename.force_restart(),
        },
    }
}
