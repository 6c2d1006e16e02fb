//! Generation request, output, and event types.
//!
//! The controller hands a `GenerationRequest` to a backend; the backend
//! answers with an ordered stream of `GenerationEvent`s ending in exactly one
//! terminal event.

use serde::{Deserialize, Serialize};

use crate::{
    media::MediaHandle,
    record::SessionId,
    wizard::AvatarStyle,
};

/// Snapshot of the wizard inputs taken when generation starts.
///
/// Later edits to the wizard do not affect a job already in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub session_id: SessionId,
    pub image: MediaHandle,
    pub audio: MediaHandle,
    pub style: AvatarStyle,
    pub enhance_with_ai: bool,
    pub use_premium: bool,
}

/// What a backend produces for a successful job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub title: String,
    pub thumbnail_ref: String,
    pub duration: String,
    pub size_label: String,
    pub video_ref: String,
}

/// One message from a running generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEvent {
    /// Progress so far, 0–100.
    Progress(u8),
    /// Terminal: the job finished.
    Completed(GenerationOutput),
    /// Terminal: the job failed.
    Failed(String),
}

impl GenerationEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GenerationEvent::Progress(_))
    }
}
