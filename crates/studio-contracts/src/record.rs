//! Session identity and generation result records.
//!
//! `ResultRecord` is created once per completed generation and is never
//! modified afterwards. History stores hold them newest-first.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{generation::GenerationOutput, wizard::AvatarStyle};

/// Unique identifier for one wizard session.
///
/// Appears in every log line the session emits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time-derived record identifier (milliseconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a wall-clock instant.
    pub fn from_time(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    /// Derive an id from `at`, moving forward one millisecond at a time
    /// until `taken` reports the candidate as free.
    pub fn unique_from_time(at: DateTime<Utc>, taken: impl Fn(&RecordId) -> bool) -> Self {
        let mut millis = at.timestamp_millis();
        loop {
            let candidate = Self(millis.to_string());
            if !taken(&candidate) {
                return candidate;
            }
            millis += 1;
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One completed generation, as shown in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: RecordId,
    pub title: String,
    pub thumbnail_ref: String,
    /// Playback length, `m:ss`.
    pub duration: String,
    /// Calendar date of creation, `YYYY-MM-DD`.
    pub created_date: String,
    pub size_label: String,
    /// Style the video was generated with. Absent for seeded entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<AvatarStyle>,
    /// Produced video file. Absent for seeded entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_ref: Option<String>,
}

impl ResultRecord {
    /// Build the record for a finished generation.
    pub fn from_output(
        id: RecordId,
        output: GenerationOutput,
        style: AvatarStyle,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: output.title,
            thumbnail_ref: output.thumbnail_ref,
            duration: output.duration,
            created_date: created_at.format("%Y-%m-%d").to_string(),
            size_label: output.size_label,
            style: Some(style),
            video_ref: Some(output.video_ref),
        }
    }
}
