//! Opaque media handles supplied by an external file picker.
//!
//! The runtime never reads file contents. A handle only carries the name and
//! size the picker reported, plus the media kind inferred from the extension.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StudioError, StudioResult};

/// The file types the avatar generator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Png,
    Jpeg,
    Mpeg,
    Wav,
}

impl MediaKind {
    /// Infer the kind from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "mp3" => Some(Self::Mpeg),
            "wav" => Some(Self::Wav),
            _ => None,
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }

    pub fn is_audio(self) -> bool {
        matches!(self, Self::Mpeg | Self::Wav)
    }

    /// The MIME type a browser picker would report for this kind.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Mpeg => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }
}

/// A reference to a user-selected file: name, size, and inferred kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaHandle {
    pub name: String,
    pub size_bytes: u64,
    pub kind: MediaKind,
}

impl MediaHandle {
    /// Build a handle, rejecting extensions outside the accepted set.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> StudioResult<Self> {
        let name = name.into();
        let kind = MediaKind::from_file_name(&name).ok_or_else(|| StudioError::UnsupportedMedia {
            name: name.clone(),
            expected: "png, jpeg, mp3 or wav".to_string(),
        })?;
        Ok(Self { name, size_bytes, kind })
    }

    /// Human-readable size, e.g. `"512 B"`, `"1.00 KB"`, `"2.50 MB"`.
    pub fn size_label(&self) -> String {
        const KIB: f64 = 1024.0;
        let bytes = self.size_bytes as f64;
        if bytes < KIB {
            format!("{} B", self.size_bytes)
        } else if bytes < KIB * KIB {
            format!("{:.2} KB", bytes / KIB)
        } else {
            format!("{:.2} MB", bytes / (KIB * KIB))
        }
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.size_label())
    }
}
