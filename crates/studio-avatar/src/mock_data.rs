//! Sample gallery entries and media handles for demos and tests.
//!
//! All data in this module is hardcoded. No files are read and nothing is
//! uploaded anywhere.

use studio_contracts::{
    error::StudioResult,
    media::MediaHandle,
    record::{RecordId, ResultRecord},
};

const PEXELS_THUMB: &str = "https://images.pexels.com/photos";

fn thumbnail(photo_id: u32) -> String {
    format!(
        "{}/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w=400",
        PEXELS_THUMB,
        id = photo_id
    )
}

fn seeded(id: &str, title: &str, photo_id: u32, duration: &str, date: &str, size: &str) -> ResultRecord {
    ResultRecord {
        id: RecordId::new(id),
        title: title.to_string(),
        thumbnail_ref: thumbnail(photo_id),
        duration: duration.to_string(),
        created_date: date.to_string(),
        size_label: size.to_string(),
        style: None,
        video_ref: None,
    }
}

/// The gallery a new user sees before generating anything, newest first.
pub fn seed_gallery() -> Vec<ResultRecord> {
    vec![
        seeded("1", "CEO Welcome Message", 2381069, "2:34", "2024-01-15", "45 MB"),
        seeded("2", "Product Demo Avatar", 1181690, "1:45", "2024-01-14", "32 MB"),
    ]
}

/// A front-facing headshot as a file picker would report it.
pub fn sample_image() -> StudioResult<MediaHandle> {
    MediaHandle::new("headshot.jpg", 245_760)
}

/// A short voice recording as a file picker would report it.
pub fn sample_audio() -> StudioResult<MediaHandle> {
    MediaHandle::new("welcome-script.mp3", 1_843_200)
}
