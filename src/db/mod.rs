//! Storage module.
//!
//! Videos live in memory for the lifetime of the process.

mod repository;

pub use repository::*;

use crate::models::{Resolution, Video};

/// Build the repository, optionally loaded with the fixture videos.
pub fn init_repository(seed: bool) -> Repository {
    if seed {
        Repository::with_videos(seed_videos())
    } else {
        Repository::new()
    }
}

/// Fixture videos loaded at startup.
pub fn seed_videos() -> Vec<Video> {
    vec![
        Video {
            id: 1,
            title: "Introduction to TypeScript".to_string(),
            author: "John Doe".to_string(),
            can_be_downloaded: true,
            min_age_restriction: None,
            created_at: "2024-09-20T08:15:30.000Z".to_string(),
            publication_date: "2024-09-22T10:30:00.000Z".to_string(),
            available_resolutions: Some(vec![
                Resolution::P144,
                Resolution::P720,
                Resolution::P1080,
            ]),
        },
        Video {
            id: 2,
            title: "Mastering Node.js".to_string(),
            author: "Jane Smith".to_string(),
            can_be_downloaded: false,
            min_age_restriction: Some(18),
            created_at: "2024-08-10T12:45:15.000Z".to_string(),
            publication_date: "2024-08-12T14:00:00.000Z".to_string(),
            available_resolutions: Some(vec![Resolution::P144, Resolution::P480]),
        },
        Video {
            id: 3,
            title: "React for Beginners".to_string(),
            author: "Emily Clark".to_string(),
            can_be_downloaded: true,
            min_age_restriction: None,
            created_at: "2024-07-25T09:00:00.000Z".to_string(),
            publication_date: "2024-07-27T11:15:45.000Z".to_string(),
            available_resolutions: Some(vec![
                Resolution::P144,
                Resolution::P360,
                Resolution::P720,
            ]),
        },
    ]
}
