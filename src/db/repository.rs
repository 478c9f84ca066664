//! In-memory repository for video records.
//!
//! Records and the id counter sit behind one lock so every operation is atomic.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::{NewVideo, Video, VideoPatch};

#[derive(Debug)]
struct Store {
    videos: Vec<Video>,
    next_id: i64,
}

/// Repository for all video operations.
#[derive(Debug)]
pub struct Repository {
    store: RwLock<Store>,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::with_videos(Vec::new())
    }

    /// Create a repository holding `videos`. New ids continue after the largest one.
    pub fn with_videos(videos: Vec<Video>) -> Self {
        let next_id = videos.iter().map(|v| v.id).max().unwrap_or(0) + 1;
        Self {
            store: RwLock::new(Store { videos, next_id }),
        }
    }

    /// List all videos in insertion order.
    pub async fn list_videos(&self) -> Vec<Video> {
        self.store.read().await.videos.clone()
    }

    /// Get a video by ID.
    pub async fn get_video(&self, id: i64) -> Option<Video> {
        let store = self.store.read().await;
        store.videos.iter().find(|v| v.id == id).cloned()
    }

    /// Create a new video. Ids come from a counter and are never reused.
    pub async fn create_video(&self, request: NewVideo) -> Video {
        let now = Utc::now();
        let mut store = self.store.write().await;

        let video = Video {
            id: store.next_id,
            title: request.title,
            author: request.author,
            can_be_downloaded: false,
            min_age_restriction: None,
            created_at: format_timestamp(now),
            publication_date: format_timestamp(now + Duration::days(1)),
            available_resolutions: request.available_resolutions,
        };

        store.next_id += 1;
        store.videos.push(video.clone());
        video
    }

    /// Apply a patch. Title and author are always replaced; other fields only when set.
    pub async fn update_video(&self, id: i64, patch: VideoPatch) -> Result<Video, AppError> {
        let mut store = self.store.write().await;
        let video = store
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;

        video.title = patch.title;
        video.author = patch.author;
        if let Some(can_be_downloaded) = patch.can_be_downloaded {
            video.can_be_downloaded = can_be_downloaded;
        }
        if let Some(age) = patch.min_age_restriction {
            video.min_age_restriction = Some(age);
        }
        if let Some(resolutions) = patch.available_resolutions {
            video.available_resolutions = Some(resolutions);
        }
        if let Some(date) = patch.publication_date {
            video.publication_date = date;
        }

        Ok(video.clone())
    }

    /// Delete a video.
    pub async fn delete_video(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        let before = store.videos.len();
        store.videos.retain(|v| v.id != id);

        if store.videos.len() == before {
            return Err(AppError::NotFound(format!("Video {} not found", id)));
        }
        Ok(())
    }

    /// Remove every video, returning how many were dropped. The id counter keeps running.
    pub async fn clear(&self) -> usize {
        let mut store = self.store.write().await;
        let removed = store.videos.len();
        store.videos.clear();
        removed
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.videos.len()
    }
}

/// Format as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
