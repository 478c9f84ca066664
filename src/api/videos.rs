//! Video API endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::{json_body, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateVideoRequest, UpdateVideoRequest, Video, VideoView};
use crate::validation::{invalid_id, parse_id, validate_create, validate_update};
use crate::AppState;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Video {} not found", id))
}

/// GET /videos - List all videos.
pub async fn list_videos(State(state): State<AppState>) -> Json<Vec<VideoView>> {
    let videos = state.repo.list_videos().await;
    Json(videos.iter().map(VideoView::from).collect())
}

/// GET /videos/{id} - Get a single video. A malformed id is reported as not found.
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<VideoView>> {
    let Some(video_id) = parse_id(&id) else {
        return Err(not_found(&id));
    };

    let video = state
        .repo
        .get_video(video_id)
        .await
        .ok_or_else(|| not_found(&id))?;

    Ok(Json(VideoView::from(&video)))
}

/// POST /videos - Create a new video.
pub async fn create_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Video>)> {
    let request: CreateVideoRequest = json_body(&headers, &body)?;
    let new_video = validate_create(&request)?;
    let video = state.repo.create_video(new_video).await;

    tracing::info!(id = video.id, title = %video.title, "Video created");
    Ok((StatusCode::CREATED, Json(video)))
}

/// PUT /videos/{id} - Update a video.
pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let request: UpdateVideoRequest = json_body(&headers, &body)?;
    let video_id = parse_id(&id).ok_or_else(invalid_id)?;

    // Existence is reported before body validation
    if state.repo.get_video(video_id).await.is_none() {
        return Err(not_found(&id));
    }

    let patch = validate_update(&request)?;
    state.repo.update_video(video_id, patch).await?;

    tracing::info!(id = video_id, "Video updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /videos/{id} - Delete a video. A malformed id simply matches nothing.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let video_id = parse_id(&id).ok_or_else(|| not_found(&id))?;
    state.repo.delete_video(video_id).await?;

    tracing::info!(id = video_id, "Video deleted");
    Ok(StatusCode::NO_CONTENT)
}
