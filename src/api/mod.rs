//! REST API module.
//!
//! Handlers return bare JSON on success and [`AppError`] on failure.

mod testing;
mod videos;

pub use testing::*;
pub use videos::*;

use axum::{
    body::Bytes,
    http::{header, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;

/// Base path of the video resource.
pub const VIDEOS_PATH: &str = "/videos";

/// Path of the endpoint that wipes the store.
pub const CLEAR_ALL_PATH: &str = "/testing/all-data";

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<T, AppError>;

/// Decode a request body leniently.
///
/// A missing body, a non-JSON content type or a JSON value that is not an
/// object all decode to `T::default()`, leaving field validation to report
/// what is missing. Only syntactically broken JSON is rejected.
pub fn json_body<T>(headers: &HeaderMap, body: &Bytes) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.is_empty() || !has_json_content_type(headers) {
        return Ok(T::default());
    }

    let Json(value) = Json::<Value>::from_bytes(body)?;
    if !value.is_object() {
        return Ok(T::default());
    }

    Ok(serde_json::from_value(value)?)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
