use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::path::{Component, PathBuf};
use tokio_util::io::ReaderStream;

use crate::error::AppError;
use crate::state::AppState;

/// Lesson images on local disk.
#[derive(Debug, Clone)]
pub struct ImageAssets {
    root: PathBuf,
}

impl ImageAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a request path onto the image directory. Anything that is not a
    /// plain relative path (`..`, absolute, prefixes) resolves to nothing.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = std::path::Path::new(relative);
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !plain || relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.root.join(relative))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/images/{*path}", get(get_image))
}

/// GET /images/{*path}
pub async fn get_image(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    let file_path = state
        .images
        .resolve(&path)
        .ok_or_else(|| AppError::AssetNotFound(path.clone()))?;

    let metadata = match tokio::fs::metadata(&file_path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return Err(AppError::AssetNotFound(path)),
    };
    let file = tokio::fs::File::open(&file_path)
        .await
        .map_err(|_| AppError::AssetNotFound(path.clone()))?;

    let mime = mime_guess::from_path(&file_path).first_or_octet_stream();
    let headers = [
        (header::CONTENT_TYPE, mime.essence_str().to_string()),
        (header::CONTENT_LENGTH, metadata.len().to_string()),
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_paths() {
        let assets = ImageAssets::new("/srv/images");
        assert_eq!(
            assets.resolve("math.png"),
            Some(PathBuf::from("/srv/images/math.png"))
        );
        assert_eq!(
            assets.resolve("icons/art.svg"),
            Some(PathBuf::from("/srv/images/icons/art.svg"))
        );
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let assets = ImageAssets::new("/srv/images");
        assert_eq!(assets.resolve("../secret.txt"), None);
        assert_eq!(assets.resolve("/etc/passwd"), None);
        assert_eq!(assets.resolve("a/./b.png"), Some(PathBuf::from("/srv/images/a/b.png")));
        assert_eq!(assets.resolve(""), None);
    }
}
