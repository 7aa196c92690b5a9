use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use lessonbook_core::lesson::parse_lesson_id;
use lessonbook_core::{Lesson, LessonPatch};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UpdateLessonResponse {
    pub message: &'static str,
    pub lesson: Lesson,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lessons", get(list_lessons))
        .route("/lessons/{id}", put(update_lesson))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /lessons
pub async fn list_lessons(State(state): State<AppState>) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = state.lessons.list_lessons().await?;
    Ok(Json(lessons))
}

/// PUT /lessons/{id}
/// Partial update restricted to the updatable lesson fields
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UpdateLessonResponse>, AppError> {
    let lesson_id = parse_lesson_id(&id)?;
    let payload = update_payload(&body)?;
    let patch = LessonPatch::from_payload(&payload)?;

    let update = state
        .lessons
        .update_lesson(lesson_id, &patch)
        .await?
        .ok_or_else(|| AppError::lesson_not_found(&id))?;

    info!("Lesson {} updated ({} field(s) changed)", id, update.modified_count);

    Ok(Json(UpdateLessonResponse {
        message: "Lesson updated successfully",
        lesson: update.lesson,
        modified_count: update.modified_count,
    }))
}

/// A blank body reads as an update with no fields.
fn update_payload(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    serde_json::from_slice(body).map_err(|e| AppError::invalid_body(e.to_string()))
}
