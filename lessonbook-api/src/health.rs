use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use lessonbook_core::ConnectionState;
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DbStatusResponse {
    pub connected: bool,
    pub state: ConnectionState,
    pub database: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/db-status", get(db_status))
}

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "After School Classes API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "This description",
            "GET /health": "Service and database health",
            "GET /db-status": "Database connection status",
            "GET /lessons": "List all lessons",
            "PUT /lessons/:id": "Update subject, location, price, spaces or image of a lesson",
            "POST /orders": "Create an order (name, phone, lessonIDs, spaces)",
            "GET /images/:path": "Lesson images",
        }
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        database: state.store.is_connected(),
        timestamp: Utc::now(),
    })
}

/// GET /db-status
pub async fn db_status(State(state): State<AppState>) -> Json<DbStatusResponse> {
    Json(DbStatusResponse {
        connected: state.store.is_connected(),
        state: state.store.connection_state(),
        database: state.store.database_name().to_string(),
    })
}
