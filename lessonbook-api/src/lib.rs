use axum::{
    http::{Method, Uri},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod health;
pub mod images;
pub mod lessons;
pub mod orders;
pub mod state;

pub use error::AppError;
pub use images::ImageAssets;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(health::routes())
        .merge(lessons::routes())
        .merge(orders::routes())
        .merge(images::routes())
        .fallback(route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound {
        error: "Not found".to_string(),
        message: format!("No route for {} {}", method, uri.path()),
    }
}
