use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lessonbook_core::{CreateOrderRequest, Order};
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub message: &'static str,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub order: Order,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/orders", post(create_order))
}

/// POST /orders
///
/// Lesson spaces are not decremented here and the referenced lessons are not
/// looked up.
pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), AppError> {
    let Json(req) = body?;
    let order = Order::from_request(req, chrono::Utc::now())?;

    let order_id = state.orders.create_order(&order).await?;
    info!("Order {} placed by {}", order_id, order.name);

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            message: "Order created successfully",
            order_id: order_id.to_hex(),
            order,
        }),
    ))
}
