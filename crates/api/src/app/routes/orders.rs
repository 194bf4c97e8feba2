use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order))
        .route("/:id", get(get_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let request = match body.validate() {
        Ok(request) => request,
        Err(msg) => return errors::json_error(StatusCode::BAD_REQUEST, msg),
    };

    match services.orders.create(request).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let request = match dto::parse_find_order(&id) {
        Ok(request) => request,
        Err(msg) => return errors::json_error(StatusCode::BAD_REQUEST, msg),
    };

    match services.lookup.find(request).await {
        Ok(Some(order)) => (StatusCode::OK, Json(order)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "Order not found"),
        Err(e) => errors::app_error_to_response(e),
    }
}
