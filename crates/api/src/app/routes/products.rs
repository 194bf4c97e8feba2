use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use orderdesk_core::ProductId;
use orderdesk_products::ProductRepository;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product))
        .route("/:id", get(get_product))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let data = match body.validate() {
        Ok(data) => data,
        Err(msg) => return errors::json_error(StatusCode::BAD_REQUEST, msg),
    };

    match services.catalog.create(data).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::app_error_to_response(e),
    };

    match services.catalog.find_by_id(id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(product)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "Product not found"),
        Err(e) => errors::app_error_to_response(e),
    }
}
