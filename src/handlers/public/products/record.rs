use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{Product, ProductChanges};
use crate::error::ApiError;
use crate::handlers::utils::{parse_id, FieldValidator};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ProductService;
use crate::state::AppState;

use super::clean_tags;

/// `id` and `createdAt` are not accepted; unknown keys are ignored
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// GET /api/products/:id
pub async fn product_get(State(state): State<AppState>, Path(product_id): Path<String>) -> ApiResult<Product> {
    let id = parse_id(&product_id, "product")?;
    let product = ProductService::new(state.pool.clone()).find(id).await?;
    Ok(ApiResponse::success(product))
}

/// PATCH /api/products/:id
pub async fn product_patch(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> ApiResult<Product> {
    let id = parse_id(&product_id, "product")?;
    let Json(body) = body?;

    let mut v = FieldValidator::new();
    if let Some(price) = body.price {
        v.check(price >= 0, "price", "Price must be zero or greater");
    }
    let changes = ProductChanges {
        name: v.optional("name", body.name),
        description: body.description.map(|d| d.trim().to_string()),
        price: body.price,
        image_url: v.optional("imageUrl", body.image_url),
        tags: clean_tags(&mut v, body.tags),
    };
    v.finish()?;
    if changes.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let updated = ProductService::new(state.pool.clone()).update(id, &changes).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/products/:id
pub async fn product_delete(State(state): State<AppState>, Path(product_id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&product_id, "product")?;
    ProductService::new(state.pool.clone()).delete(id).await?;
    tracing::info!("Deleted product {}", id);
    Ok(ApiResponse::success(json!({ "message": "Product deleted successfully" })))
}
