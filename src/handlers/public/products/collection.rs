use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::database::models::{NewProduct, Product};
use crate::handlers::utils::FieldValidator;
use crate::middleware::{ApiResponse, ApiResult};
use crate::query::{fetch_page, normalize, ListRecord, PaginatedResult, RawParams};
use crate::services::ProductService;
use crate::state::AppState;

use super::clean_tags;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// GET /api/products - paginated, searchable product list
///
/// Query: `page`, `pageSize`, `orderBy` (`recent` | `price`), `keyword`.
pub async fn products_get(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> ApiResult<PaginatedResult<Product>> {
    let plan = normalize(&raw, Product::SORT_KEYS);
    let page = fetch_page(state.product_list.as_ref(), &plan).await?;
    Ok(ApiResponse::success(page))
}

/// POST /api/products - name and a non-negative integer price are required
pub async fn products_post(
    State(state): State<AppState>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(body) = body?;

    let mut v = FieldValidator::new();
    let name = v.required("name", body.name);
    let price = match body.price {
        Some(price) => {
            v.check(price >= 0, "price", "Price must be zero or greater");
            price
        }
        None => {
            v.reject("price", "This field is required");
            0
        }
    };
    let product = NewProduct {
        name,
        description: body.description.map(|d| d.trim().to_string()).unwrap_or_default(),
        price,
        image_url: v.optional("imageUrl", body.image_url),
        tags: clean_tags(&mut v, body.tags).unwrap_or_default(),
    };
    v.finish()?;

    let created = ProductService::new(state.pool.clone()).create(&product).await?;
    tracing::info!("Created product {}", created.id);
    Ok(ApiResponse::created(created))
}
