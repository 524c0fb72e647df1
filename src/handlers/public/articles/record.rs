use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{Article, ArticleChanges, ArticleDetail};
use crate::error::ApiError;
use crate::handlers::utils::{parse_id, FieldValidator};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ArticleService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
}

/// GET /api/articles/:articleId - the article with its comments, newest first
pub async fn article_get(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> ApiResult<ArticleDetail> {
    let id = parse_id(&article_id, "article")?;
    let detail = ArticleService::new(state.pool.clone()).find_with_comments(id).await?;
    Ok(ApiResponse::success(detail))
}

/// PATCH /api/articles/:articleId - any of title, content, author, image
pub async fn article_patch(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    body: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> ApiResult<Article> {
    let id = parse_id(&article_id, "article")?;
    let Json(body) = body?;

    let mut v = FieldValidator::new();
    let changes = ArticleChanges {
        title: v.optional("title", body.title),
        content: v.optional("content", body.content),
        author: v.optional("author", body.author),
        image: v.optional("image", body.image),
    };
    v.finish()?;
    if changes.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let updated = ArticleService::new(state.pool.clone()).update(id, &changes).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/articles/:articleId - removes its comments as well
pub async fn article_delete(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&article_id, "article")?;
    ArticleService::new(state.pool.clone()).delete(id).await?;
    tracing::info!("Deleted article {}", id);
    Ok(ApiResponse::success(json!({ "message": "Article deleted successfully" })))
}
