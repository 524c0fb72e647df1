use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::database::models::{Comment, NewComment};
use crate::error::ApiError;
use crate::handlers::utils::{parse_id, FieldValidator};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{ArticleService, CommentService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: Option<String>,
    pub user_id: Option<String>,
}

/// GET /api/articles/:articleId/comments - newest first
pub async fn comments_get(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> ApiResult<Vec<Comment>> {
    let article_id = parse_id(&article_id, "article")?;

    let articles = ArticleService::new(state.pool.clone());
    let comments = CommentService::new(state.pool.clone());
    let (exists, list) = tokio::try_join!(articles.exists(article_id), comments.list_for_article(article_id))?;
    if !exists {
        return Err(ApiError::not_found("Article not found"));
    }
    Ok(ApiResponse::success(list))
}

/// POST /api/articles/:articleId/comments - content required, userId optional
pub async fn comments_post(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    body: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> ApiResult<Comment> {
    let article_id = parse_id(&article_id, "article")?;
    let Json(body) = body?;

    let mut v = FieldValidator::new();
    let comment = NewComment {
        content: v.required("content", body.content),
        user_id: v.optional_id("userId", body.user_id),
    };
    v.finish()?;

    let created = CommentService::new(state.pool.clone()).create(article_id, &comment).await?;
    Ok(ApiResponse::created(created))
}
