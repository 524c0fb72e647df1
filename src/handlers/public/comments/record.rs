use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Comment;
use crate::handlers::utils::{parse_id, FieldValidator};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CommentService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}

/// PATCH /api/articles/:articleId/comments/:commentId
pub async fn comment_patch(
    State(state): State<AppState>,
    Path((article_id, comment_id)): Path<(String, String)>,
    body: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> ApiResult<Comment> {
    let article_id = parse_id(&article_id, "article")?;
    let comment_id = parse_id(&comment_id, "comment")?;
    let Json(body) = body?;

    let mut v = FieldValidator::new();
    let content = v.required("content", body.content);
    v.finish()?;

    let updated = CommentService::new(state.pool.clone())
        .update(article_id, comment_id, &content)
        .await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/articles/:articleId/comments/:commentId
pub async fn comment_delete(
    State(state): State<AppState>,
    Path((article_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let article_id = parse_id(&article_id, "article")?;
    let comment_id = parse_id(&comment_id, "comment")?;

    CommentService::new(state.pool.clone()).delete(article_id, comment_id).await?;
    Ok(ApiResponse::success(json!({ "message": "Comment deleted successfully" })))
}
