use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::database::models::{Article, NewArticle};
use crate::handlers::utils::FieldValidator;
use crate::middleware::{ApiResponse, ApiResult};
use crate::query::{fetch_page, normalize, ListRecord, PaginatedResult, RawParams};
use crate::services::ArticleService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
}

/// GET /api/articles - paginated, searchable article list
///
/// Query: `page`, `pageSize`, `orderBy` (`recent` | `oldest`), `keyword`.
pub async fn articles_get(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> ApiResult<PaginatedResult<Article>> {
    let plan = normalize(&raw, Article::SORT_KEYS);
    let page = fetch_page(state.article_list.as_ref(), &plan).await?;
    Ok(ApiResponse::success(page))
}

/// POST /api/articles - title, content and author are required
pub async fn articles_post(
    State(state): State<AppState>,
    body: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> ApiResult<Article> {
    let Json(body) = body?;

    let mut v = FieldValidator::new();
    let article = NewArticle {
        title: v.required("title", body.title),
        content: v.required("content", body.content),
        author: v.required("author", body.author),
        image: v.optional("image", body.image),
    };
    v.finish()?;

    let created = ArticleService::new(state.pool.clone()).create(&article).await?;
    tracing::info!("Created article {}", created.id);
    Ok(ApiResponse::created(created))
}
