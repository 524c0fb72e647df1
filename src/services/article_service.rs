use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Article, ArticleChanges, ArticleDetail, NewArticle};
use crate::database::DatabaseError;
use crate::services::CommentService;

pub struct ArticleService {
    pool: PgPool,
}

impl ArticleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, article: &NewArticle) -> Result<Article, DatabaseError> {
        sqlx::query_as::<_, Article>(
            "INSERT INTO articles (title, content, author, image) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.author)
        .bind(&article.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, "Article already exists"))
    }

    pub async fn find(&self, id: Uuid) -> Result<Article, DatabaseError> {
        sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Article not found".to_string()))
    }

    /// Article plus its comments; both reads run concurrently
    pub async fn find_with_comments(&self, id: Uuid) -> Result<ArticleDetail, DatabaseError> {
        let comments = CommentService::new(self.pool.clone());
        let (article, comments) = tokio::try_join!(self.find(id), comments.list_for_article(id))?;
        Ok(ArticleDetail { article, comments })
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM articles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    pub async fn update(&self, id: Uuid, changes: &ArticleChanges) -> Result<Article, DatabaseError> {
        sqlx::query_as::<_, Article>(
            "UPDATE articles SET \
                title = COALESCE($2, title), \
                content = COALESCE($3, content), \
                author = COALESCE($4, author), \
                image = COALESCE($5, image), \
                updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(&changes.author)
        .bind(&changes.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, "Article already exists"))?
        .ok_or_else(|| DatabaseError::NotFound("Article not found".to_string()))
    }

    /// Comments go with it (`ON DELETE CASCADE`)
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Article not found".to_string()));
        }
        Ok(())
    }
}
