use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Comment, NewComment};
use crate::database::DatabaseError;

/// Comments are always addressed through their article
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_article(&self, article_id: Uuid) -> Result<Vec<Comment>, DatabaseError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE article_id = $1 ORDER BY created_at DESC, id ASC",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    /// Insert only when the article exists, in one statement
    pub async fn create(&self, article_id: Uuid, comment: &NewComment) -> Result<Comment, DatabaseError> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (article_id, user_id, content) \
             SELECT $1, $2, $3 WHERE EXISTS (SELECT 1 FROM articles WHERE id = $1) \
             RETURNING *",
        )
        .bind(article_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, "Comment already exists"))?
        .ok_or_else(|| DatabaseError::NotFound("Article not found".to_string()))
    }

    pub async fn update(&self, article_id: Uuid, comment_id: Uuid, content: &str) -> Result<Comment, DatabaseError> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET content = $3, updated_at = now() \
             WHERE id = $2 AND article_id = $1 RETURNING *",
        )
        .bind(article_id)
        .bind(comment_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Comment not found".to_string()))
    }

    pub async fn delete(&self, article_id: Uuid, comment_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $2 AND article_id = $1")
            .bind(article_id)
            .bind(comment_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Comment not found".to_string()));
        }
        Ok(())
    }
}
