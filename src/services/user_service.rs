use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{NewUser, User, UserChanges};
use crate::database::DatabaseError;

const DUPLICATE_EMAIL: &str = "Email already exists";

/// Emails are stored lowercased; lookups lowercase their input too.
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, first_name, last_name, nickname, receive_email) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(user.email.to_lowercase())
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.nickname)
        .bind(user.receive_email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, DUPLICATE_EMAIL))
    }

    pub async fn find(&self, id: Uuid) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email.trim().to_lowercase())
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                email = COALESCE($2, email), \
                password_hash = COALESCE($3, password_hash), \
                first_name = COALESCE($4, first_name), \
                last_name = COALESCE($5, last_name), \
                nickname = COALESCE($6, nickname), \
                receive_email = COALESCE($7, receive_email), \
                updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.email.as_deref().map(str::to_lowercase))
        .bind(&changes.password_hash)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.nickname)
        .bind(changes.receive_email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, DUPLICATE_EMAIL))?
        .ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
