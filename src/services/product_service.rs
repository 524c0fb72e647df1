use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{NewProduct, Product, ProductChanges};
use crate::database::DatabaseError;

pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, product: &NewProduct) -> Result<Product, DatabaseError> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, image_url, tags) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(&product.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, "Product already exists"))
    }

    pub async fn find(&self, id: Uuid) -> Result<Product, DatabaseError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Product not found".to_string()))
    }

    pub async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product, DatabaseError> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                price = COALESCE($4, price), \
                image_url = COALESCE($5, image_url), \
                tags = COALESCE($6, tags), \
                updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(&changes.image_url)
        .bind(&changes.tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, "Product already exists"))?
        .ok_or_else(|| DatabaseError::NotFound("Product not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }

    /// Row count used by the health probe
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
