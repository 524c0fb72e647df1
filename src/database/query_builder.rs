use std::marker::PhantomData;

use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Arguments, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, FilterData};

/// Runs a [`Filter`] against the pool, decoding rows into `T`
pub struct QueryBuilder<T> {
    filter: Filter,
    row: PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        Ok(Self { filter: Filter::new(table_name)?, row: PhantomData })
    }

    pub fn filter(mut self, filter_data: FilterData) -> Result<Self, DatabaseError> {
        self.filter.assign(filter_data)?;
        Ok(self)
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let statement = self.filter.to_sql()?;
        tracing::debug!("select: {} ({} params)", statement.query, statement.params.len());

        let rows = sqlx::query_as_with::<_, T, _>(&statement.query, arguments(&statement.params))
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn count(self, pool: &PgPool) -> Result<i64, DatabaseError> {
        let statement = self.filter.to_count_sql()?;
        tracing::debug!("count: {} ({} params)", statement.query, statement.params.len());

        let row = sqlx::query_with(&statement.query, arguments(&statement.params))
            .fetch_one(pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}

/// Encode filter parameters by their JSON type. Arrays never reach here;
/// `FilterWhere` expands them into one placeholder per element.
fn arguments(params: &[Value]) -> PgArguments {
    let mut args = PgArguments::default();
    for param in params {
        match param {
            Value::Null => args.add(None::<String>),
            Value::Bool(flag) => args.add(*flag),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(int), _) => args.add(int),
                (None, Some(float)) => args.add(float),
                (None, None) => args.add(n.to_string()),
            },
            Value::String(text) => args.add(text.clone()),
            Value::Array(_) => {}
            Value::Object(_) => args.add(sqlx::types::Json(param.clone())),
        }
    }
    args
}
