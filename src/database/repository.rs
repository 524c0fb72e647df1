use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::{self, postgres::PgRow, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::query_builder::QueryBuilder;
use crate::filter::FilterData;
use crate::query::{ListRecord, SortOrder, StoreAdapter};

/// A table whose rows back a paginated list endpoint
pub trait Listable: ListRecord + for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    const TABLE: &'static str;

    /// Columns a keyword is matched against with `ILIKE`
    const SEARCH_COLUMNS: &'static [&'static str];
}

/// Postgres-backed [`StoreAdapter`]
pub struct Repository<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Listable> Repository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    fn where_clause(filter: Option<&str>) -> Option<Value> {
        let pattern = format!("%{}%", escape_like(filter?));
        let branches: Vec<Value> = T::SEARCH_COLUMNS
            .iter()
            .map(|column| json!({ (*column): { "$ilike": pattern } }))
            .collect();
        Some(json!({ "$or": branches }))
    }

    /// Filter for one page: keyword `$or` across the search columns,
    /// the requested order with `id asc` as tie-break, then the window.
    pub fn page_filter(
        filter: Option<&str>,
        order: SortOrder,
        offset: u64,
        limit: u32,
    ) -> Result<FilterData, DatabaseError> {
        if !T::SORT_KEYS.contains(&order.key) {
            return Err(DatabaseError::QueryError(format!(
                "{} cannot be sorted by {}",
                T::TABLE,
                order.key.as_str()
            )));
        }

        Ok(FilterData {
            where_clause: Self::where_clause(filter),
            order: Some(json!([
                format!("{} {}", order.column(), order.direction.as_str()),
                "id asc"
            ])),
            limit: Some(i64::from(limit)),
            offset: Some(i64::try_from(offset).unwrap_or(i64::MAX)),
        })
    }

    /// Filter for the matching-row count; no order or window
    pub fn count_filter(filter: Option<&str>) -> FilterData {
        FilterData { where_clause: Self::where_clause(filter), ..Default::default() }
    }
}

#[async_trait]
impl<T: Listable> StoreAdapter<T> for Repository<T> {
    async fn count(&self, filter: Option<&str>) -> Result<u64, DatabaseError> {
        let count = QueryBuilder::<T>::new(T::TABLE)?
            .filter(Self::count_filter(filter))?
            .count(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn fetch(
        &self,
        filter: Option<&str>,
        order: SortOrder,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<T>, DatabaseError> {
        QueryBuilder::<T>::new(T::TABLE)?
            .filter(Self::page_filter(filter, order, offset, limit)?)?
            .select_all(&self.pool)
            .await
    }
}

/// Escape `ILIKE` metacharacters so a keyword only ever matches literally
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
