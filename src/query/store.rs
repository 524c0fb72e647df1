use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::DatabaseError;

use super::assemble::{assemble, PaginatedResult};
use super::plan::{QueryPlan, SortKey, SortOrder};
use super::QueryError;

/// Read side of a list endpoint.
///
/// Implementations must return rows in exactly the requested order with
/// ties broken by ascending `id`, so that identical calls against an
/// unchanged store page identically. `fetch` never returns more than
/// `limit` rows.
#[async_trait]
pub trait StoreAdapter<T: Send>: Send + Sync {
    /// Number of records matching `filter` (all records when `None`)
    async fn count(&self, filter: Option<&str>) -> Result<u64, DatabaseError>;

    async fn fetch(
        &self,
        filter: Option<&str>,
        order: SortOrder,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<T>, DatabaseError>;
}

/// Value a record exposes for a given sort key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Timestamp(DateTime<Utc>),
    Integer(i64),
}

/// Records that can be listed through a [`StoreAdapter`]
pub trait ListRecord: Send + Sync {
    /// Sort keys this resource accepts
    const SORT_KEYS: &'static [SortKey];

    fn id(&self) -> Uuid;

    /// Text fields a keyword is matched against
    fn search_fields(&self) -> Vec<&str>;

    fn sort_value(&self, key: SortKey) -> SortValue;
}

/// Run one list request: count and fetch concurrently, then assemble.
///
/// Both reads use the same filter. If either fails the other is dropped
/// and the error propagates; no partial result is built.
///
/// The two reads do not share a snapshot. A delete landing between them
/// can leave rows next to a zero count, which `assemble` still refuses;
/// the client gets a 500 and a retry sees a consistent store.
pub async fn fetch_page<T: Send>(
    store: &dyn StoreAdapter<T>,
    plan: &QueryPlan,
) -> Result<PaginatedResult<T>, QueryError> {
    let filter = plan.filter();
    let (total, items) = tokio::try_join!(
        store.count(filter),
        store.fetch(filter, plan.order(), plan.offset, plan.limit)
    )?;

    tracing::debug!(
        "list page={} page_size={} sort={} filtered={} -> {} of {}",
        plan.page,
        plan.page_size,
        plan.sort_key.as_str(),
        filter.is_some(),
        items.len(),
        total
    );

    if total == 0 && !items.is_empty() {
        tracing::warn!(
            "count returned 0 but fetch returned {} rows; store changed between reads",
            items.len()
        );
    }

    assemble(items, total, plan)
}
