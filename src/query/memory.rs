use std::cmp::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::DatabaseError;
use crate::filter::SortDirection;

use super::plan::SortOrder;
use super::store::{ListRecord, StoreAdapter};

/// In-process [`StoreAdapter`] over a vector of records.
///
/// Keyword matching is a case-insensitive substring test over
/// `ListRecord::search_fields`, mirroring the `ILIKE '%kw%'` used by the
/// Postgres adapter.
pub struct MemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T: ListRecord + Clone> MemoryStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records: RwLock::new(records) }
    }

    pub async fn insert(&self, record: T) {
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn matches(record: &T, needle: Option<&str>) -> bool {
        match needle {
            None => true,
            Some(needle) => record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle)),
        }
    }

    fn compare(a: &T, b: &T, order: SortOrder) -> Ordering {
        let primary = a.sort_value(order.key).cmp(&b.sort_value(order.key));
        let primary = match order.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id().cmp(&b.id()))
    }
}

impl<T: ListRecord + Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T> StoreAdapter<T> for MemoryStore<T>
where
    T: ListRecord + Clone + 'static,
{
    async fn count(&self, filter: Option<&str>) -> Result<u64, DatabaseError> {
        let needle = filter.map(str::to_lowercase);
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| Self::matches(r, needle.as_deref())).count() as u64)
    }

    async fn fetch(
        &self,
        filter: Option<&str>,
        order: SortOrder,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<T>, DatabaseError> {
        let needle = filter.map(str::to_lowercase);
        let records = self.records.read().await;

        let mut matched: Vec<&T> = records.iter().filter(|r| Self::matches(r, needle.as_deref())).collect();
        matched.sort_by(|a, b| Self::compare(a, b, order));

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(offset).take(limit as usize).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{fetch_page, normalize, QueryPlan, RawParams, SortKey, SortValue};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    #[derive(Debug, Clone)]
    struct Item {
        id: Uuid,
        name: String,
        price: i64,
        created_at: chrono::DateTime<Utc>,
    }

    impl ListRecord for Item {
        const SORT_KEYS: &'static [SortKey] = SortKey::ALL;

        fn id(&self) -> Uuid {
            self.id
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name]
        }

        fn sort_value(&self, key: SortKey) -> SortValue {
            match key {
                SortKey::Price => SortValue::Integer(self.price),
                SortKey::Recent | SortKey::Oldest => SortValue::Timestamp(self.created_at),
            }
        }
    }

    fn items(n: usize) -> Vec<Item> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| Item {
                id: Uuid::from_u128(i as u128 + 1),
                name: format!("Item {}", i),
                price: (i % 3) as i64,
                created_at: base + Duration::minutes(i as i64),
            })
            .collect()
    }

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn pages_through_twenty_five_records() {
        let store = MemoryStore::new(items(25));

        let page1 = fetch_page(&store, &normalize(&params(&[("pageSize", "10")]), SortKey::ALL)).await.unwrap();
        assert_eq!(page1.items.len(), 10);
        assert_eq!(page1.total_pages(), 3);
        // newest first
        assert_eq!(page1.items[0].name, "Item 24");

        let page3 = fetch_page(&store, &normalize(&params(&[("page", "3"), ("pageSize", "10")]), SortKey::ALL)).await.unwrap();
        assert_eq!(page3.items.len(), 5);
        assert_eq!(page3.items[4].name, "Item 0");

        let page4 = fetch_page(&store, &normalize(&params(&[("page", "4"), ("pageSize", "10")]), SortKey::ALL)).await.unwrap();
        assert!(page4.items.is_empty());
        assert_eq!(page4.total_pages(), 3);
        assert_eq!(page4.total_count(), 25);
    }

    #[tokio::test]
    async fn keyword_without_matches_is_empty() {
        let store = MemoryStore::new(items(5));
        let plan = normalize(&params(&[("keyword", "zebra")]), SortKey::ALL);
        let page = fetch_page(&store, &plan).await.unwrap();
        assert_eq!(page.total_count(), 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages(), 0);
    }

    #[tokio::test]
    async fn keyword_matches_case_insensitively() {
        let store = MemoryStore::new(items(12));
        let plan = normalize(&params(&[("keyword", "ITEM 1")]), SortKey::ALL);
        let page = fetch_page(&store, &plan).await.unwrap();
        // Item 1, Item 10, Item 11
        assert_eq!(page.total_count(), 3);
    }

    #[tokio::test]
    async fn ties_break_on_id_so_pages_never_overlap() {
        let store = MemoryStore::new(items(9));
        let mut seen = Vec::new();
        for page in 1..=3u32 {
            let plan = QueryPlan::new(page, 3, SortKey::Price, None);
            let result = fetch_page(&store, &plan).await.unwrap();
            seen.extend(result.items.iter().map(|i| i.id));
        }
        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 9);

        // Same call twice gives the same order
        let plan = QueryPlan::new(2, 3, SortKey::Price, None);
        let a = fetch_page(&store, &plan).await.unwrap();
        let b = fetch_page(&store, &plan).await.unwrap();
        assert_eq!(
            a.items.iter().map(|i| i.id).collect::<Vec<_>>(),
            b.items.iter().map(|i| i.id).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn insert_grows_the_store() {
        let store = MemoryStore::default();
        assert!(store.is_empty().await);
        store.insert(items(1).remove(0)).await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.count(None).await.unwrap(), 1);
    }
}
