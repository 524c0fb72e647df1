use serde::Serialize;

use super::plan::QueryPlan;
use super::QueryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
}

/// The single response envelope every list endpoint returns:
/// `{ "items": [...], "pagination": { "page", "pageSize", "total", "totalPages" } }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PaginatedResult<T> {
    pub fn total_count(&self) -> u64 {
        self.pagination.total
    }

    pub fn total_pages(&self) -> u64 {
        self.pagination.total_pages
    }
}

pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}

/// Combine one fetched page with the matching total count.
///
/// A store that hands back more rows than the plan asked for, or rows
/// alongside a zero total, is broken; that comes back as a `QueryError`
/// instead of a quietly truncated page.
pub fn assemble<T>(items: Vec<T>, total_count: u64, plan: &QueryPlan) -> Result<PaginatedResult<T>, QueryError> {
    if items.len() > plan.limit as usize {
        return Err(QueryError::TooManyItems { returned: items.len(), limit: plan.limit });
    }
    if total_count == 0 && !items.is_empty() {
        return Err(QueryError::ItemsWithoutTotal { returned: items.len() });
    }

    Ok(PaginatedResult {
        items,
        pagination: Pagination {
            page: plan.page,
            page_size: plan.page_size,
            total: total_count,
            total_pages: total_pages(total_count, plan.page_size),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortKey;
    use serde_json::json;

    fn plan(page: u32, page_size: u32) -> QueryPlan {
        QueryPlan::new(page, page_size, SortKey::Recent, None)
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        for page_size in 1..=12u32 {
            for total in 0..=60u64 {
                let expected = (total + u64::from(page_size) - 1) / u64::from(page_size);
                assert_eq!(total_pages(total, page_size), expected);
                assert_eq!(total_pages(total, page_size) == 0, total == 0);
            }
        }
    }

    #[test]
    fn assembles_a_partial_last_page() {
        let result = assemble(vec![1, 2, 3, 4, 5], 25, &plan(3, 10)).unwrap();
        assert_eq!(result.items.len(), 5);
        assert_eq!(result.pagination, Pagination { page: 3, page_size: 10, total: 25, total_pages: 3 });
    }

    #[test]
    fn empty_store_has_zero_pages() {
        let result = assemble(Vec::<u8>::new(), 0, &plan(1, 10)).unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages(), 0);
    }

    #[test]
    fn page_past_the_end_keeps_total_pages() {
        let result = assemble(Vec::<u8>::new(), 25, &plan(4, 10)).unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.total_count(), 25);
    }

    #[test]
    fn oversized_page_is_a_contract_violation() {
        let err = assemble(vec![0u8; 11], 40, &plan(1, 10)).unwrap_err();
        assert!(matches!(err, QueryError::TooManyItems { returned: 11, limit: 10 }));
    }

    #[test]
    fn items_with_zero_total_is_a_contract_violation() {
        let err = assemble(vec![1u8], 0, &plan(1, 10)).unwrap_err();
        assert!(matches!(err, QueryError::ItemsWithoutTotal { returned: 1 }));
    }

    #[test]
    fn serializes_canonical_shape() {
        let result = assemble(vec!["a"], 1, &plan(1, 10)).unwrap();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "items": ["a"],
                "pagination": { "page": 1, "pageSize": 10, "total": 1, "totalPages": 1 }
            })
        );
    }
}
