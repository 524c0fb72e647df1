//! Pagination and keyword search shared by the list endpoints.
//!
//! A request flows through four pieces:
//! `normalize` (raw query string → [`QueryPlan`]), a [`StoreAdapter`]
//! (`count` + `fetch`, run concurrently by [`fetch_page`]), and
//! `assemble` (page + total → [`PaginatedResult`]).

pub mod assemble;
pub mod memory;
pub mod normalize;
pub mod plan;
pub mod store;

use thiserror::Error;

use crate::database::DatabaseError;

pub use assemble::{assemble, total_pages, PaginatedResult, Pagination};
pub use memory::MemoryStore;
pub use normalize::{normalize, RawParams};
pub use plan::{QueryPlan, SortKey, SortOrder, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use store::{fetch_page, ListRecord, SortValue, StoreAdapter};

#[derive(Debug, Error)]
pub enum QueryError {
    /// The store returned more rows than the plan's limit
    #[error("store returned {returned} items for a page limit of {limit}")]
    TooManyItems { returned: usize, limit: u32 },

    /// The store returned rows but counted zero matches
    #[error("store returned {returned} items but reported a total count of zero")]
    ItemsWithoutTotal { returned: usize },

    #[error(transparent)]
    Store(#[from] DatabaseError),
}
