use serde::{Deserialize, Serialize};

use crate::filter::SortDirection;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Orderings a list endpoint can be asked for. Each resource accepts a
/// subset of these (see `ListRecord::SORT_KEYS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first
    Recent,
    /// Oldest first
    Oldest,
    /// Cheapest first
    Price,
}

impl SortKey {
    pub const ALL: &'static [SortKey] = &[SortKey::Recent, SortKey::Oldest, SortKey::Price];

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|key| key.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Oldest => "oldest",
            SortKey::Price => "price",
        }
    }

    /// Column the key sorts on
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Recent | SortKey::Oldest => "created_at",
            SortKey::Price => "price",
        }
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            SortKey::Recent => SortDirection::Desc,
            SortKey::Oldest | SortKey::Price => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn column(&self) -> &'static str {
        self.key.column()
    }
}

/// A validated list request.
///
/// Always built through [`QueryPlan::new`] (or `normalize`), which keeps
/// `offset == (page - 1) * page_size` and `limit == page_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub page: u32,
    pub page_size: u32,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub filter_text: Option<String>,
    pub offset: u64,
    pub limit: u32,
}

impl QueryPlan {
    pub fn new(page: u32, page_size: u32, sort_key: SortKey, filter_text: Option<&str>) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let filter_text = filter_text
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            page,
            page_size,
            sort_key,
            sort_direction: sort_key.direction(),
            filter_text,
            offset: u64::from(page - 1) * u64::from(page_size),
            limit: page_size,
        }
    }

    pub fn order(&self) -> SortOrder {
        SortOrder { key: self.sort_key, direction: self.sort_direction }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter_text.as_deref()
    }
}

impl Default for QueryPlan {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE, SortKey::Recent, None)
    }
}
