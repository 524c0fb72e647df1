use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Listable;
use crate::query::{ListRecord, SortKey, SortValue};

use super::comment::Comment;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub image: Option<String>,
    pub favorite_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An article together with its comments, newest comment first
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub author: String,
    pub image: Option<String>,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
}

impl ArticleChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none() && self.image.is_none()
    }
}

impl ListRecord for Article {
    const SORT_KEYS: &'static [SortKey] = &[SortKey::Recent, SortKey::Oldest];

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.content, &self.author]
    }

    fn sort_value(&self, key: SortKey) -> SortValue {
        match key {
            SortKey::Recent | SortKey::Oldest => SortValue::Timestamp(self.created_at),
            // Articles have no price; fall back to creation time
            SortKey::Price => SortValue::Timestamp(self.created_at),
        }
    }
}

impl Listable for Article {
    const TABLE: &'static str = "articles";
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "content", "author"];
}
