use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Listable;
use crate::query::{ListRecord, SortKey, SortValue};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub favorite_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.tags.is_none()
    }
}

impl ListRecord for Product {
    const SORT_KEYS: &'static [SortKey] = &[SortKey::Recent, SortKey::Price];

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }

    fn sort_value(&self, key: SortKey) -> SortValue {
        match key {
            SortKey::Price => SortValue::Integer(self.price),
            SortKey::Recent | SortKey::Oldest => SortValue::Timestamp(self.created_at),
        }
    }
}

impl Listable for Product {
    const TABLE: &'static str = "products";
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "description"];
}
