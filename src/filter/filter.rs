use serde_json::Value;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterData, OrderTerm, SqlResult};

/// A single-table `SELECT` assembled from JSON filter documents.
///
/// Names are checked when they enter the filter; values only ever travel
/// as `$n` parameters.
pub struct Filter {
    table: String,
    predicate: Option<Value>,
    order: Vec<OrderTerm>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table = table_name.into();
        if Self::validate_identifier(&table).is_err() {
            return Err(FilterError::InvalidIdentifier { kind: "table", name: table });
        }
        Ok(Self { table, predicate: None, order: Vec::new(), limit: None, offset: None })
    }

    pub fn assign(&mut self, data: FilterData) -> Result<&mut Self, FilterError> {
        if let Some(where_clause) = data.where_clause {
            self.where_clause(where_clause)?;
        }
        if let Some(order) = data.order {
            self.order(order)?;
        }
        if let Some(limit) = data.limit {
            self.limit(limit, data.offset)?;
        }
        Ok(self)
    }

    pub fn where_clause(&mut self, conditions: Value) -> Result<&mut Self, FilterError> {
        FilterWhere::validate(&conditions)?;
        self.predicate = Some(conditions);
        Ok(self)
    }

    pub fn order(&mut self, order_spec: Value) -> Result<&mut Self, FilterError> {
        self.order = FilterOrder::validate_and_parse(&order_spec)?;
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64, offset: Option<i64>) -> Result<&mut Self, FilterError> {
        if limit < 0 {
            return Err(FilterError::NegativeBound("limit"));
        }
        if offset.is_some_and(|off| off < 0) {
            return Err(FilterError::NegativeBound("offset"));
        }
        self.limit = Some(limit);
        self.offset = offset;
        Ok(self)
    }

    /// `SELECT *` with predicate, ordering and window
    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let mut rendered = self.render("SELECT *")?;
        let order_by = FilterOrder::generate(&self.order);
        if !order_by.is_empty() {
            rendered.query.push(' ');
            rendered.query.push_str(&order_by);
        }
        if let Some(limit) = self.limit {
            rendered.query.push_str(&format!(" LIMIT {}", limit));
            if let Some(offset) = self.offset {
                rendered.query.push_str(&format!(" OFFSET {}", offset));
            }
        }
        Ok(rendered)
    }

    /// Row count under the same predicate; ordering and window are dropped
    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        self.render("SELECT COUNT(*) AS count")
    }

    fn render(&self, head: &str) -> Result<SqlResult, FilterError> {
        let mut query = format!("{} FROM \"{}\"", head, self.table);
        let mut params = Vec::new();
        if let Some(predicate) = &self.predicate {
            let (sql, values) = FilterWhere::generate(predicate, 0)?;
            if !sql.is_empty() {
                query.push_str(" WHERE ");
                query.push_str(&sql);
                params = values;
            }
        }
        Ok(SqlResult { query, params })
    }

    /// Only `[A-Za-z_][A-Za-z0-9_]*` is accepted, since names are interpolated.
    pub fn validate_identifier(name: &str) -> Result<(), FilterError> {
        let mut chars = name.chars();
        let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(())
        } else {
            Err(FilterError::InvalidIdentifier { kind: "column", name: name.to_string() })
        }
    }
}
