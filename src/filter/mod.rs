//! JSON filter documents rendered to parameterized Postgres SQL

mod error;
mod filter;
mod filter_order;
mod filter_where;
mod types;

pub use error::FilterError;
pub use filter::Filter;
pub use filter_order::FilterOrder;
pub use filter_where::FilterWhere;
pub use types::{Comparison, FilterData, OrderTerm, SortDirection, SqlResult};
