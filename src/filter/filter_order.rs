use serde_json::Value;

use super::error::FilterError;
use super::filter::Filter;
use super::types::{OrderTerm, SortDirection};

/// Parses order documents into [`OrderTerm`]s and renders `ORDER BY`.
///
/// Accepted forms: `"created_at desc, id"` and `["price asc", "id asc"]`.
/// Missing directions mean ascending.
pub struct FilterOrder;

impl FilterOrder {
    pub fn validate_and_parse(order: &Value) -> Result<Vec<OrderTerm>, FilterError> {
        let mut terms = Vec::new();
        match order {
            Value::String(spec) => Self::push_terms(&mut terms, spec),
            Value::Array(items) => {
                for spec in items.iter().filter_map(Value::as_str) {
                    Self::push_terms(&mut terms, spec);
                }
            }
            _ => {}
        }

        terms
            .iter()
            .try_for_each(|term| Filter::validate_identifier(&term.column))?;
        Ok(terms)
    }

    fn push_terms(terms: &mut Vec<OrderTerm>, spec: &str) {
        for part in spec.split(',') {
            let mut words = part.split_whitespace();
            let Some(column) = words.next() else { continue };
            terms.push(OrderTerm {
                column: column.to_string(),
                direction: SortDirection::parse(words.next().unwrap_or_default()),
            });
        }
    }

    pub fn generate(terms: &[OrderTerm]) -> String {
        if terms.is_empty() {
            return String::new();
        }
        let rendered: Vec<String> = terms
            .iter()
            .map(|term| {
                let keyword = match term.direction {
                    SortDirection::Asc => "ASC",
                    SortDirection::Desc => "DESC",
                };
                format!("\"{}\" {}", term.column, keyword)
            })
            .collect();
        format!("ORDER BY {}", rendered.join(", "))
    }
}
