use serde_json::{Map, Value};

use super::error::FilterError;
use super::filter::Filter;
use super::types::Comparison;

/// Renders a JSON where-document into a parameterized SQL predicate.
///
/// `{ "title": { "$ilike": "%panda%" } }` becomes `"title" ILIKE $1` with
/// `["%panda%"]` as parameters. Logical operators nest:
/// `{ "$or": [ {...}, {...} ] }` renders each branch in parentheses and
/// keeps numbering placeholders across branches.
pub struct FilterWhere {
    params: Vec<Value>,
    offset: usize,
}

impl FilterWhere {
    pub fn generate(where_data: &Value, starting_param_index: usize) -> Result<(String, Vec<Value>), FilterError> {
        let mut renderer = Self { params: Vec::new(), offset: starting_param_index };
        let sql = renderer.document(where_data)?.unwrap_or_default();
        Ok((sql, renderer.params))
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        if where_data.is_null() || where_data.is_object() {
            Ok(())
        } else {
            Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string()))
        }
    }

    /// Top-level keys are AND-ed; `None` when nothing constrains the rows
    fn document(&mut self, where_data: &Value) -> Result<Option<String>, FilterError> {
        let entries: &Map<String, Value> = match where_data {
            Value::Null => return Ok(None),
            Value::Object(entries) => entries,
            _ => return Err(FilterError::InvalidWhereClause("Unsupported WHERE format".to_string())),
        };

        let mut clauses = Vec::new();
        for (key, value) in entries {
            let clause = match key.as_str() {
                "$and" | "$or" => self.junction(key, value)?,
                "$not" => self.document(value)?.map(|inner| format!("NOT ({})", inner)),
                other if other.starts_with('$') => {
                    return Err(FilterError::UnsupportedOperator(other.to_string()));
                }
                column => self.column(column, value)?,
            };
            clauses.extend(clause);
        }

        Ok((!clauses.is_empty()).then(|| clauses.join(" AND ")))
    }

    /// `$and` / `$or`. With no branches `$or` matches nothing and `$and`
    /// matches everything.
    fn junction(&mut self, op: &str, branches: &Value) -> Result<Option<String>, FilterError> {
        let (joiner, empty) = if op == "$or" { (" OR ", "1=0") } else { (" AND ", "1=1") };
        let branches = branches
            .as_array()
            .ok_or_else(|| FilterError::InvalidOperatorData(format!("{} requires array", op)))?;
        if branches.is_empty() {
            return Ok(Some(empty.to_string()));
        }

        let mut parts = Vec::with_capacity(branches.len());
        for branch in branches {
            if let Some(sql) = self.document(branch)? {
                parts.push(format!("({})", sql));
            }
        }
        Ok((!parts.is_empty()).then(|| format!("({})", parts.join(joiner))))
    }

    /// `{ column: value }` is shorthand for `{ column: { "$eq": value } }`
    fn column(&mut self, column: &str, value: &Value) -> Result<Option<String>, FilterError> {
        Filter::validate_identifier(column)?;
        let quoted = format!("\"{}\"", column);

        let Value::Object(ops) = value else {
            return self.compare(&quoted, Comparison::Eq, value).map(Some);
        };

        let mut parts = Vec::with_capacity(ops.len());
        for (key, operand) in ops {
            let op = Comparison::parse(key).ok_or_else(|| FilterError::UnsupportedOperator(key.clone()))?;
            parts.push(self.compare(&quoted, op, operand)?);
        }
        Ok((!parts.is_empty()).then(|| parts.join(" AND ")))
    }

    fn compare(&mut self, quoted: &str, op: Comparison, operand: &Value) -> Result<String, FilterError> {
        let sql = match (op, operand) {
            (Comparison::Eq, Value::Null) => format!("{} IS NULL", quoted),
            (Comparison::Ne, Value::Null) => format!("{} IS NOT NULL", quoted),
            (_, Value::Array(_) | Value::Object(_)) => {
                return Err(FilterError::InvalidOperatorData(format!("{} takes a scalar", quoted)));
            }
            (op, operand) => format!("{} {} {}", quoted, op.sql_operator(), self.bind(operand)),
        };
        Ok(sql)
    }

    fn bind(&mut self, value: &Value) -> String {
        self.params.push(value.clone());
        format!("${}", self.offset + self.params.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn implicit_equality_and_operators() {
        let (sql, params) = FilterWhere::generate(&json!({ "author": "panda", "title": { "$ne": "draft" } }), 0).unwrap();
        assert_eq!(sql, "\"author\" = $1 AND \"title\" <> $2");
        assert_eq!(params, vec![json!("panda"), json!("draft")]);
    }

    #[test]
    fn or_branches_keep_placeholder_numbering() {
        let where_data = json!({
            "$or": [
                { "name": { "$ilike": "%kw%" } },
                { "description": { "$ilike": "%kw%" } },
            ]
        });
        let (sql, params) = FilterWhere::generate(&where_data, 0).unwrap();
        assert_eq!(sql, "((\"name\" ILIKE $1) OR (\"description\" ILIKE $2))");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn starting_index_offsets_placeholders() {
        let (sql, _) = FilterWhere::generate(&json!({ "$or": [{ "title": "a" }, { "author": "b" }] }), 3).unwrap();
        assert_eq!(sql, "((\"title\" = $4) OR (\"author\" = $5))");
    }

    #[test]
    fn not_and_null_handling() {
        let (sql, params) = FilterWhere::generate(&json!({ "$not": { "image": null } }), 0).unwrap();
        assert_eq!(sql, "NOT (\"image\" IS NULL)");
        assert!(params.is_empty());
    }

    #[test]
    fn empty_or_matches_nothing_and_empty_and_everything() {
        let (sql, _) = FilterWhere::generate(&json!({ "$or": [] }), 0).unwrap();
        assert_eq!(sql, "1=0");
        let (sql, _) = FilterWhere::generate(&json!({ "$and": [] }), 0).unwrap();
        assert_eq!(sql, "1=1");
    }

    #[test]
    fn operands_must_be_scalars() {
        assert!(matches!(
            FilterWhere::generate(&json!({ "title": { "$ilike": ["a", "b"] } }), 0),
            Err(FilterError::InvalidOperatorData(_))
        ));
    }

    #[test]
    fn rejects_unknown_operator_and_bad_identifier() {
        assert!(matches!(
            FilterWhere::generate(&json!({ "title": { "$regex": "x" } }), 0),
            Err(FilterError::UnsupportedOperator(_))
        ));
        assert!(matches!(
            FilterWhere::generate(&json!({ "title\"; DROP TABLE articles; --": 1 }), 0),
            Err(FilterError::InvalidIdentifier { kind: "column", .. })
        ));
    }
}
