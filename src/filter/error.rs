use thiserror::Error;

/// Rejections raised while turning a filter document into SQL
#[derive(Error, Debug)]
pub enum FilterError {
    /// Table or column name that is not a plain SQL identifier
    #[error("invalid {kind} identifier {name:?}")]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("malformed where clause: {0}")]
    InvalidWhereClause(String),

    #[error("unsupported operator {0}")]
    UnsupportedOperator(String),

    #[error("bad operand: {0}")]
    InvalidOperatorData(String),

    /// Negative LIMIT or OFFSET
    #[error("{0} must be non-negative")]
    NegativeBound(&'static str),
}
