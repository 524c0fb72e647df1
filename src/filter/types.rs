use serde_json::Value;

/// Comparison operators accepted under a column key, e.g.
/// `{ "title": { "$ilike": "%panda%" } }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    ILike,
}

impl Comparison {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "$eq" => Some(Comparison::Eq),
            "$ne" | "$neq" => Some(Comparison::Ne),
            "$ilike" => Some(Comparison::ILike),
            _ => None,
        }
    }

    pub fn sql_operator(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::ILike => "ILIKE",
        }
    }
}

/// Input to [`Filter::assign`](super::Filter::assign)
#[derive(Debug, Clone, Default)]
pub struct FilterData {
    pub where_clause: Option<Value>,
    pub order: Option<Value>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive; anything other than `desc` sorts ascending
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One `ORDER BY` term
#[derive(Debug, Clone)]
pub struct OrderTerm {
    pub column: String,
    pub direction: SortDirection,
}

/// Rendered statement with its positional parameters
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
