use serde::{Deserialize, Serialize};

/// One entry in a select list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// `*`, optionally table-qualified.
    Star { table: Option<String> },
    /// A plain column reference, optionally table-qualified.
    Column { table: Option<String>, name: String },
    /// An arbitrary pre-rendered expression with an alias.
    Aliased { expr: String, alias: String },
    /// An aggregate or function call, e.g. `COUNT(*)`.
    Call {
        func: String,
        expr: String,
        alias: Option<String>,
    },
}

impl Projection {
    pub fn star() -> Self {
        Projection::Star { table: None }
    }

    pub fn star_of(table: impl Into<String>) -> Self {
        Projection::Star {
            table: Some(table.into()),
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        Projection::Column {
            table: None,
            name: name.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Projection::Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    pub fn aliased(expr: impl Into<String>, alias: impl Into<String>) -> Self {
        Projection::Aliased {
            expr: expr.into(),
            alias: alias.into(),
        }
    }

    pub fn call(func: impl Into<String>, expr: impl Into<String>) -> Self {
        Projection::Call {
            func: func.into(),
            expr: expr.into(),
            alias: None,
        }
    }

    pub fn call_as(
        func: impl Into<String>,
        expr: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Projection::Call {
            func: func.into(),
            expr: expr.into(),
            alias: Some(alias.into()),
        }
    }

    /// Whether this projection is an aggregate or function call.
    pub fn is_call(&self) -> bool {
        matches!(self, Projection::Call { .. })
    }

    /// Whether this projection is a `COUNT` call.
    pub fn is_count(&self) -> bool {
        matches!(self, Projection::Call { func, .. } if func.eq_ignore_ascii_case("COUNT"))
    }

    /// The projection's alias, if it carries one.
    pub fn alias(&self) -> Option<&str> {
        match self {
            Projection::Aliased { alias, .. } => Some(alias),
            Projection::Call { alias, .. } => alias.as_deref(),
            _ => None,
        }
    }
}
