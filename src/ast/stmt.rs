use crate::ast::{FromSource, Ordering, Projection, TableRef};
use serde::{Deserialize, Serialize};

/// A row/table locking hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LockHint {
    /// The engine's default pessimistic hint.
    Default,
    /// A literal hint string, e.g. `WITH (NOLOCK)`.
    Literal(String),
}

impl LockHint {
    pub fn to_sql(&self) -> String {
        match self {
            LockHint::Default => "WITH(HOLDLOCK, ROWLOCK)".to_string(),
            LockHint::Literal(s) => s.clone(),
        }
    }
}

/// The projections, source and predicates of one select statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Core {
    pub projections: Vec<Projection>,
    pub source: FromSource,
    /// WHERE predicates, rendered; joined with AND.
    #[serde(default)]
    pub wheres: Vec<String>,
    /// GROUP BY expressions, rendered.
    #[serde(default)]
    pub groups: Vec<String>,
    /// HAVING predicates, rendered; joined with AND.
    #[serde(default)]
    pub havings: Vec<String>,
    #[serde(default)]
    pub distinct: bool,
}

/// One logical query as produced by the external query builder. Immutable to
/// callers; the compiler works on its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub core: Core,
    #[serde(default)]
    pub orders: Vec<Ordering>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub lock: Option<LockHint>,
}

impl SelectStatement {
    /// A statement selecting every column of one table.
    pub fn from_table(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            core: Core {
                projections: vec![Projection::star_of(name.clone())],
                source: FromSource::Table(TableRef::new(name)),
                wheres: Vec::new(),
                groups: Vec::new(),
                havings: Vec::new(),
                distinct: false,
            },
            orders: Vec::new(),
            limit: None,
            offset: None,
            lock: None,
        }
    }

    /// A statement over an arbitrary from-source with no projections yet.
    pub fn from_source(source: FromSource) -> Self {
        Self {
            core: Core {
                projections: Vec::new(),
                source,
                wheres: Vec::new(),
                groups: Vec::new(),
                havings: Vec::new(),
                distinct: false,
            },
            orders: Vec::new(),
            limit: None,
            offset: None,
            lock: None,
        }
    }

    /// Replace the projection list.
    pub fn select(mut self, projections: Vec<Projection>) -> Self {
        self.core.projections = projections;
        self
    }

    pub fn distinct(mut self) -> Self {
        self.core.distinct = true;
        self
    }

    pub fn and_where(mut self, predicate: impl Into<String>) -> Self {
        self.core.wheres.push(predicate.into());
        self
    }

    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.core.groups.push(expr.into());
        self
    }

    pub fn having(mut self, predicate: impl Into<String>) -> Self {
        self.core.havings.push(predicate.into());
        self
    }

    pub fn order(mut self, ordering: Ordering) -> Self {
        self.orders.push(ordering);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Request the default pessimistic lock hint.
    pub fn lock(mut self) -> Self {
        self.lock = Some(LockHint::Default);
        self
    }

    /// Request a literal lock hint.
    pub fn lock_with(mut self, hint: impl Into<String>) -> Self {
        self.lock = Some(LockHint::Literal(hint.into()));
        self
    }
}
