use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry: a rendered expression plus a direction.
///
/// Equality and hashing are defined by the expression alone so that a list of
/// orderings can be de-duplicated reliably. The same expression supplied twice,
/// even with opposite directions, counts as one ordering; that must hold before
/// a list is emitted into a window clause.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub expr: String,
    pub dir: SortOrder,
}

impl Ordering {
    pub fn asc(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            dir: SortOrder::Asc,
        }
    }

    pub fn desc(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            dir: SortOrder::Desc,
        }
    }

    pub fn to_sql(&self) -> String {
        format!("{} {}", self.expr, self.dir.as_str())
    }
}

impl PartialEq for Ordering {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl Hash for Ordering {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expr.hash(state);
    }
}

/// Drop duplicate orderings, keeping the first occurrence of each expression.
pub fn dedupe(orders: &[Ordering]) -> Vec<Ordering> {
    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();
    for o in orders {
        if seen.contains(&o.expr.as_str()) {
            continue;
        }
        seen.push(o.expr.as_str());
        out.push(o.clone());
    }
    out
}
