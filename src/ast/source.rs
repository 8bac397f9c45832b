use serde::{Deserialize, Serialize};

/// A structured table reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

/// A join attached to the base table of a join tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Join {
    Inner { table: TableRef, on: String },
    Outer { table: TableRef, on: String },
    /// A raw-text join fragment carried through verbatim.
    Fragment(String),
}

impl Join {
    /// The joined table's name, when the join is structured.
    pub fn table_name(&self) -> Option<&str> {
        match self {
            Join::Inner { table, .. } | Join::Outer { table, .. } => Some(&table.name),
            Join::Fragment(_) => None,
        }
    }
}

/// A base table plus its joins, in from-clause order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinTree {
    pub base: TableRef,
    pub joins: Vec<Join>,
}

/// The FROM source of a select statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FromSource {
    Table(TableRef),
    Join(JoinTree),
    /// A raw-text from fragment.
    Raw(String),
}

impl FromSource {
    /// The structured base table, when there is one.
    pub fn base_table(&self) -> Option<&TableRef> {
        match self {
            FromSource::Table(t) => Some(t),
            FromSource::Join(tree) => Some(&tree.base),
            FromSource::Raw(_) => None,
        }
    }

    pub fn is_join(&self) -> bool {
        matches!(self, FromSource::Join(_))
    }

    /// Structured table names in from-clause order: the base table followed by
    /// each structured join's table. Raw fragments contribute nothing.
    pub fn table_names(&self) -> Vec<&str> {
        match self {
            FromSource::Table(t) => vec![t.name.as_str()],
            FromSource::Join(tree) => {
                let mut names = vec![tree.base.name.as_str()];
                names.extend(tree.joins.iter().filter_map(|j| j.table_name()));
                names
            }
            FromSource::Raw(_) => Vec::new(),
        }
    }
}
