//! T-SQL emission for select statements.
//!
//! The target engine has no native OFFSET/LIMIT, so the compiler picks one of
//! three strategies per statement: a numbered-subquery count, a windowed
//! derived table for offset pagination, or a plain `SELECT [TOP (n)]` form.

pub mod joins;
pub mod quoting;

mod count;
mod select;
mod window;

#[cfg(test)]
mod tests;

use crate::ast::{FromSource, Join, Projection, SelectStatement, TableRef};
use crate::error::CompileResult;
use crate::schema::Schema;
use log::debug;
use quoting::quote_name;

pub use joins::fix_correlated_joins;

/// Compiler-wide configuration. Replaces the process-wide toggles the adapter
/// this descends from kept as mutable class state.
#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    /// Table hint inserted after the FROM table for statements that carry no
    /// explicit lock, e.g. `WITH (NOLOCK)`.
    pub default_table_hint: Option<String>,
}

/// Compiles select statements to T-SQL text. Pure: no I/O, no shared state;
/// safe to use from many threads against independent statements.
pub struct Compiler<'a> {
    schema: &'a Schema,
    config: CompilerConfig,
}

impl<'a> Compiler<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            config: CompilerConfig::default(),
        }
    }

    pub fn with_config(schema: &'a Schema, config: CompilerConfig) -> Self {
        Self { schema, config }
    }

    /// Compile one statement. The caller's statement is left untouched; the
    /// correlated-join fixer runs exactly once, on the compiler's working copy.
    pub fn compile(&self, stmt: &SelectStatement) -> CompileResult<String> {
        let mut stmt = stmt.clone();
        stmt.core.source = joins::fix_correlated_joins(&stmt.core.source);
        if stmt.core.projections.is_empty() {
            stmt.core.projections.push(match stmt.core.source.base_table() {
                Some(t) => Projection::star_of(t.name.clone()),
                None => Projection::star(),
            });
        }

        let lock = self.lock_hint(&stmt);
        if count::is_complex_count(&stmt) {
            debug!("compiling complex-count form");
            count::build_complex_count(&stmt, self.schema, lock.as_deref())
        } else if stmt.offset.is_some() {
            debug!("compiling windowed offset emulation");
            window::build_windowed(&stmt, self.schema, lock.as_deref())
        } else {
            Ok(select::build_plain(&stmt, lock.as_deref()))
        }
    }

    fn lock_hint(&self, stmt: &SelectStatement) -> Option<String> {
        stmt.lock
            .as_ref()
            .map(|l| l.to_sql())
            .or_else(|| self.config.default_table_hint.clone())
    }
}

/// Join non-empty query fragments with single spaces.
pub(crate) fn build_query<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn projection_sql(p: &Projection) -> String {
    match p {
        Projection::Star { table: None } => "*".to_string(),
        Projection::Star { table: Some(t) } => format!("{}.*", quote_name(t)),
        Projection::Column { table: None, name } => quote_name(name),
        Projection::Column {
            table: Some(t),
            name,
        } => format!("{}.{}", quote_name(t), quote_name(name)),
        Projection::Aliased { expr, alias } => format!("{} AS {}", expr, quote_name(alias)),
        Projection::Call { func, expr, alias } => {
            let call = format!("{}({})", func.to_uppercase(), expr);
            match alias {
                Some(a) => format!("{} AS {}", call, quote_name(a)),
                None => call,
            }
        }
    }
}

pub(crate) fn projections_sql(projections: &[Projection]) -> String {
    projections
        .iter()
        .map(projection_sql)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn table_sql(t: &TableRef) -> String {
    match &t.alias {
        Some(alias) => format!("{} {}", quote_name(&t.name), quote_name(alias)),
        None => quote_name(&t.name),
    }
}

pub(crate) fn join_sql(j: &Join) -> String {
    match j {
        Join::Inner { table, on } => format!("INNER JOIN {} ON {}", table_sql(table), on),
        Join::Outer { table, on } => format!("LEFT OUTER JOIN {} ON {}", table_sql(table), on),
        Join::Fragment(text) => text.clone(),
    }
}

/// Render the from-source with the lock hint placed immediately after the
/// FROM-clause table token, ahead of any joins.
pub(crate) fn from_clause(source: &FromSource, lock: Option<&str>) -> String {
    let lock_part = lock.map(str::to_string).unwrap_or_default();
    match source {
        FromSource::Table(t) => build_query([table_sql(t), lock_part]),
        FromSource::Join(tree) => {
            let mut parts = vec![table_sql(&tree.base), lock_part];
            parts.extend(tree.joins.iter().map(join_sql));
            build_query(parts)
        }
        FromSource::Raw(text) => build_query([text.clone(), lock_part]),
    }
}

pub(crate) fn wheres_clause(wheres: &[String]) -> String {
    if wheres.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", wheres.join(" AND "))
    }
}

pub(crate) fn groups_clause(groups: &[String]) -> String {
    if groups.is_empty() {
        String::new()
    } else {
        format!("GROUP BY {}", groups.join(", "))
    }
}

pub(crate) fn havings_clause(havings: &[String]) -> String {
    if havings.is_empty() {
        String::new()
    } else {
        format!("HAVING {}", havings.join(" AND "))
    }
}
