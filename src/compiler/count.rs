//! Complex-count emission.
//!
//! A single COUNT projection combined with TOP and ORDER BY is rejected or
//! behaves inconsistently on the target engine, so the count is taken over a
//! numbered, limited inner query instead.

use super::window::{ROW_ALIAS, ROWTABLE_ALIAS, resolve_window_orders};
use super::{build_query, from_clause, groups_clause, havings_clause, wheres_clause};
use crate::ast::SelectStatement;
use crate::error::CompileResult;
use crate::schema::Schema;

/// A statement counts "complexly" when it projects exactly one COUNT, carries
/// a limit or a where, and has no join.
pub(crate) fn is_complex_count(stmt: &SelectStatement) -> bool {
    let core = &stmt.core;
    core.projections.len() == 1
        && core.projections[0].is_count()
        && (stmt.limit.is_some() || !core.wheres.is_empty())
        && !core.source.is_join()
}

pub(crate) fn build_complex_count(
    stmt: &SelectStatement,
    schema: &Schema,
    lock: Option<&str>,
) -> CompileResult<String> {
    let core = &stmt.core;
    let skipped = stmt.offset.unwrap_or(0);
    let orders = resolve_window_orders(stmt, schema)?;
    let order_sql = orders
        .iter()
        .map(|o| o.to_sql())
        .collect::<Vec<_>>()
        .join(", ");
    let top = stmt
        .limit
        .map(|n| format!("TOP ({}) ", n.saturating_add(skipped)))
        .unwrap_or_default();

    // An inner ORDER BY is only legal next to TOP.
    let inner_order = if !stmt.orders.is_empty() && !top.is_empty() {
        format!("ORDER BY {}", order_sql)
    } else {
        String::new()
    };

    Ok(build_query([
        "SELECT COUNT([count]) AS [count_id]".to_string(),
        "FROM (".to_string(),
        format!(
            "SELECT {}ROW_NUMBER() OVER (ORDER BY {}) AS [{}], 1 AS [count]",
            top, order_sql, ROW_ALIAS
        ),
        format!("FROM {}", from_clause(&core.source, lock)),
        wheres_clause(&core.wheres),
        groups_clause(&core.groups),
        havings_clause(&core.havings),
        inner_order,
        format!(") AS [{}]", ROWTABLE_ALIAS),
        format!("WHERE [{}].[{}] > {}", ROWTABLE_ALIAS, ROW_ALIAS, skipped),
    ]))
}
