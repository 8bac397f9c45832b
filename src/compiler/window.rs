//! Offset pagination via a ROW_NUMBER-numbered derived table.

use super::{
    build_query, from_clause, groups_clause, havings_clause, projection_sql, projections_sql,
    quoting::quote_name, wheres_clause,
};
use crate::ast::{FromSource, Ordering, Projection, SelectStatement, ordering};
use crate::error::CompileResult;
use crate::schema::Schema;

pub(crate) const ROW_ALIAS: &str = "__rn";
pub(crate) const ROWTABLE_ALIAS: &str = "__rnt";

/// The wrapper form mandates a numeric TOP bound; i64::MAX stands in when no
/// limit was requested.
const TOP_SENTINEL: u64 = i64::MAX as u64;

/// Resolve the window ordering for a statement: its explicit orders when
/// present, otherwise one primary-key (or first-column) ordering per joined
/// table in from-clause order. The result is de-duplicated by expression.
pub(crate) fn resolve_window_orders(
    stmt: &SelectStatement,
    schema: &Schema,
) -> CompileResult<Vec<Ordering>> {
    if !stmt.orders.is_empty() {
        return Ok(ordering::dedupe(&stmt.orders));
    }

    let mut orders = Vec::new();
    match &stmt.core.source {
        FromSource::Table(_) | FromSource::Join(_) => {
            for name in stmt.core.source.table_names() {
                orders.push(table_order(name, schema)?);
            }
        }
        FromSource::Raw(raw) => {
            let name = raw.trim().trim_matches(['[', ']']);
            orders.push(table_order(name, schema)?);
        }
    }
    Ok(ordering::dedupe(&orders))
}

fn table_order(table: &str, schema: &Schema) -> CompileResult<Ordering> {
    let col = schema.order_column(table)?;
    Ok(Ordering::asc(format!(
        "{}.{}",
        quote_name(table),
        quote_name(&col.name)
    )))
}

pub(crate) fn build_windowed(
    stmt: &SelectStatement,
    schema: &Schema,
    lock: Option<&str>,
) -> CompileResult<String> {
    let core = &stmt.core;
    let orders = resolve_window_orders(stmt, schema)?;
    let order_sql = orders
        .iter()
        .map(|o| o.to_sql())
        .collect::<Vec<_>>()
        .join(", ");
    let skipped = stmt.offset.unwrap_or(0);
    let raw_name;
    let base = match &core.source {
        // Raw sources carry no structured base table; the requalification
        // base is the same name the ordering fallback resolves against.
        FromSource::Raw(raw) => {
            raw_name = raw.trim().trim_matches(['[', ']']).to_string();
            Some(raw_name.as_str())
        }
        _ => core.source.base_table().map(|t| t.name.as_str()),
    };

    let single_distinct = core.distinct
        && core.projections.len() == 1
        && matches!(core.projections[0], Projection::Column { .. });
    let all_aliased = core.source.is_join()
        && !core.projections.is_empty()
        && core.projections.iter().all(|p| p.alias().is_some());
    let has_call = core.projections.iter().any(|p| p.is_call());

    let outer = if single_distinct {
        let top = stmt
            .limit
            .map(|n| format!("TOP ({}) ", n))
            .unwrap_or_default();
        format!(
            "DISTINCT {}{}",
            top,
            requalify(&projection_sql(&core.projections[0]), base)
        )
    } else if all_aliased {
        core.projections
            .iter()
            .filter_map(|p| p.alias())
            .map(quote_name)
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        core.projections
            .iter()
            .map(|p| requalify(&projection_sql(p), base))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let inner = if single_distinct {
        // DISTINCT is stripped from the inner query; the limit lives in the
        // outer DISTINCT clause.
        projection_sql(&core.projections[0])
    } else if has_call && !all_aliased {
        // Slicing columns out of an aggregate projection is unsafe; pass
        // everything through and let the outer TOP limit.
        "*".to_string()
    } else {
        projections_sql(&core.projections)
    };

    let top = if single_distinct {
        String::new()
    } else {
        format!("TOP ({}) ", stmt.limit.unwrap_or(TOP_SENTINEL))
    };

    Ok(build_query([
        format!("SELECT {}{}", top, outer),
        "FROM (".to_string(),
        format!(
            "SELECT ROW_NUMBER() OVER (ORDER BY {}) AS [{}], {}",
            order_sql, ROW_ALIAS, inner
        ),
        format!("FROM {}", from_clause(&core.source, lock)),
        wheres_clause(&core.wheres),
        groups_clause(&core.groups),
        havings_clause(&core.havings),
        format!(") AS [{}]", ROWTABLE_ALIAS),
        format!("WHERE [{}].[{}] > ({})", ROWTABLE_ALIAS, ROW_ALIAS, skipped),
    ]))
}

/// Re-point a projection's base-table qualifier at the derived-table alias.
fn requalify(sql: &str, base: Option<&str>) -> String {
    match base {
        Some(t) => sql.replace(
            &format!("[{}].", t),
            &format!("[{}].", ROWTABLE_ALIAS),
        ),
        None => sql.to_string(),
    }
}
