//! Plain SELECT emission, including the eager-limiting DISTINCT rewrite.

use super::{
    build_query, from_clause, groups_clause, havings_clause, projection_sql, projections_sql,
    quoting::quote_name, wheres_clause,
};
use crate::ast::{Ordering, Projection, SelectStatement, SortOrder};

pub(crate) fn build_plain(stmt: &SelectStatement, lock: Option<&str>) -> String {
    let core = &stmt.core;
    let eager = eager_limited(stmt);

    let mut head = String::from("SELECT ");
    if core.distinct {
        head.push_str("DISTINCT ");
    }
    // TOP lands after DISTINCT; statements with an offset never reach this
    // emission path.
    if let Some(n) = stmt.limit {
        head.push_str(&format!("TOP ({}) ", n));
    }
    head.push_str(&projections_sql(&core.projections));

    build_query([
        head,
        format!("FROM {}", from_clause(&core.source, lock)),
        wheres_clause(&core.wheres),
        groups_clause(&core.groups),
        havings_clause(&core.havings),
        order_clause(stmt, eager),
    ])
}

fn order_clause(stmt: &SelectStatement, eager: bool) -> String {
    if stmt.orders.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = stmt
        .orders
        .iter()
        .map(|o| {
            if eager && !ordering_selected(&o.expr, &stmt.core.projections) {
                eager_order(o)
            } else {
                o.to_sql()
            }
        })
        .collect();
    format!("ORDER BY {}", rendered.join(", "))
}

/// Single-column DISTINCT with a limit and no grouping: orderings on
/// non-selected columns are rewritten to MIN/MAX so they need not appear in
/// the result set.
fn eager_limited(stmt: &SelectStatement) -> bool {
    let core = &stmt.core;
    core.distinct
        && stmt.limit.is_some()
        && core.groups.is_empty()
        && core.projections.len() == 1
        && matches!(core.projections[0], Projection::Column { .. })
}

fn eager_order(o: &Ordering) -> String {
    let func = match o.dir {
        SortOrder::Asc => "MIN",
        SortOrder::Desc => "MAX",
    };
    format!("{}({}) {}", func, o.expr, o.dir.as_str())
}

fn ordering_selected(expr: &str, projections: &[Projection]) -> bool {
    projections.iter().any(|p| {
        if projection_sql(p) == expr {
            return true;
        }
        match p {
            Projection::Column { name, .. } => expr == name || expr == quote_name(name),
            _ => false,
        }
    })
}
