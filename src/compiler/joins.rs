//! Structural pre-pass for one ambiguous self-join shape.
//!
//! A join tree whose base is a structured table reference can carry a raw-text
//! outer-join fragment naming the same table. Left alone, both occurrences
//! resolve to one table name and the join correlates incorrectly. The fix is
//! narrow: alias the raw side with a fixed suffix and re-point qualified
//! references inside that fragment at the alias. Every other topology,
//! including fully structural self-joins, passes through unchanged.

use crate::ast::{FromSource, Join, JoinTree};
use log::trace;

const CORRELATED_ALIAS_SUFFIX: &str = "_crltd";

/// Pure transform: returns a new from-source, leaving the input untouched.
pub fn fix_correlated_joins(source: &FromSource) -> FromSource {
    let FromSource::Join(tree) = source else {
        return source.clone();
    };

    let base = &tree.base;
    let joins = tree
        .joins
        .iter()
        .map(|join| match join {
            Join::Fragment(text) if is_ambiguous_self_join(text, &base.name) => {
                trace!("aliasing correlated self-join fragment on '{}'", base.name);
                Join::Fragment(alias_fragment(text, &base.name))
            }
            other => other.clone(),
        })
        .collect();

    FromSource::Join(JoinTree {
        base: base.clone(),
        joins,
    })
}

/// The one handled shape: an outer-join fragment whose joined table is the
/// base table itself.
fn is_ambiguous_self_join(fragment: &str, base: &str) -> bool {
    fragment.to_uppercase().contains("OUTER JOIN")
        && fragment.contains(&format!("JOIN [{}]", base))
}

fn alias_fragment(fragment: &str, base: &str) -> String {
    let alias = format!("{}{}", base, CORRELATED_ALIAS_SUFFIX);
    // Re-point qualified references first; the join's table token carries no
    // trailing dot, so it survives for the alias insertion below.
    let requalified = fragment.replace(&format!("[{}].", base), &format!("[{}].", alias));
    requalified.replacen(
        &format!("JOIN [{}]", base),
        &format!("JOIN [{}] [{}]", base, alias),
        1,
    )
}
