//! Plain SELECT emission tests.

use super::library_schema;
use crate::ast::{FromSource, Join, JoinTree, Ordering, Projection, SelectStatement, TableRef};
use crate::compiler::{Compiler, CompilerConfig};

#[test]
fn test_select_star() {
    let schema = library_schema();
    let stmt = SelectStatement::from_table("books");
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(sql, "SELECT [books].* FROM [books]");
}

#[test]
fn test_select_with_top() {
    let schema = library_schema();
    let stmt = SelectStatement::from_table("books").limit(3);
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(sql, "SELECT TOP (3) [books].* FROM [books]");
}

#[test]
fn test_select_full_clause_order() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![
            Projection::qualified("books", "author_id"),
            Projection::call_as("COUNT", "*", "total"),
        ])
        .and_where("[books].[id] > 10")
        .group_by("[books].[author_id]")
        .having("COUNT(*) > 1")
        .order(Ordering::desc("[books].[author_id]"));
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT [books].[author_id], COUNT(*) AS [total] FROM [books] \
         WHERE [books].[id] > 10 GROUP BY [books].[author_id] \
         HAVING COUNT(*) > 1 ORDER BY [books].[author_id] DESC"
    );
}

#[test]
fn test_lock_hint_follows_from_table() {
    let schema = library_schema();
    let stmt = SelectStatement::from_table("books").lock();
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(sql, "SELECT [books].* FROM [books] WITH(HOLDLOCK, ROWLOCK)");
}

#[test]
fn test_lock_hint_precedes_joins() {
    let schema = library_schema();
    let source = FromSource::Join(JoinTree {
        base: TableRef::new("books"),
        joins: vec![Join::Inner {
            table: TableRef::new("authors"),
            on: "[authors].[id] = [books].[author_id]".to_string(),
        }],
    });
    let stmt = SelectStatement::from_source(source)
        .select(vec![Projection::star_of("books")])
        .lock_with("WITH (NOLOCK)");
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT [books].* FROM [books] WITH (NOLOCK) \
         INNER JOIN [authors] ON [authors].[id] = [books].[author_id]"
    );
}

#[test]
fn test_config_default_table_hint() {
    let schema = library_schema();
    let config = CompilerConfig {
        default_table_hint: Some("WITH (NOLOCK)".to_string()),
    };
    let stmt = SelectStatement::from_table("books");
    let sql = Compiler::with_config(&schema, config).compile(&stmt).unwrap();
    assert_eq!(sql, "SELECT [books].* FROM [books] WITH (NOLOCK)");
}

#[test]
fn test_explicit_lock_beats_config_hint() {
    let schema = library_schema();
    let config = CompilerConfig {
        default_table_hint: Some("WITH (NOLOCK)".to_string()),
    };
    let stmt = SelectStatement::from_table("books").lock();
    let sql = Compiler::with_config(&schema, config).compile(&stmt).unwrap();
    assert_eq!(sql, "SELECT [books].* FROM [books] WITH(HOLDLOCK, ROWLOCK)");
}

#[test]
fn test_eager_limiting_distinct_rewrites_unselected_order() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::qualified("books", "name")])
        .distinct()
        .limit(5)
        .order(Ordering::asc("[books].[author_id]"));
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT TOP (5) [books].[name] FROM [books] \
         ORDER BY MIN([books].[author_id]) ASC"
    );
}

#[test]
fn test_eager_limiting_uses_max_for_descending() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::qualified("books", "name")])
        .distinct()
        .limit(5)
        .order(Ordering::desc("[books].[author_id]"));
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT TOP (5) [books].[name] FROM [books] \
         ORDER BY MAX([books].[author_id]) DESC"
    );
}

#[test]
fn test_eager_limiting_keeps_selected_order() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::qualified("books", "name")])
        .distinct()
        .limit(5)
        .order(Ordering::asc("[books].[name]"));
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT TOP (5) [books].[name] FROM [books] ORDER BY [books].[name] ASC"
    );
}

#[test]
fn test_grouped_distinct_is_not_eager_limited() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::qualified("books", "name")])
        .distinct()
        .limit(5)
        .group_by("[books].[name]")
        .order(Ordering::asc("[books].[author_id]"));
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT TOP (5) [books].[name] FROM [books] GROUP BY [books].[name] \
         ORDER BY [books].[author_id] ASC"
    );
}

#[test]
fn test_caller_statement_is_untouched() {
    let schema = library_schema();
    let stmt = SelectStatement::from_table("books").limit(3);
    let before = stmt.clone();
    let _ = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(stmt, before);
}
