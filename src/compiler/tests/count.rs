//! Complex-count emission tests.

use super::library_schema;
use crate::ast::{FromSource, Join, JoinTree, Ordering, Projection, SelectStatement, TableRef};
use crate::compiler::Compiler;

#[test]
fn test_limited_count_wraps_a_numbered_inner_query() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::call("COUNT", "*")])
        .and_where("[books].[id] > 0")
        .limit(2);
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT COUNT([count]) AS [count_id] FROM ( \
         SELECT TOP (2) ROW_NUMBER() OVER (ORDER BY [books].[id] ASC) AS [__rn], 1 AS [count] \
         FROM [books] WHERE [books].[id] > 0 ) AS [__rnt] WHERE [__rnt].[__rn] > 0"
    );
}

#[test]
fn test_count_offset_widens_top_and_raises_the_floor() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::call("COUNT", "*")])
        .limit(2)
        .offset(3);
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert!(sql.contains("SELECT TOP (5) ROW_NUMBER()"));
    assert!(sql.ends_with("WHERE [__rnt].[__rn] > 3"));
}

#[test]
fn test_count_top_saturates_instead_of_overflowing() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::call("COUNT", "*")])
        .limit(u64::MAX)
        .offset(1);
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert!(sql.contains("SELECT TOP (18446744073709551615) ROW_NUMBER()"));
    assert!(sql.ends_with("WHERE [__rnt].[__rn] > 1"));
}

#[test]
fn test_count_keeps_explicit_inner_order_next_to_top() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::call("COUNT", "*")])
        .order(Ordering::desc("[books].[name]"))
        .limit(4);
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert!(sql.contains("ORDER BY [books].[name] DESC ) AS [__rnt]"));
}

#[test]
fn test_filtered_count_without_limit_has_no_top_or_inner_order() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(FromSource::Table(TableRef::new("books")))
        .select(vec![Projection::call("COUNT", "*")])
        .and_where("[books].[name] = N'Ged'");
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT COUNT([count]) AS [count_id] FROM ( \
         SELECT ROW_NUMBER() OVER (ORDER BY [books].[id] ASC) AS [__rn], 1 AS [count] \
         FROM [books] WHERE [books].[name] = N'Ged' ) AS [__rnt] WHERE [__rnt].[__rn] > 0"
    );
}

#[test]
fn test_joined_count_compiles_plainly() {
    let schema = library_schema();
    let source = FromSource::Join(JoinTree {
        base: TableRef::new("books"),
        joins: vec![Join::Inner {
            table: TableRef::new("authors"),
            on: "[authors].[id] = [books].[author_id]".to_string(),
        }],
    });
    let stmt = SelectStatement::from_source(source)
        .select(vec![Projection::call("COUNT", "*")])
        .limit(2);
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT TOP (2) COUNT(*) FROM [books] \
         INNER JOIN [authors] ON [authors].[id] = [books].[author_id]"
    );
}
