//! Correlated self-join fixer tests.

use super::library_schema;
use crate::ast::{FromSource, Join, JoinTree, Projection, SelectStatement, TableRef};
use crate::compiler::{Compiler, joins::fix_correlated_joins};

fn self_join_tree(fragment: &str) -> FromSource {
    FromSource::Join(JoinTree {
        base: TableRef::new("books"),
        joins: vec![Join::Fragment(fragment.to_string())],
    })
}

#[test]
fn test_ambiguous_fragment_is_aliased_and_requalified() {
    let source =
        self_join_tree("LEFT OUTER JOIN [books] ON [books].[parent_id] = [books].[id]");
    let fixed = fix_correlated_joins(&source);
    let FromSource::Join(tree) = fixed else {
        panic!("expected a join tree");
    };
    assert_eq!(
        tree.joins,
        vec![Join::Fragment(
            "LEFT OUTER JOIN [books] [books_crltd] \
             ON [books_crltd].[parent_id] = [books_crltd].[id]"
                .to_string()
        )]
    );
}

#[test]
fn test_input_source_is_left_untouched() {
    let source =
        self_join_tree("LEFT OUTER JOIN [books] ON [books].[parent_id] = [books].[id]");
    let before = source.clone();
    let _ = fix_correlated_joins(&source);
    assert_eq!(source, before);
}

#[test]
fn test_structural_self_join_passes_through() {
    let source = FromSource::Join(JoinTree {
        base: TableRef::new("books"),
        joins: vec![Join::Outer {
            table: TableRef::aliased("books", "parents"),
            on: "[parents].[id] = [books].[parent_id]".to_string(),
        }],
    });
    assert_eq!(fix_correlated_joins(&source), source);
}

#[test]
fn test_fragment_joining_another_table_passes_through() {
    let source =
        self_join_tree("LEFT OUTER JOIN [authors] ON [authors].[id] = [books].[author_id]");
    assert_eq!(fix_correlated_joins(&source), source);
}

#[test]
fn test_inner_join_fragment_passes_through() {
    let source = self_join_tree("INNER JOIN [books] ON [books].[parent_id] = [books].[id]");
    assert_eq!(fix_correlated_joins(&source), source);
}

#[test]
fn test_table_source_passes_through() {
    let source = FromSource::Table(TableRef::new("books"));
    assert_eq!(fix_correlated_joins(&source), source);
}

#[test]
fn test_compile_emits_the_aliased_fragment() {
    let schema = library_schema();
    let stmt = SelectStatement::from_source(self_join_tree(
        "LEFT OUTER JOIN [books] ON [books].[parent_id] = [books].[id]",
    ))
    .select(vec![Projection::star_of("books")]);
    let sql = Compiler::new(&schema).compile(&stmt).unwrap();
    assert_eq!(
        sql,
        "SELECT [books].* FROM [books] LEFT OUTER JOIN [books] [books_crltd] \
         ON [books_crltd].[parent_id] = [books_crltd].[id]"
    );
}
