//! Compiler test modules.
//!
//! Tests are organized by emission strategy:
//! - `select`: plain SELECT, lock hints, eager-limiting DISTINCT
//! - `window`: offset pagination via the numbered derived table
//! - `count`: complex-count form
//! - `joins`: the correlated self-join fixer

mod count;
mod joins;
mod select;

use crate::schema::{Schema, TableDef};

pub(crate) fn library_schema() -> Schema {
    // Strategy-selection logs show up under RUST_LOG when a test fails.
    let _ = env_logger::builder().is_test(true).try_init();
    let mut schema = Schema::new();
    schema.add_table(
        TableDef::new("books")
            .identity("id", "int")
            .column("name", "nvarchar(255)")
            .column("author_id", "int"),
    );
    schema.add_table(
        TableDef::new("authors")
            .identity("id", "int")
            .column("name", "nvarchar(255)"),
    );
    schema
}
