//! Schema metadata consumed by the compiler and the parameter binder.
//!
//! Reflection and caching of live catalogs belong to an external collaborator;
//! this module only models the shape the compiler needs: table names, column
//! names with their declared SQL types, primary keys and identity columns.
//!
//! # Example
//! ```
//! use tsqlgen::schema::Schema;
//!
//! let json = r#"{
//!     "tables": [{
//!         "name": "books",
//!         "columns": [
//!             { "name": "id", "type": "int", "primary_key": true, "identity": true },
//!             { "name": "name", "type": "nvarchar(255)" }
//!         ]
//!     }]
//! }"#;
//!
//! let schema: Schema = serde_json::from_str(json).unwrap();
//! assert!(schema.table("books").is_some());
//! ```

use crate::error::{CompileError, CompileResult};
use serde::{Deserialize, Serialize};

/// Database schema definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<TableDef>,
}

/// Table definition with columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

/// Column definition with declared-type information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type", alias = "sql_type")]
    pub sql_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub identity: bool,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Add a table to the schema.
    pub fn add_table(&mut self, table: TableDef) {
        self.tables.push(table);
    }

    /// Load schema from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a table by name, case-insensitively.
    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Look up a column by table and column name.
    pub fn column(&self, table: &str, column: &str) -> Option<&ColumnDef> {
        self.table(table)?
            .columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(column))
    }

    /// The column a windowed query should order by for a table: an identity
    /// primary key first, then any primary key, then the first column.
    pub fn order_column(&self, table: &str) -> CompileResult<&ColumnDef> {
        let def = self
            .table(table)
            .ok_or_else(|| CompileError::UnknownTable(table.to_string()))?;
        def.columns
            .iter()
            .find(|c| c.primary_key && c.identity)
            .or_else(|| def.columns.iter().find(|c| c.primary_key))
            .or_else(|| def.columns.first())
            .ok_or_else(|| CompileError::NoOrderableColumn(table.to_string()))
    }

    /// The table's identity column, if it has one.
    pub fn identity_column(&self, table: &str) -> Option<&ColumnDef> {
        self.table(table)?.columns.iter().find(|c| c.identity)
    }
}

impl TableDef {
    /// Create a new table definition.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    /// Add a column to the table.
    pub fn add_column(&mut self, col: ColumnDef) {
        self.columns.push(col);
    }

    /// Builder: add a simple column.
    pub fn column(mut self, name: &str, sql_type: &str) -> Self {
        self.columns.push(ColumnDef {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
            nullable: true,
            primary_key: false,
            identity: false,
        });
        self
    }

    /// Builder: add a primary key column.
    pub fn pk(mut self, name: &str, sql_type: &str) -> Self {
        self.columns.push(ColumnDef {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
            nullable: false,
            primary_key: true,
            identity: false,
        });
        self
    }

    /// Builder: add an identity primary key column.
    pub fn identity(mut self, name: &str, sql_type: &str) -> Self {
        self.columns.push(ColumnDef {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
            nullable: false,
            primary_key: true,
            identity: true,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_json() {
        let json = r#"{
            "tables": [{
                "name": "books",
                "columns": [
                    { "name": "id", "type": "int", "primary_key": true, "identity": true },
                    { "name": "name", "type": "nvarchar(255)" }
                ]
            }]
        }"#;

        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.tables.len(), 1);
        assert_eq!(schema.column("books", "id").unwrap().sql_type, "int");
        assert!(schema.identity_column("books").is_some());
    }

    #[test]
    fn test_order_column_prefers_primary_key() {
        let mut schema = Schema::new();
        schema.add_table(TableDef::new("books").column("name", "nvarchar(255)").pk("id", "int"));

        assert_eq!(schema.order_column("books").unwrap().name, "id");
    }

    #[test]
    fn test_order_column_falls_back_to_first_column() {
        let mut schema = Schema::new();
        schema.add_table(TableDef::new("logs").column("at", "datetime").column("msg", "ntext"));

        assert_eq!(schema.order_column("logs").unwrap().name, "at");
    }

    #[test]
    fn test_order_column_unknown_table() {
        let schema = Schema::new();
        assert!(matches!(
            schema.order_column("missing"),
            Err(crate::error::CompileError::UnknownTable(_))
        ));
    }
}
