//! Parameter binding: turning a SQL template plus bind values into a typed,
//! cache-friendly `sp_executesql` invocation.

use crate::ast::Value;
use crate::compiler::quoting::{quote_literal, quote_name, quote_string};
use crate::error::{CompileError, CompileResult};
use crate::schema::{ColumnDef, Schema};
use std::fmt;

/// Prefix of every prepared invocation; the plan unpreparer keys on it.
pub const EXEC_PREFIX: &str = "EXEC sp_executesql ";

/// One bind value: its ordinal position in the template, the column whose
/// metadata declares its server-side type, and the literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct BindParameter {
    pub ordinal: usize,
    pub column: ColumnDef,
    pub value: Value,
}

impl BindParameter {
    pub fn new(ordinal: usize, column: ColumnDef, value: impl Into<Value>) -> Self {
        Self {
            ordinal,
            column,
            value: value.into(),
        }
    }
}

/// The parameterized invocation. Its rendered shape is a wire contract: the
/// engine's plan cache keys on the parameterized text, and downstream logging
/// and the plan unpreparer parse it back apart.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedInvocation {
    pub template: String,
    /// `"@0 int, @1 nvarchar(max)"`
    pub type_declarations: String,
    /// `["@0 = 1", "@1 = N'x'"]`
    pub assignments: Vec<String>,
}

impl PreparedInvocation {
    /// `EXEC sp_executesql N'<template>', N'<types>', @0 = <v0>, ...`
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{}N'{}'", EXEC_PREFIX, quote_string(&self.template));
        if !self.assignments.is_empty() {
            sql.push_str(&format!(
                ", N'{}', {}",
                quote_string(&self.type_declarations),
                self.assignments.join(", ")
            ));
        }
        sql
    }
}

impl fmt::Display for PreparedInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Build a prepared invocation from a template and its bind list.
pub fn bind(template: &str, params: &[BindParameter]) -> CompileResult<PreparedInvocation> {
    let mut types = Vec::with_capacity(params.len());
    let mut assignments = Vec::with_capacity(params.len());
    for p in params {
        let ty = declared_type(&p.column)?;
        types.push(format!("@{} {}", p.ordinal, ty));
        assignments.push(format!("@{} = {}", p.ordinal, quote_literal(&p.value)));
    }
    Ok(PreparedInvocation {
        template: template.to_string(),
        type_declarations: types.join(", "),
        assignments,
    })
}

/// Map a column's declared SQL type to the type named in the invocation's
/// declaration string. Integer and real kinds lose any display-width
/// decoration, string-like kinds widen to `nvarchar(max)`, and unrecognized
/// scalar kinds are a hard failure.
pub fn declared_type(column: &ColumnDef) -> CompileResult<String> {
    let ty = column.sql_type.trim().to_lowercase();
    let base = ty.split('(').next().unwrap_or_default().trim();
    match base {
        "tinyint" | "smallint" | "int" | "bigint" => Ok(base.to_string()),
        "integer" => Ok("int".to_string()),
        "float" | "real" => Ok(base.to_string()),
        "decimal" | "numeric" | "money" | "smallmoney" => Ok(ty),
        "bit" => Ok("bit".to_string()),
        "date" | "time" | "datetime" | "datetime2" | "smalldatetime" | "datetimeoffset" => Ok(ty),
        "uniqueidentifier" => Ok("uniqueidentifier".to_string()),
        "char" | "varchar" | "nchar" | "nvarchar" | "text" | "ntext" => {
            Ok("nvarchar(max)".to_string())
        }
        "binary" | "varbinary" | "image" => Ok("varbinary(max)".to_string()),
        _ => Err(CompileError::unsupported_bind(&column.name, &column.sql_type)),
    }
}

/// Whether the SQL is an INSERT, in plain or already-prepared form.
pub fn is_insert(sql: &str) -> bool {
    let t = sql.trim_start();
    let upper = t.to_uppercase();
    upper.starts_with("INSERT") || upper.starts_with("EXEC SP_EXECUTESQL N'INSERT")
}

/// Detect an INSERT that names a table's identity column explicitly. The
/// caller must bracket execution with identity-insert mode for the returned
/// table; sequencing that is the execution layer's job, not ours.
pub fn requires_identity_insert(sql: &str, schema: &Schema) -> Option<String> {
    if !is_insert(sql) {
        return None;
    }
    let table = insert_table_name(sql)?;
    let id_column = schema.identity_column(&table)?;
    let named = insert_column_list(sql)?
        .iter()
        .any(|c| c.eq_ignore_ascii_case(&id_column.name));
    named.then_some(table)
}

/// `SET IDENTITY_INSERT <table> ON|OFF`.
pub fn set_identity_insert(table: &str, enable: bool) -> String {
    format!(
        "SET IDENTITY_INSERT {} {}",
        quote_name(table),
        if enable { "ON" } else { "OFF" }
    )
}

fn insert_table_name(sql: &str) -> Option<String> {
    let upper = sql.to_uppercase();
    let into = upper.find("INTO")?;
    let rest = sql[into + 4..].trim_start();
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(rest.len());
    let name = rest[..end].trim_matches(['[', ']']);
    (!name.is_empty()).then(|| name.to_string())
}

fn insert_column_list(sql: &str) -> Option<Vec<String>> {
    let open = sql.find('(')?;
    let close = sql[open..].find(')')? + open;
    Some(
        sql[open + 1..close]
            .split(',')
            .map(|c| c.trim().trim_matches(['[', ']']).to_string())
            .collect(),
    )
}
