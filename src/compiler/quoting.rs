//! Identifier and literal quoting for T-SQL.

use crate::ast::Value;
use std::fmt::Write;

/// Quote a possibly-dotted identifier in brackets: `dbo.books` becomes
/// `[dbo].[books]`. Already-bracketed names pass through unchanged.
pub fn quote_name(name: &str) -> String {
    if name.starts_with('[') && name.ends_with(']') {
        return name.to_string();
    }
    name.split('.')
        .map(|part| format!("[{}]", part.replace(']', "]]")))
        .collect::<Vec<_>>()
        .join(".")
}

/// Escape embedded single quotes for a T-SQL string literal.
pub fn quote_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// Render a literal value as T-SQL text.
pub fn quote_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::String(s) => format!("N'{}'", quote_string(s)),
        Value::Uuid(u) => format!("N'{}'", u),
        Value::DateTime(dt) => format!("N'{}'", dt.format("%Y-%m-%d %H:%M:%S%.3f")),
        Value::Date(d) => format!("N'{}'", d.format("%Y-%m-%d")),
        Value::Binary(bytes) => {
            let mut out = String::with_capacity(2 + bytes.len() * 2);
            out.push_str("0x");
            for b in bytes {
                let _ = write!(out, "{:02x}", b);
            }
            out
        }
    }
}
