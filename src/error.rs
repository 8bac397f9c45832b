//! Error types for the T-SQL compiler.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// A bind column's declared SQL type has no server-side parameter mapping.
    #[error("unsupported bind type '{sql_type}' for column '{column}'")]
    UnsupportedBindType { column: String, sql_type: String },

    /// A prepared invocation did not match the sp_executesql wire shape.
    #[error("malformed prepared invocation: {0}")]
    MalformedInvocation(String),

    /// A statement referenced a table the schema does not know about.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// A table has no primary key and no columns to fall back on for a
    /// deterministic window ordering.
    #[error("table '{0}' has no column to order by")]
    NoOrderableColumn(String),

    #[error("unknown SHOWPLAN option '{0}'")]
    UnknownShowplanOption(String),
}

impl CompileError {
    /// Create an unsupported-bind error for a column.
    pub fn unsupported_bind(column: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self::UnsupportedBindType {
            column: column.into(),
            sql_type: sql_type.into(),
        }
    }

    /// Create a malformed-invocation error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInvocation(message.into())
    }
}

/// Result type alias for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;
