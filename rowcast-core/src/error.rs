use thiserror::Error;

/// Structured failures raised while binding and loading rows.
///
/// They travel inside [`crate::Error`], use `downcast_ref::<LoadError>()` to
/// recover them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("No column of the result set binds to any member of {target}")]
    InvalidDataClass { target: &'static str },
    #[error("{target} expects at least {expected} columns but the result set has {actual}")]
    NoMoreColumns {
        target: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{target} cannot find the column bound to member {member}")]
    MismatchedTargetColumn {
        target: &'static str,
        member: String,
    },
    #[error("Member {member} of {target} is not supported: {reason}")]
    TypeNotSupported {
        target: &'static str,
        member: String,
        reason: String,
    },
    #[error("Column {column} bound to {target} is ambiguous")]
    ColumnNameDuplicate {
        target: &'static str,
        column: String,
    },
    #[error("Column name {column} is reserved")]
    ReservedName { column: String },
    #[error("Cannot load a value into {target}: {reason}")]
    InvalidCast { target: &'static str, reason: String },
    #[error(
        "Column {column} of result set {table} has type {actual} which cannot be loaded as {expected}"
    )]
    ColumnTypeMismatch {
        table: usize,
        column: String,
        expected: &'static str,
        actual: String,
    },
    #[error("Loading of result set {table} was cancelled after {completed_rows} rows")]
    Cancelled { table: usize, completed_rows: usize },
    #[error("The statement has no result set {table}")]
    NoMoreResults { table: usize },
}
