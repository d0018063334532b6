use crate::{CBox, SqliteCursor};
use libsqlite3_sys::sqlite3;
use rowcast_core::{AsValue, Result, Statement, Value};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// Sql text with its parameters, compiled again on every execution.
///
/// The text can contain more than one statement, parameters are consumed in
/// order by each of them.
pub struct SqliteStatement {
    connection: Arc<CBox<*mut sqlite3>>,
    sql: String,
    params: Vec<Value>,
}

impl SqliteStatement {
    pub(crate) fn new(connection: Arc<CBox<*mut sqlite3>>, sql: String) -> Self {
        Self {
            connection,
            sql,
            params: Vec::new(),
        }
    }

    /// Append the value of the next parameter.
    pub fn bind(mut self, value: impl AsValue) -> Self {
        self.params.push(value.as_value());
        self
    }

    pub fn bind_all(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(values);
        self
    }

    pub fn clear_bindings(&mut self) {
        self.params.clear();
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl Statement for SqliteStatement {
    type Cursor = SqliteCursor;

    fn sql(&self) -> &str {
        &self.sql
    }

    fn execute(&self) -> Result<SqliteCursor> {
        SqliteCursor::new(self.connection.clone(), &self.sql, self.params.clone())
    }
}

impl Display for SqliteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
