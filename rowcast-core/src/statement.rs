use crate::{Cursor, Result, TypeMap};
use std::sync::Arc;

/// A statement that can be executed more than once.
///
/// Every execution is independent and returns a fresh cursor, this is what
/// allows the mismatch diagnosis to run the statement again.
pub trait Statement: Send + Sync {
    type Cursor: Cursor + 'static;
    fn sql(&self) -> &str;
    fn execute(&self) -> Result<Self::Cursor>;
}

impl<S: Statement + ?Sized> Statement for Arc<S> {
    type Cursor = S::Cursor;
    fn sql(&self) -> &str {
        (**self).sql()
    }
    fn execute(&self) -> Result<Self::Cursor> {
        (**self).execute()
    }
}

/// A database connection of a driver.
pub trait Connection: Send + Sync {
    type Statement: Statement;
    /// Prepare the statement, it will be executed later.
    fn prepare(&self, sql: impl Into<String>) -> Result<Self::Statement>;
    /// Type system of the database.
    fn type_map(&self) -> Arc<dyn TypeMap>;
    /// Execute every statement of `sql`, discarding the rows.
    fn execute_batch(&self, sql: &str) -> Result<()> {
        let statement = self.prepare(sql)?;
        let mut cursor = statement.execute()?;
        loop {
            while cursor.read()? {}
            if !cursor.next_result()? {
                break;
            }
        }
        Ok(())
    }
}
