use crate::{Cursor, Error, LoadError, Result, ShapeCache, Statement, Target};

/// The column responsible for a failed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub column: String,
    /// Rust type the column was expected to load as.
    pub expected: &'static str,
    /// SQL type the database actually returned.
    pub actual: String,
}

/// Find the column whose type does not match the cached loader.
///
/// Runs the statement again in a new execution and compares the live schema
/// of result set `table` with the bindings cached for it. Best effort only:
/// every failure is logged and reported as `None`.
pub fn diagnose_mismatch<T: Target, S: Statement + ?Sized>(
    cache: &ShapeCache,
    statement: &S,
    table: usize,
) -> Option<Mismatch> {
    match try_diagnose::<T, S>(cache, statement, table) {
        Ok(mismatch) => mismatch,
        Err(e) => {
            log::debug!("Could not diagnose the mismatch: {:#}", e);
            None
        }
    }
}

fn try_diagnose<T: Target, S: Statement + ?Sized>(
    cache: &ShapeCache,
    statement: &S,
    table: usize,
) -> Result<Option<Mismatch>> {
    let mut cursor = statement.execute()?;
    for _ in 0..table {
        if !cursor.next_result()? {
            return Err(Error::new(LoadError::NoMoreResults { table }));
        }
    }
    // Some drivers only know the column types once a row is fetched
    cursor.read()?;
    let columns = cursor.columns();
    let Some(bindings) = cache.bindings::<T>(columns) else {
        log::debug!(
            "No loader was cached for result set {} of `{}`",
            table,
            crate::truncate_long!(statement.sql())
        );
        return Ok(None);
    };
    let types = cache.types();
    for binding in bindings.iter() {
        let Some(column) = columns.get(binding.ordinal) else {
            continue;
        };
        if !types.accepts(binding.expected(), &column.data_type_name) {
            return Ok(Some(Mismatch {
                column: binding.column_name.clone(),
                expected: binding.expected().type_name(),
                actual: column.data_type_name.clone(),
            }));
        }
    }
    Ok(None)
}
