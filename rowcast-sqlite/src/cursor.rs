use crate::{
    CBox, SqliteTypeMap, error_message_from_ptr,
    extract::{bind_value, extract_decltype, extract_name, extract_value, storage_type_name},
};
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_NULL, SQLITE_OK, SQLITE_ROW, sqlite3,
    sqlite3_bind_parameter_count, sqlite3_column_count, sqlite3_column_type, sqlite3_errmsg,
    sqlite3_finalize, sqlite3_prepare_v2, sqlite3_step, sqlite3_stmt,
};
use rowcast_core::{ColumnSchema, Context, Cursor, Error, Result, TypeMap, Value, truncate_long};
use std::{
    ffi::{CString, c_char, c_int},
    ptr,
    sync::Arc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Compiled, not stepped yet.
    Ready,
    Row,
    Done,
}

/// Walks the statements of one execution, every statement returning columns
/// is a result set. Statements without columns run to completion while
/// moving to the next result set.
pub struct SqliteCursor {
    // Finalized before the connection is released
    statement: CBox<*mut sqlite3_stmt>,
    connection: Arc<CBox<*mut sqlite3>>,
    sql: CString,
    /// Byte offset of the statements not compiled yet.
    tail: usize,
    params: Vec<Value>,
    /// Index of the first parameter not bound yet.
    param: usize,
    columns: Vec<ColumnSchema>,
    state: State,
}

fn finalize(statement: *mut sqlite3_stmt) {
    unsafe {
        sqlite3_finalize(statement);
    }
}

impl SqliteCursor {
    pub(crate) fn new(
        connection: Arc<CBox<*mut sqlite3>>,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<Self> {
        let sql = CString::new(sql).with_context(|| {
            format!(
                "Could not create a CString from the query `{}`",
                truncate_long!(sql)
            )
        })?;
        let mut cursor = Self {
            statement: CBox::new(ptr::null_mut(), finalize),
            connection,
            sql,
            tail: 0,
            params,
            param: 0,
            columns: Vec::new(),
            state: State::Done,
        };
        cursor.advance()?;
        Ok(cursor)
    }

    fn error(&self) -> Error {
        Error::msg(error_message_from_ptr(unsafe {
            sqlite3_errmsg(**self.connection)
        }))
    }

    fn fail(&self, error: Error) -> Error {
        let error = error.context(format!(
            "While running `{}`",
            truncate_long!(self.sql.to_string_lossy())
        ));
        log::error!("{:#}", error);
        error
    }

    /// Compile the statements up to the next one returning columns.
    fn advance(&mut self) -> Result<bool> {
        let len = self.sql.as_bytes().len();
        loop {
            self.statement = CBox::new(ptr::null_mut(), finalize);
            self.columns.clear();
            self.state = State::Done;
            if self.tail >= len {
                return Ok(false);
            }
            let mut tail: *const c_char = ptr::null();
            let rc = unsafe {
                sqlite3_prepare_v2(
                    **self.connection,
                    self.sql.as_ptr().add(self.tail),
                    (len - self.tail) as c_int,
                    &mut *self.statement,
                    &mut tail,
                )
            };
            if rc != SQLITE_OK {
                return Err(self.fail(self.error()));
            }
            self.tail = if tail.is_null() {
                len
            } else {
                unsafe { tail.offset_from(self.sql.as_ptr()) as usize }
            };
            if self.statement.is_null() {
                // Whitespace or comment
                continue;
            }
            self.bind_parameters()?;
            let count = unsafe { sqlite3_column_count(*self.statement) };
            if count == 0 {
                self.run_to_end()?;
                continue;
            }
            let types = SqliteTypeMap;
            self.columns = (0..count)
                .map(|i| {
                    let decltype = extract_decltype(*self.statement, i).unwrap_or_default();
                    let data_type = types.value_type(&decltype).unwrap_or_default();
                    Ok(ColumnSchema::new(extract_name(*self.statement, i)?, i as usize, decltype)
                        .with_type(data_type))
                })
                .collect::<Result<_>>()?;
            self.state = State::Ready;
            return Ok(true);
        }
    }

    fn bind_parameters(&mut self) -> Result<()> {
        let count = unsafe { sqlite3_bind_parameter_count(*self.statement) } as usize;
        for i in 0..count {
            let Some(value) = self.params.get(self.param + i) else {
                return Err(self.fail(Error::msg(format!(
                    "The query expects more than the {} parameters provided",
                    self.params.len()
                ))));
            };
            let rc = bind_value(*self.statement, (i + 1) as c_int, value)
                .map_err(|e| self.fail(e))?;
            if rc != SQLITE_OK {
                let error = self
                    .error()
                    .context(format!("Cannot bind parameter {}", self.param + i + 1));
                return Err(self.fail(error));
            }
        }
        self.param += count;
        Ok(())
    }

    fn step(&mut self) -> Result<bool> {
        loop {
            match unsafe { sqlite3_step(*self.statement) } {
                SQLITE_BUSY => continue,
                SQLITE_ROW => return Ok(true),
                SQLITE_DONE => return Ok(false),
                _ => return Err(self.fail(self.error())),
            }
        }
    }

    fn run_to_end(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// Columns without a declared type (expressions) take the storage class
    /// of the first row.
    fn resolve_types(&mut self) {
        let types = SqliteTypeMap;
        let statement = *self.statement;
        for column in self.columns.iter_mut() {
            if !column.data_type_name.is_empty() {
                continue;
            }
            if let Some(name) = storage_type_name(statement, column.ordinal as c_int) {
                column.data_type_name = name.into();
                column.data_type = types.value_type(name).unwrap_or_default();
            }
        }
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if self.state != State::Row {
            return Err(Error::msg("The cursor is not positioned on a row"));
        }
        if index >= self.columns.len() {
            return Err(Error::msg(format!(
                "Column {} is out of range, the result set has {} columns",
                index,
                self.columns.len()
            )));
        }
        Ok(())
    }
}

impl Cursor for SqliteCursor {
    fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    fn read(&mut self) -> Result<bool> {
        if self.state == State::Done {
            return Ok(false);
        }
        if !self.step()? {
            self.state = State::Done;
            return Ok(false);
        }
        if self.state == State::Ready {
            self.resolve_types();
        }
        self.state = State::Row;
        Ok(true)
    }

    fn next_result(&mut self) -> Result<bool> {
        self.advance()
    }

    fn is_null(&self, index: usize) -> Result<bool> {
        self.check_row(index)?;
        Ok(unsafe { sqlite3_column_type(*self.statement, index as c_int) } == SQLITE_NULL)
    }

    fn get(&self, index: usize, expected: &Value) -> Result<Value> {
        self.check_row(index)?;
        let value = extract_value(*self.statement, index as c_int)?;
        if matches!(expected, Value::Null | Value::Unknown(..)) || value.same_kind(expected) {
            return Ok(value);
        }
        // Values are stored in one of the five storage classes, bring them
        // back to the declared type when possible
        Ok(value.clone().convert_to(expected).unwrap_or(value))
    }
}
