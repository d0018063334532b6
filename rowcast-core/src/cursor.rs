use crate::{Result, Value};

/// One column of the result set currently exposed by a [`Cursor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub ordinal: usize,
    /// Empty value of the type the driver produces for this column,
    /// `Value::Null` when the driver doesn't know it.
    pub data_type: Value,
    /// SQL type name as reported by the driver.
    pub data_type_name: String,
    pub nullable: bool,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, ordinal: usize, data_type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal,
            data_type: Value::Null,
            data_type_name: data_type_name.into(),
            nullable: true,
        }
    }
    pub fn with_type(mut self, data_type: Value) -> Self {
        self.data_type = data_type;
        self
    }
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Forward-only reader over one or more result sets.
///
/// Implemented by drivers. The loader only touches the current row through
/// [`Cursor::is_null`] and [`Cursor::get`], the reader moves the cursor with
/// [`Cursor::read`] and [`Cursor::next_result`].
pub trait Cursor: Send {
    /// Schema of the current result set.
    fn columns(&self) -> &[ColumnSchema];
    fn field_count(&self) -> usize {
        self.columns().len()
    }
    fn name(&self, index: usize) -> Option<&str> {
        self.columns().get(index).map(|c| c.name.as_str())
    }
    fn data_type_name(&self, index: usize) -> Option<&str> {
        self.columns().get(index).map(|c| c.data_type_name.as_str())
    }
    /// Advance to the next row, `false` when the result set is exhausted.
    fn read(&mut self) -> Result<bool>;
    /// Advance to the next result set, `false` when there are no more.
    fn next_result(&mut self) -> Result<bool>;
    fn is_null(&self, index: usize) -> Result<bool>;
    /// Value of a column in the current row.
    ///
    /// `expected` is a hint, drivers return the value in the type they
    /// natively hold and the loader converts it afterwards.
    fn get(&self, index: usize, expected: &Value) -> Result<Value>;
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn columns(&self) -> &[ColumnSchema] {
        (**self).columns()
    }
    fn read(&mut self) -> Result<bool> {
        (**self).read()
    }
    fn next_result(&mut self) -> Result<bool> {
        (**self).next_result()
    }
    fn is_null(&self, index: usize) -> Result<bool> {
        (**self).is_null(index)
    }
    fn get(&self, index: usize, expected: &Value) -> Result<Value> {
        (**self).get(index, expected)
    }
}
