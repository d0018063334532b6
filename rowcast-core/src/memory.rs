use crate::{ColumnSchema, Cursor, Error, GenericTypeMap, Result, Statement, TypeMap, Value};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// One result set held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<ColumnSchema>,
    pub rows: Vec<Box<[Value]>>,
}

impl ResultSet {
    /// Result set with the given `(name, sql type)` columns.
    pub fn new<'a>(columns: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .enumerate()
                .map(|(i, (name, ty))| {
                    ColumnSchema::new(name, i, ty)
                        .with_type(GenericTypeMap.value_type(ty).unwrap_or_default())
                })
                .collect(),
            rows: Vec::new(),
        }
    }
    pub fn with_columns(columns: Vec<ColumnSchema>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }
    pub fn row(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.rows.push(values.into_iter().collect());
        self
    }
}

/// Cursor over result sets held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    sets: Vec<ResultSet>,
    current: usize,
    position: Option<usize>,
}

impl MemoryCursor {
    pub fn new(sets: impl IntoIterator<Item = ResultSet>) -> Self {
        Self {
            sets: sets.into_iter().collect(),
            current: 0,
            position: None,
        }
    }

    fn value(&self, index: usize) -> Result<&Value> {
        let row = self
            .position
            .and_then(|p| self.sets.get(self.current)?.rows.get(p))
            .ok_or_else(|| Error::msg("The cursor is not positioned on a row"))?;
        row.get(index).ok_or_else(|| {
            Error::msg(format!(
                "Column index {} is out of bounds for a row of {} values",
                index,
                row.len()
            ))
        })
    }
}

impl Cursor for MemoryCursor {
    fn columns(&self) -> &[ColumnSchema] {
        self.sets
            .get(self.current)
            .map(|v| v.columns.as_slice())
            .unwrap_or(&[])
    }
    fn read(&mut self) -> Result<bool> {
        let Some(set) = self.sets.get(self.current) else {
            return Ok(false);
        };
        let next = self.position.map_or(0, |p| p + 1).min(set.rows.len());
        self.position = Some(next);
        Ok(next < set.rows.len())
    }
    fn next_result(&mut self) -> Result<bool> {
        if self.current < self.sets.len() {
            self.current += 1;
        }
        self.position = None;
        Ok(self.current < self.sets.len())
    }
    fn is_null(&self, index: usize) -> Result<bool> {
        self.value(index).map(Value::is_null)
    }
    fn get(&self, index: usize, _expected: &Value) -> Result<Value> {
        self.value(index).cloned()
    }
}

/// Statement returning the same result sets at every execution.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatement {
    sql: String,
    sets: Vec<ResultSet>,
    executions: Arc<AtomicUsize>,
    fail_after: Option<usize>,
}

impl MemoryStatement {
    pub fn new(sql: impl Into<String>, sets: impl IntoIterator<Item = ResultSet>) -> Self {
        Self {
            sql: sql.into(),
            sets: sets.into_iter().collect(),
            executions: Default::default(),
            fail_after: None,
        }
    }
    /// Every execution after the first `executions` fails.
    pub fn fail_after(mut self, executions: usize) -> Self {
        self.fail_after = Some(executions);
        self
    }
    /// Replace the result sets returned by the next executions.
    pub fn set_results(&mut self, sets: impl IntoIterator<Item = ResultSet>) {
        self.sets = sets.into_iter().collect();
    }
    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::Relaxed)
    }
}

impl Statement for MemoryStatement {
    type Cursor = MemoryCursor;
    fn sql(&self) -> &str {
        &self.sql
    }
    fn execute(&self) -> Result<MemoryCursor> {
        let execution = self.executions.fetch_add(1, Ordering::Relaxed);
        if self.fail_after.is_some_and(|limit| execution >= limit) {
            let error = Error::msg(format!(
                "Execution {} of `{}` failed",
                execution + 1,
                crate::truncate_long!(self.sql)
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(MemoryCursor::new(self.sets.clone()))
    }
}
