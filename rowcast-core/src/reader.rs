use crate::{
    CancelToken, Config, Cursor, Error, LoadError, Result, Row, RowLabeled, RowNames, ShapeCache,
    Statement, Target, diagnose_mismatch, send_value, truncate_long,
};
use futures::Stream;
use std::sync::Arc;

/// Name of the first column of a row carrying output values instead of data.
pub const RETURN_VALUE_COLUMN: &str = "__rowcast_return_value";

/// Outcome of loading one result set.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    /// Data rows.
    Rows(T),
    /// The result set has no rows.
    Empty,
    /// The result set carries output values, not data.
    Output(RowLabeled),
}

impl<T> Section<T> {
    pub fn rows(self) -> Option<T> {
        match self {
            Section::Rows(v) => Some(v),
            _ => None,
        }
    }
    pub fn is_empty(&self) -> bool {
        matches!(self, Section::Empty)
    }
    pub fn is_output(&self) -> bool {
        matches!(self, Section::Output(..))
    }
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Section<U> {
        match self {
            Section::Rows(v) => Section::Rows(f(v)),
            Section::Empty => Section::Empty,
            Section::Output(v) => Section::Output(v),
        }
    }
}

/// Drives cursors through the loaders of a [`ShapeCache`].
#[derive(Clone)]
pub struct Reader {
    cache: Arc<ShapeCache>,
    cancel: CancelToken,
    allow_empty: bool,
    channel_capacity: usize,
}

impl Reader {
    pub fn new(cache: Arc<ShapeCache>) -> Self {
        Self::with_config(cache, &Config::default())
    }
    pub fn with_config(cache: Arc<ShapeCache>, config: &Config) -> Self {
        Self {
            cache,
            cancel: CancelToken::new(),
            allow_empty: config.allow_empty,
            channel_capacity: config.channel_capacity,
        }
    }
    /// Share the cancellation flag with someone else.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }
    pub fn cache(&self) -> &Arc<ShapeCache> {
        &self.cache
    }
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Load every row of the current result set of the cursor.
    pub fn load_table<T: Target, C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
    ) -> Result<Section<Vec<T>>> {
        let mut rows = Vec::new();
        let section = self.for_each(cursor, |row| {
            rows.push(row);
            Ok(())
        })?;
        Ok(section.map(|_| rows))
    }

    /// Pass every row of the current result set to `handler` as soon as it
    /// is loaded, returns the number of rows.
    pub fn for_each<T: Target, C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        handler: impl FnMut(T) -> Result<()>,
    ) -> Result<Section<usize>> {
        self.traverse(cursor, 0, handler)
    }

    fn traverse<T: Target, C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        table: usize,
        mut handler: impl FnMut(T) -> Result<()>,
    ) -> Result<Section<usize>> {
        if !cursor.read()? {
            return Ok(if self.allow_empty {
                Section::Rows(0)
            } else {
                Section::Empty
            });
        }
        if cursor.name(0) == Some(RETURN_VALUE_COLUMN) {
            return output_row(cursor).map(Section::Output);
        }
        let loader = self.cache.provide_loader::<T, C>(cursor)?;
        let mut completed = 0;
        loop {
            self.check_cancelled(table, completed)?;
            let row = loader.load(cursor).map_err(|e| {
                e.context(format!(
                    "While loading row {} of result set {}",
                    completed, table
                ))
            })?;
            handler(row)?;
            completed += 1;
            if !cursor.read()? {
                break;
            }
        }
        Ok(Section::Rows(completed))
    }

    fn check_cancelled(&self, table: usize, completed_rows: usize) -> Result<()> {
        if !self.cancel.is_cancelled() {
            return Ok(());
        }
        let error = Error::new(LoadError::Cancelled {
            table,
            completed_rows,
        });
        log::warn!("{:#}", error);
        Err(error)
    }

    /// Execute the statement and walk its result sets with a [`Batch`].
    pub fn execute<'r, S: Statement + ?Sized>(&'r self, statement: &'r S) -> Result<Batch<'r, S>> {
        let cursor = statement.execute().map_err(|e| {
            let e = e.context(format!(
                "While executing `{}`",
                truncate_long!(statement.sql())
            ));
            log::error!("{:#}", e);
            e
        })?;
        Ok(Batch::new(self, statement, cursor))
    }

    /// Load the first result set of the statement.
    pub fn load_statement<T: Target, S: Statement + ?Sized>(
        &self,
        statement: &S,
    ) -> Result<Section<Vec<T>>> {
        self.execute(statement)?.table()
    }

    /// Same as [`Reader::load_statement`] without blocking the async runtime.
    ///
    /// The execution and the loading run on the blocking thread pool one
    /// after the other.
    pub async fn load_statement_async<T: Target, S: Statement + 'static>(
        &self,
        statement: Arc<S>,
    ) -> Result<Section<Vec<T>>> {
        let execution = statement.clone();
        let cursor = tokio::task::spawn_blocking(move || execution.execute())
            .await
            .map_err(|e| Error::new(e).context("The execution task failed"))??;
        let reader = self.clone();
        tokio::task::spawn_blocking(move || {
            Batch::new(&reader, &*statement, cursor).table::<T>()
        })
        .await
        .map_err(|e| Error::new(e).context("The loading task failed"))?
    }

    /// Stream the rows of the first result set of the statement.
    ///
    /// Rows are produced on the blocking thread pool and buffered in a
    /// bounded channel. Must be called within a tokio runtime.
    pub fn stream_statement<T: Target, S: Statement + 'static>(
        &self,
        statement: Arc<S>,
    ) -> impl Stream<Item = Result<T>> + Send + use<T, S> {
        let (tx, rx) = flume::bounded(self.channel_capacity);
        let reader = self.clone();
        tokio::task::spawn_blocking(move || {
            let result = reader.execute(&*statement).and_then(|mut batch| {
                batch.for_each::<T>(|row| {
                    tx.send(Ok(row))
                        .map_err(|_| Error::msg("The row stream was dropped"))
                })
            });
            if let Err(e) = result {
                if !tx.is_disconnected() {
                    send_value!(tx, Err(e));
                }
            }
        });
        rx.into_stream()
    }

    fn enrich<T: Target, S: Statement + ?Sized>(
        &self,
        statement: &S,
        table: usize,
        error: Error,
    ) -> Error {
        let is_cast = matches!(
            error.downcast_ref::<LoadError>(),
            Some(LoadError::InvalidCast { .. })
        );
        if !is_cast {
            return error;
        }
        let error = match diagnose_mismatch::<T, S>(&self.cache, statement, table) {
            Some(mismatch) => error.context(LoadError::ColumnTypeMismatch {
                table,
                column: mismatch.column,
                expected: mismatch.expected,
                actual: mismatch.actual,
            }),
            None => error,
        };
        log::error!("{:#}", error);
        error
    }
}

fn output_row<C: Cursor + ?Sized>(cursor: &C) -> Result<RowLabeled> {
    let columns = cursor.columns();
    let labels: RowNames = columns.iter().map(|c| c.name.clone()).collect();
    let values: Row = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if cursor.is_null(i)? {
                Ok(c.data_type.as_null())
            } else {
                cursor.get(i, &c.data_type)
            }
        })
        .collect::<Result<_>>()?;
    Ok(RowLabeled::new(labels, values))
}

/// The result sets of one statement execution, loaded in order.
pub struct Batch<'r, S: Statement + ?Sized> {
    reader: &'r Reader,
    statement: &'r S,
    cursor: S::Cursor,
    table: usize,
    started: bool,
}

impl<'r, S: Statement + ?Sized> Batch<'r, S> {
    fn new(reader: &'r Reader, statement: &'r S, cursor: S::Cursor) -> Self {
        Self {
            reader,
            statement,
            cursor,
            table: 0,
            started: false,
        }
    }

    /// Index of the result set loaded last.
    pub fn current_table(&self) -> usize {
        self.table
    }

    /// Load every row of the next result set.
    pub fn table<T: Target>(&mut self) -> Result<Section<Vec<T>>> {
        let mut rows = Vec::new();
        let section = self.for_each(|row| {
            rows.push(row);
            Ok(())
        })?;
        Ok(section.map(|_| rows))
    }

    /// Pass every row of the next result set to `handler`.
    pub fn for_each<T: Target>(
        &mut self,
        handler: impl FnMut(T) -> Result<()>,
    ) -> Result<Section<usize>> {
        let table = self.advance()?;
        self.reader
            .traverse(&mut self.cursor, table, handler)
            .map_err(|e| self.reader.enrich::<T, S>(self.statement, table, e))
    }

    fn advance(&mut self) -> Result<usize> {
        if !self.started {
            self.started = true;
            return Ok(self.table);
        }
        let table = self.table + 1;
        if !self.cursor.next_result()? {
            let error = Error::new(LoadError::NoMoreResults { table });
            log::error!("{:#}", error);
            return Err(error);
        }
        self.table = table;
        Ok(table)
    }
}
