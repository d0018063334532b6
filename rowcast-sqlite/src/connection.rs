use crate::{CBox, SqliteStatement, SqliteTypeMap, error_message_from_ptr};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_FULLMUTEX, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI,
    sqlite3, sqlite3_close, sqlite3_errmsg, sqlite3_open_v2,
};
use rowcast_core::{Connection, Context, Error, Result, TypeMap, truncate_long};
use std::{ffi::CString, ptr, sync::Arc};
use tokio::task::spawn_blocking;

/// Connection to a sqlite database.
///
/// The url is `sqlite://` followed by a file name or `:memory:`, uri
/// parameters like `?mode=ro` are passed to sqlite.
pub struct SqliteConnection {
    pub(crate) connection: Arc<CBox<*mut sqlite3>>,
}

impl SqliteConnection {
    pub const PREFIX: &'static str = "sqlite://";

    pub fn open(url: &str) -> Result<Self> {
        let Some(location) = url.strip_prefix(Self::PREFIX) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                Self::PREFIX
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let location = if location == ":memory:" {
            location.to_string()
        } else {
            format!("file:{}", location)
        };
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let location = CString::new(location).with_context(context)?;
        let mut connection: CBox<*mut sqlite3>;
        unsafe {
            connection = CBox::new(ptr::null_mut(), |p| {
                sqlite3_close(p);
            });
            let rc = sqlite3_open_v2(
                location.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI | SQLITE_OPEN_FULLMUTEX,
                ptr::null(),
            );
            if rc != SQLITE_OK {
                let error = Error::msg(error_message_from_ptr(sqlite3_errmsg(*connection)))
                    .context(format!("Could not open the database `{}`", url));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        log::debug!("Opened sqlite database `{}`", url);
        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Same as [`SqliteConnection::open`] on the blocking thread pool.
    pub async fn connect(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        spawn_blocking(move || Self::open(&url))
            .await
            .map_err(|e| Error::new(e).context("The connection task failed"))?
    }
}

impl Connection for SqliteConnection {
    type Statement = SqliteStatement;

    fn prepare(&self, sql: impl Into<String>) -> Result<SqliteStatement> {
        let sql = sql.into();
        if sql.contains('\0') {
            let error = Error::msg(format!(
                "The query contains a nul character: `{}`",
                truncate_long!(sql)
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(SqliteStatement::new(self.connection.clone(), sql))
    }

    fn type_map(&self) -> Arc<dyn TypeMap> {
        Arc::new(SqliteTypeMap)
    }
}
