use libsqlite3_sys::*;
use rowcast_core::{AsValue, Error, Result, Value};
use std::{
    ffi::{CStr, c_char, c_int},
    slice,
};
use time::format_description::well_known::Rfc3339;

pub(crate) fn extract_value(statement: *mut sqlite3_stmt, index: c_int) -> Result<Value> {
    unsafe {
        let column_type = sqlite3_column_type(statement, index);
        Ok(match column_type {
            SQLITE_NULL => Value::Null,
            SQLITE_INTEGER => sqlite3_column_int64(statement, index).as_value(),
            SQLITE_FLOAT => sqlite3_column_double(statement, index).as_value(),
            SQLITE_BLOB => {
                let ptr = sqlite3_column_blob(statement, index) as *const u8;
                let len = sqlite3_column_bytes(statement, index) as usize;
                if ptr.is_null() || len == 0 {
                    Value::Blob(Some(Box::default()))
                } else {
                    Value::Blob(Some(slice::from_raw_parts(ptr, len).into()))
                }
            }
            SQLITE_TEXT => {
                let ptr = sqlite3_column_text(statement, index);
                let len = sqlite3_column_bytes(statement, index) as usize;
                if ptr.is_null() || len == 0 {
                    Value::Varchar(Some(String::new()))
                } else {
                    String::from_utf8(slice::from_raw_parts(ptr, len).to_vec())?.as_value()
                }
            }
            _ => {
                return Err(Error::msg(format!(
                    "Unexpected column type {}",
                    column_type
                )));
            }
        })
    }
}

pub(crate) fn extract_name(statement: *mut sqlite3_stmt, index: c_int) -> Result<String> {
    unsafe {
        let name = sqlite3_column_name(statement, index);
        if name.is_null() {
            return Err(Error::msg(format!("Column {} has no name", index)));
        }
        Ok(CStr::from_ptr(name).to_str()?.into())
    }
}

/// Declared type of the column, `None` for expressions.
pub(crate) fn extract_decltype(statement: *mut sqlite3_stmt, index: c_int) -> Option<String> {
    unsafe {
        let decltype = sqlite3_column_decltype(statement, index);
        if decltype.is_null() {
            return None;
        }
        Some(CStr::from_ptr(decltype).to_string_lossy().into_owned())
    }
}

/// Storage class of the column in the current row.
pub(crate) fn storage_type_name(statement: *mut sqlite3_stmt, index: c_int) -> Option<&'static str> {
    match unsafe { sqlite3_column_type(statement, index) } {
        SQLITE_INTEGER => Some("INTEGER"),
        SQLITE_FLOAT => Some("REAL"),
        SQLITE_TEXT => Some("TEXT"),
        SQLITE_BLOB => Some("BLOB"),
        _ => None,
    }
}

fn bind_text(statement: *mut sqlite3_stmt, index: c_int, text: &str) -> c_int {
    unsafe {
        sqlite3_bind_text(
            statement,
            index,
            text.as_ptr() as *const c_char,
            text.len() as c_int,
            SQLITE_TRANSIENT(),
        )
    }
}

/// Bind a parameter, the index is 1 based. Returns the sqlite code.
pub(crate) fn bind_value(statement: *mut sqlite3_stmt, index: c_int, value: &Value) -> Result<c_int> {
    let rc = unsafe {
        match value {
            _ if value.is_null() => sqlite3_bind_null(statement, index),
            Value::Boolean(Some(v)) => sqlite3_bind_int(statement, index, *v as c_int),
            Value::Int8(Some(v)) => sqlite3_bind_int(statement, index, *v as c_int),
            Value::Int16(Some(v)) => sqlite3_bind_int(statement, index, *v as c_int),
            Value::Int32(Some(v)) => sqlite3_bind_int(statement, index, *v),
            Value::Int64(Some(v)) => sqlite3_bind_int64(statement, index, *v),
            Value::UInt8(Some(v)) => sqlite3_bind_int(statement, index, *v as c_int),
            Value::UInt16(Some(v)) => sqlite3_bind_int(statement, index, *v as c_int),
            Value::UInt32(Some(v)) => sqlite3_bind_int64(statement, index, *v as i64),
            Value::UInt64(Some(v)) => {
                let Ok(v) = i64::try_from(*v) else {
                    return Err(Error::msg(format!(
                        "Value {} is out of the sqlite integer range",
                        v
                    )));
                };
                sqlite3_bind_int64(statement, index, v)
            }
            Value::Float32(Some(v)) => sqlite3_bind_double(statement, index, *v as f64),
            Value::Float64(Some(v)) => sqlite3_bind_double(statement, index, *v),
            Value::Decimal(Some(v), ..) => bind_text(statement, index, &v.to_string()),
            Value::Char(Some(v)) => bind_text(statement, index, &v.to_string()),
            Value::Varchar(Some(v)) | Value::Unknown(Some(v)) => bind_text(statement, index, v),
            Value::Blob(Some(v)) => sqlite3_bind_blob(
                statement,
                index,
                v.as_ptr() as *const _,
                v.len() as c_int,
                SQLITE_TRANSIENT(),
            ),
            Value::Date(Some(v)) => bind_text(statement, index, &v.to_string()),
            Value::Time(Some(v)) => bind_text(statement, index, &v.to_string()),
            Value::Timestamp(Some(v)) => bind_text(statement, index, &v.to_string()),
            Value::TimestampWithTimezone(Some(v)) => {
                bind_text(statement, index, &v.format(&Rfc3339)?)
            }
            Value::Uuid(Some(v)) => bind_text(statement, index, &v.to_string()),
            _ => {
                return Err(Error::msg(format!(
                    "Cannot use a {:?} as a query parameter",
                    value
                )));
            }
        }
    };
    Ok(rc)
}
