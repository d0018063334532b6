use crate::Value;

/// Maps between driver SQL type names and [`Value`] types.
pub trait TypeMap: Send + Sync {
    /// Value type a driver produces for the SQL type, `None` if unmapped.
    fn value_type(&self, sql_type: &str) -> Option<Value>;
    /// SQL types whose values can be loaded as `value`, empty when the
    /// driver cannot represent it at all.
    fn sql_types(&self, value: &Value) -> &'static [&'static str];
    /// Whether a column of `sql_type` can be loaded as `value`.
    fn accepts(&self, value: &Value, sql_type: &str) -> bool {
        if matches!(value, Value::Null | Value::Unknown(..)) {
            return true;
        }
        let base = base_type_name(sql_type);
        self.sql_types(value)
            .iter()
            .any(|v| v.eq_ignore_ascii_case(base))
    }
}

/// The type name without its parameters: `DECIMAL(10, 2)` is `DECIMAL`.
pub fn base_type_name(sql_type: &str) -> &str {
    sql_type
        .split_once('(')
        .map_or(sql_type, |(base, _)| base)
        .trim()
}

/// Type map for the standard SQL type names.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericTypeMap;

impl TypeMap for GenericTypeMap {
    fn value_type(&self, sql_type: &str) -> Option<Value> {
        let value = match base_type_name(sql_type).to_ascii_uppercase().as_str() {
            "BOOLEAN" | "BOOL" | "BIT" => Value::Boolean(None),
            "TINYINT" | "INT1" => Value::Int8(None),
            "SMALLINT" | "INT2" => Value::Int16(None),
            "INT" | "INTEGER" | "INT4" => Value::Int32(None),
            "BIGINT" | "INT8" => Value::Int64(None),
            "UTINYINT" => Value::UInt8(None),
            "USMALLINT" => Value::UInt16(None),
            "UINTEGER" => Value::UInt32(None),
            "UBIGINT" => Value::UInt64(None),
            "REAL" | "FLOAT4" => Value::Float32(None),
            "FLOAT" | "DOUBLE" | "FLOAT8" | "DOUBLE PRECISION" => Value::Float64(None),
            "DECIMAL" | "NUMERIC" | "MONEY" => Value::Decimal(None, 0, 0),
            "CHAR" | "NCHAR" | "VARCHAR" | "NVARCHAR" | "TEXT" | "STRING" | "CLOB" => {
                Value::Varchar(None)
            }
            "BLOB" | "BYTEA" | "BINARY" | "VARBINARY" => Value::Blob(None),
            "DATE" => Value::Date(None),
            "TIME" => Value::Time(None),
            "TIMESTAMP" | "DATETIME" | "DATETIME2" => Value::Timestamp(None),
            "TIMESTAMPTZ" | "DATETIMEOFFSET" | "TIMESTAMP WITH TIME ZONE" => {
                Value::TimestampWithTimezone(None)
            }
            "UUID" | "UNIQUEIDENTIFIER" => Value::Uuid(None),
            _ => return None,
        };
        Some(value)
    }

    fn sql_types(&self, value: &Value) -> &'static [&'static str] {
        match value {
            Value::Null | Value::Unknown(..) => &[],
            Value::Boolean(..) => &["BOOLEAN", "BOOL", "BIT"],
            Value::Int8(..) => &["TINYINT", "INT1"],
            Value::Int16(..) => &["SMALLINT", "INT2", "TINYINT", "INT1", "UTINYINT"],
            Value::Int32(..) => &[
                "INT", "INTEGER", "INT4", "SMALLINT", "INT2", "TINYINT", "INT1", "UTINYINT",
                "USMALLINT",
            ],
            Value::Int64(..) => &[
                "BIGINT", "INT8", "INT", "INTEGER", "INT4", "SMALLINT", "INT2", "TINYINT",
                "INT1", "UTINYINT", "USMALLINT", "UINTEGER",
            ],
            Value::UInt8(..) => &["UTINYINT"],
            Value::UInt16(..) => &["USMALLINT", "UTINYINT"],
            Value::UInt32(..) => &["UINTEGER", "USMALLINT", "UTINYINT"],
            Value::UInt64(..) => &["UBIGINT", "UINTEGER", "USMALLINT", "UTINYINT"],
            Value::Float32(..) => &["REAL", "FLOAT4"],
            Value::Float64(..) => &["FLOAT", "DOUBLE", "FLOAT8", "DOUBLE PRECISION", "REAL", "FLOAT4"],
            Value::Decimal(..) => &["DECIMAL", "NUMERIC", "MONEY"],
            Value::Char(..) => &["CHAR", "NCHAR"],
            Value::Varchar(..) => &["VARCHAR", "NVARCHAR", "TEXT", "STRING", "CLOB", "CHAR", "NCHAR"],
            Value::Blob(..) => &["BLOB", "BYTEA", "BINARY", "VARBINARY"],
            Value::Date(..) => &["DATE"],
            Value::Time(..) => &["TIME"],
            Value::Timestamp(..) => &["TIMESTAMP", "DATETIME", "DATETIME2"],
            Value::TimestampWithTimezone(..) => {
                &["TIMESTAMPTZ", "DATETIMEOFFSET", "TIMESTAMP WITH TIME ZONE"]
            }
            Value::Uuid(..) => &["UUID", "UNIQUEIDENTIFIER"],
        }
    }
}

