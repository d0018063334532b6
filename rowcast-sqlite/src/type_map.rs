use rowcast_core::{GenericTypeMap, TypeMap, Value, base_type_name};

/// Column affinity, decided from the declared type name the way sqlite does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl Affinity {
    pub fn of(sql_type: &str) -> Self {
        let name = sql_type.to_ascii_uppercase();
        if name.contains("INT") {
            Affinity::Integer
        } else if name.contains("CHAR") || name.contains("CLOB") || name.contains("TEXT") {
            Affinity::Text
        } else if name.is_empty() || name.contains("BLOB") {
            Affinity::Blob
        } else if name.contains("REAL") || name.contains("FLOA") || name.contains("DOUB") {
            Affinity::Real
        } else {
            Affinity::Numeric
        }
    }
}

/// Sqlite has dynamic typing, a column declared with any name can hold any
/// value. Types are decided on the declared name first and on the affinity
/// when the name is not a standard one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteTypeMap;

impl TypeMap for SqliteTypeMap {
    fn value_type(&self, sql_type: &str) -> Option<Value> {
        let base = base_type_name(sql_type);
        if base.is_empty() {
            return Some(Value::Unknown(None));
        }
        // Numbers are always stored in 64 bits
        if ["INT", "INTEGER", "BIGINT", "INT8"]
            .iter()
            .any(|v| v.eq_ignore_ascii_case(base))
        {
            return Some(Value::Int64(None));
        }
        if ["REAL", "FLOAT", "DOUBLE"]
            .iter()
            .any(|v| v.eq_ignore_ascii_case(base))
        {
            return Some(Value::Float64(None));
        }
        if let Some(value) = GenericTypeMap.value_type(base) {
            return Some(value);
        }
        Some(match Affinity::of(base) {
            Affinity::Integer => Value::Int64(None),
            Affinity::Text => Value::Varchar(None),
            Affinity::Blob => Value::Blob(None),
            Affinity::Real => Value::Float64(None),
            Affinity::Numeric => Value::Decimal(None, 0, 0),
        })
    }

    fn sql_types(&self, value: &Value) -> &'static [&'static str] {
        match value {
            Value::UInt64(..) => &[],
            _ => GenericTypeMap.sql_types(value),
        }
    }

    fn accepts(&self, value: &Value, sql_type: &str) -> bool {
        let affinity = Affinity::of(base_type_name(sql_type));
        match value {
            Value::Null | Value::Unknown(..) => true,
            Value::UInt64(..) => false,
            Value::Boolean(..)
            | Value::Int8(..)
            | Value::Int16(..)
            | Value::Int32(..)
            | Value::Int64(..)
            | Value::UInt8(..)
            | Value::UInt16(..)
            | Value::UInt32(..) => matches!(affinity, Affinity::Integer | Affinity::Numeric),
            Value::Float32(..) | Value::Float64(..) | Value::Decimal(..) => matches!(
                affinity,
                Affinity::Integer | Affinity::Real | Affinity::Numeric
            ),
            Value::Char(..) | Value::Varchar(..) => affinity == Affinity::Text,
            Value::Blob(..) => affinity == Affinity::Blob,
            Value::Date(..)
            | Value::Time(..)
            | Value::Timestamp(..)
            | Value::TimestampWithTimezone(..) => {
                matches!(affinity, Affinity::Text | Affinity::Numeric)
            }
            Value::Uuid(..) => matches!(
                affinity,
                Affinity::Text | Affinity::Blob | Affinity::Numeric
            ),
        }
    }
}
