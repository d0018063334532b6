use crate::{AsValue, Error, Result};
use rust_decimal::Decimal;
use std::{any, mem};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed cell value.
///
/// Every variant wraps an `Option` so that a NULL still remembers the type of
/// the column it came from. An empty variant (`Value::Int32(None)`) is also
/// used to describe a type without carrying any data.
#[derive(Default, Debug, Clone)]
pub enum Value {
    /// NULL of unknown type.
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>, /* prec: */ u8, /* scale: */ u8),
    Char(Option<char>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
    /// Textual value whose type the driver could not determine.
    Unknown(Option<String>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l, l_prec, l_scale), Self::Decimal(r, r_prec, r_scale)) => {
                l == r && l_prec == r_prec && l_scale == r_scale
            }
            (Self::Char(l), Self::Char(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            (Self::Unknown(l), Self::Unknown(r)) => l == r,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

impl Value {
    /// Same variant, decimals must also agree on precision and scale.
    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Decimal(.., l_prec, l_scale), Self::Decimal(.., r_prec, r_scale)) => {
                l_prec == r_prec && l_scale == r_scale
            }
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }

    /// Same variant, ignoring any type parameter.
    pub fn same_kind(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v, ..) => v.is_none(),
            Value::Char(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
            Value::Unknown(v) => v.is_none(),
        }
    }

    /// The NULL value of the same type.
    pub fn as_null(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(..) => Value::Boolean(None),
            Value::Int8(..) => Value::Int8(None),
            Value::Int16(..) => Value::Int16(None),
            Value::Int32(..) => Value::Int32(None),
            Value::Int64(..) => Value::Int64(None),
            Value::UInt8(..) => Value::UInt8(None),
            Value::UInt16(..) => Value::UInt16(None),
            Value::UInt32(..) => Value::UInt32(None),
            Value::UInt64(..) => Value::UInt64(None),
            Value::Float32(..) => Value::Float32(None),
            Value::Float64(..) => Value::Float64(None),
            Value::Decimal(.., prec, scale) => Value::Decimal(None, *prec, *scale),
            Value::Char(..) => Value::Char(None),
            Value::Varchar(..) => Value::Varchar(None),
            Value::Blob(..) => Value::Blob(None),
            Value::Date(..) => Value::Date(None),
            Value::Time(..) => Value::Time(None),
            Value::Timestamp(..) => Value::Timestamp(None),
            Value::TimestampWithTimezone(..) => Value::TimestampWithTimezone(None),
            Value::Uuid(..) => Value::Uuid(None),
            Value::Unknown(..) => Value::Unknown(None),
        }
    }

    /// Name of the Rust type that this variant holds.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "()",
            Value::Boolean(..) => any::type_name::<bool>(),
            Value::Int8(..) => any::type_name::<i8>(),
            Value::Int16(..) => any::type_name::<i16>(),
            Value::Int32(..) => any::type_name::<i32>(),
            Value::Int64(..) => any::type_name::<i64>(),
            Value::UInt8(..) => any::type_name::<u8>(),
            Value::UInt16(..) => any::type_name::<u16>(),
            Value::UInt32(..) => any::type_name::<u32>(),
            Value::UInt64(..) => any::type_name::<u64>(),
            Value::Float32(..) => any::type_name::<f32>(),
            Value::Float64(..) => any::type_name::<f64>(),
            Value::Decimal(..) => any::type_name::<Decimal>(),
            Value::Char(..) => any::type_name::<char>(),
            Value::Varchar(..) => any::type_name::<String>(),
            Value::Blob(..) => any::type_name::<Box<[u8]>>(),
            Value::Date(..) => any::type_name::<Date>(),
            Value::Time(..) => any::type_name::<Time>(),
            Value::Timestamp(..) => any::type_name::<PrimitiveDateTime>(),
            Value::TimestampWithTimezone(..) => any::type_name::<OffsetDateTime>(),
            Value::Uuid(..) => any::type_name::<Uuid>(),
            Value::Unknown(..) => any::type_name::<String>(),
        }
    }

    /// Cast this value into the type described by `target`.
    ///
    /// NULL values become the NULL of the target type. Conversions follow the
    /// rules of [`AsValue::try_from_value`] for the destination type.
    pub fn convert_to(self, target: &Value) -> Result<Value> {
        if self.is_null() {
            return Ok(target.as_null());
        }
        if self.same_kind(target) {
            return Ok(self);
        }
        macro_rules! convert {
            ($value:expr, $ty:ty) => {
                <$ty as AsValue>::try_from_value($value).map(AsValue::as_value)
            };
        }
        let result = match target {
            Value::Null | Value::Unknown(..) => Ok(self),
            Value::Boolean(..) => convert!(self, bool),
            Value::Int8(..) => convert!(self, i8),
            Value::Int16(..) => convert!(self, i16),
            Value::Int32(..) => convert!(self, i32),
            Value::Int64(..) => convert!(self, i64),
            Value::UInt8(..) => convert!(self, u8),
            Value::UInt16(..) => convert!(self, u16),
            Value::UInt32(..) => convert!(self, u32),
            Value::UInt64(..) => convert!(self, u64),
            Value::Float32(..) => convert!(self, f32),
            Value::Float64(..) => convert!(self, f64),
            Value::Decimal(.., prec, scale) => {
                let (prec, scale) = (*prec, *scale);
                Decimal::try_from_value(self).map(|v| Value::Decimal(Some(v), prec, scale))
            }
            Value::Char(..) => convert!(self, char),
            Value::Varchar(..) => convert!(self, String),
            Value::Blob(..) => convert!(self, Box<[u8]>),
            Value::Date(..) => convert!(self, Date),
            Value::Time(..) => convert!(self, Time),
            Value::Timestamp(..) => convert!(self, PrimitiveDateTime),
            Value::TimestampWithTimezone(..) => convert!(self, OffsetDateTime),
            Value::Uuid(..) => convert!(self, Uuid),
        };
        result.map_err(|e: Error| e.context(format!("Cannot cast into {}", target.type_name())))
    }
}
