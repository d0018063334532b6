use crate::{ColumnSchema, LoaderKind, Target};
use std::{
    any::TypeId,
    hash::{BuildHasher, BuildHasherDefault, DefaultHasher},
};

/// Cache key of a result shape loaded into one target type.
///
/// The hash is an order-sensitive fold of every column name and SQL type
/// name, two shapes with the same columns in a different order never share
/// a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeSignature {
    pub hash: u64,
    pub target: TypeId,
    pub kind: LoaderKind,
}

impl ShapeSignature {
    pub fn new<T: Target>(columns: &[ColumnSchema]) -> Self {
        Self::of(columns, TypeId::of::<T>(), T::KIND)
    }
    pub fn of(columns: &[ColumnSchema], target: TypeId, kind: LoaderKind) -> Self {
        let hasher = BuildHasherDefault::<DefaultHasher>::default();
        let hash = columns.iter().fold(17u64, |acc, column| {
            acc.wrapping_mul(31)
                .wrapping_add(hasher.hash_one(column.name.as_str()))
                .wrapping_mul(31)
                .wrapping_add(hasher.hash_one(column.data_type_name.as_str()))
        });
        Self { hash, target, kind }
    }
}
