use crate::{
    ColumnBinding, ColumnSchema, Error, LoadError, Member, RETURN_VALUE_COLUMN, Result, Shape,
    TypeMap, Value, column_identifier, unique_names,
};
use std::{any, collections::HashMap};

/// Work out which column feeds which member of `T`.
///
/// Only the schema is read, no row is consumed.
pub fn reflect<T>(
    columns: &[ColumnSchema],
    shape: &Shape<T>,
    types: &dyn TypeMap,
) -> Result<Vec<ColumnBinding>> {
    if let Some(column) = columns.iter().find(|c| c.name == RETURN_VALUE_COLUMN) {
        return Err(fail(LoadError::ReservedName {
            column: column.name.clone(),
        }));
    }
    match shape {
        Shape::Dynamic(..) => Ok(reflect_dynamic(columns, types)),
        Shape::Tuple { slots, .. } => reflect_tuple::<T>(columns, slots, types),
        Shape::Record { members, .. } => reflect_record::<T>(columns, members, types),
    }
}

fn fail(error: LoadError) -> Error {
    let error = Error::new(error);
    log::error!("{:#}", error);
    error
}

fn reflect_dynamic(columns: &[ColumnSchema], types: &dyn TypeMap) -> Vec<ColumnBinding> {
    let names = unique_names(columns.iter().map(|c| c.name.as_str()));
    columns
        .iter()
        .zip(names)
        .filter_map(|(column, name)| {
            let Some(value_type) = natural_type(column, types) else {
                log::trace!(
                    "Column {} of type {} has no mapping and is skipped",
                    column.name,
                    column.data_type_name
                );
                return None;
            };
            Some(ColumnBinding {
                column_name: name,
                ordinal: column.ordinal,
                member: None,
                type_name: value_type.type_name(),
                value_type,
                nullable: column.nullable,
                requires_unboxing: false,
                alternate: None,
            })
        })
        .collect()
}

fn natural_type(column: &ColumnSchema, types: &dyn TypeMap) -> Option<Value> {
    if matches!(column.data_type, Value::Null) {
        types.value_type(&column.data_type_name)
    } else {
        Some(column.data_type.clone())
    }
}

fn check_supported<T>(member: &Member<T>, types: &dyn TypeMap) -> Result<()> {
    let representable = matches!(member.value, Value::Null | Value::Unknown(..))
        || !types.sql_types(&member.value).is_empty();
    if !representable {
        return Err(fail(LoadError::TypeNotSupported {
            target: any::type_name::<T>(),
            member: member.name.to_string(),
            reason: format!(
                "{} has no representation in the driver type system",
                member.type_name
            ),
        }));
    }
    Ok(())
}

fn bind<T>(
    column: &ColumnSchema,
    index: usize,
    member: &Member<T>,
    types: &dyn TypeMap,
) -> ColumnBinding {
    let requires_unboxing = natural_type(column, types)
        .map(|natural| !natural.same_kind(&member.value))
        .unwrap_or(true);
    ColumnBinding {
        column_name: column.name.clone(),
        ordinal: column.ordinal,
        member: Some(index),
        value_type: member.value.clone(),
        nullable: member.nullable,
        requires_unboxing,
        alternate: member.alternate.then(|| member.value.clone()),
        type_name: member.type_name,
    }
}

fn reflect_tuple<T>(
    columns: &[ColumnSchema],
    slots: &[Member<T>],
    types: &dyn TypeMap,
) -> Result<Vec<ColumnBinding>> {
    let target = any::type_name::<T>();
    if columns.len() < slots.len() {
        return Err(fail(LoadError::NoMoreColumns {
            target,
            expected: slots.len(),
            actual: columns.len(),
        }));
    }
    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let Some(column) = columns.get(i) else {
                return Err(fail(LoadError::MismatchedTargetColumn {
                    target,
                    member: slot.name.to_string(),
                }));
            };
            check_supported(slot, types)?;
            Ok(bind(column, i, slot, types))
        })
        .collect()
}

fn reflect_record<T>(
    columns: &[ColumnSchema],
    members: &[Member<T>],
    types: &dyn TypeMap,
) -> Result<Vec<ColumnBinding>> {
    let target = any::type_name::<T>();
    let mut by_name: HashMap<String, Vec<&ColumnSchema>> = HashMap::with_capacity(columns.len());
    for column in columns {
        by_name
            .entry(column_identifier(&column.name).into_owned())
            .or_default()
            .push(column);
    }
    let mut result: Vec<ColumnBinding> = Vec::with_capacity(members.len());
    for (i, member) in members.iter().enumerate() {
        if member.name == RETURN_VALUE_COLUMN {
            return Err(fail(LoadError::ReservedName {
                column: member.name.to_string(),
            }));
        }
        let column = match by_name
            .get(column_identifier(member.name).as_ref())
            .map(Vec::as_slice)
        {
            None | Some([]) => {
                log::trace!("Member {} of {} has no column", member.name, target);
                continue;
            }
            Some([column]) => *column,
            Some(..) => {
                return Err(fail(LoadError::ColumnNameDuplicate {
                    target,
                    column: member.name.to_string(),
                }));
            }
        };
        if result.iter().any(|b| b.ordinal == column.ordinal) {
            return Err(fail(LoadError::ColumnNameDuplicate {
                target,
                column: column.name.clone(),
            }));
        }
        check_supported(member, types)?;
        result.push(bind(column, i, member, types));
    }
    if result.is_empty() {
        return Err(fail(LoadError::InvalidDataClass { target }));
    }
    Ok(result)
}
