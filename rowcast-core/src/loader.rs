use crate::{
    Assign, ColumnBinding, Cursor, Error, LoadError, Result, Row, RowLabeled, RowNames, Shape,
    Value,
};
use std::{any, sync::Arc};

struct Step<S> {
    ordinal: usize,
    value_type: Value,
    requires_unboxing: bool,
    setter: S,
}

enum Body<T> {
    Typed {
        new: fn() -> T,
        steps: Box<[Step<Assign<T>>]>,
    },
    Dynamic {
        labels: RowNames,
        template: Row,
        wrap: fn(RowLabeled) -> T,
        steps: Box<[Step<usize>]>,
    },
}

/// Turns the current row of a cursor into one `T`.
///
/// Built once per result shape and shared, cloning is cheap.
pub struct Loader<T> {
    body: Arc<Body<T>>,
    bindings: Arc<[ColumnBinding]>,
    target: &'static str,
}

impl<T> Clone for Loader<T> {
    fn clone(&self) -> Self {
        Self {
            body: self.body.clone(),
            bindings: self.bindings.clone(),
            target: self.target,
        }
    }
}

/// Build the loader for `bindings` produced by reflecting `shape`.
pub fn synthesize<T>(bindings: Arc<[ColumnBinding]>, shape: Shape<T>) -> Result<Loader<T>> {
    let target = any::type_name::<T>();
    let body = match shape {
        Shape::Dynamic(wrap) => Body::Dynamic {
            labels: bindings.iter().map(|b| b.column_name.clone()).collect(),
            template: bindings.iter().map(|b| b.value_type.as_null()).collect(),
            wrap,
            steps: bindings
                .iter()
                .enumerate()
                .map(|(i, b)| step(b, i))
                .collect(),
        },
        Shape::Tuple { new, slots: members } | Shape::Record { new, members } => {
            let steps: Box<[Step<Assign<T>>]> = bindings
                .iter()
                .map(|b| {
                    let Some(member) = b.member.and_then(|i| members.get(i)) else {
                        let error = Error::msg(format!(
                            "Column {} is not bound to any member of {}",
                            b.column_name, target
                        ));
                        log::error!("{:#}", error);
                        return Err(error);
                    };
                    Ok(step(b, member.assign))
                })
                .collect::<Result<_>>()?;
            Body::Typed { new, steps }
        }
    };
    Ok(Loader {
        body: Arc::new(body),
        bindings,
        target,
    })
}

fn step<S>(binding: &ColumnBinding, setter: S) -> Step<S> {
    Step {
        ordinal: binding.ordinal,
        value_type: binding.value_type.clone(),
        requires_unboxing: binding.requires_unboxing,
        setter,
    }
}

impl<T> Loader<T> {
    pub fn bindings(&self) -> &Arc<[ColumnBinding]> {
        &self.bindings
    }

    /// Load the row the cursor is positioned on.
    pub fn load<C: Cursor + ?Sized>(&self, cursor: &C) -> Result<T> {
        match self.body.as_ref() {
            Body::Typed { new, steps } => {
                let mut result = new();
                for step in steps.iter() {
                    if let Some(value) = self.fetch(cursor, step)? {
                        (step.setter)(&mut result, value).map_err(|e| self.cast(step, e))?;
                    }
                }
                Ok(result)
            }
            Body::Dynamic {
                labels,
                template,
                wrap,
                steps,
            } => {
                let mut values = template.clone();
                for step in steps.iter() {
                    if let Some(value) = self.fetch(cursor, step)? {
                        values[step.setter] = value;
                    }
                }
                Ok(wrap(RowLabeled::new(labels.clone(), values)))
            }
        }
    }

    /// `None` when the column is NULL, the member keeps its default.
    fn fetch<C: Cursor + ?Sized, S>(&self, cursor: &C, step: &Step<S>) -> Result<Option<Value>> {
        if cursor.is_null(step.ordinal)? {
            return Ok(None);
        }
        let value = cursor
            .get(step.ordinal, &step.value_type)
            .map_err(|e| self.cast(step, e))?;
        if !step.requires_unboxing {
            return Ok(Some(value));
        }
        value
            .convert_to(&step.value_type)
            .map(Some)
            .map_err(|e| self.cast(step, e))
    }

    fn cast<S>(&self, step: &Step<S>, error: Error) -> Error {
        let column = self
            .bindings
            .iter()
            .find(|b| b.ordinal == step.ordinal)
            .map_or("?", |b| b.column_name.as_str());
        Error::new(LoadError::InvalidCast {
            target: self.target,
            reason: format!("column {}: {:#}", column, error),
        })
    }
}
