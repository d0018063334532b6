use crate::{AsValue, Result, RowLabeled, Value};
use std::any;

/// Stores a loaded value into one member of the target.
pub type Assign<T> = fn(&mut T, Value) -> Result<()>;

/// A settable member of a target type.
pub struct Member<T> {
    pub name: &'static str,
    /// Empty value of the member type, with `Option` unwrapped.
    pub value: Value,
    pub nullable: bool,
    /// The member is built `From` the type described by `value`.
    pub alternate: bool,
    pub type_name: &'static str,
    pub assign: Assign<T>,
}

impl<T> Member<T> {
    pub fn new<V: AsValue>(name: &'static str, assign: Assign<T>) -> Self {
        Self {
            name,
            value: V::as_empty_value(),
            nullable: V::NULLABLE,
            alternate: false,
            type_name: any::type_name::<V>(),
            assign,
        }
    }
    /// Member of type `M` converted from the representation `Repr`.
    pub fn alternate<Repr: AsValue, M>(name: &'static str, assign: Assign<T>) -> Self {
        Self {
            name,
            value: Repr::as_empty_value(),
            nullable: Repr::NULLABLE,
            alternate: true,
            type_name: any::type_name::<M>(),
            assign,
        }
    }
}

impl<T> Clone for Member<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            value: self.value.clone(),
            nullable: self.nullable,
            alternate: self.alternate,
            type_name: self.type_name,
            assign: self.assign,
        }
    }
}

/// How a target type is constructed and filled.
pub enum Shape<T> {
    /// Every column is kept, the labeled row is wrapped into the target.
    Dynamic(fn(RowLabeled) -> T),
    /// Members bound by position.
    Tuple {
        new: fn() -> T,
        slots: Vec<Member<T>>,
    },
    /// Members bound by name.
    Record {
        new: fn() -> T,
        members: Vec<Member<T>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoaderKind {
    Dynamic,
    Tuple,
    Record,
}

impl<T> Shape<T> {
    pub fn kind(&self) -> LoaderKind {
        match self {
            Shape::Dynamic(..) => LoaderKind::Dynamic,
            Shape::Tuple { .. } => LoaderKind::Tuple,
            Shape::Record { .. } => LoaderKind::Record,
        }
    }
}

/// A type rows can be loaded into.
///
/// Implemented for [`RowLabeled`], for tuples up to 8 elements and by
/// `#[derive(Record)]` for structs.
pub trait Target: Sized + Send + 'static {
    const KIND: LoaderKind;
    fn shape() -> Shape<Self>;
}

impl Target for RowLabeled {
    const KIND: LoaderKind = LoaderKind::Dynamic;
    fn shape() -> Shape<Self> {
        Shape::Dynamic(|row| row)
    }
}

macro_rules! impl_target_tuple {
    ($($index:tt: $ty:ident),+) => {
        impl<$($ty),+> Target for ($($ty,)+)
        where
            $($ty: AsValue + Default + Send + 'static,)+
        {
            const KIND: LoaderKind = LoaderKind::Tuple;
            fn shape() -> Shape<Self> {
                Shape::Tuple {
                    new: <Self as Default>::default,
                    slots: vec![$(
                        Member::new::<$ty>(
                            stringify!($index),
                            |row: &mut Self, value: Value| -> Result<()> {
                                row.$index = <$ty as AsValue>::try_from_value(value)?;
                                Ok(())
                            },
                        ),
                    )+],
                }
            }
        }
    };
}

impl_target_tuple!(0: A);
impl_target_tuple!(0: A, 1: B);
impl_target_tuple!(0: A, 1: B, 2: C);
impl_target_tuple!(0: A, 1: B, 2: C, 3: D);
impl_target_tuple!(0: A, 1: B, 2: C, 3: D, 4: E);
impl_target_tuple!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F);
impl_target_tuple!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G);
impl_target_tuple!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H);
