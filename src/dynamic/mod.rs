//! Dynamically-typed values for interop boundaries
//!
//! A [`DynamicValue`] carries a value together with its type at runtime.
//! It is the only boundary-facing surface of this crate: an
//! [`Optional`](crate::Optional) converts to a [`DynamicValue`] through
//! [`IntoDynamic`] and back through [`FromDynamic`]. An absent optional
//! becomes [`DynamicValue::Null`], and both [`DynamicValue::Empty`] and
//! [`DynamicValue::Null`] turn back into an absent optional.
//!
//! Conversions from a dynamic value coerce where the meaning is preserved.
//! An integer converts to any integer type it fits in, text is parsed and
//! any scalar can be read as text. Everything else fails with a
//! [`CastError`].

mod coerce;

#[cfg(test)]
mod tests;

use std::{
    any::Any,
    fmt::{Debug, Display},
    rc::Rc,
    sync::Arc,
};

use crate::{
    error::{CastError, CastFailure},
    temporal::{Currency, Timestamp},
    Optional,
};

/// A value with type information at runtime
#[derive(Clone, Default)]
pub enum DynamicValue {
    /// No value was ever assigned
    #[default]
    Empty,
    /// An explicit null
    Null,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Currency(Currency),
    Timestamp(Timestamp),
    Char(char),
    Text(Arc<str>),
    /// Any other value, only convertible back into its own type
    Other(Arc<dyn Any + Send + Sync>),
}

/// The types for [`DynamicValue`]s
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamicType {
    Empty,
    Null,
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Currency,
    Timestamp,
    Char,
    Text,
    Other,
}

impl DynamicType {
    pub fn name(self) -> &'static str {
        use DynamicType::*;
        match self {
            Empty => "Empty",
            Null => "Null",
            Bool => "Bool",
            U8 => "U8",
            U16 => "U16",
            U32 => "U32",
            U64 => "U64",
            I8 => "I8",
            I16 => "I16",
            I32 => "I32",
            I64 => "I64",
            F32 => "F32",
            F64 => "F64",
            Currency => "Currency",
            Timestamp => "Timestamp",
            Char => "Char",
            Text => "Text",
            Other => "Other",
        }
    }
}

impl Display for DynamicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl DynamicValue {
    /// Wrap an arbitrary value
    pub fn other<T: Any + Send + Sync>(value: T) -> Self {
        Self::Other(Arc::new(value))
    }

    pub fn get_type(&self) -> DynamicType {
        use DynamicValue::*;
        match self {
            Empty => DynamicType::Empty,
            Null => DynamicType::Null,
            Bool(_) => DynamicType::Bool,
            U8(_) => DynamicType::U8,
            U16(_) => DynamicType::U16,
            U32(_) => DynamicType::U32,
            U64(_) => DynamicType::U64,
            I8(_) => DynamicType::I8,
            I16(_) => DynamicType::I16,
            I32(_) => DynamicType::I32,
            I64(_) => DynamicType::I64,
            F32(_) => DynamicType::F32,
            F64(_) => DynamicType::F64,
            Currency(_) => DynamicType::Currency,
            Timestamp(_) => DynamicType::Timestamp,
            Char(_) => DynamicType::Char,
            Text(_) => DynamicType::Text,
            Other(_) => DynamicType::Other,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value converts to an absent [`Optional`]
    pub fn is_empty_or_null(&self) -> bool {
        matches!(self, Self::Empty | Self::Null)
    }

    /// The value held by [`DynamicValue::Other`], if it is a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Other(x) => x.downcast_ref(),
            _ => None,
        }
    }

    /// Convert into an [`Optional`], see [`Optional::from_dynamic`]
    pub fn to_optional<T: FromDynamic>(
        &self,
    ) -> Result<Optional<T>, CastError> {
        Optional::from_dynamic(self)
    }
}

impl PartialEq for DynamicValue {
    /// Values are equal when they have the same type and the same value
    ///
    /// [`DynamicValue::Other`] values are only equal when they point to the
    /// same allocation.
    fn eq(&self, other: &Self) -> bool {
        use DynamicValue::*;
        match (self, other) {
            (Empty, Empty) | (Null, Null) => true,
            (Bool(l), Bool(r)) => l == r,
            (U8(l), U8(r)) => l == r,
            (U16(l), U16(r)) => l == r,
            (U32(l), U32(r)) => l == r,
            (U64(l), U64(r)) => l == r,
            (I8(l), I8(r)) => l == r,
            (I16(l), I16(r)) => l == r,
            (I32(l), I32(r)) => l == r,
            (I64(l), I64(r)) => l == r,
            (F32(l), F32(r)) => l == r,
            (F64(l), F64(r)) => l == r,
            (Currency(l), Currency(r)) => l == r,
            (Timestamp(l), Timestamp(r)) => l == r,
            (Char(l), Char(r)) => l == r,
            (Text(l), Text(r)) => l == r,
            (Other(l), Other(r)) => Arc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl Debug for DynamicValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use DynamicValue::*;
        match self {
            Empty | Null | Other(_) => write!(f, "{}", self.get_type()),
            Text(x) => write!(f, "Text({x:?})"),
            Char(x) => write!(f, "Char({x:?})"),
            _ => write!(f, "{}({})", self.get_type(), self),
        }
    }
}

impl Display for DynamicValue {
    /// The natural text form of the value
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use DynamicValue::*;
        match self {
            Empty => Ok(()),
            Null => write!(f, "Null"),
            Bool(x) => write!(f, "{x}"),
            U8(x) => write!(f, "{x}"),
            U16(x) => write!(f, "{x}"),
            U32(x) => write!(f, "{x}"),
            U64(x) => write!(f, "{x}"),
            I8(x) => write!(f, "{x}"),
            I16(x) => write!(f, "{x}"),
            I32(x) => write!(f, "{x}"),
            I64(x) => write!(f, "{x}"),
            F32(x) => write!(f, "{x}"),
            F64(x) => write!(f, "{x}"),
            Currency(x) => write!(f, "{x}"),
            Timestamp(x) => write!(f, "{x}"),
            Char(x) => write!(f, "{x}"),
            Text(x) => write!(f, "{x}"),
            Other(_) => write!(f, "<other>"),
        }
    }
}

/// A type that has an encoding as a [`DynamicValue`]
pub trait IntoDynamic {
    fn to_dynamic(&self) -> Result<DynamicValue, CastError>;
}

/// A type that can be coerced from a [`DynamicValue`]
pub trait FromDynamic: Sized {
    fn from_dynamic(value: &DynamicValue) -> Result<Self, CastError>;
}

/// Read back a value stored with [`DynamicValue::other`]
///
/// Only succeeds when `value` holds exactly a `T`.
pub fn downcast_other<T: Any + Clone>(
    value: &DynamicValue,
) -> Result<T, CastError> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| CastError::incompatible::<T>(value))
}

/// Implement [`IntoDynamic`] and [`FromDynamic`] through
/// [`DynamicValue::Other`] for types without a scalar encoding
///
/// The types must be `Clone + Send + Sync + 'static`.
#[macro_export]
macro_rules! opaque_dynamic {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::dynamic::IntoDynamic for $t {
                fn to_dynamic(
                    &self,
                ) -> Result<$crate::dynamic::DynamicValue, $crate::CastError>
                {
                    Ok($crate::dynamic::DynamicValue::other(
                        ::std::clone::Clone::clone(self),
                    ))
                }
            }

            impl $crate::dynamic::FromDynamic for $t {
                fn from_dynamic(
                    value: &$crate::dynamic::DynamicValue,
                ) -> Result<Self, $crate::CastError> {
                    $crate::dynamic::downcast_other(value)
                }
            }
        )*
    };
}

macro_rules! scalar_dynamic {
    ($t:ty, $variant:ident, $coerce:expr) => {
        impl From<$t> for DynamicValue {
            fn from(value: $t) -> Self {
                DynamicValue::$variant(value)
            }
        }

        impl IntoDynamic for $t {
            fn to_dynamic(&self) -> Result<DynamicValue, CastError> {
                Ok(DynamicValue::$variant(*self))
            }
        }

        impl FromDynamic for $t {
            fn from_dynamic(value: &DynamicValue) -> Result<Self, CastError> {
                $coerce(value)
            }
        }
    };
}

// `bool` must stay a `Bool` and never go through a numeric encoding.
scalar_dynamic!(bool, Bool, coerce::boolean);
scalar_dynamic!(u8, U8, coerce::integer::<u8>);
scalar_dynamic!(u16, U16, coerce::integer::<u16>);
scalar_dynamic!(u32, U32, coerce::integer::<u32>);
scalar_dynamic!(u64, U64, coerce::integer::<u64>);
scalar_dynamic!(i8, I8, coerce::integer::<i8>);
scalar_dynamic!(i16, I16, coerce::integer::<i16>);
scalar_dynamic!(i32, I32, coerce::integer::<i32>);
scalar_dynamic!(i64, I64, coerce::integer::<i64>);
scalar_dynamic!(f32, F32, coerce::single);
scalar_dynamic!(f64, F64, coerce::double::<f64>);
scalar_dynamic!(char, Char, coerce::character);
scalar_dynamic!(Currency, Currency, coerce::currency);
scalar_dynamic!(Timestamp, Timestamp, coerce::timestamp);

macro_rules! wide_dynamic {
    ($t:ty, $via:ty, $variant:ident) => {
        impl IntoDynamic for $t {
            fn to_dynamic(&self) -> Result<DynamicValue, CastError> {
                <$via>::try_from(*self).map(DynamicValue::$variant).map_err(
                    |_| {
                        CastError::encode::<$t>(
                            DynamicType::$variant.name(),
                            CastFailure::Overflow,
                        )
                    },
                )
            }
        }

        impl FromDynamic for $t {
            fn from_dynamic(value: &DynamicValue) -> Result<Self, CastError> {
                coerce::integer::<$t>(value)
            }
        }
    };
}

wide_dynamic!(usize, u64, U64);
wide_dynamic!(isize, i64, I64);
wide_dynamic!(u128, u64, U64);
wide_dynamic!(i128, i64, I64);

impl IntoDynamic for &'static str {
    fn to_dynamic(&self) -> Result<DynamicValue, CastError> {
        Ok(DynamicValue::Text((*self).into()))
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        DynamicValue::Text(value.into())
    }
}

macro_rules! text_dynamic {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for DynamicValue {
                fn from(value: $t) -> Self {
                    DynamicValue::Text(Arc::from(&*value))
                }
            }

            impl IntoDynamic for $t {
                fn to_dynamic(&self) -> Result<DynamicValue, CastError> {
                    Ok(DynamicValue::Text(Arc::from(&**self)))
                }
            }

            impl FromDynamic for $t {
                fn from_dynamic(
                    value: &DynamicValue,
                ) -> Result<Self, CastError> {
                    coerce::text::<$t>(value).map(Into::into)
                }
            }
        )*
    };
}

text_dynamic!(String, Box<str>, Rc<str>);

impl From<Arc<str>> for DynamicValue {
    fn from(value: Arc<str>) -> Self {
        DynamicValue::Text(value)
    }
}

impl IntoDynamic for Arc<str> {
    fn to_dynamic(&self) -> Result<DynamicValue, CastError> {
        Ok(DynamicValue::Text(self.clone()))
    }
}

impl FromDynamic for Arc<str> {
    fn from_dynamic(value: &DynamicValue) -> Result<Self, CastError> {
        match value {
            DynamicValue::Text(s) => Ok(s.clone()),
            _ => coerce::text::<Arc<str>>(value).map(Into::into),
        }
    }
}
