//! The [`Optional`] type and the [`Null`] sentinel

#[cfg(test)]
mod tests;

use std::fmt::Display;

use crate::{
    dynamic::{DynamicValue, FromDynamic, IntoDynamic},
    equality::{Category, Equatable},
    error::{CastError, InvalidOperation},
    ty::{Ty, TypeRegistry},
};

/// Marker meaning "absent"
///
/// Compare an [`Optional`] against `Null` to check for absence, or use
/// [`Optional::from_null`] to construct an absent value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

/// A value of type `T` or nothing
///
/// Equality between two optionals is decided by presence first and by the
/// [`Category`] of `T` second, see [`Optional::equals`]. Equality is not
/// reflexive for all categories (NaN) nor transitive for tolerant ones, so
/// [`Eq`] is not implemented.
#[derive(Clone, Copy, Debug)]
pub enum Optional<T> {
    Present(T),
    Absent,
}

impl<T> Optional<T> {
    pub const fn new(value: T) -> Self {
        Self::Present(value)
    }

    pub const fn absent() -> Self {
        Self::Absent
    }

    pub const fn from_null(_: Null) -> Self {
        Self::Absent
    }

    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The held value
    ///
    /// Fails with [`InvalidOperation`] when the value is absent. This is the
    /// only access that can fail because of absence.
    pub fn value(&self) -> Result<&T, InvalidOperation> {
        match self {
            Self::Present(x) => Ok(x),
            Self::Absent => Err(InvalidOperation::absent::<T>()),
        }
    }

    /// Take the held value, see [`Optional::value`]
    pub fn into_value(self) -> Result<T, InvalidOperation> {
        match self {
            Self::Present(x) => Ok(x),
            Self::Absent => Err(InvalidOperation::absent::<T>()),
        }
    }

    pub fn value_or(self, default: T) -> T {
        match self {
            Self::Present(x) => x,
            Self::Absent => default,
        }
    }

    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or(T::default())
    }

    /// The value (or the default of `T`) together with a presence flag
    pub fn try_get_value(&self) -> (T, bool)
    where
        T: Clone + Default,
    {
        match self {
            Self::Present(x) => (x.clone(), true),
            Self::Absent => (T::default(), false),
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Present(x) => Some(x),
            Self::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }

    /// Whether this optional is absent, the same as comparing with [`Null`]
    pub fn equals_null(&self) -> bool {
        self.is_absent()
    }
}

impl<T: Equatable> Optional<T> {
    /// Compare two optionals
    ///
    /// Two absent values are equal, a present and an absent value are not.
    /// When both are present, the values are compared according to the
    /// [`Category`] of `T`.
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Present(x), Self::Present(y)) => T::value_equals(x, y),
            _ => false,
        }
    }

    /// Compare with a plain value, an absent optional is never equal
    pub fn equals_value(&self, other: &T) -> bool {
        match self {
            Self::Present(x) => T::value_equals(x, other),
            Self::Absent => false,
        }
    }

    pub const fn category() -> Category {
        T::CATEGORY
    }

    /// Description of `T` from the global type registry
    pub fn type_info() -> Ty {
        TypeRegistry::global_ty::<T>()
    }
}

impl<T: IntoDynamic> Optional<T> {
    /// Encode as a dynamic value, an absent optional becomes
    /// [`DynamicValue::Null`]
    pub fn to_dynamic(&self) -> Result<DynamicValue, CastError> {
        match self {
            Self::Present(x) => x.to_dynamic(),
            Self::Absent => Ok(DynamicValue::Null),
        }
    }
}

impl<T: FromDynamic> Optional<T> {
    /// Decode a dynamic value
    ///
    /// Empty and null values give an absent optional. Anything else must
    /// coerce to `T`; failing that is an error and never an absent value.
    pub fn from_dynamic(value: &DynamicValue) -> Result<Self, CastError> {
        if value.is_empty_or_null() {
            return Ok(Self::Absent);
        }
        T::from_dynamic(value).map(Self::Present)
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(x) => Self::Present(x),
            None => Self::Absent,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        match value {
            Optional::Present(x) => Some(x),
            Optional::Absent => None,
        }
    }
}

impl<T: Equatable> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T> PartialEq<Null> for Optional<T> {
    fn eq(&self, _: &Null) -> bool {
        self.equals_null()
    }
}

impl<T> PartialEq<Optional<T>> for Null {
    fn eq(&self, other: &Optional<T>) -> bool {
        other.equals_null()
    }
}

impl<T: Display> Display for Optional<T> {
    /// The natural text form of the value, or `Null` when absent
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present(x) => x.fmt(f),
            Self::Absent => f.write_str("Null"),
        }
    }
}
