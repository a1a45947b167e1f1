//! Errors raised by [`Optional`](crate::Optional) and [`DynamicValue`]
//! coercions
//!
//! Both kinds of error signal a usage contract violation: reading a value
//! that is absent or coercing between incompatible types. Neither is ever
//! recovered internally.

use std::fmt::Display;

use crate::dynamic::DynamicValue;

/// The value of an absent [`Optional`](crate::Optional) was requested
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidOperation {
    pub type_name: &'static str,
}

impl InvalidOperation {
    pub(crate) fn absent<T>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
        }
    }
}

impl Display for InvalidOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "the optional value of type `{}` is absent",
            self.type_name
        )
    }
}

impl std::error::Error for InvalidOperation {}

/// Why a coercion failed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CastFailure {
    /// There is no conversion between the two types
    Incompatible,
    /// The value does not fit in the range of the target type
    Overflow,
    /// A floating-point value with a fractional part was converted to an
    /// integer type
    NotIntegral,
    /// Text could not be parsed as the target type
    Unparseable(String),
}

/// A [`DynamicValue`] could not be coerced to or from a Rust type
///
/// Both `from` and `to` are type names: the name of a
/// [`DynamicType`](crate::dynamic::DynamicType) on the dynamic side and the
/// Rust type name on the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastError {
    pub from: &'static str,
    pub to: &'static str,
    pub reason: CastFailure,
}

impl CastError {
    /// Coercion of a dynamic value into `T` failed
    pub(crate) fn new<T>(from: &DynamicValue, reason: CastFailure) -> Self {
        let err = Self {
            from: from.get_type().name(),
            to: std::any::type_name::<T>(),
            reason,
        };
        log::trace!("coercion failed: {err}");
        err
    }

    /// Encoding a `T` as a dynamic value failed
    pub(crate) fn encode<T>(to: &'static str, reason: CastFailure) -> Self {
        let err = Self {
            from: std::any::type_name::<T>(),
            to,
            reason,
        };
        log::trace!("encoding failed: {err}");
        err
    }

    pub(crate) fn incompatible<T>(from: &DynamicValue) -> Self {
        Self::new::<T>(from, CastFailure::Incompatible)
    }
}

impl Display for CastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let CastError { from, to, reason } = self;
        match reason {
            CastFailure::Incompatible => {
                write!(f, "cannot cast `{from}` to `{to}`")
            }
            CastFailure::Overflow => {
                write!(f, "`{from}` value is out of range for `{to}`")
            }
            CastFailure::NotIntegral => {
                write!(
                    f,
                    "`{from}` value has a fractional part and cannot become `{to}`"
                )
            }
            CastFailure::Unparseable(text) => {
                write!(f, "cannot parse {text:?} as `{to}`")
            }
        }
    }
}

impl std::error::Error for CastError {}

/// Any error produced by this crate
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionalError {
    InvalidOperation(InvalidOperation),
    Cast(CastError),
}

impl From<InvalidOperation> for OptionalError {
    fn from(value: InvalidOperation) -> Self {
        Self::InvalidOperation(value)
    }
}

impl From<CastError> for OptionalError {
    fn from(value: CastError) -> Self {
        Self::Cast(value)
    }
}

impl Display for OptionalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionalError::InvalidOperation(e) => e.fmt(f),
            OptionalError::Cast(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for OptionalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptionalError::InvalidOperation(e) => Some(e),
            OptionalError::Cast(e) => Some(e),
        }
    }
}
