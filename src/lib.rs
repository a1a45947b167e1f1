//! Optional values with category-aware equality
//!
//! An [`Optional<T>`] holds either a value of `T` or nothing. It exists for
//! places where "value or nothing" must be represented without a sentinel
//! value of `T`, and it adds two things over a plain [`Option`]:
//!
//!  - equality that follows the [`Category`] of `T`, so that floating-point
//!    and temporal values are compared with a tolerance while integral
//!    values are compared bit for bit, and
//!  - a bridge to [`DynamicValue`], a dynamically-typed value used at
//!    interop boundaries.
//!
//! ```
//! use optval::{Null, Optional};
//!
//! let sum = Optional::new(0.1 + 0.2);
//! assert!(sum.equals(&Optional::new(0.3)));
//! assert!(Optional::<f64>::absent() == Null);
//! assert_eq!(Optional::<i32>::absent().to_string(), "Null");
//! ```

pub mod dynamic;
pub mod equality;
mod error;
mod optional;
pub mod temporal;
pub mod ty;

pub use dynamic::{DynamicType, DynamicValue, FromDynamic, IntoDynamic};
pub use equality::{Category, Equatable, Precision, Width};
pub use error::{CastError, CastFailure, InvalidOperation, OptionalError};
pub use optional::{Null, Optional};
#[cfg(feature = "derive")]
pub use optval_macros::Equatable;
pub use temporal::{Currency, Timestamp};
