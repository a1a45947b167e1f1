//! Category-dispatched equality for underlying values
//!
//! Every type that can live in an [`Optional`](crate::Optional) and be
//! compared implements [`Equatable`]. The implementation declares the
//! [`Category`] of the type, which fixes the comparison strategy at compile
//! time:
//!
//!  - integral and enumeration types compare their raw bits,
//!  - characters and text compare their exact representation,
//!  - floating-point and temporal values compare with a tolerance sized to
//!    their precision (see [`float`]),
//!  - currency values are scaled integers and compare exactly,
//!  - everything else goes through the cached structural
//!    [`EqualityComparer`](comparer::EqualityComparer).
//!
//! User types get an implementation through `#[derive(Equatable)]`.
//! Fieldless enums become [`Category::Enumeration`], all other types are
//! [`Category::Structural`].

pub mod comparer;
pub mod float;


use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt::Display,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    rc::Rc,
    sync::Arc,
    time::Duration,
};

use comparer::structural_equals;

/// Storage width of an integral or enumeration type
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Width {
    One,
    Two,
    Four,
    Eight,
}

impl Width {
    /// The smallest width that holds `size` bytes
    ///
    /// Zero-sized types (such as single-variant enums) get [`Width::One`].
    /// Anything over 8 bytes is rejected, which is a compile error when
    /// used in a const.
    pub const fn covering(size: usize) -> Self {
        match size {
            0 | 1 => Self::One,
            2 => Self::Two,
            3 | 4 => Self::Four,
            5..=8 => Self::Eight,
            _ => panic!("bitwise comparison supports at most 8 bytes"),
        }
    }

    /// The size of the type in bytes
    pub const fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// Floating-point precision, used to size the comparison tolerance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    Single,
    Double,
    Extended,
}

/// The classification of a type that selects its equality strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Integral(Width),
    Enumeration(Width),
    Character,
    Text,
    Float(Precision),
    Currency,
    Temporal,
    Structural,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integral(w) => write!(f, "integral ({} bytes)", w.bytes()),
            Self::Enumeration(w) => {
                write!(f, "enumeration ({} bytes)", w.bytes())
            }
            Self::Character => write!(f, "character"),
            Self::Text => write!(f, "text"),
            Self::Float(Precision::Single) => write!(f, "float (single)"),
            Self::Float(Precision::Double) => write!(f, "float (double)"),
            Self::Float(Precision::Extended) => {
                write!(f, "float (extended)")
            }
            Self::Currency => write!(f, "currency"),
            Self::Temporal => write!(f, "temporal"),
            Self::Structural => write!(f, "structural"),
        }
    }
}

/// A type whose values can be compared for equality inside an
/// [`Optional`](crate::Optional)
///
/// The [`Category`] is fixed per type and determines how
/// [`Equatable::value_equals`] is implemented. Implementations for the
/// structural category should call [`structural_equals`] so that the cached
/// comparer is used.
pub trait Equatable: Sized + 'static {
    const CATEGORY: Category;

    fn value_equals(x: &Self, y: &Self) -> bool;
}

/// Exact comparison of two raw bit patterns of the same width
#[inline]
pub fn bits_equal<const N: usize>(x: [u8; N], y: [u8; N]) -> bool {
    x == y
}

/// Character-for-character comparison, without any normalization
#[inline]
pub fn text_equal(x: &str, y: &str) -> bool {
    x.as_bytes() == y.as_bytes()
}

macro_rules! integral_equatable {
    ($($t:ty),* $(,)?) => {
        $(
            impl Equatable for $t {
                const CATEGORY: Category =
                    Category::Integral(Width::covering(size_of::<$t>()));

                #[inline]
                fn value_equals(x: &Self, y: &Self) -> bool {
                    bits_equal(x.to_ne_bytes(), y.to_ne_bytes())
                }
            }
        )*
    };
}

integral_equatable!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);

impl Equatable for bool {
    const CATEGORY: Category = Category::Enumeration(Width::One);

    #[inline]
    fn value_equals(x: &Self, y: &Self) -> bool {
        bits_equal([*x as u8], [*y as u8])
    }
}

impl Equatable for Ordering {
    const CATEGORY: Category = Category::Enumeration(Width::One);

    #[inline]
    fn value_equals(x: &Self, y: &Self) -> bool {
        bits_equal((*x as i8).to_ne_bytes(), (*y as i8).to_ne_bytes())
    }
}

impl Equatable for char {
    const CATEGORY: Category = Category::Character;

    #[inline]
    fn value_equals(x: &Self, y: &Self) -> bool {
        u32::from(*x) == u32::from(*y)
    }
}

macro_rules! text_equatable {
    ($($t:ty),* $(,)?) => {
        $(
            impl Equatable for $t {
                const CATEGORY: Category = Category::Text;

                #[inline]
                fn value_equals(x: &Self, y: &Self) -> bool {
                    text_equal(x, y)
                }
            }
        )*
    };
}

text_equatable!(
    String,
    &'static str,
    Box<str>,
    Arc<str>,
    Rc<str>,
    Cow<'static, str>,
);

impl Equatable for f32 {
    const CATEGORY: Category = Category::Float(Precision::Single);

    #[inline]
    fn value_equals(x: &Self, y: &Self) -> bool {
        float::same_value(*x as f64, *y as f64, Precision::Single)
    }
}

impl Equatable for f64 {
    const CATEGORY: Category = Category::Float(Precision::Double);

    #[inline]
    fn value_equals(x: &Self, y: &Self) -> bool {
        float::same_value(*x, *y, Precision::Double)
    }
}

macro_rules! structural_equatable {
    ($($t:ty),* $(,)?) => {
        $(
            impl Equatable for $t {
                const CATEGORY: Category = Category::Structural;

                fn value_equals(x: &Self, y: &Self) -> bool {
                    structural_equals(x, y)
                }
            }
        )*
    };
}

// 128-bit integers are wider than any raw comparison width.
structural_equatable!(u128, i128, (), Duration, IpAddr, Ipv4Addr, Ipv6Addr);

impl<T: PartialEq + 'static> Equatable for Vec<T> {
    const CATEGORY: Category = Category::Structural;

    fn value_equals(x: &Self, y: &Self) -> bool {
        structural_equals(x, y)
    }
}

impl<T: PartialEq + 'static> Equatable for Option<T> {
    const CATEGORY: Category = Category::Structural;

    fn value_equals(x: &Self, y: &Self) -> bool {
        structural_equals(x, y)
    }
}

impl<T: PartialEq + 'static, const N: usize> Equatable for [T; N] {
    const CATEGORY: Category = Category::Structural;

    fn value_equals(x: &Self, y: &Self) -> bool {
        structural_equals(x, y)
    }
}

macro_rules! tuple_equatable {
    ($($name:ident),+) => {
        impl<$($name: PartialEq + 'static),+> Equatable for ($($name,)+) {
            const CATEGORY: Category = Category::Structural;

            fn value_equals(x: &Self, y: &Self) -> bool {
                structural_equals(x, y)
            }
        }
    };
}

tuple_equatable!(A);
tuple_equatable!(A, B);
tuple_equatable!(A, B, C);
tuple_equatable!(A, B, C, D);
