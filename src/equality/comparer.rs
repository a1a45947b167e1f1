//! The structural equality comparer
//!
//! Types that fit no other [`Category`](super::Category) compare through
//! their [`PartialEq`] implementation. The comparer wrapping it is built
//! once per type and stored in the global
//! [`TypeRegistry`](crate::ty::TypeRegistry), so all later comparisons of
//! that type reuse the same instance.

use std::sync::Arc;

use crate::ty::{Ty, TypeRegistry};

use super::Equatable;

/// Equality function for a single type, resolved once and then reused
pub struct EqualityComparer<T: 'static> {
    ty: Ty,
    eq: fn(&T, &T) -> bool,
}

impl<T: Equatable + PartialEq> EqualityComparer<T> {
    pub(crate) fn new(ty: Ty) -> Self {
        Self {
            ty,
            eq: <T as PartialEq>::eq,
        }
    }

    /// The comparer of `T` from the global registry
    pub fn resolve() -> Arc<Self> {
        TypeRegistry::global_comparer::<T>()
    }
}

impl<T: 'static> EqualityComparer<T> {
    pub fn equals(&self, x: &T, y: &T) -> bool {
        (self.eq)(x, y)
    }

    /// Description of the type this comparer was built for
    pub fn ty(&self) -> &Ty {
        &self.ty
    }
}

impl<T: 'static> std::fmt::Debug for EqualityComparer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqualityComparer")
            .field("ty", &self.ty.rust_name)
            .finish()
    }
}

/// Compare two values with the cached comparer of their type
///
/// Looking up a comparer that already exists only takes the registry's
/// shared lock, and the comparison itself runs without any lock.
pub fn structural_equals<T: Equatable + PartialEq>(x: &T, y: &T) -> bool {
    let comparer = EqualityComparer::<T>::resolve();
    comparer.equals(x, y)
}
