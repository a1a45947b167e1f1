//! Type information on underlying types
//!
//! The [`TypeRegistry`] holds a [`Ty`] for every underlying type that has
//! been seen, together with the structural comparers that have been built.
//! There is one registry for the whole process, [`GLOBAL_TYPE_REGISTRY`].
//! Entries are only ever added, so whatever was resolved for a type stays
//! valid for the rest of the process.

use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    sync::{
        Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    },
};

use crate::equality::{comparer::EqualityComparer, Category, Equatable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ty {
    /// The name of the type in Rust, mostly for diagnostic purposes
    pub rust_name: &'static str,

    /// The memory alignment of the type in bytes
    pub alignment: usize,

    /// The size of the type in bytes
    pub size: usize,

    /// The [`TypeId`] corresponding to this type
    pub type_id: TypeId,

    /// The equality strategy of the type
    pub category: Category,
}

impl Ty {
    fn new<T: Equatable>() -> Self {
        Self {
            rust_name: type_name::<T>(),
            alignment: std::mem::align_of::<T>(),
            size: std::mem::size_of::<T>(),
            type_id: TypeId::of::<T>(),
            category: T::CATEGORY,
        }
    }
}

pub static GLOBAL_TYPE_REGISTRY: LazyLock<RwLock<TypeRegistry>> =
    LazyLock::new(|| RwLock::new(TypeRegistry::default()));

/// A map from [`TypeId`] to a [`Ty`] and, for structural types, the
/// [`EqualityComparer`] of that type
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<TypeId, Ty>,
    comparers: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl TypeRegistry {
    /// Shared access to the global registry
    ///
    /// The registry is insert-only, so a panic while it was locked cannot
    /// have left it inconsistent and a poisoned lock is simply recovered.
    pub fn read() -> RwLockReadGuard<'static, TypeRegistry> {
        GLOBAL_TYPE_REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access to the global registry, see [`TypeRegistry::read`]
    pub fn write() -> RwLockWriteGuard<'static, TypeRegistry> {
        GLOBAL_TYPE_REGISTRY
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The description of `T` in the global registry
    ///
    /// Only the first lookup of a type takes the registry exclusively.
    pub fn global_ty<T: Equatable>() -> Ty {
        if let Some(ty) = Self::read().get(TypeId::of::<T>()) {
            return ty.clone();
        }
        Self::write().resolve::<T>()
    }

    /// The structural comparer of `T` in the global registry
    ///
    /// Once the comparer exists, this only takes a shared lock. Building it
    /// happens under the exclusive lock, which rechecks for a comparer built
    /// in the meantime.
    pub fn global_comparer<T: Equatable + PartialEq>(
    ) -> Arc<EqualityComparer<T>> {
        if let Some(comparer) = Self::read().cached_comparer::<T>() {
            return comparer;
        }
        Self::write().comparer::<T>()
    }

    /// Get the description of `T`, registering it on first use
    pub fn resolve<T: Equatable>(&mut self) -> Ty {
        self.types
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                let ty = Ty::new::<T>();
                log::trace!(
                    "registered type `{}` as {}",
                    ty.rust_name,
                    ty.category
                );
                ty
            })
            .clone()
    }

    pub fn get(&self, id: TypeId) -> Option<&Ty> {
        self.types.get(&id)
    }

    /// Get the structural comparer of `T`, building it on first use
    ///
    /// Building happens while the registry is borrowed mutably, so there is
    /// exactly one comparer per type.
    pub fn comparer<T: Equatable + PartialEq>(
        &mut self,
    ) -> Arc<EqualityComparer<T>> {
        if let Some(comparer) = self.cached_comparer::<T>() {
            return comparer;
        }

        let id = TypeId::of::<T>();
        let ty = self.resolve::<T>();
        log::debug!(
            "building equality comparer #{} for `{}`",
            self.comparer_count() + 1,
            ty.rust_name
        );
        let comparer = Arc::new(EqualityComparer::<T>::new(ty));
        self.comparers.insert(id, comparer.clone());
        comparer
    }

    /// The structural comparer of `T`, if it has been built
    pub fn cached_comparer<T: Equatable>(
        &self,
    ) -> Option<Arc<EqualityComparer<T>>> {
        let existing = self.comparers.get(&TypeId::of::<T>())?;
        Arc::clone(existing).downcast::<EqualityComparer<T>>().ok()
    }

    /// The number of structural comparers built so far
    pub fn comparer_count(&self) -> usize {
        self.comparers.len()
    }
}
