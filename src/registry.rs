use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::declare::Declarations;
use crate::error::Error;
use crate::record::Computed;

/// The process-wide registry used by the free functions of this crate.
pub(crate) static REGISTRY: Registry = Registry::new();

/// Type-erased declarations. Always `Declarations<R>` for the key's `R`.
type Entry = Arc<dyn Any + Send + Sync>;

/// Caches the declarations of record types, keyed by type identity.
///
/// Declarations are discovered on first use and never invalidated. Most
/// users go through the global registry behind [`recompute_all`] and
/// friends, but a registry can also be owned explicitly.
///
/// [`recompute_all`]: crate::recompute_all
pub struct Registry {
    map: RwLock<HashMap<TypeId, Entry, FxBuildHasher>>,
}

impl Registry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self { map: RwLock::new(HashMap::with_hasher(FxBuildHasher)) }
    }

    /// Get the declarations of `R`, discovering them on first use.
    pub fn declarations<R: Computed>(&self) -> Arc<Declarations<R>> {
        let id = TypeId::of::<R>();
        if let Some(entry) = self.map.read().get(&id) {
            return downcast(entry);
        }

        // Discover without holding the lock. A concurrent first use may
        // discover the same declarations in the meantime. That's okay, the
        // first insertion wins and both are identical.
        let fresh: Entry = Arc::new(Declarations::<R>::discover());
        downcast(self.map.write().entry(id).or_insert(fresh))
    }

    /// Whether the declarations of `R` have been discovered already.
    pub fn contains<R: Computed>(&self) -> bool {
        self.map.read().contains_key(&TypeId::of::<R>())
    }

    /// Check the declarations of `R` against a live record.
    ///
    /// Fails if a dependency does not name a readable field of the record or
    /// if a declaration reads its own output. Recompute passes do not call
    /// this: a missing field only surfaces once its values are gathered.
    pub fn validate<R: Computed>(&self, record: &R) -> Result<(), Error> {
        for declaration in self.declarations::<R>().iter() {
            if declaration.is_self_dependent() {
                return Err(Error::SelfDependency {
                    function: declaration.function(),
                    field: declaration.output().to_owned(),
                });
            }

            declaration.gather(record)?;
        }

        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Recover the concrete declarations from an entry.
fn downcast<R: Computed>(entry: &Entry) -> Arc<Declarations<R>> {
    Arc::clone(entry)
        .downcast()
        .unwrap_or_else(|_| panic!("recompute: registry entry has the wrong type"))
}

/// Get the declarations of `R` from the global registry.
pub fn declarations<R: Computed>() -> Arc<Declarations<R>> {
    REGISTRY.declarations::<R>()
}

/// Check the declarations of `R` against a record, using the global registry.
pub fn validate<R: Computed>(record: &R) -> Result<(), Error> {
    REGISTRY.validate(record)
}
