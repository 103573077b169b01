use std::fmt::{self, Debug, Formatter};

use crate::error::Error;
use crate::record::Computed;

/// A callback run synchronously before a record is persisted.
pub trait Observer<R> {
    /// Called with the record about to be saved. An error aborts the save.
    fn saving(&self, record: &mut R) -> Result<(), Error>;
}

impl<R, F> Observer<R> for F
where
    F: Fn(&mut R) -> Result<(), Error>,
{
    fn saving(&self, record: &mut R) -> Result<(), Error> {
        self(record)
    }
}

/// Recomputes dirty attributes before every save.
#[derive(Debug, Default, Copy, Clone)]
pub struct RecomputeOnSave;

impl<R: Computed> Observer<R> for RecomputeOnSave {
    fn saving(&self, record: &mut R) -> Result<(), Error> {
        crate::recompute_dirty(record)?;
        Ok(())
    }
}

/// The pre-persist observers of a record type.
///
/// Hosts hold one of these per type and call [`fire_saving`] from their
/// save routine, before anything is written.
///
/// [`fire_saving`]: Self::fire_saving
pub struct Lifecycle<R> {
    observers: Vec<Box<dyn Observer<R> + Send + Sync>>,
}

impl<R> Lifecycle<R> {
    /// Create a lifecycle without observers.
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    /// Register an observer. Observers run in registration order.
    pub fn register(&mut self, observer: impl Observer<R> + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Run all observers. The first failure stops the rest.
    pub fn fire_saving(&self, record: &mut R) -> Result<(), Error> {
        self.observers
            .iter()
            .try_for_each(|observer| observer.saving(record))
    }
}

impl<R: Computed> Lifecycle<R> {
    /// Create a lifecycle that recomputes dirty attributes before each save.
    pub fn recomputing() -> Self {
        let mut lifecycle = Self::new();
        lifecycle.register(RecomputeOnSave);
        lifecycle
    }
}

impl<R> Default for Lifecycle<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Debug for Lifecycle<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("observers", &self.observers.len())
            .finish()
    }
}
