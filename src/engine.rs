use std::any::type_name;

use crate::error::Error;
use crate::record::Computed;
use crate::registry::{REGISTRY, Registry};

/// Which declarations a pass runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Mode {
    /// Every declaration, regardless of dirtiness.
    All,
    /// Only declarations with at least one dirty dependency.
    Dirty,
}

impl Registry {
    /// Run every compute function of the record and assign the results.
    ///
    /// Functions run in declaration order. The first failure aborts the
    /// pass; assignments made before it stay on the record.
    pub fn recompute_all<'r, R: Computed>(&self, record: &'r mut R) -> Result<&'r mut R, Error> {
        self.pass(record, Mode::All)
    }

    /// Run the compute functions of the record that have a dirty dependency.
    ///
    /// Functions whose dependencies are all clean are neither called nor is
    /// their output field touched.
    pub fn recompute_dirty<'r, R: Computed>(
        &self,
        record: &'r mut R,
    ) -> Result<&'r mut R, Error> {
        self.pass(record, Mode::Dirty)
    }

    fn pass<'r, R: Computed>(&self, record: &'r mut R, mode: Mode) -> Result<&'r mut R, Error> {
        let declarations = self.declarations::<R>();

        #[cfg(feature = "testing")]
        crate::testing::begin_pass();

        let mut ran = 0;
        for declaration in declarations.iter() {
            if mode == Mode::Dirty && !declaration.is_stale(record) {
                tracing::trace!(
                    function = declaration.function(),
                    "dependencies are clean, skipping"
                );
                continue;
            }

            tracing::trace!(
                function = declaration.function(),
                field = declaration.output(),
                "recomputing attribute"
            );

            declaration.apply(record)?;
            ran += 1;

            #[cfg(feature = "testing")]
            crate::testing::register_invocation(declaration.function());
        }

        tracing::debug!(
            record = type_name::<R>(),
            ?mode,
            ran,
            declared = declarations.len(),
            "recompute pass finished"
        );

        Ok(record)
    }
}

/// Run every compute function of the record, using the global registry.
///
/// See [`Registry::recompute_all`].
pub fn recompute_all<R: Computed>(record: &mut R) -> Result<&mut R, Error> {
    REGISTRY.recompute_all(record)
}

/// Run the compute functions with a dirty dependency, using the global
/// registry.
///
/// This is what runs before a record is persisted. See
/// [`Registry::recompute_dirty`].
pub fn recompute_dirty<R: Computed>(record: &mut R) -> Result<&mut R, Error> {
    REGISTRY.recompute_dirty(record)
}
