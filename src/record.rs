use std::fmt::{self, Debug, Formatter};

use crate::error::Error;

/// Type-erased entry point of a compute function.
///
/// Receives the dependency values in declaration order and returns the value
/// for the output field.
pub type Invoker<R> =
    fn(Vec<<R as Record>::Value>) -> Result<<R as Record>::Value, Error>;

/// A persistent object with named, dirty-tracked fields.
///
/// This is the surface the engine needs from a host record. Storage,
/// identity and serialization stay with the host.
pub trait Record {
    /// The dynamic value of a single field.
    type Value: 'static;

    /// Whether the in-memory value of a field differs from its loaded or
    /// last persisted value.
    fn is_dirty(&self, field: &str) -> bool;

    /// Read a field by name, `None` if the record has no such field.
    fn get_field(&self, field: &str) -> Option<Self::Value>;

    /// Write a field by name.
    ///
    /// Must go through the same path as ordinary assignments so that the
    /// write is dirty-tracked and included in the next persist.
    fn set_field(&mut self, field: &str, value: Self::Value) -> Result<(), Error>;
}

/// A record type with compute functions.
///
/// Usually implemented by [`#[computed]`](macro@crate::computed) on an impl
/// block, but it can also be written by hand.
pub trait Computed: Record + Sized + 'static {
    /// Enumerate the type's compute function candidates in declaration order.
    ///
    /// The list is scanned once per type and cached, so this should not be
    /// expensive, but it also does not need to be.
    fn compute_functions() -> Vec<ComputeFunction<Self>>;
}

/// A callable member of a record type, as enumerated by [`Computed`].
pub struct ComputeFunction<R: Record> {
    name: &'static str,
    params: &'static [&'static str],
    invoke: Invoker<R>,
}

impl<R: Record> ComputeFunction<R> {
    /// Describe a member by its name, its ordered parameter names and the
    /// function that invokes it.
    pub const fn new(
        name: &'static str,
        params: &'static [&'static str],
        invoke: Invoker<R>,
    ) -> Self {
        Self { name, params, invoke }
    }

    /// The member's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The member's parameter names, as written in its signature.
    pub fn params(&self) -> &'static [&'static str] {
        self.params
    }

    /// The type-erased entry point.
    pub fn invoker(&self) -> Invoker<R> {
        self.invoke
    }
}

impl<R: Record> Clone for ComputeFunction<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for ComputeFunction<R> {}

impl<R: Record> Debug for ComputeFunction<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("ComputeFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
