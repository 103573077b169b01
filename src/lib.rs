//! Derived record attributes, recomputed before persist.
//!
//! A computed attribute is a field whose value is a pure function of other
//! fields on the same record. Such functions are declared on the record type
//! following a naming convention: `compute_text_excerpt_attribute(text)`
//! writes the field `text_excerpt` and depends on the field `text`.
//!
//! ```ignore
//! use recompute::{computed, Attributes, Error, Record};
//!
//! struct Article {
//!     attributes: Attributes<String>,
//! }
//!
//! #[computed]
//! impl Article {
//!     fn compute_excerpt_attribute(text: String) -> String {
//!         text.chars().take(5).collect()
//!     }
//! }
//! ```
//!
//! Once the record implements [`Record`], the engine takes care of the rest:
//! - [`recompute_dirty`] runs the compute functions that have at least one
//!   dirty dependency. This is what a host calls before persisting, usually
//!   through a [`Lifecycle`] with the [`RecomputeOnSave`] observer.
//! - [`recompute_all`] runs every compute function unconditionally.
//! - [`recompute_async`] enqueues an unconditional recompute followed by a
//!   save of a copy of the record on some [`Queue`].
//!
//! Declarations are discovered once per type and cached in a [`Registry`].

mod attributes;
mod convention;
mod declare;
mod defer;
mod engine;
mod error;
mod hook;
mod introspect;
mod record;
mod registry;
#[cfg(feature = "testing")]
mod testing;

pub use crate::attributes::Attributes;
pub use crate::convention::{PREFIX, SUFFIX, output_field};
pub use crate::declare::{Declaration, Declarations};
pub use crate::defer::{
    Disconnected, Immediate, Queue, Recomputable, Sender, Task, Worker, channel,
    recompute_async,
};
pub use crate::engine::{recompute_all, recompute_dirty};
pub use crate::error::{BoxError, Error};
pub use crate::hook::{Lifecycle, Observer, RecomputeOnSave};
pub use crate::introspect::dependencies;
pub use crate::record::{ComputeFunction, Computed, Invoker, Record};
pub use crate::registry::{Registry, declarations, validate};

#[cfg(feature = "macros")]
pub use recompute_macros::computed;

/// These are implementation details. Do not rely on them!
#[doc(hidden)]
pub mod internal;
