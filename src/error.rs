use thiserror::Error;

/// An opaque error raised by a collaborator (compute function, storage,
/// queue).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong during a recompute pass.
#[derive(Debug, Error)]
pub enum Error {
    /// A compute function depends on a field the record does not have.
    #[error("`{function}` depends on `{field}`, which is not a field of `{record}`")]
    UnknownDependency {
        record: &'static str,
        function: &'static str,
        field: String,
    },

    /// A value was assigned to a field the record does not have.
    #[error("`{record}` has no field `{field}`")]
    UnknownField { record: &'static str, field: String },

    /// A compute function received the wrong number of values.
    #[error("`{function}` takes {expected} values, but {found} were gathered")]
    Arity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    /// A gathered value could not be turned into the parameter's type.
    #[error("value for `{parameter}` does not fit the parameter of `{function}`")]
    Conversion {
        function: &'static str,
        parameter: &'static str,
        #[source]
        source: BoxError,
    },

    /// A compute function failed.
    #[error("`{function}` failed")]
    Invocation {
        function: &'static str,
        #[source]
        source: BoxError,
    },

    /// A compute function reads the field it writes.
    #[error("`{function}` computes `{field}` from itself")]
    SelfDependency { function: &'static str, field: String },

    /// The host failed to persist the record.
    #[error("failed to persist record")]
    Persistence(#[source] BoxError),

    /// A deferred recompute could not be enqueued.
    #[error("failed to enqueue deferred recompute")]
    Queue(#[source] BoxError),
}

impl Error {
    /// Wrap a storage failure of the host.
    pub fn persistence(err: impl Into<BoxError>) -> Self {
        Self::Persistence(err.into())
    }

    /// Report an assignment to a missing field of `R`.
    pub fn unknown_field<R: ?Sized>(field: impl Into<String>) -> Self {
        Self::UnknownField {
            record: std::any::type_name::<R>(),
            field: field.into(),
        }
    }
}
