use crate::error::{BoxError, Error};
use crate::record::Record;

#[cfg(feature = "testing")]
pub use crate::testing::last_invoked;

/// Ensure the number of gathered values matches the function's parameters.
#[inline]
pub fn arity(function: &'static str, expected: usize, found: usize) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::Arity { function, expected, found })
    }
}

/// Take the next gathered value and convert it into a parameter's type.
#[inline]
pub fn argument<T, V>(
    function: &'static str,
    parameter: &'static str,
    position: usize,
    values: &mut impl Iterator<Item = V>,
) -> Result<T, Error>
where
    T: TryFrom<V>,
    T::Error: Into<BoxError>,
{
    let value = values.next().ok_or(Error::Arity {
        function,
        expected: position + 1,
        found: position,
    })?;

    T::try_from(value).map_err(|err| Error::Conversion {
        function,
        parameter,
        source: err.into(),
    })
}

/// Wrap the error of a fallible compute function.
#[inline]
pub fn invocation(function: &'static str, err: impl Into<BoxError>) -> Error {
    Error::Invocation { function, source: err.into() }
}

/// Convert a compute function's result into the record's value type.
#[inline]
pub fn output<R: Record, T: Into<R::Value>>(value: T) -> R::Value {
    value.into()
}
