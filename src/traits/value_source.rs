//! # Value Source Trait Module
//!
//! The bulk "read all unconstrained values" contract behind a cached array.
//!
//! A source is pulled at most once per cache lifetime. It must return the
//! full dataset in row-major order matching the unconstrained shape; whether
//! that comes from a file reader, a literal value list or another aggregated
//! array is the implementor's business.

use crate::enums::error::CacheError;
use crate::enums::value_buffer::ValueBuffer;

/// # ValueSource
///
/// Supplies the full unconstrained dataset of one array.
///
/// ### Provided implementations
/// - `ValueBuffer`: literal values, cloned on each pull.
/// - `FnMut() -> Result<ValueBuffer, CacheError>`: anything else.
/// - [`ArithmeticSource`](crate::ArithmeticSource): generated `start + i * increment`.
pub trait ValueSource {
    /// Reads every value of the unconstrained array.
    ///
    /// `expected_len` is the unconstrained space size the caller will check
    /// against. Sources that know their own length may ignore it.
    fn read_values(&mut self, expected_len: usize) -> Result<ValueBuffer, CacheError>;
}

/// # Boxed Value Source
///
/// Object-safe wrapper that lets a cached array own any clonable source
/// behind a `Box` and still deep-copy it along with the array.
///
/// **Manual implementation is not required**: every `ValueSource + Clone + 'static`
/// type satisfies it through the blanket impl, including closures that only
/// capture clonable state.
pub trait BoxedValueSource: ValueSource {
    /// Returns a deep clone of the source.
    fn deep_clone(&self) -> Box<dyn BoxedValueSource>;
}

impl<S> BoxedValueSource for S
where
    S: ValueSource + Clone + 'static,
{
    fn deep_clone(&self) -> Box<dyn BoxedValueSource> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn BoxedValueSource> {
    fn clone(&self) -> Self {
        (**self).deep_clone()
    }
}

impl ValueSource for ValueBuffer {
    #[inline]
    fn read_values(&mut self, _expected_len: usize) -> Result<ValueBuffer, CacheError> {
        Ok(self.clone())
    }
}

impl<F> ValueSource for F
where
    F: FnMut() -> Result<ValueBuffer, CacheError>,
{
    #[inline]
    fn read_values(&mut self, _expected_len: usize) -> Result<ValueBuffer, CacheError> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_source_clones() {
        let mut src = ValueBuffer::from(vec![1u8, 2, 3]);
        let a = src.read_values(3).unwrap();
        let b = src.read_values(3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_closure_source() {
        let mut calls = 0;
        let mut src = || {
            calls += 1;
            Ok::<_, CacheError>(ValueBuffer::from(vec![0.5f64]))
        };
        assert_eq!(src.read_values(1).unwrap().len(), 1);
        drop(src);
        assert_eq!(calls, 1);
    }
}
