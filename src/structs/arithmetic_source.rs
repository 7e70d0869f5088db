//! # ArithmeticSource Module
//!
//! Value source that generates an arithmetic sequence, for variables declared
//! with a start value and an increment instead of literal values.

use num_traits::NumCast;
use vec64::Vec64;

use crate::enums::element_kind::ElementKind;
use crate::enums::error::CacheError;
use crate::enums::value_buffer::ValueBuffer;
use crate::traits::element::Numeric;
use crate::traits::value_source::ValueSource;

/// # ArithmeticSource
///
/// Yields `start, start + increment, start + 2 * increment, ...`.
///
/// The length is fixed with [`ArithmeticSource::with_len`], otherwise it
/// follows the pulling cache's unconstrained space size. Values accumulate by
/// repeated addition, so float sequences round the same way a running sum does.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticSource<T: Numeric> {
    pub start: T,
    pub increment: T,
    pub len: Option<usize>,
}

impl<T: Numeric> ArithmeticSource<T> {
    /// Sequence sized by whoever pulls it.
    pub fn new(start: T, increment: T) -> Self {
        ArithmeticSource { start, increment, len: None }
    }

    /// Sequence of exactly `len` values.
    pub fn with_len(start: T, increment: T, len: usize) -> Self {
        ArithmeticSource { start, increment, len: Some(len) }
    }

    /// Parses `start` and `increment` from text.
    pub fn parse(start: &str, increment: &str) -> Result<Self, CacheError> {
        Ok(Self::new(T::parse_token(start)?, T::parse_token(increment)?))
    }

    /// Materialises `len` values.
    ///
    /// Integer kinds fail with `ConsistencyError` if the sequence leaves the
    /// type's range.
    pub fn generate(&self, len: usize) -> Result<Vec64<T>, CacheError> {
        let mut out = Vec64::with_capacity(len);
        let mut x = self.start;
        for i in 0..len {
            out.push(x);
            if i + 1 < len {
                x = checked_step(x, self.increment).ok_or_else(|| CacheError::ConsistencyError {
                    expected: len,
                    found: i + 1,
                    message: Some(format!("arithmetic sequence overflows {}", T::KIND)),
                })?;
            }
        }
        Ok(out)
    }
}

/// Adds through `f64` and casts back so integer overflow surfaces as `None`.
#[inline]
fn checked_step<T: Numeric>(x: T, inc: T) -> Option<T> {
    if matches!(T::KIND, ElementKind::Float32 | ElementKind::Float64) {
        return Some(x + inc);
    }
    let sum = x.to_f64()? + inc.to_f64()?;
    <T as NumCast>::from(sum)
}

impl<T: Numeric> ValueSource for ArithmeticSource<T> {
    fn read_values(&mut self, expected_len: usize) -> Result<ValueBuffer, CacheError> {
        let len = self.len.unwrap_or(expected_len);
        Ok(T::into_buffer(self.generate(len)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_sequence() {
        let src = ArithmeticSource::new(10i32, 1);
        assert_eq!(src.generate(4).unwrap().as_slice(), &[10, 11, 12, 13]);
    }

    #[test]
    fn test_float_sequence_by_running_sum() {
        let src = ArithmeticSource::new(0.0f64, 0.25);
        assert_eq!(src.generate(3).unwrap().as_slice(), &[0.0, 0.25, 0.5]);
    }

    #[test]
    fn test_negative_increment() {
        let src = ArithmeticSource::new(5i16, -2);
        assert_eq!(src.generate(3).unwrap().as_slice(), &[5, 3, 1]);
    }

    #[test]
    fn test_overflow_is_reported() {
        let src = ArithmeticSource::new(250u8, 5);
        assert!(src.generate(2).is_ok());
        assert!(matches!(src.generate(3), Err(CacheError::ConsistencyError { .. })));
    }

    #[test]
    fn test_source_length_follows_caller_unless_fixed() {
        let mut open = ArithmeticSource::new(0u32, 2);
        assert_eq!(open.read_values(5).unwrap().len(), 5);
        let mut fixed = ArithmeticSource::with_len(0u32, 2, 2);
        assert_eq!(fixed.read_values(5).unwrap().len(), 2);
    }

    #[test]
    fn test_parse() {
        let src = ArithmeticSource::<f32>::parse("1.5", "0.5").unwrap();
        assert_eq!(src, ArithmeticSource::new(1.5f32, 0.5));
        assert!(ArithmeticSource::<u8>::parse("-1", "1").is_err());
    }
}
