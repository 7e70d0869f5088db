//! # Dimension Module
//!
//! One axis of a [`Shape`](crate::Shape): its unconstrained extent, an optional
//! name, and the current hyperslab constraint `(start, stride, stop)` with its
//! derived constrained size.
//!
//! Invariant after every constructor and mutator:
//! `start <= stop < size`, `stride >= 1` and
//! `constrained_size == 1 + (stop - start) / stride`.
//! A dimension of size zero is the one exception: it has `constrained_size == 0`,
//! which makes every hyperslab through it empty.

use std::fmt;

use crate::enums::error::CacheError;

/// # Dimension
///
/// A single, possibly constrained, array axis.
///
/// ### Fields
/// - `size`: unconstrained extent.
/// - `name`: dimension name, empty for anonymous dimensions.
/// - `start`, `stop`, `stride`: inclusive hyperslab bounds and step.
/// - `constrained_size`: number of indices the hyperslab selects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    size: usize,
    name: String,
    start: usize,
    stop: usize,
    stride: usize,
    constrained_size: usize,
}

impl Dimension {
    /// Creates an unconstrained dimension covering `0..size`.
    pub fn new(size: usize, name: impl Into<String>) -> Self {
        Dimension {
            size,
            name: name.into(),
            start: 0,
            stop: size.saturating_sub(1),
            stride: 1,
            constrained_size: size,
        }
    }

    /// Creates an anonymous unconstrained dimension.
    #[inline]
    pub fn anonymous(size: usize) -> Self {
        Self::new(size, "")
    }

    /// Creates a constrained dimension, validating the constraint.
    pub fn constrained(
        size: usize,
        name: impl Into<String>,
        start: usize,
        stride: usize,
        stop: usize,
    ) -> Result<Self, CacheError> {
        let mut dim = Self::new(size, name);
        dim.constrain(start, stride, stop)?;
        Ok(dim)
    }

    /// Applies the hyperslab `[start:stride:stop]` (inclusive stop).
    ///
    /// The error reports dimension `0`; callers holding the dimension's
    /// position rewrite it.
    pub fn constrain(&mut self, start: usize, stride: usize, stop: usize) -> Result<(), CacheError> {
        if stride == 0 || start > stop || stop >= self.size {
            return Err(CacheError::InvalidConstraint {
                dim: 0,
                start,
                stride,
                stop,
                size: self.size,
            });
        }
        self.start = start;
        self.stride = stride;
        self.stop = stop;
        self.constrained_size = 1 + (stop - start) / stride;
        Ok(())
    }

    /// Restores the full extent.
    pub fn clear_constraint(&mut self) {
        self.start = 0;
        self.stop = self.size.saturating_sub(1);
        self.stride = 1;
        self.constrained_size = self.size;
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> usize {
        self.stop
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn constrained_size(&self) -> usize {
        self.constrained_size
    }

    /// True when the hyperslab selects fewer indices than the full extent.
    #[inline]
    pub fn is_constrained(&self) -> bool {
        self.constrained_size != self.size
    }

    /// Renames the dimension
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}={}: {},{},{} -> {}]",
            self.name, self.size, self.start, self.stride, self.stop, self.constrained_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unconstrained() {
        let d = Dimension::new(4, "lon");
        assert_eq!((d.start(), d.stride(), d.stop()), (0, 1, 3));
        assert_eq!(d.constrained_size(), 4);
        assert!(!d.is_constrained());
    }

    #[test]
    fn test_constrain_computes_size() {
        let mut d = Dimension::new(4, "lon");
        d.constrain(0, 2, 3).unwrap();
        assert_eq!(d.constrained_size(), 2);
        assert!(d.is_constrained());

        d.constrain(1, 1, 1).unwrap();
        assert_eq!(d.constrained_size(), 1);

        d.clear_constraint();
        assert_eq!(d, Dimension::new(4, "lon"));
    }

    #[test]
    fn test_constrain_rejects_bad_bounds() {
        let mut d = Dimension::new(3, "");
        assert!(d.constrain(0, 0, 2).is_err());
        assert!(d.constrain(2, 1, 1).is_err());
        assert_eq!(
            d.constrain(0, 1, 3).unwrap_err(),
            CacheError::InvalidConstraint { dim: 0, start: 0, stride: 1, stop: 3, size: 3 }
        );
        // failed calls leave the dimension untouched
        assert_eq!(d, Dimension::anonymous(3));
    }

    #[test]
    fn test_zero_size_dimension_is_empty() {
        let d = Dimension::new(0, "t");
        assert_eq!(d.constrained_size(), 0);
        assert!(!d.is_constrained());
    }

    #[test]
    fn test_full_stride_covering_whole_extent_counts_as_unconstrained() {
        let d = Dimension::constrained(1, "x", 0, 5, 0).unwrap();
        assert_eq!(d.constrained_size(), 1);
        assert!(!d.is_constrained());
    }
}
