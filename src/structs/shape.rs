//! # Shape Module - *N-Dimensional Index Space with Hyperslab Constraints*
//!
//! An ordered list of [`Dimension`]s, leftmost slowest-varying, describing both
//! the unconstrained index space of an array and the hyperslab currently
//! selected within it.
//!
//! ## Overview
//! - Equality is structural over every field of every dimension, so a `Shape`
//!   snapshot doubles as a cache key for "which slice was computed last".
//! - [`Shape::row_major_index`] maps an index tuple in unconstrained space to
//!   its offset in a flat row-major buffer.
//! - [`Shape::enumerate`] walks the current hyperslab in row-major order.

use std::fmt;

use crate::enums::error::CacheError;
use crate::structs::dimension::Dimension;
use crate::structs::index_iterator::IndexIterator;

/// # Shape
///
/// Owned, deep-copied dimension list. Cloning a `Shape` is how snapshots are
/// taken; there is no sharing between copies.
///
/// ## Example
/// ```rust
/// use slabcache::Shape;
///
/// let mut shape = Shape::from_sizes(&[3, 4]);
/// shape.constrain(0, 1, 1, 2).unwrap();
/// shape.constrain(1, 0, 2, 3).unwrap();
///
/// assert_eq!(shape.constrained_space_size().unwrap(), 4);
/// let idx: Vec<Vec<usize>> = shape.enumerate().collect();
/// assert_eq!(idx, vec![vec![1, 0], vec![1, 2], vec![2, 0], vec![2, 2]]);
/// assert_eq!(shape.row_major_index(&[1, 2], true).unwrap(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    dims: Vec<Dimension>,
}

impl Shape {
    /// Builds a shape from a copy of `dims`.
    pub fn new(dims: &[Dimension]) -> Self {
        Shape { dims: dims.to_vec() }
    }

    /// Builds an unconstrained shape of anonymous dimensions.
    pub fn from_sizes(sizes: &[usize]) -> Self {
        Shape {
            dims: sizes.iter().map(|&s| Dimension::anonymous(s)).collect(),
        }
    }

    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    #[inline]
    pub fn dim(&self, i: usize) -> Option<&Dimension> {
        self.dims.get(i)
    }

    /// Constrains dimension `dim` to `[start:stride:stop]`.
    pub fn constrain(&mut self, dim: usize, start: usize, stride: usize, stop: usize) -> Result<(), CacheError> {
        let rank = self.dims.len();
        let d = self.dims.get_mut(dim).ok_or(CacheError::OutOfRange {
            index: dim,
            bound: rank,
            message: Some("no such dimension".into()),
        })?;
        d.constrain(start, stride, stop).map_err(|e| match e {
            CacheError::InvalidConstraint { start, stride, stop, size, .. } => {
                CacheError::InvalidConstraint { dim, start, stride, stop, size }
            }
            other => other,
        })
    }

    /// True if any dimension selects fewer indices than its extent.
    pub fn is_constrained(&self) -> bool {
        self.dims.iter().any(Dimension::is_constrained)
    }

    /// Resets every dimension to its full extent with unit stride.
    pub fn set_to_unconstrained(&mut self) {
        for d in &mut self.dims {
            d.clear_constraint();
        }
    }

    /// Returns an unconstrained copy.
    pub fn to_unconstrained(&self) -> Shape {
        let mut s = self.clone();
        s.set_to_unconstrained();
        s
    }

    /// Product of all unconstrained sizes.
    ///
    /// Any zero-sized dimension makes the space empty, whatever the other
    /// sizes. Fails with `ConsistencyError` if the product overflows `usize`.
    #[inline]
    pub fn unconstrained_space_size(&self) -> Result<usize, CacheError> {
        space_size(self.dims.iter().map(Dimension::size))
    }

    /// Product of all constrained sizes. Same rules as
    /// [`unconstrained_space_size`](Self::unconstrained_space_size).
    #[inline]
    pub fn constrained_space_size(&self) -> Result<usize, CacheError> {
        space_size(self.dims.iter().map(Dimension::constrained_size))
    }

    /// Maps `tuple`, an index into *unconstrained* space, to its row-major offset.
    ///
    /// Uses Horner's rule, `idx = tuple[d] + size[d] * idx`, leftmost first.
    /// With `validate` set, fails with `OutOfRange` when the tuple's length
    /// differs from the rank or any component reaches its dimension's size.
    /// Without it the tuple is trusted.
    pub fn row_major_index(&self, tuple: &[usize], validate: bool) -> Result<usize, CacheError> {
        if validate {
            self.validate_tuple(tuple)?;
        }
        tuple
            .iter()
            .zip(&self.dims)
            .enumerate()
            .try_fold(0usize, |acc, (pos, (&i, d))| {
                d.size()
                    .checked_mul(acc)
                    .and_then(|scaled| scaled.checked_add(i))
                    .ok_or_else(|| CacheError::OutOfRange {
                        index: pos,
                        bound: self.dims.len(),
                        message: Some("row-major offset overflows usize".into()),
                    })
            })
    }

    fn validate_tuple(&self, tuple: &[usize]) -> Result<(), CacheError> {
        if tuple.len() != self.dims.len() {
            return Err(CacheError::OutOfRange {
                index: tuple.len(),
                bound: self.dims.len(),
                message: Some("index tuple length differs from shape rank".into()),
            });
        }
        for (d, (&i, dim)) in tuple.iter().zip(&self.dims).enumerate() {
            if i >= dim.size() {
                return Err(CacheError::OutOfRange {
                    index: i,
                    bound: dim.size(),
                    message: Some(format!("component {} of index tuple", d)),
                });
            }
        }
        Ok(())
    }

    /// Begins a row-major walk over the current hyperslab.
    ///
    /// The iterator borrows `self`, so constraints cannot change mid-walk.
    #[inline]
    pub fn enumerate(&self) -> IndexIterator<'_> {
        IndexIterator::begin(self)
    }

    /// The end sentinel of [`Shape::enumerate`], for explicit begin/end loops.
    #[inline]
    pub fn end_enumeration(&self) -> IndexIterator<'_> {
        IndexIterator::end(self)
    }

    /// True when both shapes have the same rank and unconstrained sizes,
    /// and, with `check_names`, the same dimension names.
    pub fn matches_unconstrained(&self, other: &Shape, check_names: bool) -> bool {
        self.dims.len() == other.dims.len()
            && self.dims.iter().zip(&other.dims).all(|(a, b)| {
                a.size() == b.size() && (!check_names || a.name() == b.name())
            })
    }
}

fn space_size(sizes: impl Iterator<Item = usize> + Clone) -> Result<usize, CacheError> {
    if sizes.clone().any(|s| s == 0) {
        return Ok(0);
    }
    let mut total: usize = 1;
    for s in sizes {
        total = total.checked_mul(s).ok_or_else(|| CacheError::ConsistencyError {
            expected: usize::MAX,
            found: s,
            message: Some("index space size overflows usize".into()),
        })?;
    }
    Ok(total)
}

impl From<Vec<Dimension>> for Shape {
    #[inline]
    fn from(dims: Vec<Dimension>) -> Self {
        Shape { dims }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape{{ ")?;
        for d in &self.dims {
            write!(f, "{} ", d)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_b() -> Shape {
        let mut s = Shape::from_sizes(&[3, 4]);
        s.constrain(0, 1, 1, 2).unwrap();
        s.constrain(1, 0, 2, 3).unwrap();
        s
    }

    #[test]
    fn test_space_sizes_unconstrained() {
        let s = Shape::from_sizes(&[3, 4]);
        assert_eq!(s.unconstrained_space_size().unwrap(), 12);
        assert_eq!(s.constrained_space_size().unwrap(), 12);
        assert!(!s.is_constrained());
    }

    #[test]
    fn test_space_sizes_constrained() {
        let s = scenario_b();
        assert_eq!(s.unconstrained_space_size().unwrap(), 12);
        assert_eq!(s.constrained_space_size().unwrap(), 4);
        assert!(s.is_constrained());
    }

    #[test]
    fn test_equality_is_fieldwise() {
        let a = Shape::from_sizes(&[3, 4]);
        let mut b = a.clone();
        assert_eq!(a, b);
        // constraining to the full extent changes nothing
        b.constrain(1, 0, 1, 3).unwrap();
        let mut c = a.clone();
        c.constrain(1, 0, 1, 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let named = Shape::new(&[Dimension::new(3, "y"), Dimension::new(4, "x")]);
        assert_ne!(a, named);
    }

    #[test]
    fn test_set_to_unconstrained() {
        let mut s = scenario_b();
        s.set_to_unconstrained();
        assert_eq!(s, Shape::from_sizes(&[3, 4]));
        assert_eq!(scenario_b().to_unconstrained(), s);
    }

    #[test]
    fn test_row_major_law_2d() {
        let s = Shape::from_sizes(&[3, 4]);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(s.row_major_index(&[i, j], true).unwrap(), j + 4 * i);
            }
        }
    }

    #[test]
    fn test_row_major_3d() {
        let s = Shape::from_sizes(&[2, 3, 5]);
        assert_eq!(s.row_major_index(&[1, 2, 4], true).unwrap(), 4 + 5 * (2 + 3 * 1));
        assert_eq!(s.row_major_index(&[1, 2, 4], true).unwrap(), s.unconstrained_space_size().unwrap() - 1);
    }

    #[test]
    fn test_row_major_ignores_constraints() {
        assert_eq!(scenario_b().row_major_index(&[1, 2], true).unwrap(), 6);
    }

    #[test]
    fn test_row_major_validation() {
        let s = Shape::from_sizes(&[3, 4]);
        assert!(matches!(
            s.row_major_index(&[1], true),
            Err(CacheError::OutOfRange { index: 1, bound: 2, .. })
        ));
        assert!(matches!(
            s.row_major_index(&[0, 4], true),
            Err(CacheError::OutOfRange { index: 4, bound: 4, .. })
        ));
        // unvalidated lookups trust the caller
        assert_eq!(s.row_major_index(&[0, 4], false).unwrap(), 4);
    }

    #[test]
    fn test_constrain_reports_dimension() {
        let mut s = Shape::from_sizes(&[3, 4]);
        assert_eq!(
            s.constrain(1, 2, 1, 4).unwrap_err(),
            CacheError::InvalidConstraint { dim: 1, start: 2, stride: 1, stop: 4, size: 4 }
        );
        assert!(matches!(s.constrain(2, 0, 1, 0), Err(CacheError::OutOfRange { .. })));
    }

    #[test]
    fn test_matches_unconstrained() {
        let a = Shape::new(&[Dimension::new(3, "y"), Dimension::new(4, "x")]);
        let mut b = Shape::new(&[Dimension::new(3, "lat"), Dimension::new(4, "lon")]);
        b.constrain(0, 1, 1, 1).unwrap();
        assert!(a.matches_unconstrained(&b, false));
        assert!(!a.matches_unconstrained(&b, true));
        assert!(!a.matches_unconstrained(&Shape::from_sizes(&[3]), false));
    }

    #[test]
    fn test_zero_dimension_empties_huge_space() {
        let s = Shape::from_sizes(&[usize::MAX, 2, 0]);
        assert_eq!(s.unconstrained_space_size().unwrap(), 0);
        assert_eq!(s.constrained_space_size().unwrap(), 0);
        assert_eq!(s.enumerate().count(), 0);
    }

    #[test]
    fn test_space_size_overflow_is_an_error() {
        let s = Shape::from_sizes(&[usize::MAX, 2]);
        assert!(matches!(
            s.unconstrained_space_size(),
            Err(CacheError::ConsistencyError { .. })
        ));
        assert!(matches!(
            s.row_major_index(&[usize::MAX - 1, 1], false),
            Err(CacheError::OutOfRange { index: 1, bound: 2, .. })
        ));
    }

    #[test]
    fn test_display() {
        let s = Shape::new(&[Dimension::new(2, "t")]);
        assert_eq!(s.to_string(), "Shape{ [t=2: 0,1,1 -> 2] }");
    }
}
