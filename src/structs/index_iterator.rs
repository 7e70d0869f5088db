//! # IndexIterator Module
//!
//! Row-major walk over the hyperslab of a [`Shape`], rightmost dimension fastest.
//!
//! Each step yields an index tuple in *unconstrained* coordinates, so the tuple
//! can be fed straight into [`Shape::row_major_index`] of the unconstrained shape.
//! The iterator borrows its shape and is single pass: a second walk needs a
//! fresh [`Shape::enumerate`].

use std::iter::FusedIterator;
use std::ptr;

use crate::aliases::IndexTuple;
use crate::enums::error::CacheError;
use crate::structs::shape::Shape;

/// # IndexIterator
///
/// Odometer over a constrained index space.
///
/// Advancing adds the rightmost dimension's stride to its index; once that
/// passes `stop` the index resets to `start` and the carry moves one dimension
/// left. A carry out of the leftmost dimension turns the iterator into the end
/// sentinel.
///
/// Two iterators are equal when they come from the same `Shape` instance, agree
/// on being at the end, and hold the same current tuple.
#[derive(Debug, Clone)]
pub struct IndexIterator<'a> {
    shape: &'a Shape,
    current: IndexTuple,
    at_end: bool,
}

impl<'a> IndexIterator<'a> {
    /// Positions at the first tuple, or at the end if the hyperslab is empty.
    pub(crate) fn begin(shape: &'a Shape) -> Self {
        let empty = shape.dims().iter().any(|d| d.constrained_size() == 0);
        if empty {
            return Self::end(shape);
        }
        IndexIterator {
            shape,
            current: shape.dims().iter().map(|d| d.start()).collect(),
            at_end: false,
        }
    }

    pub(crate) fn end(shape: &'a Shape) -> Self {
        IndexIterator {
            shape,
            current: IndexTuple::new(),
            at_end: true,
        }
    }

    /// The shape being enumerated.
    #[inline]
    pub fn shape(&self) -> &'a Shape {
        self.shape
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.at_end
    }

    /// The current tuple.
    ///
    /// Dereferencing the end sentinel is a `PreconditionViolation`.
    pub fn current(&self) -> Result<&[usize], CacheError> {
        if self.at_end {
            return Err(CacheError::PreconditionViolation {
                message: "dereferenced an index iterator past the end of its space".into(),
            });
        }
        Ok(&self.current)
    }

    /// Moves to the next tuple in row-major order. No-op at the end.
    pub fn advance(&mut self) {
        if self.at_end {
            return;
        }
        let dims = self.shape.dims();
        for d in (0..dims.len()).rev() {
            let dim = &dims[d];
            // a step past usize::MAX is past stop too
            match self.current[d].checked_add(dim.stride()) {
                Some(next) if next <= dim.stop() => {
                    self.current[d] = next;
                    return;
                }
                _ => self.current[d] = dim.start(),
            }
        }
        // carried out of the leftmost dimension
        self.at_end = true;
        self.current.clear();
    }
}

impl PartialEq for IndexIterator<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.shape, other.shape) && self.at_end == other.at_end && self.current == other.current
    }
}

impl Iterator for IndexIterator<'_> {
    type Item = IndexTuple;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_end {
            return None;
        }
        let out = self.current.clone();
        self.advance();
        Some(out)
    }
}

impl FusedIterator for IndexIterator<'_> {}
