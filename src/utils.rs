//! # Utilities - *Internal Helper Utilities*
//!
//! The hyperslab gather shared by every typed cache, plus the shape checks
//! that guard it.

use vec64::Vec64;

use crate::aliases::{Length, Offset};
use crate::enums::error::CacheError;
use crate::structs::shape::Shape;
use crate::traits::element::Element;

/// Checks that `live` still describes the space `full` was cached for.
#[inline]
pub fn validate_live_shape(full: &Shape, live: &Shape) -> Result<(), CacheError> {
    if full.num_dimensions() != live.num_dimensions() {
        return Err(CacheError::DimensionMismatch {
            expected: full.num_dimensions(),
            found: live.num_dimensions(),
        });
    }
    if !full.matches_unconstrained(live, false) {
        return Err(CacheError::ConsistencyError {
            expected: full.unconstrained_space_size()?,
            found: live.unconstrained_space_size()?,
            message: Some("dimension sizes changed after the values were cached".into()),
        });
    }
    Ok(())
}

/// Row-major offsets into `full` for every tuple of `live`'s hyperslab.
///
/// Fails with `ConsistencyError` if the enumeration count differs from
/// `live.constrained_space_size()`, or when that size overflows `usize`.
pub fn hyperslab_offsets(full: &Shape, live: &Shape, validate: bool) -> Result<Vec<Offset>, CacheError> {
    let expected: Length = live.constrained_space_size()?;
    let mut offsets = Vec::with_capacity(expected);
    for tuple in live.enumerate() {
        offsets.push(full.row_major_index(&tuple, validate)?);
    }
    if offsets.len() != expected {
        return Err(CacheError::ConsistencyError {
            expected,
            found: offsets.len(),
            message: Some("hyperslab enumeration produced an unexpected number of points".into()),
        });
    }
    Ok(offsets)
}

/// Copies the elements of `values` selected by `live` into a new buffer,
/// in enumeration order.
///
/// `values` is the row-major unconstrained dataset laid out by `full`.
pub fn gather<T: Element>(full: &Shape, live: &Shape, values: &[T], validate: bool) -> Result<Vec64<T>, CacheError> {
    validate_live_shape(full, live)?;
    let offsets = hyperslab_offsets(full, live, validate)?;
    if let Some(&bad) = offsets.iter().find(|&&o| o >= values.len()) {
        return Err(CacheError::OutOfRange {
            index: bad,
            bound: values.len(),
            message: Some("offset beyond the cached values".into()),
        });
    }
    Ok(copy_offsets(values, &offsets))
}

#[cfg(not(feature = "parallel_proc"))]
#[inline]
fn copy_offsets<T: Element>(values: &[T], offsets: &[Offset]) -> Vec64<T> {
    offsets.iter().map(|&o| values[o].clone()).collect()
}

#[cfg(feature = "parallel_proc")]
#[inline]
fn copy_offsets<T: Element>(values: &[T], offsets: &[Offset]) -> Vec64<T> {
    use rayon::prelude::*;

    let out: Vec<T> = offsets.par_iter().map(|&o| values[o].clone()).collect();
    Vec64::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::dimension::Dimension;

    #[test]
    fn test_gather_scenario_c() {
        let full = Shape::from_sizes(&[3, 4]);
        let mut live = full.clone();
        live.constrain(0, 1, 1, 2).unwrap();
        live.constrain(1, 0, 2, 3).unwrap();
        let data: Vec<i32> = (10..22).collect();
        let out = gather(&full, &live, &data, true).unwrap();
        assert_eq!(out.as_slice(), &[14, 16, 18, 20]);
    }

    #[test]
    fn test_gather_unconstrained_is_identity() {
        let full = Shape::from_sizes(&[2, 3, 2]);
        let data: Vec<u8> = (0..12).collect();
        let out = gather(&full, &full, &data, false).unwrap();
        assert_eq!(out.as_slice(), data.as_slice());
    }

    #[test]
    fn test_gather_empty_slice() {
        let full = Shape::new(&[Dimension::new(0, "t"), Dimension::new(4, "x")]);
        let out = gather::<f64>(&full, &full, &[], true).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_gather_huge_stride() {
        let full = Shape::from_sizes(&[3]);
        let mut live = full.clone();
        live.constrain(0, 1, usize::MAX, 2).unwrap();
        let out = gather(&full, &live, &[7u8, 8, 9], true).unwrap();
        assert_eq!(out.as_slice(), &[8]);
    }

    #[test]
    fn test_live_shape_mismatch() {
        let full = Shape::from_sizes(&[3, 4]);
        assert!(matches!(
            validate_live_shape(&full, &Shape::from_sizes(&[12])),
            Err(CacheError::DimensionMismatch { expected: 2, found: 1 })
        ));
        assert!(matches!(
            validate_live_shape(&full, &Shape::from_sizes(&[4, 3])),
            Err(CacheError::ConsistencyError { .. })
        ));
    }

    #[test]
    fn test_gather_short_values() {
        let full = Shape::from_sizes(&[4]);
        let err = gather(&full, &full, &[1i16, 2], false).unwrap_err();
        assert!(matches!(err, CacheError::OutOfRange { index: 2, bound: 2, .. }));
    }
}
