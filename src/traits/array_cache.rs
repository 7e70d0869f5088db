//! # ArrayCache Trait Module - *"Have we computed the right slice?" policy*
//!
//! [`ArrayCache`] decides when a cached array's constrained slice must be
//! recomputed. The full unconstrained dataset is cached once; the constrained
//! slice is rebuilt only when the live shape differs from the snapshot taken the
//! last time it was built.
//!
//! ## Validity
//! There is no dirty flag. [`ArrayCache::is_valid`] compares the stored snapshot
//! with the live shape on every call, so changing constraints between reads is
//! picked up without any mutator having to invalidate anything. Value
//! injection clears the snapshot instead.
//!
//! ## Implementing
//! Element-specific storage implements the four hooks
//! (`cache_values_if_needed`, `copy_data_from`, `is_data_cached`,
//! `create_and_set_constrained_value_buffer`) plus the snapshot accessors;
//! `read` and `is_valid` come for free. The trait is object safe.

use crate::enums::element_kind::ElementKind;
use crate::enums::error::CacheError;
use crate::enums::value_buffer::ValueBuffer;
use crate::structs::dimension::Dimension;
use crate::structs::shape::Shape;

/// # ArrayCache
///
/// Non-generic interface to a constrained array cache.
pub trait ArrayCache {
    /// Array name, used in diagnostics.
    fn name(&self) -> &str;

    /// Element kind stored.
    fn element_kind(&self) -> ElementKind;

    /// Live shape, including any current constraints.
    ///
    /// Fails with `PreconditionViolation` when no dimension is configured.
    fn live_shape(&self) -> Result<Shape, CacheError>;

    /// Snapshot of the shape the constrained buffer was last built for.
    fn last_used_constraints(&self) -> Option<&Shape>;

    /// Replaces the snapshot. `None` forces the next `read` to rebuild.
    fn set_last_used_constraints(&mut self, shape: Option<Shape>);

    /// Populates the unconstrained cache from the value source, once.
    ///
    /// Fails with `ConsistencyError` if the source yields a count other than
    /// the unconstrained space size. Later calls are no-ops.
    fn cache_values_if_needed(&mut self) -> Result<(), CacheError>;

    /// Replaces the unconstrained cache with a full external dataset.
    ///
    /// Fails with `DimensionMismatch` when the rank of `dims` differs from the
    /// configured rank, `TypeMismatch` on a foreign element kind and
    /// `ConsistencyError` when the value count does not match `dims`. On
    /// success the snapshot is cleared.
    fn copy_data_from(&mut self, dims: &[Dimension], values: &ValueBuffer) -> Result<(), CacheError>;

    /// True once the unconstrained cache holds data.
    fn is_data_cached(&self) -> bool;

    /// Gathers the live hyperslab out of the unconstrained cache into the
    /// constrained buffer.
    fn create_and_set_constrained_value_buffer(&mut self) -> Result<(), CacheError>;

    /// Makes the constrained buffer match the live constraints.
    ///
    /// Caches the source on first use, then rebuilds the constrained buffer
    /// only if the live shape differs from the last snapshot. Reading twice
    /// with unchanged constraints gathers once.
    fn read(&mut self) -> Result<(), CacheError> {
        self.cache_values_if_needed()?;
        let live = self.live_shape()?;
        if self.last_used_constraints() == Some(&live) {
            tracing::trace!(array = self.name(), "constrained buffer still valid");
            return Ok(());
        }
        tracing::debug!(array = self.name(), shape = %live, "recomputing constrained buffer");
        self.create_and_set_constrained_value_buffer()?;
        self.set_last_used_constraints(Some(live));
        Ok(())
    }

    /// True if the constrained buffer was built for the live constraints.
    ///
    /// Derived from the snapshot on every call.
    fn is_valid(&self) -> bool {
        match (self.last_used_constraints(), self.live_shape()) {
            (Some(last), Ok(live)) => *last == live,
            _ => false,
        }
    }
}
