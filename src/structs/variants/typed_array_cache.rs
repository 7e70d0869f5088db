//! # **TypedArrayCache Module** - *Element-Typed Constrained Array Cache*
//!
//! Concrete storage behind the [`ArrayCache`] policy for one element type `T`.
//!
//! ## Overview
//! - Holds the array's live dimensions, whose constraints callers may change
//!   at any time between reads.
//! - Pulls the full unconstrained dataset from its value source in a single
//!   bulk call, the first time it is needed, into a 64-byte aligned `Vec64<T>`.
//! - On `read()`, gathers the live hyperslab into the constrained buffer, but
//!   only when the live shape differs from the one the buffer was built for.
//! - Usable standalone or as one arm of [`CachedArray`](crate::CachedArray).
//!
//! ## Cache state
//! Whether values are loaded is an explicit state, never inferred from a
//! buffer's size, so a legitimately empty array is still "loaded" once pulled.

use std::fmt::{self, Display, Formatter};

use vec64::Vec64;

use crate::enums::element_kind::ElementKind;
use crate::enums::error::CacheError;
use crate::enums::value_buffer::ValueBuffer;
use crate::structs::dimension::Dimension;
use crate::structs::shape::Shape;
use crate::traits::array_cache::ArrayCache;
use crate::traits::element::Element;
use crate::traits::print::write_preview;
use crate::traits::value_source::{BoxedValueSource, ValueSource};
use crate::utils::gather;

/// Unconstrained cache state.
#[derive(Clone)]
enum CacheState<T> {
    NotLoaded,
    Loaded {
        /// Unconstrained shape the values are laid out by.
        shape: Shape,
        values: Vec64<T>,
    },
}

/// # TypedArrayCache
///
/// A named N-dimensional array of `T` that caches its full dataset once and
/// re-slices it for every hyperslab asked of it.
///
/// ## Description
/// - `dims` are the live dimensions. Constrain them with
///   [`add_constraint`](Self::add_constraint) and call [`read`](ArrayCache::read);
///   the result is in [`constrained_values`](Self::constrained_values).
/// - Values come from a [`ValueSource`], a `ValueBuffer` of literals by default.
/// - Cloning deep-copies everything, cached values and source included.
///
/// ## Example
/// ```rust
/// use slabcache::{ArrayCache, Dimension, TypedArrayCache};
///
/// let mut arr = TypedArrayCache::<i32>::from_values(
///     "temp",
///     vec![Dimension::new(3, "y"), Dimension::new(4, "x")],
///     (10..22).collect(),
/// );
/// arr.add_constraint(0, 1, 1, 2).unwrap();
/// arr.add_constraint(1, 0, 2, 3).unwrap();
/// arr.read().unwrap();
/// assert_eq!(arr.constrained_values(), &[14, 16, 18, 20]);
/// ```
#[derive(Clone)]
pub struct TypedArrayCache<T: Element> {
    name: String,
    dims: Vec<Dimension>,
    source: Box<dyn BoxedValueSource>,
    state: CacheState<T>,
    constrained: Vec64<T>,
    last_used: Option<Shape>,
    validate_bounds: bool,
}

impl<T: Element> TypedArrayCache<T> {
    /// Creates an array with no dimensions and no values.
    pub fn new(name: impl Into<String>) -> Self {
        TypedArrayCache {
            name: name.into(),
            dims: Vec::new(),
            source: Box::new(ValueBuffer::Null),
            state: CacheState::NotLoaded,
            constrained: Vec64::new(),
            last_used: None,
            validate_bounds: cfg!(debug_assertions),
        }
    }

    /// Creates an array over `dims` whose values come from `source`.
    pub fn with_source<S>(name: impl Into<String>, dims: Vec<Dimension>, source: S) -> Self
    where
        S: ValueSource + Clone + 'static,
    {
        let mut arr = Self::new(name);
        arr.dims = dims;
        arr.source = Box::new(source);
        arr
    }

    /// Creates an array over `dims` holding the literal row-major `values`.
    pub fn from_values(name: impl Into<String>, dims: Vec<Dimension>, values: Vec<T>) -> Self {
        Self::with_source(name, dims, ValueBuffer::from_values(values))
    }

    /// Appends an unconstrained dimension.
    ///
    /// Changing the rank of an array whose values are cached makes the next
    /// `read` fail with `DimensionMismatch`.
    pub fn append_dim(&mut self, size: usize, name: impl Into<String>) {
        self.dims.push(Dimension::new(size, name));
    }

    /// Live dimensions, constraints included.
    #[inline]
    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    /// Constrains dimension `dim` to `[start:stride:stop]`.
    ///
    /// Only the live dimensions change; the cache notices on the next read.
    pub fn add_constraint(&mut self, dim: usize, start: usize, stride: usize, stop: usize) -> Result<(), CacheError> {
        let rank = self.dims.len();
        let d = self.dims.get_mut(dim).ok_or(CacheError::OutOfRange {
            index: dim,
            bound: rank,
            message: Some(format!("array '{}' has no such dimension", self.name)),
        })?;
        d.constrain(start, stride, stop).map_err(|e| match e {
            CacheError::InvalidConstraint { start, stride, stop, size, .. } => {
                CacheError::InvalidConstraint { dim, start, stride, stop, size }
            }
            other => other,
        })
    }

    /// Removes every constraint.
    pub fn clear_constraints(&mut self) {
        for d in &mut self.dims {
            d.clear_constraint();
        }
    }

    /// Replaces the value source and drops any cached values.
    pub fn set_source<S>(&mut self, source: S)
    where
        S: ValueSource + Clone + 'static,
    {
        self.source = Box::new(source);
        self.invalidate_values();
    }

    /// Sets new values from a slice.
    ///
    /// Fails with `TypeMismatch` unless `U` is `T`. The values go to the
    /// value buffer; the cache reloads from it on the next read, which checks
    /// their count against the unconstrained space size.
    pub fn set_value<U: Element>(&mut self, values: &[U]) -> Result<(), CacheError> {
        self.check_kind(U::KIND)?;
        self.set_source(ValueBuffer::from_values(values.to_vec()));
        Ok(())
    }

    /// Sets new values from an owned vector. Same rules as [`set_value`](Self::set_value).
    pub fn set_value_vec<U: Element>(&mut self, values: Vec<U>) -> Result<(), CacheError> {
        self.check_kind(U::KIND)?;
        self.set_source(ValueBuffer::from_values(values));
        Ok(())
    }

    /// Sets new values from a type-erased buffer. Same rules as [`set_value`](Self::set_value).
    pub fn set_value_buffer(&mut self, values: ValueBuffer) -> Result<(), CacheError> {
        if let Some(kind) = values.kind() {
            self.check_kind(kind)?;
        }
        self.set_source(values);
        Ok(())
    }

    /// The constrained slice built by the last successful `read`, row-major.
    #[inline]
    pub fn constrained_values(&self) -> &[T] {
        self.constrained.as_slice()
    }

    /// The constrained slice as a type-erased buffer, for serializers.
    pub fn constrained_value_buffer(&self) -> ValueBuffer {
        T::into_buffer(self.constrained.clone())
    }

    /// Reads and returns the constrained slice.
    pub fn read_constrained(&mut self) -> Result<&[T], CacheError> {
        self.read()?;
        Ok(self.constrained_values())
    }

    /// The cached unconstrained dataset, if loaded.
    pub fn unconstrained_values(&self) -> Option<&[T]> {
        match &self.state {
            CacheState::Loaded { values, .. } => Some(values.as_slice()),
            CacheState::NotLoaded => None,
        }
    }

    /// Unconstrained shape of the cached dataset, if loaded.
    pub fn unconstrained_shape(&self) -> Option<&Shape> {
        match &self.state {
            CacheState::Loaded { shape, .. } => Some(shape),
            CacheState::NotLoaded => None,
        }
    }

    /// Whether the gather validates every index tuple. Defaults to on in
    /// debug builds only.
    #[inline]
    pub fn validate_bounds(&self) -> bool {
        self.validate_bounds
    }

    #[inline]
    pub fn set_validate_bounds(&mut self, validate: bool) {
        self.validate_bounds = validate;
    }

    /// Renames the array
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    fn check_kind(&self, found: ElementKind) -> Result<(), CacheError> {
        if found != T::KIND {
            return Err(CacheError::TypeMismatch {
                expected: T::KIND.name(),
                found: found.name(),
            });
        }
        Ok(())
    }

    fn invalidate_values(&mut self) {
        self.state = CacheState::NotLoaded;
        self.last_used = None;
    }
}

impl<T: Element> ArrayCache for TypedArrayCache<T> {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn live_shape(&self) -> Result<Shape, CacheError> {
        if self.dims.is_empty() {
            return Err(CacheError::PreconditionViolation {
                message: format!("array '{}' has no dimensions configured", self.name),
            });
        }
        Ok(Shape::new(&self.dims))
    }

    #[inline]
    fn last_used_constraints(&self) -> Option<&Shape> {
        self.last_used.as_ref()
    }

    #[inline]
    fn set_last_used_constraints(&mut self, shape: Option<Shape>) {
        self.last_used = shape;
    }

    fn cache_values_if_needed(&mut self) -> Result<(), CacheError> {
        if let CacheState::Loaded { .. } = self.state {
            return Ok(());
        }
        let full = self.live_shape()?.to_unconstrained();
        let expected = full.unconstrained_space_size()?;
        let pulled = self.source.read_values(expected)?;
        if pulled.len() != expected {
            return Err(CacheError::ConsistencyError {
                expected,
                found: pulled.len(),
                message: Some(format!(
                    "value source of array '{}' does not match its unconstrained space",
                    self.name
                )),
            });
        }
        let values = pulled.into_typed::<T>()?;
        tracing::debug!(array = %self.name, len = values.len(), "cached unconstrained values");
        self.state = CacheState::Loaded { shape: full, values };
        Ok(())
    }

    fn copy_data_from(&mut self, dims: &[Dimension], values: &ValueBuffer) -> Result<(), CacheError> {
        if !self.dims.is_empty() && dims.len() != self.dims.len() {
            return Err(CacheError::DimensionMismatch {
                expected: self.dims.len(),
                found: dims.len(),
            });
        }
        if let Some(kind) = values.kind() {
            self.check_kind(kind)?;
        }
        let full = Shape::new(dims).to_unconstrained();
        let expected = full.unconstrained_space_size()?;
        if values.len() != expected {
            return Err(CacheError::ConsistencyError {
                expected,
                found: values.len(),
                message: Some(format!("data injected into array '{}'", self.name)),
            });
        }
        let data = values.clone().into_typed::<T>()?;
        tracing::debug!(array = %self.name, len = data.len(), "injected unconstrained values");
        self.dims = full.dims().to_vec();
        self.source = Box::new(values.clone());
        self.state = CacheState::Loaded { shape: full, values: data };
        self.last_used = None;
        Ok(())
    }

    #[inline]
    fn is_data_cached(&self) -> bool {
        matches!(self.state, CacheState::Loaded { .. })
    }

    fn create_and_set_constrained_value_buffer(&mut self) -> Result<(), CacheError> {
        let live = self.live_shape()?;
        let CacheState::Loaded { shape, values } = &self.state else {
            return Err(CacheError::PreconditionViolation {
                message: format!("array '{}' has no cached values to slice", self.name),
            });
        };
        self.constrained = gather(shape, &live, values, self.validate_bounds)?;
        Ok(())
    }
}

impl<T: Element> fmt::Debug for TypedArrayCache<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedArrayCache")
            .field("name", &self.name)
            .field("kind", &T::KIND)
            .field("dims", &self.dims)
            .field("cached", &self.unconstrained_values())
            .field("constrained", &self.constrained.as_slice())
            .field("last_used", &self.last_used)
            .finish()
    }
}

impl<T: Element> Display for TypedArrayCache<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "TypedArrayCache '{}' [{} values] (dtype: {}, cached: {}, valid: {})",
            self.name,
            self.constrained.len(),
            T::KIND,
            self.is_data_cached(),
            self.is_valid()
        )?;
        for d in &self.dims {
            write!(f, "{} ", d)?;
        }
        writeln!(f)?;
        write_preview(f, self.constrained.as_slice())
    }
}
