//! # **CachedArray Module** - *Kind-Dispatched Array Cache*
//!
//! `CachedArray` unifies the typed caches of every element kind into one enum,
//! so callers that only learn the element kind at run time (for example from a
//! type name in a dataset description) can hold and drive any of them.
//!
//! ## Features
//! - one arm per element kind, each holding a [`TypedArrayCache`]
//! - construction from an [`ElementKind`] or a type name
//! - typed access when the kind is known, via `.i32_ref()` and friends or `.typed::<T>()`
//! - implements [`ArrayCache`] by delegating to the held arm

use std::any::Any;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::dispatch_cached_array;
use crate::enums::element_kind::ElementKind;
use crate::enums::error::CacheError;
use crate::enums::value_buffer::ValueBuffer;
use crate::structs::dimension::Dimension;
use crate::structs::shape::Shape;
use crate::structs::variants::typed_array_cache::TypedArrayCache;
use crate::traits::array_cache::ArrayCache;
use crate::traits::element::Element;
use crate::traits::value_source::ValueSource;

/// # CachedArray
///
/// Constrained array cache of any supported element kind.
///
/// ## Usage
/// - Build with [`CachedArray::new`] or parse a type name with
///   [`CachedArray::from_type_name`], then configure dimensions and a source.
/// - `read()` and `is_valid()` behave exactly as on the held typed cache.
/// - Drill down with `.f64_ref()`, `.typed::<f64>()` etc. to reach the typed
///   constrained values; a wrong kind errors with `TypeMismatch`.
#[derive(Clone, Debug)]
pub enum CachedArray {
    Byte(TypedArrayCache<u8>),
    Int16(TypedArrayCache<i16>),
    UInt16(TypedArrayCache<u16>),
    Int32(TypedArrayCache<i32>),
    UInt32(TypedArrayCache<u32>),
    Float32(TypedArrayCache<f32>),
    Float64(TypedArrayCache<f64>),
    String(TypedArrayCache<String>),
}

macro_rules! impl_typed_accessors {
    ($($variant:ident, $ty:ty, $by_ref:ident, $by_mut:ident);+ $(;)?) => {
        $(
            #[doc = concat!("Borrows the `", stringify!($ty), "` cache, or errors with `TypeMismatch`.")]
            #[inline]
            pub fn $by_ref(&self) -> Result<&TypedArrayCache<$ty>, CacheError> {
                match self {
                    CachedArray::$variant(arr) => Ok(arr),
                    other => Err(other.mismatch(ElementKind::$variant)),
                }
            }

            #[doc = concat!("Mutably borrows the `", stringify!($ty), "` cache, or errors with `TypeMismatch`.")]
            #[inline]
            pub fn $by_mut(&mut self) -> Result<&mut TypedArrayCache<$ty>, CacheError> {
                match self {
                    CachedArray::$variant(arr) => Ok(arr),
                    other => Err(other.mismatch(ElementKind::$variant)),
                }
            }
        )+
    };
}

impl CachedArray {
    /// Creates an empty cache of `kind`.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match kind {
            ElementKind::Byte => CachedArray::Byte(TypedArrayCache::new(name)),
            ElementKind::Int16 => CachedArray::Int16(TypedArrayCache::new(name)),
            ElementKind::UInt16 => CachedArray::UInt16(TypedArrayCache::new(name)),
            ElementKind::Int32 => CachedArray::Int32(TypedArrayCache::new(name)),
            ElementKind::UInt32 => CachedArray::UInt32(TypedArrayCache::new(name)),
            ElementKind::Float32 => CachedArray::Float32(TypedArrayCache::new(name)),
            ElementKind::Float64 => CachedArray::Float64(TypedArrayCache::new(name)),
            ElementKind::String => CachedArray::String(TypedArrayCache::new(name)),
        }
    }

    /// Creates an empty cache from a type name such as `"float"` or `"Int32"`.
    ///
    /// Errors with `ParseError` on an unknown name.
    pub fn from_type_name(type_name: &str, name: impl Into<String>) -> Result<Self, CacheError> {
        Ok(Self::new(ElementKind::from_str(type_name)?, name))
    }

    impl_typed_accessors!(
        Byte, u8, u8_ref, u8_mut;
        Int16, i16, i16_ref, i16_mut;
        UInt16, u16, u16_ref, u16_mut;
        Int32, i32, i32_ref, i32_mut;
        UInt32, u32, u32_ref, u32_mut;
        Float32, f32, f32_ref, f32_mut;
        Float64, f64, f64_ref, f64_mut;
        String, String, str_ref, str_mut;
    );

    /// Borrows the held cache as `TypedArrayCache<T>`.
    pub fn typed<T: Element>(&self) -> Result<&TypedArrayCache<T>, CacheError> {
        let found = self.element_kind();
        dispatch_cached_array!(self, arr => (arr as &dyn Any).downcast_ref::<TypedArrayCache<T>>())
            .ok_or(CacheError::TypeMismatch { expected: T::KIND.name(), found: found.name() })
    }

    /// Mutably borrows the held cache as `TypedArrayCache<T>`.
    pub fn typed_mut<T: Element>(&mut self) -> Result<&mut TypedArrayCache<T>, CacheError> {
        let found = self.element_kind();
        dispatch_cached_array!(self, arr => (arr as &mut dyn Any).downcast_mut::<TypedArrayCache<T>>())
            .ok_or(CacheError::TypeMismatch { expected: T::KIND.name(), found: found.name() })
    }

    /// Live dimensions.
    #[inline]
    pub fn dims(&self) -> &[Dimension] {
        dispatch_cached_array!(self, arr => arr.dims())
    }

    /// Appends an unconstrained dimension.
    #[inline]
    pub fn append_dim(&mut self, size: usize, name: impl Into<String>) {
        dispatch_cached_array!(self, arr => arr.append_dim(size, name))
    }

    /// Constrains dimension `dim` to `[start:stride:stop]`.
    #[inline]
    pub fn add_constraint(&mut self, dim: usize, start: usize, stride: usize, stop: usize) -> Result<(), CacheError> {
        dispatch_cached_array!(self, arr => arr.add_constraint(dim, start, stride, stop))
    }

    #[inline]
    pub fn clear_constraints(&mut self) {
        dispatch_cached_array!(self, arr => arr.clear_constraints())
    }

    /// Replaces the value source.
    ///
    /// The source's element kind is only checked when values are pulled.
    pub fn set_source<S>(&mut self, source: S)
    where
        S: ValueSource + Clone + 'static,
    {
        dispatch_cached_array!(self, arr => arr.set_source(source))
    }

    /// Sets new values from a type-erased buffer. Errors with `TypeMismatch`
    /// on a foreign kind.
    pub fn set_value_buffer(&mut self, values: ValueBuffer) -> Result<(), CacheError> {
        dispatch_cached_array!(self, arr => arr.set_value_buffer(values))
    }

    /// The constrained slice of the last `read`, type-erased.
    pub fn constrained_value_buffer(&self) -> ValueBuffer {
        dispatch_cached_array!(self, arr => arr.constrained_value_buffer())
    }

    /// Number of values in the constrained slice.
    #[inline]
    pub fn len(&self) -> usize {
        dispatch_cached_array!(self, arr => arr.constrained_values().len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn set_validate_bounds(&mut self, validate: bool) {
        dispatch_cached_array!(self, arr => arr.set_validate_bounds(validate))
    }

    fn mismatch(&self, expected: ElementKind) -> CacheError {
        CacheError::TypeMismatch {
            expected: expected.name(),
            found: self.element_kind().name(),
        }
    }
}

impl ArrayCache for CachedArray {
    #[inline]
    fn name(&self) -> &str {
        dispatch_cached_array!(self, arr => arr.name())
    }

    #[inline]
    fn element_kind(&self) -> ElementKind {
        dispatch_cached_array!(self, arr => arr.element_kind())
    }

    fn live_shape(&self) -> Result<Shape, CacheError> {
        dispatch_cached_array!(self, arr => arr.live_shape())
    }

    fn last_used_constraints(&self) -> Option<&Shape> {
        dispatch_cached_array!(self, arr => arr.last_used_constraints())
    }

    fn set_last_used_constraints(&mut self, shape: Option<Shape>) {
        dispatch_cached_array!(self, arr => arr.set_last_used_constraints(shape))
    }

    fn cache_values_if_needed(&mut self) -> Result<(), CacheError> {
        dispatch_cached_array!(self, arr => arr.cache_values_if_needed())
    }

    fn copy_data_from(&mut self, dims: &[Dimension], values: &ValueBuffer) -> Result<(), CacheError> {
        dispatch_cached_array!(self, arr => arr.copy_data_from(dims, values))
    }

    fn is_data_cached(&self) -> bool {
        dispatch_cached_array!(self, arr => arr.is_data_cached())
    }

    fn create_and_set_constrained_value_buffer(&mut self) -> Result<(), CacheError> {
        dispatch_cached_array!(self, arr => arr.create_and_set_constrained_value_buffer())
    }

    // Delegated whole so the typed arm's own read is the one that runs.
    fn read(&mut self) -> Result<(), CacheError> {
        dispatch_cached_array!(self, arr => arr.read())
    }

    fn is_valid(&self) -> bool {
        dispatch_cached_array!(self, arr => arr.is_valid())
    }
}

macro_rules! impl_cached_array_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<TypedArrayCache<$ty>> for CachedArray {
                #[inline]
                fn from(arr: TypedArrayCache<$ty>) -> Self {
                    CachedArray::$variant(arr)
                }
            }
        )+
    };
}

impl_cached_array_from!(
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    f32 => Float32,
    f64 => Float64,
    String => String,
);

impl Display for CachedArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        dispatch_cached_array!(self, arr => write!(f, "CachedArray::{}\n{}", arr.element_kind(), arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_grid() -> CachedArray {
        let mut arr = CachedArray::from_type_name("Float64", "t").unwrap();
        arr.append_dim(2, "y");
        arr.append_dim(3, "x");
        arr.set_source(ValueBuffer::from(vec![0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0]));
        arr
    }

    #[test]
    fn test_new_matches_kind() {
        for kind in ElementKind::ALL {
            let arr = CachedArray::new(kind, "a");
            assert_eq!(arr.element_kind(), kind);
            assert_eq!(arr.name(), "a");
            assert!(arr.is_empty());
        }
    }

    #[test]
    fn test_from_type_name_accepts_ncml_names() {
        let arr = CachedArray::from_type_name("float", "sst").unwrap();
        assert_eq!(arr.element_kind(), ElementKind::Float32);
        assert!(arr.f32_ref().is_ok());
        let arr = CachedArray::from_type_name("double", "sst").unwrap();
        assert_eq!(arr.element_kind(), ElementKind::Float64);
    }

    #[test]
    fn test_from_type_name_unknown() {
        assert!(matches!(
            CachedArray::from_type_name("Int64", "a"),
            Err(CacheError::ParseError { .. })
        ));
    }

    #[test]
    fn test_read_through_enum() {
        let mut arr = float_grid();
        arr.add_constraint(1, 2, 1, 2).unwrap();
        arr.read().unwrap();
        assert!(arr.is_valid());
        assert_eq!(arr.f64_ref().unwrap().constrained_values(), &[2.0, 5.0]);
        assert_eq!(arr.constrained_value_buffer(), ValueBuffer::from(vec![2.0f64, 5.0]));
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn test_typed_access() {
        let mut arr = float_grid();
        assert!(arr.typed::<f64>().is_ok());
        assert_eq!(
            arr.typed::<i32>().unwrap_err(),
            CacheError::TypeMismatch { expected: "Int32", found: "Float64" }
        );
        assert!(matches!(arr.i16_mut(), Err(CacheError::TypeMismatch { expected: "Int16", .. })));
        arr.typed_mut::<f64>().unwrap().set_validate_bounds(true);
        assert!(arr.f64_ref().unwrap().validate_bounds());
    }

    #[test]
    fn test_wrong_source_kind_fails_on_read() {
        let mut arr = CachedArray::new(ElementKind::Int32, "n");
        arr.append_dim(2, "x");
        arr.set_source(ValueBuffer::from(vec![1u8, 2]));
        assert!(matches!(arr.read(), Err(CacheError::TypeMismatch { .. })));
        assert!(arr.set_value_buffer(ValueBuffer::from(vec![1u8, 2])).is_err());
    }

    #[test]
    fn test_from_typed() {
        let typed = TypedArrayCache::<u16>::from_values("u", vec![Dimension::new(1, "x")], vec![9]);
        let mut arr = CachedArray::from(typed);
        arr.read().unwrap();
        assert_eq!(arr.u16_ref().unwrap().constrained_values(), &[9]);
    }
}
