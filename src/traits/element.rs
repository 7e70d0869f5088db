//! # Element Trait Module
//!
//! Bounds for the element types a [`TypedArrayCache`](crate::TypedArrayCache) can store.
//!
//! [`Element`] ties a Rust type to its [`ElementKind`] and to its arm of the
//! type-erased [`ValueBuffer`], so that typed code can borrow its values out of a
//! generic buffer with a single match and no casting.
//! [`Numeric`] narrows that to the numeric kinds, on top of *num-traits*.

use std::fmt::{Debug, Display};

use num_traits::{Num, NumCast, ToPrimitive};
use vec64::Vec64;

use crate::enums::element_kind::ElementKind;
use crate::enums::error::CacheError;
use crate::enums::value_buffer::ValueBuffer;
use crate::impl_element;

/// Trait for types valid as elements of a cached array.
///
/// Useful when specifying `my_fn::<T: Element>() {}`.
///
/// Implemented for the eight atomic kinds only: `u8`, `i16`, `u16`, `i32`,
/// `u32`, `f32`, `f64` and `String`.
pub trait Element: Clone + Default + PartialEq + Debug + Display + Send + Sync + 'static {
    /// The kind tag matching this type.
    const KIND: ElementKind;

    /// Borrows the values out of `buffer` if it holds this type.
    fn slice_of(buffer: &ValueBuffer) -> Option<&[Self]>;

    /// Moves the values out of `buffer` if it holds this type, or hands it back.
    fn take_from(buffer: ValueBuffer) -> Result<Vec64<Self>, ValueBuffer>;

    /// Wraps owned values into the matching `ValueBuffer` arm.
    fn into_buffer(values: Vec64<Self>) -> ValueBuffer;

    /// Parses one literal token.
    fn parse_token(token: &str) -> Result<Self, CacheError>;
}

impl_element!(u8, Byte);
impl_element!(i16, Int16);
impl_element!(u16, UInt16);
impl_element!(i32, Int32);
impl_element!(u32, UInt32);
impl_element!(f32, Float32);
impl_element!(f64, Float64);

impl Element for String {
    const KIND: ElementKind = ElementKind::String;

    #[inline]
    fn slice_of(buffer: &ValueBuffer) -> Option<&[Self]> {
        match buffer {
            ValueBuffer::String(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    #[inline]
    fn take_from(buffer: ValueBuffer) -> Result<Vec64<Self>, ValueBuffer> {
        match buffer {
            ValueBuffer::String(v) => Ok(v),
            other => Err(other),
        }
    }

    #[inline]
    fn into_buffer(values: Vec64<Self>) -> ValueBuffer {
        ValueBuffer::String(values)
    }

    #[inline]
    fn parse_token(token: &str) -> Result<Self, CacheError> {
        Ok(token.to_string())
    }
}

/// Trait for element types that are numerical.
///
/// Extends and constrains the *num-traits* `Num` implementation to fit the
/// crate's element universe. Used by generated value sources.
pub trait Numeric: Element + Num + NumCast + Copy + PartialOrd + ToPrimitive {}
impl Numeric for u8 {}
impl Numeric for i16 {}
impl Numeric for u16 {}
impl Numeric for i32 {}
impl Numeric for u32 {}
impl Numeric for f32 {}
impl Numeric for f64 {}
