//! # **ValueBuffer Module** - *Type-Erased Flat Value Buffer*
//!
//! `ValueBuffer` is the generic value buffer that sits between an array's value
//! source and its typed cache. It holds a flat, row-major run of values of one
//! element kind, in a 64-byte aligned `Vec64<T>`.
//!
//! ## Features
//! - one arm per supported element kind, plus `Null` for "no values yet"
//! - zero-cost typed borrows via [`ValueBuffer::typed`] when the kind is known
//! - literal value list parsing via [`ValueBuffer::parse`]
//! - acts as a [`ValueSource`](crate::ValueSource) for literal datasets

use std::fmt;

use vec64::Vec64;

use crate::enums::element_kind::ElementKind;
use crate::enums::error::CacheError;
use crate::impl_value_buffer_from;
use crate::traits::element::Element;

/// # ValueBuffer
///
/// Flat row-major value buffer of a single element kind.
///
/// ## Usage
/// - Produced by value sources and consumed in one bulk pull by a typed cache.
/// - Typed code borrows its values with `.typed::<T>()`, which fails with
///   `CacheError::TypeMismatch` when the buffer holds another kind.
#[derive(Clone, PartialEq, Default)]
pub enum ValueBuffer {
    Byte(Vec64<u8>),
    Int16(Vec64<i16>),
    UInt16(Vec64<u16>),
    Int32(Vec64<i32>),
    UInt32(Vec64<u32>),
    Float32(Vec64<f32>),
    Float64(Vec64<f64>),
    String(Vec64<String>),
    #[default]
    Null,
}

impl_value_buffer_from!(
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    f32 => Float32,
    f64 => Float64,
    String => String,
);

impl From<Vec<&str>> for ValueBuffer {
    #[inline]
    fn from(values: Vec<&str>) -> Self {
        ValueBuffer::String(values.into_iter().map(str::to_string).collect())
    }
}

impl ValueBuffer {
    /// Builds a buffer from typed values.
    #[inline]
    pub fn from_values<T: Element>(values: Vec<T>) -> Self {
        T::into_buffer(Vec64::from(values))
    }

    /// Returns the number of values held.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            ValueBuffer::Byte(v) => v.len(),
            ValueBuffer::Int16(v) => v.len(),
            ValueBuffer::UInt16(v) => v.len(),
            ValueBuffer::Int32(v) => v.len(),
            ValueBuffer::UInt32(v) => v.len(),
            ValueBuffer::Float32(v) => v.len(),
            ValueBuffer::Float64(v) => v.len(),
            ValueBuffer::String(v) => v.len(),
            ValueBuffer::Null => 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element kind held, or `None` for `Null`.
    #[inline]
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            ValueBuffer::Byte(_) => Some(ElementKind::Byte),
            ValueBuffer::Int16(_) => Some(ElementKind::Int16),
            ValueBuffer::UInt16(_) => Some(ElementKind::UInt16),
            ValueBuffer::Int32(_) => Some(ElementKind::Int32),
            ValueBuffer::UInt32(_) => Some(ElementKind::UInt32),
            ValueBuffer::Float32(_) => Some(ElementKind::Float32),
            ValueBuffer::Float64(_) => Some(ElementKind::Float64),
            ValueBuffer::String(_) => Some(ElementKind::String),
            ValueBuffer::Null => None,
        }
    }

    /// Kind name for diagnostics; `"Null"` for the empty marker.
    #[inline]
    pub fn kind_name(&self) -> &'static str {
        self.kind().map(|k| k.name()).unwrap_or("Null")
    }

    /// Borrows the values as `&[T]`.
    ///
    /// Errors with `TypeMismatch` if the buffer holds another kind.
    pub fn typed<T: Element>(&self) -> Result<&[T], CacheError> {
        T::slice_of(self).ok_or(CacheError::TypeMismatch {
            expected: T::KIND.name(),
            found: self.kind_name(),
        })
    }

    /// Moves the values out as `Vec64<T>`.
    ///
    /// An empty buffer of any kind, `Null` included, converts to an empty
    /// vector. Otherwise errors with `TypeMismatch` on a foreign kind.
    pub fn into_typed<T: Element>(self) -> Result<Vec64<T>, CacheError> {
        match T::take_from(self) {
            Ok(v) => Ok(v),
            Err(other) if other.is_empty() => Ok(Vec64::new()),
            Err(other) => Err(CacheError::TypeMismatch {
                expected: T::KIND.name(),
                found: other.kind_name(),
            }),
        }
    }

    /// Parses a separated literal value list into a buffer of `kind`.
    ///
    /// Tokens are split on `separator`, or on whitespace when it is `None`.
    /// For numeric kinds empty tokens are skipped; a `String` buffer keeps
    /// tokens verbatim when an explicit separator is given.
    pub fn parse(kind: ElementKind, text: &str, separator: Option<&str>) -> Result<Self, CacheError> {
        let tokens: Vec<&str> = match separator {
            Some(sep) if !sep.is_empty() => text.split(sep).collect(),
            _ => text.split_whitespace().collect(),
        };
        match kind {
            ElementKind::Byte => parse_tokens::<u8>(&tokens),
            ElementKind::Int16 => parse_tokens::<i16>(&tokens),
            ElementKind::UInt16 => parse_tokens::<u16>(&tokens),
            ElementKind::Int32 => parse_tokens::<i32>(&tokens),
            ElementKind::UInt32 => parse_tokens::<u32>(&tokens),
            ElementKind::Float32 => parse_tokens::<f32>(&tokens),
            ElementKind::Float64 => parse_tokens::<f64>(&tokens),
            ElementKind::String => Ok(ValueBuffer::String(
                tokens.iter().map(|t| t.to_string()).collect(),
            )),
        }
    }
}

fn parse_tokens<T: Element>(tokens: &[&str]) -> Result<ValueBuffer, CacheError> {
    let mut out = Vec64::with_capacity(tokens.len());
    for token in tokens.iter().filter(|t| !t.trim().is_empty()) {
        out.push(T::parse_token(token)?);
    }
    Ok(T::into_buffer(out))
}

impl fmt::Debug for ValueBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueBuffer::Byte(v) => f.debug_tuple("Byte").field(&v.as_slice()).finish(),
            ValueBuffer::Int16(v) => f.debug_tuple("Int16").field(&v.as_slice()).finish(),
            ValueBuffer::UInt16(v) => f.debug_tuple("UInt16").field(&v.as_slice()).finish(),
            ValueBuffer::Int32(v) => f.debug_tuple("Int32").field(&v.as_slice()).finish(),
            ValueBuffer::UInt32(v) => f.debug_tuple("UInt32").field(&v.as_slice()).finish(),
            ValueBuffer::Float32(v) => f.debug_tuple("Float32").field(&v.as_slice()).finish(),
            ValueBuffer::Float64(v) => f.debug_tuple("Float64").field(&v.as_slice()).finish(),
            ValueBuffer::String(v) => f.debug_tuple("String").field(&v.as_slice()).finish(),
            ValueBuffer::Null => f.write_str("Null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_kind() {
        let buf = ValueBuffer::from(vec![1.0f64, 2.0]);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.kind(), Some(ElementKind::Float64));
        assert!(ValueBuffer::Null.is_empty());
        assert_eq!(ValueBuffer::default().kind_name(), "Null");
    }

    #[test]
    fn test_typed_borrow_and_mismatch() {
        let buf = ValueBuffer::from(vec![7u16, 8]);
        assert_eq!(buf.typed::<u16>().unwrap(), &[7, 8]);
        assert_eq!(
            buf.typed::<i32>().unwrap_err(),
            CacheError::TypeMismatch { expected: "Int32", found: "UInt16" }
        );
    }

    #[test]
    fn test_into_typed() {
        let buf = ValueBuffer::from(vec![1i16, 2]);
        assert_eq!(buf.clone().into_typed::<i16>().unwrap().as_slice(), &[1, 2]);
        assert!(matches!(
            buf.into_typed::<u16>(),
            Err(CacheError::TypeMismatch { expected: "UInt16", found: "Int16" })
        ));
        // empty buffers carry no type to mismatch on
        assert!(ValueBuffer::Null.into_typed::<f32>().unwrap().is_empty());
        assert!(ValueBuffer::from(Vec::<u8>::new()).into_typed::<f64>().unwrap().is_empty());
    }

    #[test]
    fn test_parse_whitespace_numeric() {
        let buf = ValueBuffer::parse(ElementKind::Int32, " 1 2\n3\t-4 ", None).unwrap();
        assert_eq!(buf.typed::<i32>().unwrap(), &[1, 2, 3, -4]);
    }

    #[test]
    fn test_parse_custom_separator() {
        let buf = ValueBuffer::parse(ElementKind::Float32, "0.5,1.5, 2.5", Some(",")).unwrap();
        assert_eq!(buf.typed::<f32>().unwrap(), &[0.5, 1.5, 2.5]);

        let s = ValueBuffer::parse(ElementKind::String, "a b|c", Some("|")).unwrap();
        assert_eq!(s.typed::<String>().unwrap(), &["a b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_parse_bad_token() {
        let err = ValueBuffer::parse(ElementKind::Byte, "1 2 300", None).unwrap_err();
        assert_eq!(err, CacheError::ParseError { token: "300".into(), kind: "Byte" });
    }
}
