//! # Macros Module
//!
//! Internal macros that stamp out the per-kind boilerplate for
//! [`Element`](crate::Element), [`ValueBuffer`](crate::ValueBuffer) and
//! [`CachedArray`](crate::CachedArray).

/// Implements `Element` for a numeric primitive bound to one `ValueBuffer` arm.
#[macro_export]
macro_rules! impl_element {
    ($ty:ty, $variant:ident) => {
        impl $crate::traits::element::Element for $ty {
            const KIND: $crate::enums::element_kind::ElementKind =
                $crate::enums::element_kind::ElementKind::$variant;

            #[inline]
            fn slice_of(buffer: &$crate::enums::value_buffer::ValueBuffer) -> Option<&[Self]> {
                match buffer {
                    $crate::enums::value_buffer::ValueBuffer::$variant(v) => Some(v.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn take_from(
                buffer: $crate::enums::value_buffer::ValueBuffer,
            ) -> Result<vec64::Vec64<Self>, $crate::enums::value_buffer::ValueBuffer> {
                match buffer {
                    $crate::enums::value_buffer::ValueBuffer::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }

            #[inline]
            fn into_buffer(values: vec64::Vec64<Self>) -> $crate::enums::value_buffer::ValueBuffer {
                $crate::enums::value_buffer::ValueBuffer::$variant(values)
            }

            #[inline]
            fn parse_token(token: &str) -> Result<Self, $crate::enums::error::CacheError> {
                token.trim().parse::<$ty>().map_err(|_| {
                    $crate::enums::error::CacheError::ParseError {
                        token: token.to_string(),
                        kind: stringify!($variant),
                    }
                })
            }
        }
    };
}

/// Implements `From<Vec<T>>` and `From<Vec64<T>>` for `ValueBuffer`.
#[macro_export]
macro_rules! impl_value_buffer_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<Vec<$ty>> for $crate::enums::value_buffer::ValueBuffer {
                #[inline]
                fn from(values: Vec<$ty>) -> Self {
                    $crate::enums::value_buffer::ValueBuffer::$variant(vec64::Vec64::from(values))
                }
            }

            impl From<vec64::Vec64<$ty>> for $crate::enums::value_buffer::ValueBuffer {
                #[inline]
                fn from(values: vec64::Vec64<$ty>) -> Self {
                    $crate::enums::value_buffer::ValueBuffer::$variant(values)
                }
            }
        )+
    };
}

/// Forwards a method call to the typed cache inside every `CachedArray` arm.
#[macro_export]
macro_rules! dispatch_cached_array {
    ($self:expr, $arr:ident => $body:expr) => {
        match $self {
            $crate::enums::cached_array::CachedArray::Byte($arr) => $body,
            $crate::enums::cached_array::CachedArray::Int16($arr) => $body,
            $crate::enums::cached_array::CachedArray::UInt16($arr) => $body,
            $crate::enums::cached_array::CachedArray::Int32($arr) => $body,
            $crate::enums::cached_array::CachedArray::UInt32($arr) => $body,
            $crate::enums::cached_array::CachedArray::Float32($arr) => $body,
            $crate::enums::cached_array::CachedArray::Float64($arr) => $body,
            $crate::enums::cached_array::CachedArray::String($arr) => $body,
        }
    };
}
