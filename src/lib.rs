//! # **Slabcache** - *Constrained hyperslab caching for N-dimensional arrays*
//!
//! Slabcache keeps the full unconstrained dataset of a named multidimensional
//! array in memory, pulled once from its value source, and serves
//! strided hyperslab reads out of it. The constrained slice is only rebuilt
//! when the live constraints actually differ from the ones it was built for.
//!
//! ## Core pieces
//! - [`Dimension`] and [`Shape`]: named, sized, optionally constrained axes,
//!   with row-major index mapping and an odometer [`IndexIterator`] over the
//!   constrained space.
//! - [`TypedArrayCache<T>`]: the cache for one element type, over a
//!   64-byte aligned `Vec64<T>`.
//! - [`CachedArray`]: one enum arm per element kind, for callers that learn
//!   the kind at run time.
//! - [`ArrayCache`]: the object-safe "do we need to recompute?" policy, with
//!   `read()` and `is_valid()` provided.
//! - [`ValueSource`]: where the unconstrained values come from. Literal
//!   [`ValueBuffer`]s, closures and [`ArithmeticSource`] are supported.
//!
//! ## Example
//! ```rust
//! use slabcache::{ArrayCache, CachedArray, ElementKind, ValueBuffer};
//!
//! let mut arr = CachedArray::new(ElementKind::Int32, "grid");
//! arr.append_dim(3, "y");
//! arr.append_dim(4, "x");
//! arr.set_source(ValueBuffer::parse(ElementKind::Int32, "10 11 12 13 14 15 16 17 18 19 20 21", None).unwrap());
//!
//! arr.add_constraint(0, 1, 1, 2).unwrap();
//! arr.add_constraint(1, 0, 2, 3).unwrap();
//! arr.read().unwrap();
//! assert_eq!(arr.i32_ref().unwrap().constrained_values(), &[14, 16, 18, 20]);
//! ```
//!
//! ## Logging
//! Cache population, value injection and constrained-buffer rebuilds are
//! reported through `tracing` at `debug` level, snapshot hits at `trace`.
//! Install any subscriber to see them.
//!
//! ## Features
//! - `parallel_proc`: gathers large hyperslabs with *Rayon*.

pub mod enums {
    pub mod cached_array;
    pub mod element_kind;
    pub mod error;
    pub mod value_buffer;
}

pub mod structs {
    pub mod variants {
        pub mod typed_array_cache;
    }
    pub mod arithmetic_source;
    pub mod dimension;
    pub mod index_iterator;
    pub mod shape;
}

pub mod traits {
    pub mod array_cache;
    pub mod element;
    pub mod print;
    pub mod value_source;
}

pub mod aliases;
pub mod macros;
pub mod utils;

pub use aliases::{IndexTuple, Length, Offset};

pub use enums::cached_array::CachedArray;
pub use enums::element_kind::ElementKind;
pub use enums::error::CacheError;
pub use enums::value_buffer::ValueBuffer;

pub use structs::arithmetic_source::ArithmeticSource;
pub use structs::dimension::Dimension;
pub use structs::index_iterator::IndexIterator;
pub use structs::shape::Shape;
pub use structs::variants::typed_array_cache::TypedArrayCache;

pub use traits::array_cache::ArrayCache;
pub use traits::element::{Element, Numeric};
pub use traits::print::Print;
pub use traits::value_source::{BoxedValueSource, ValueSource};

pub use vec64::Vec64;
