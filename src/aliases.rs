//! # Aliases Module
//!
//! Short names for the plain types that flow through the index arithmetic.

/// Per-dimension indices into unconstrained coordinate space, leftmost slowest.
pub type IndexTuple = Vec<usize>;

/// Offset into a flat row-major buffer.
pub type Offset = usize;

/// Element count.
pub type Length = usize;
