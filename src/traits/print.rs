//! # Print Module
//!
//! Console output for dimensions, shapes and cached arrays, plus the
//! truncated value preview their `Display` impls end with.
use std::fmt::{self, Display, Formatter};

/// Values shown before a preview is cut short.
pub(crate) const MAX_PREVIEW: usize = 50;

/// Writes a value's `Display` form to stdout, for quick inspection of a
/// `Shape` or an array's last constrained read with `arr.print()`.
pub trait Print: Display {
    #[inline]
    fn print(&self) {
        println!("{self}");
    }
}

impl<T: Display + ?Sized> Print for T {}

/// Writes `[v0, v1, …]`, truncated to `MAX_PREVIEW` values.
pub(crate) fn write_preview<T: Display>(f: &mut Formatter<'_>, values: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.iter().take(MAX_PREVIEW).enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", v)?;
    }
    if values.len() > MAX_PREVIEW {
        write!(f, ", … ({} total)", values.len())?;
    }
    write!(f, "]")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Preview(Vec<u32>);

    impl Display for Preview {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write_preview(f, &self.0)
        }
    }

    #[test]
    fn test_short_preview_is_complete() {
        assert_eq!(Preview(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(Preview(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_long_preview_is_truncated() {
        let s = Preview((0..60).collect()).to_string();
        assert!(s.starts_with("[0, 1, 2"));
        assert!(s.contains(", 49, … (60 total)]"));
        assert!(!s.contains(", 50,"));
    }
}
