//! # ElementKind Enum Module
//!
//! Names the atomic element types a cached array can hold. These are the
//! DAP2 atomic types, which is what variables arriving from the data server
//! are declared as.

use std::fmt;
use std::str::FromStr;

use crate::enums::error::CacheError;

/// Atomic element kind of a cached array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
    String,
}

impl ElementKind {
    /// All kinds, in declaration order.
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Byte,
        ElementKind::Int16,
        ElementKind::UInt16,
        ElementKind::Int32,
        ElementKind::UInt32,
        ElementKind::Float32,
        ElementKind::Float64,
        ElementKind::String,
    ];

    /// Type name as it appears in dataset declarations.
    pub const fn name(&self) -> &'static str {
        match self {
            ElementKind::Byte => "Byte",
            ElementKind::Int16 => "Int16",
            ElementKind::UInt16 => "UInt16",
            ElementKind::Int32 => "Int32",
            ElementKind::UInt32 => "UInt32",
            ElementKind::Float32 => "Float32",
            ElementKind::Float64 => "Float64",
            ElementKind::String => "String",
        }
    }

    /// True for every kind except `String`.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, ElementKind::String)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = CacheError;

    /// Parses a type name.
    ///
    /// The lower-case NcML names (`char`, `byte`, `short`, `int`, `long`,
    /// `float`, `double`, `string`) match exactly; NcML `byte` is signed, so
    /// it widens to `Int16`. DAP names then match ignoring ASCII case, and
    /// `Url` is accepted as a string kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(kind) = ncml_kind(trimmed) {
            return Ok(kind);
        }
        if trimmed.eq_ignore_ascii_case("url") {
            return Ok(ElementKind::String);
        }
        ElementKind::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CacheError::ParseError {
                token: s.to_string(),
                kind: "element kind",
            })
    }
}

fn ncml_kind(name: &str) -> Option<ElementKind> {
    match name {
        "char" => Some(ElementKind::Byte),
        "byte" | "short" => Some(ElementKind::Int16),
        "int" | "long" => Some(ElementKind::Int32),
        "float" => Some(ElementKind::Float32),
        "double" => Some(ElementKind::Float64),
        "string" => Some(ElementKind::String),
        _ => None,
    }
}
