//! Primitive scalar kinds and the tagged scalar value.
//!
//! The host language distinguishes eight primitive kinds. The interpreter
//! keeps scalars tagged with their kind ([`Primitive`]) so overload
//! resolution can reason about them without consulting the host.
//!
//! Widening between kinds is one-directional and information-preserving.
//! `char` deliberately does not widen to `short` or `byte`, matching the
//! host language semantics being modeled.

use std::fmt;

/// Primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// All kinds, for exhaustive table checks.
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Get the source-level name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "boolean",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// One-directional primitive widening.
    ///
    /// Returns true when a value of this kind may be passed where `target`
    /// is declared. A kind never widens to itself; see [`accepts`] for the
    /// reflexive check used by parameter matching.
    ///
    /// [`accepts`]: PrimitiveKind::accepts
    pub fn widens_to(self, target: PrimitiveKind) -> bool {
        use PrimitiveKind::*;
        matches!(
            (self, target),
            (Byte, Short)
                | (Byte, Int)
                | (Byte, Long)
                | (Byte, Float)
                | (Byte, Double)
                | (Short, Int)
                | (Short, Long)
                | (Short, Float)
                | (Short, Double)
                // char skips short and byte on purpose
                | (Char, Int)
                | (Char, Long)
                | (Char, Float)
                | (Char, Double)
                | (Int, Long)
                | (Int, Float)
                | (Int, Double)
                | (Long, Float)
                | (Long, Double)
                | (Float, Double)
        )
    }

    /// Check whether a parameter of this kind accepts an argument of
    /// `source` kind: identity or widening.
    pub fn accepts(self, source: PrimitiveKind) -> bool {
        source == self || source.widens_to(self)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A tagged primitive scalar.
///
/// Carries both the semantic kind and the raw value, so a scalar produced by
/// wrapping a host result stays distinguishable from the host's own boxed
/// representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Primitive {
    /// The kind tag of this scalar.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Bool(_) => PrimitiveKind::Bool,
            Primitive::Char(_) => PrimitiveKind::Char,
            Primitive::Byte(_) => PrimitiveKind::Byte,
            Primitive::Short(_) => PrimitiveKind::Short,
            Primitive::Int(_) => PrimitiveKind::Int,
            Primitive::Long(_) => PrimitiveKind::Long,
            Primitive::Float(_) => PrimitiveKind::Float,
            Primitive::Double(_) => PrimitiveKind::Double,
        }
    }

    /// Integral view of the raw value, if the kind has one.
    ///
    /// `char` reads as its code point. Floating values truncate.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Primitive::Bool(_) => None,
            Primitive::Char(c) => Some(c as i64),
            Primitive::Byte(v) => Some(v as i64),
            Primitive::Short(v) => Some(v as i64),
            Primitive::Int(v) => Some(v as i64),
            Primitive::Long(v) => Some(v),
            Primitive::Float(v) => Some(v as i64),
            Primitive::Double(v) => Some(v as i64),
        }
    }

    /// Floating view of the raw value, if the kind has one.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Primitive::Bool(_) => None,
            Primitive::Char(c) => Some(c as u32 as f64),
            Primitive::Byte(v) => Some(v as f64),
            Primitive::Short(v) => Some(v as f64),
            Primitive::Int(v) => Some(v as f64),
            Primitive::Long(v) => Some(v as f64),
            Primitive::Float(v) => Some(v as f64),
            Primitive::Double(v) => Some(v),
        }
    }

    /// Re-tag this scalar under a declared kind.
    ///
    /// Used when wrapping host results: the declared return kind wins over
    /// the runtime kind of the raw value. Numeric kinds convert freely;
    /// `bool` and `char` only accept their own kind (`char` additionally
    /// converts out to the numeric kinds, never in).
    pub fn convert_to(&self, kind: PrimitiveKind) -> Option<Primitive> {
        match kind {
            PrimitiveKind::Bool => match self {
                Primitive::Bool(b) => Some(Primitive::Bool(*b)),
                _ => None,
            },
            PrimitiveKind::Char => match self {
                Primitive::Char(c) => Some(Primitive::Char(*c)),
                _ => None,
            },
            PrimitiveKind::Byte => self.as_i64().map(|v| Primitive::Byte(v as i8)),
            PrimitiveKind::Short => self.as_i64().map(|v| Primitive::Short(v as i16)),
            PrimitiveKind::Int => self.as_i64().map(|v| Primitive::Int(v as i32)),
            PrimitiveKind::Long => self.as_i64().map(Primitive::Long),
            PrimitiveKind::Float => self.as_f64().map(|v| Primitive::Float(v as f32)),
            PrimitiveKind::Double => self.as_f64().map(Primitive::Double),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(v) => write!(f, "{v}"),
            Primitive::Char(v) => write!(f, "'{v}'"),
            Primitive::Byte(v) => write!(f, "{v}"),
            Primitive::Short(v) => write!(f, "{v}"),
            Primitive::Int(v) => write!(f, "{v}"),
            Primitive::Long(v) => write!(f, "{v}"),
            Primitive::Float(v) => write!(f, "{v}"),
            Primitive::Double(v) => write!(f, "{v}"),
        }
    }
}
