//! Type descriptors for parameters, fields, and runtime values.
//!
//! A [`TypeDesc`] is either a primitive kind, a host object type identified
//! by its [`TypeHash`], or an array (nested one level per dimension). Null
//! is representable only on the argument side of a call, as
//! `Option<TypeDesc>`, never as a declared type.

use crate::{PrimitiveKind, TypeHash};

/// A parameter, field, or runtime value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    /// A primitive scalar kind.
    Prim(PrimitiveKind),
    /// A host object type.
    Object(TypeHash),
    /// An array; the element type is one dimension down.
    Array(Box<TypeDesc>),
}

impl TypeDesc {
    /// Descriptor for a host object type by name.
    pub fn object(name: &str) -> Self {
        TypeDesc::Object(TypeHash::from_name(name))
    }

    /// Descriptor for an array of `elem`.
    pub fn array(elem: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(elem))
    }

    /// Descriptor for a `dims`-dimensional array over `base`.
    pub fn array_of(base: TypeDesc, dims: usize) -> Self {
        let mut desc = base;
        for _ in 0..dims {
            desc = TypeDesc::array(desc);
        }
        desc
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDesc::Prim(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeDesc::Array(_))
    }

    /// The element type one dimension down, if this is an array.
    pub fn component(&self) -> Option<&TypeDesc> {
        match self {
            TypeDesc::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// The ultimate non-array element type. Returns `self` for non-arrays.
    pub fn base_elem_type(&self) -> &TypeDesc {
        match self {
            TypeDesc::Array(elem) => elem.base_elem_type(),
            other => other,
        }
    }

    /// Array dimensionality; 0 for non-arrays.
    pub fn dimensions(&self) -> usize {
        match self {
            TypeDesc::Array(elem) => 1 + elem.dimensions(),
            _ => 0,
        }
    }
}
