//! Array element access and array-type introspection.
//!
//! Stateless helpers over array values plus [`TypeNode`], the resolver a
//! parsed type annotation uses to produce its array type descriptor. The
//! resolver builds a zero-length exemplar array and reads back its
//! concrete type instead of synthesizing an array type name by hand;
//! the result is memoized on the node.

use once_cell::sync::OnceCell;

use hostscript_core::{
    ArrayStorage, HostValue, NativeError, ObjectRef, ReflectError, ReflectResult, TypeDesc, Value,
};

use crate::engine::Engine;
use crate::{invoke, signature};

/// Read an array element, wrapped under the element type.
pub fn get_index(target: &Value, index: usize) -> ReflectResult<Value> {
    let storage = array_storage(target)?;
    let raw = storage
        .get(index)
        .map_err(|source| ReflectError::ArrayAccess { source })?;
    invoke::wrap_value(raw, Some(storage.elem_type()))
}

/// Store a value into an array element.
pub fn set_index(target: &Value, index: usize, value: &Value) -> ReflectResult<()> {
    let storage = array_storage(target)?;
    let raw = match value {
        Value::Null => HostValue::Null,
        Value::Prim(p) => HostValue::Prim(*p),
        Value::Object(obj) => HostValue::Object(obj.clone()),
        Value::Void | Value::Script(_) => {
            return Err(ReflectError::ArrayAccess {
                source: NativeError::ElementType {
                    expected: element_label(storage.elem_type()),
                },
            });
        }
    };
    storage
        .set(index, raw)
        .map_err(|source| ReflectError::ArrayAccess { source })
}

/// The ultimate base element type of an array type.
pub fn array_base_type(desc: &TypeDesc) -> ReflectResult<&TypeDesc> {
    if !desc.is_array() {
        return Err(ReflectError::ArrayAccess {
            source: NativeError::NotAnArray,
        });
    }
    Ok(desc.base_elem_type())
}

/// Array dimensionality; 0 for non-array types.
pub fn array_dimensions(desc: &TypeDesc) -> usize {
    desc.dimensions()
}

fn array_storage(target: &Value) -> ReflectResult<&ArrayStorage> {
    match target {
        Value::Object(obj) => obj.array_storage().ok_or(ReflectError::ArrayAccess {
            source: NativeError::NotAnArray,
        }),
        _ => Err(ReflectError::ArrayAccess {
            source: NativeError::NotAnArray,
        }),
    }
}

fn element_label(elem: &TypeDesc) -> String {
    match elem {
        TypeDesc::Prim(kind) => kind.name().to_string(),
        _ => "reference".to_string(),
    }
}

impl Engine<'_> {
    /// Read an array element.
    pub fn get_index(&self, target: &Value, index: usize) -> ReflectResult<Value> {
        get_index(target, index)
    }

    /// Store a value into an array element.
    pub fn set_index(&self, target: &Value, index: usize, value: &Value) -> ReflectResult<()> {
        set_index(target, index, value)
    }

    /// The ultimate base element type of an array type.
    pub fn array_base_type<'a>(&self, desc: &'a TypeDesc) -> ReflectResult<&'a TypeDesc> {
        array_base_type(desc)
    }

    /// Array dimensionality; 0 for non-array types.
    pub fn array_dimensions(&self, desc: &TypeDesc) -> usize {
        array_dimensions(desc)
    }

    /// Render a type descriptor as its source-level name, arrays as
    /// `base[]...[]`.
    pub fn normalize_class_name(&self, desc: &TypeDesc) -> String {
        signature::describe_type(self.model, desc)
    }
}

/// A parsed type annotation: base type plus requested dimensionality.
///
/// Resolution constructs a zero-length exemplar array and reads back its
/// concrete type. The result is memoized per node; base and
/// dimensionality are fixed once resolution has run, so the cell is
/// write-once (concurrent duplicate computation is harmless).
#[derive(Debug)]
pub struct TypeNode {
    base: TypeDesc,
    dims: usize,
    resolved: OnceCell<TypeDesc>,
}

impl TypeNode {
    /// A node for a plain (non-array) type.
    pub fn new(base: TypeDesc) -> Self {
        Self::with_dimensions(base, 0)
    }

    /// A node for a `dims`-dimensional array over `base`.
    pub fn with_dimensions(base: TypeDesc, dims: usize) -> Self {
        TypeNode {
            base,
            dims,
            resolved: OnceCell::new(),
        }
    }

    /// Add one array dimension (used while the annotation is parsed).
    pub fn add_dimension(&mut self) {
        self.dims += 1;
        self.resolved = OnceCell::new();
    }

    pub fn dimensions(&self) -> usize {
        self.dims
    }

    /// The resolved type descriptor for this annotation.
    pub fn resolve(&self) -> &TypeDesc {
        self.resolved.get_or_init(|| {
            if self.dims == 0 {
                self.base.clone()
            } else {
                ObjectRef::zeroed_array(self.base.clone(), self.dims)
                    .class()
                    .clone()
            }
        })
    }
}
