//! Host object instances for the in-memory object-model binding.
//!
//! A [`HostObject`] carries its concrete runtime type and either a named
//! field map (plain instances) or array storage. Instances are shared
//! through [`ObjectRef`] (`Arc`), so values can be passed between the
//! interpreter and native bodies without copying. Interior mutability is
//! owned by the binding, not the engine: field and element storage sit
//! behind a `Mutex`, the runtime type is immutable after construction.

use std::fmt;
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::{HostValue, NativeError, Primitive, PrimitiveKind, TypeDesc};

/// A shared reference to a host object.
#[derive(Clone)]
pub struct ObjectRef(Arc<HostObject>);

impl ObjectRef {
    fn new(object: HostObject) -> Self {
        ObjectRef(Arc::new(object))
    }

    /// Allocate a plain instance of `class` with no fields set.
    pub fn instance(class: TypeDesc) -> Self {
        Self::new(HostObject {
            class,
            body: ObjectBody::Fields(Mutex::new(FxHashMap::default())),
        })
    }

    /// Allocate a plain instance with initial field values.
    pub fn instance_with_fields(
        class: TypeDesc,
        fields: impl IntoIterator<Item = (String, HostValue)>,
    ) -> Self {
        Self::new(HostObject {
            class,
            body: ObjectBody::Fields(Mutex::new(fields.into_iter().collect())),
        })
    }

    /// Allocate a one-dimensional array of `len` elements of `elem`,
    /// default-initialized.
    pub fn array(elem: TypeDesc, len: usize) -> Self {
        let class = TypeDesc::array(elem.clone());
        Self::new(HostObject {
            class,
            body: ObjectBody::Array(ArrayStorage::new(elem, len)),
        })
    }

    /// Allocate a zero-length exemplar array with `dims` dimensions over
    /// `base`. Its concrete type is the `dims`-dimensional array type.
    pub fn zeroed_array(base: TypeDesc, dims: usize) -> Self {
        debug_assert!(dims > 0);
        Self::array(TypeDesc::array_of(base, dims - 1), 0)
    }

    /// The concrete runtime type of the object.
    pub fn class(&self) -> &TypeDesc {
        &self.0.class
    }

    /// Array storage, if this object is an array.
    pub fn array_storage(&self) -> Option<&ArrayStorage> {
        match &self.0.body {
            ObjectBody::Array(storage) => Some(storage),
            ObjectBody::Fields(_) => None,
        }
    }

    /// Read a named instance field. Missing entries read as their
    /// default (fields are lazily materialized).
    pub fn field(&self, name: &str, declared: &TypeDesc) -> HostValue {
        match &self.0.body {
            ObjectBody::Fields(map) => map
                .lock()
                .expect("field map poisoned")
                .get(name)
                .cloned()
                .unwrap_or_else(|| default_host_value(declared)),
            ObjectBody::Array(_) => HostValue::Null,
        }
    }

    /// Write a named instance field.
    pub fn set_field(&self, name: &str, value: HostValue) {
        if let ObjectBody::Fields(map) = &self.0.body {
            map.lock().expect("field map poisoned").insert(name.to_string(), value);
        }
    }

    pub fn ptr_eq(a: &ObjectRef, b: &ObjectRef) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("class", &self.0.class)
            .finish_non_exhaustive()
    }
}

/// A live host object: concrete type plus body.
struct HostObject {
    class: TypeDesc,
    body: ObjectBody,
}

enum ObjectBody {
    Fields(Mutex<FxHashMap<String, HostValue>>),
    Array(ArrayStorage),
}

/// Element storage for host arrays.
pub struct ArrayStorage {
    elem: TypeDesc,
    data: Mutex<Vec<HostValue>>,
}

impl ArrayStorage {
    fn new(elem: TypeDesc, len: usize) -> Self {
        let fill = default_host_value(&elem);
        ArrayStorage {
            elem,
            data: Mutex::new(vec![fill; len]),
        }
    }

    /// The declared element type.
    pub fn elem_type(&self) -> &TypeDesc {
        &self.elem
    }

    pub fn len(&self) -> usize {
        self.data.lock().expect("array storage poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the element at `index`.
    pub fn get(&self, index: usize) -> Result<HostValue, NativeError> {
        let data = self.data.lock().expect("array storage poisoned");
        data.get(index)
            .cloned()
            .ok_or(NativeError::IndexOutOfBounds {
                index,
                len: data.len(),
            })
    }

    /// Store `value` at `index`, converting widenable primitives into the
    /// element kind.
    pub fn set(&self, index: usize, value: HostValue) -> Result<(), NativeError> {
        let stored = self.check_element(value)?;
        let mut data = self.data.lock().expect("array storage poisoned");
        let len = data.len();
        match data.get_mut(index) {
            Some(slot) => {
                *slot = stored;
                Ok(())
            }
            None => Err(NativeError::IndexOutOfBounds { index, len }),
        }
    }

    fn check_element(&self, value: HostValue) -> Result<HostValue, NativeError> {
        match (&self.elem, value) {
            (TypeDesc::Prim(kind), HostValue::Prim(p)) if kind.accepts(p.kind()) => {
                match p.convert_to(*kind) {
                    Some(converted) => Ok(HostValue::Prim(converted)),
                    None => Err(NativeError::ElementType {
                        expected: kind.name().to_string(),
                    }),
                }
            }
            (TypeDesc::Prim(kind), _) => Err(NativeError::ElementType {
                expected: kind.name().to_string(),
            }),
            // Reference elements: null and any reference are storable; the
            // binding does not re-check covariance on store.
            (_, HostValue::Null) => Ok(HostValue::Null),
            (_, HostValue::Object(obj)) => Ok(HostValue::Object(obj)),
            (elem, HostValue::Prim(_)) => Err(NativeError::ElementType {
                expected: format!("{elem:?}"),
            }),
        }
    }
}

/// The default value of a declared type: zero scalars, null references.
pub fn default_host_value(declared: &TypeDesc) -> HostValue {
    match declared {
        TypeDesc::Prim(PrimitiveKind::Bool) => HostValue::Prim(Primitive::Bool(false)),
        TypeDesc::Prim(PrimitiveKind::Char) => HostValue::Prim(Primitive::Char('\0')),
        TypeDesc::Prim(PrimitiveKind::Byte) => HostValue::Prim(Primitive::Byte(0)),
        TypeDesc::Prim(PrimitiveKind::Short) => HostValue::Prim(Primitive::Short(0)),
        TypeDesc::Prim(PrimitiveKind::Int) => HostValue::Prim(Primitive::Int(0)),
        TypeDesc::Prim(PrimitiveKind::Long) => HostValue::Prim(Primitive::Long(0)),
        TypeDesc::Prim(PrimitiveKind::Float) => HostValue::Prim(Primitive::Float(0.0)),
        TypeDesc::Prim(PrimitiveKind::Double) => HostValue::Prim(Primitive::Double(0.0)),
        TypeDesc::Object(_) | TypeDesc::Array(_) => HostValue::Null,
    }
}
