//! Tagged interpreter values and raw host values.
//!
//! The interpreter works with [`Value`]: a tagged representation that
//! distinguishes the void marker, null, kind-tagged primitive scalars,
//! foreign object references, and script-defined instances. The host ABI
//! works with [`HostValue`]: the raw form with no interpreter tagging.
//! The invoker unwraps `Value -> HostValue` before a call and wraps the
//! returned `HostValue -> Value` under the member's declared return type.

use crate::object::ObjectRef;
use crate::script::ScriptRef;
use crate::type_hash::builtins;
use crate::{Primitive, TypeDesc};

/// A tagged interpreter value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Result of a statement with no value. Never a valid call argument.
    Void,
    /// The distinguished null marker.
    Null,
    /// A kind-tagged primitive scalar.
    Prim(Primitive),
    /// A foreign host object (including arrays).
    Object(ObjectRef),
    /// A script-defined instance backed by a namespace.
    Script(ScriptRef),
}

impl Value {
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The runtime argument type used for overload resolution.
    ///
    /// `None` is the null argument type, applicable to any non-primitive
    /// parameter. Script instances match only root-object parameters.
    /// Callers reject void markers before computing argument types.
    pub fn arg_type(&self) -> Option<TypeDesc> {
        match self {
            Value::Void | Value::Null => None,
            Value::Prim(p) => Some(TypeDesc::Prim(p.kind())),
            Value::Object(obj) => Some(obj.class().clone()),
            Value::Script(_) => Some(TypeDesc::Object(*builtins::OBJECT)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Null, Value::Null) => true,
            (Value::Prim(a), Value::Prim(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => ObjectRef::ptr_eq(a, b),
            (Value::Script(a), Value::Script(b)) => ScriptRef::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A raw value crossing the host ABI.
///
/// Primitives keep their runtime kind (the host's "boxed" form); the
/// declared type of the member decides how they are re-tagged on the way
/// back into the interpreter.
#[derive(Debug, Clone)]
pub enum HostValue {
    Null,
    Prim(Primitive),
    Object(ObjectRef),
}

impl HostValue {
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// The concrete runtime type, or `None` for null.
    pub fn runtime_type(&self) -> Option<TypeDesc> {
        match self {
            HostValue::Null => None,
            HostValue::Prim(p) => Some(TypeDesc::Prim(p.kind())),
            HostValue::Object(obj) => Some(obj.class().clone()),
        }
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Prim(a), HostValue::Prim(b)) => a == b,
            (HostValue::Object(a), HostValue::Object(b)) => ObjectRef::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Prim(Primitive::$variant(v))
                }
            }

            impl From<$ty> for HostValue {
                fn from(v: $ty) -> Self {
                    HostValue::Prim(Primitive::$variant(v))
                }
            }
        )*
    };
}

impl_scalar_from! {
    bool => Bool,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Prim(p)
    }
}

impl From<Primitive> for HostValue {
    fn from(p: Primitive) -> Self {
        HostValue::Prim(p)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<ObjectRef> for HostValue {
    fn from(obj: ObjectRef) -> Self {
        HostValue::Object(obj)
    }
}
