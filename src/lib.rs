//! hostscript: dynamic member resolution and invocation over a foreign
//! host object model.
//!
//! Given a symbolic name (method, constructor, field, or bean property)
//! and runtime-typed argument values from an untyped interpreter, the
//! engine finds the single best-matching member on a live host object
//! model, coerces the arguments into the member's declared parameter
//! types, performs the call, and wraps the raw result back into the
//! interpreter's tagged value representation. Every operation terminates
//! with either a result or a classified [`ReflectError`].
//!
//! # Example
//!
//! ```
//! use hostscript::{ClassEntry, Engine, HostRegistry, MethodEntry, NativeFn, TypeDesc, Value};
//! use hostscript_core::{HostValue, PrimitiveKind};
//!
//! let mut registry = HostRegistry::with_builtins();
//! let calc = registry
//!     .register(ClassEntry::new("Calc").with_method(MethodEntry::public(
//!         "double",
//!         vec![TypeDesc::Prim(PrimitiveKind::Int)],
//!         Some(TypeDesc::Prim(PrimitiveKind::Int)),
//!         NativeFn::new(|call| {
//!             let x: i32 = call.arg(0)?;
//!             Ok(HostValue::from(x * 2))
//!         }),
//!     )))
//!     .unwrap();
//!
//! let engine = Engine::new(&registry);
//! let target = Value::Object(hostscript_core::ObjectRef::instance(TypeDesc::Object(calc)));
//! let result = engine.invoke_object_method(&target, "double", &[Value::from(21i32)]);
//! assert_eq!(result.unwrap(), Value::from(42i32));
//! ```

pub mod access;
pub mod array;
pub mod candidates;
pub mod engine;
mod invoke;
pub mod property;
pub mod signature;

pub use engine::{Engine, EngineConfig};

pub use access::{AccessibleField, AccessibleMethod, find_accessible_field, find_accessible_method};
pub use array::{TypeNode, array_base_type, array_dimensions, get_index, set_index};
pub use candidates::{Candidate, public_methods};

// The shared data model and the default in-memory binding.
pub use hostscript_core::{
    ClassEntry, CoerceError, ConstructorEntry, ExtendedCoercer, FieldEntry, FieldSlot, HostCall,
    HostValue, Lhs, MethodEntry, Modifiers, Namespace, NativeError, NativeFn, NullObserver,
    ObjectModel, ObjectRef, Primitive, PrimitiveKind, ReflectError, ReflectResult,
    ResolveObserver, ScriptCallable, ScriptInstance, ScriptRef, Target, TypeDesc, TypeHash,
    Value, builtins,
};
pub use hostscript_registry::HostRegistry;
