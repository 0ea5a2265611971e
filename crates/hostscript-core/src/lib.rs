//! hostscript-core: shared data model for the hostscript engine.
//!
//! This crate defines everything the resolver and a host binding agree on:
//!
//! - Type identity and descriptors ([`TypeHash`], [`TypeDesc`],
//!   [`PrimitiveKind`])
//! - Tagged interpreter values and raw host values ([`Value`],
//!   [`HostValue`], [`Primitive`])
//! - Host object instances ([`ObjectRef`]) and native member bodies
//!   ([`NativeFn`], [`HostCall`])
//! - Registry entries ([`ClassEntry`], [`MethodEntry`],
//!   [`ConstructorEntry`], [`FieldEntry`])
//! - The seams to collaborators: [`ObjectModel`], [`Namespace`],
//!   [`ExtendedCoercer`], [`ScriptInstance`], [`ResolveObserver`]
//! - The error taxonomy ([`ReflectError`], [`NativeError`])

mod entries;
mod error;
mod model;
mod namespace;
mod native_fn;
mod object;
mod observer;
mod primitive;
mod script;
mod type_desc;
mod type_hash;
mod value;

pub use entries::{ClassEntry, ConstructorEntry, FieldEntry, FieldSlot, MethodEntry, Modifiers};
pub use error::{CoerceError, NativeError, ReflectError, ReflectResult, RegistrationError};
pub use model::{ObjectModel, is_subtype};
pub use namespace::{ExtendedCoercer, Lhs, Namespace, Target};
pub use native_fn::{FromHostValue, HostCall, NativeFn};
pub use object::{ArrayStorage, ObjectRef, default_host_value};
pub use observer::{NullObserver, ResolveObserver};
pub use primitive::{Primitive, PrimitiveKind};
pub use script::{DefaultInvokeHandler, ScriptCallable, ScriptInstance, ScriptRef};
pub use type_desc::TypeDesc;
pub use type_hash::{TypeHash, builtins};
pub use value::{HostValue, Value};
