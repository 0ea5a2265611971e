//! Method, constructor, and field entries.
//!
//! Entries combine the declared signature with the implementation, the way
//! the registry stores everything it knows about one member. A method with
//! no body is an abstract declaration (interface methods); the invoker
//! resolves the concrete body on the target's class chain.

use std::sync::{Arc, Mutex};

use crate::{HostValue, Modifiers, NativeFn, TypeDesc};

/// One method overload declared on a type.
#[derive(Debug, Clone)]
pub struct MethodEntry {
    pub name: String,
    /// Ordered parameter types; the member signature.
    pub params: Vec<TypeDesc>,
    /// Declared return type; `None` is void.
    pub returns: Option<TypeDesc>,
    pub modifiers: Modifiers,
    /// Implementation; `None` for abstract declarations.
    pub body: Option<NativeFn>,
}

impl MethodEntry {
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        returns: Option<TypeDesc>,
        modifiers: Modifiers,
        body: Option<NativeFn>,
    ) -> Self {
        MethodEntry {
            name: name.into(),
            params,
            returns,
            modifiers,
            body,
        }
    }

    /// A public instance method with a body.
    pub fn public(
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        returns: Option<TypeDesc>,
        body: NativeFn,
    ) -> Self {
        Self::new(name, params, returns, Modifiers::PUBLIC, Some(body))
    }

    /// A public static method with a body.
    pub fn public_static(
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        returns: Option<TypeDesc>,
        body: NativeFn,
    ) -> Self {
        Self::new(
            name,
            params,
            returns,
            Modifiers::PUBLIC | Modifiers::STATIC,
            Some(body),
        )
    }

    /// A public abstract declaration (no body).
    pub fn abstract_public(
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        returns: Option<TypeDesc>,
    ) -> Self {
        Self::new(
            name,
            params,
            returns,
            Modifiers::PUBLIC | Modifiers::ABSTRACT,
            None,
        )
    }

    /// A non-public instance method with a body.
    pub fn package_private(
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        returns: Option<TypeDesc>,
        body: NativeFn,
    ) -> Self {
        Self::new(name, params, returns, Modifiers::empty(), Some(body))
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.is_public()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// Exact signature comparison.
    pub fn signature_matches(&self, params: &[TypeDesc]) -> bool {
        self.params == params
    }
}

/// One constructor overload on a class.
#[derive(Debug, Clone)]
pub struct ConstructorEntry {
    pub params: Vec<TypeDesc>,
    pub modifiers: Modifiers,
    /// Allocating body; returns the new instance.
    pub body: NativeFn,
}

impl ConstructorEntry {
    pub fn public(params: Vec<TypeDesc>, body: NativeFn) -> Self {
        ConstructorEntry {
            params,
            modifiers: Modifiers::PUBLIC,
            body,
        }
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.is_public()
    }
}

/// One field declared on a type.
///
/// Static fields own their value in a shared [`FieldSlot`] created at
/// registration; instance field values live on the object.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    pub name: String,
    pub declared: TypeDesc,
    pub modifiers: Modifiers,
    /// Value cell for static fields; `None` for instance fields.
    pub slot: Option<FieldSlot>,
}

impl FieldEntry {
    /// A public instance field.
    pub fn instance(name: impl Into<String>, declared: TypeDesc) -> Self {
        FieldEntry {
            name: name.into(),
            declared,
            modifiers: Modifiers::PUBLIC,
            slot: None,
        }
    }

    /// A public static field with an initial value.
    pub fn static_field(
        name: impl Into<String>,
        declared: TypeDesc,
        initial: HostValue,
    ) -> Self {
        FieldEntry {
            name: name.into(),
            declared,
            modifiers: Modifiers::PUBLIC | Modifiers::STATIC,
            slot: Some(FieldSlot::new(initial)),
        }
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.is_public()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}

/// Shared mutable cell holding a static field value.
#[derive(Debug, Clone)]
pub struct FieldSlot(Arc<Mutex<HostValue>>);

impl FieldSlot {
    pub fn new(initial: HostValue) -> Self {
        FieldSlot(Arc::new(Mutex::new(initial)))
    }

    pub fn get(&self) -> HostValue {
        self.0.lock().expect("field slot poisoned").clone()
    }

    pub fn set(&self, value: HostValue) {
        *self.0.lock().expect("field slot poisoned") = value;
    }
}
