//! Namespace-facing interfaces and assignable references.
//!
//! The variable-binding environment is an external collaborator; the
//! engine consumes it through [`Namespace`] (bare-name resolution, local
//! method lookup, variable reads) and [`ExtendedCoercer`] (the pluggable
//! conversion predicate behind the coercion fallback). The engine
//! constructs [`Lhs`] values for assignment targets but never interprets
//! assignment itself.

use std::fmt;
use std::sync::Arc;

use crate::{CoerceError, FieldSlot, ObjectRef, TypeDesc, TypeHash, Value};
use crate::script::ScriptCallable;

/// What a bare target name resolved to.
#[derive(Debug, Clone)]
pub enum Target {
    /// A value; the member is dispatched on it.
    Value(Value),
    /// A class identifier; the member is dispatched statically.
    Class(TypeHash),
}

/// The variable-binding environment.
pub trait Namespace: Send + Sync {
    /// Resolve a target expression name to a value or class identifier.
    fn resolve_target(&self, name: &str) -> Option<Target>;

    /// A method declared locally in this namespace.
    fn local_method(&self, name: &str) -> Option<ScriptCallable>;

    /// Read a variable bound in this namespace.
    fn variable(&self, name: &str) -> Option<Value>;
}

/// The pluggable coercion predicate used by the fallback resolution pass.
///
/// Implementations may apply non-standard conversions the widening rules
/// do not cover. A failure is an ordinary result; the fallback tries the
/// next candidate with the original arguments untouched.
pub trait ExtendedCoercer {
    fn coerce(&self, value: &Value, declared: &TypeDesc) -> Result<Value, CoerceError>;
}

/// An assignable reference produced for a field or variable target.
///
/// Carries enough of a handle for the interpreter to perform the
/// assignment; the engine only constructs these.
#[derive(Clone)]
pub enum Lhs {
    /// An instance field on a host object.
    ObjectField {
        object: ObjectRef,
        field: String,
        declared: TypeDesc,
    },
    /// A static field; the slot is the live value cell.
    StaticField {
        class: TypeHash,
        field: String,
        declared: TypeDesc,
        slot: FieldSlot,
    },
    /// A variable in a script namespace.
    Variable {
        namespace: Arc<dyn Namespace>,
        name: String,
    },
}

impl fmt::Debug for Lhs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lhs::ObjectField { field, declared, .. } => f
                .debug_struct("Lhs::ObjectField")
                .field("field", field)
                .field("declared", declared)
                .finish_non_exhaustive(),
            Lhs::StaticField { class, field, .. } => f
                .debug_struct("Lhs::StaticField")
                .field("class", class)
                .field("field", field)
                .finish_non_exhaustive(),
            Lhs::Variable { name, .. } => f
                .debug_struct("Lhs::Variable")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}
