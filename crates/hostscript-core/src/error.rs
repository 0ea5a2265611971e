//! Error types for resolution, invocation, coercion, and registration.
//!
//! Every failure of the engine is a classification returned to the caller,
//! never a panic. [`ReflectError`] is the resolution-side taxonomy the
//! interpreter discriminates on; [`NativeError`] is the host-side fault a
//! member body (or array/argument plumbing) reports, surfaced through
//! `ReflectError::Invocation` or `ReflectError::ArrayAccess` without
//! further distinction.

use thiserror::Error;

/// Result alias for engine operations.
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Classified resolution and invocation failures.
#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("member not found: {member}")]
    NoSuchMember { member: String },

    #[error("no zero-argument member: {member}")]
    NoZeroArgMember { member: String },

    #[error("unknown target: {name}")]
    AmbiguousTarget { name: String },

    #[error("no publicly accessible declaration of {member}")]
    AccessDenied { member: String },

    #[error("void value passed as argument {position} to {member}")]
    VoidArgument { position: usize, member: String },

    #[error("method invocation on a void target: {member}")]
    VoidTarget { member: String },

    #[error("method invocation on a null target: {member}")]
    NullTarget { member: String },

    #[error("method invocation on a primitive target: {member}")]
    PrimitiveTarget { member: String },

    #[error("invocation of {member} failed: {source}")]
    Invocation {
        member: String,
        #[source]
        source: NativeError,
    },

    #[error("field not found: {field} on {type_name}")]
    NoSuchField { field: String, type_name: String },

    #[error("array access: {source}")]
    ArrayAccess {
        #[source]
        source: NativeError,
    },

    #[error("property accessor failed: {property}")]
    PropertyAccessor { property: String },

    #[error("ambiguous call to {member}: {candidates}")]
    Ambiguous { member: String, candidates: String },

    #[error("cannot instantiate {type_name}: {reason}")]
    Instantiation { type_name: String, reason: String },

    #[error("unknown type: {name}")]
    UnknownType { name: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Host-side call and storage faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NativeError {
    #[error("wrong number of arguments: expected {expected}, got {got}")]
    WrongArity { expected: usize, got: usize },

    #[error("argument {index} has the wrong type")]
    WrongType { index: usize },

    #[error("argument index {index} out of bounds ({count} available)")]
    ArgumentIndexOutOfBounds { index: usize, count: usize },

    #[error("call requires a target object")]
    MissingTarget,

    #[error("no concrete implementation available")]
    AbstractCall,

    #[error("the value is not an array")]
    NotAnArray,

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("value not storable in {expected} element")]
    ElementType { expected: String },

    #[error("{0}")]
    Raised(String),
}

/// Failure of the pluggable extended coercion predicate.
///
/// Deliberately a plain result, not control-flow signaling: the fallback
/// search discards these per candidate and moves on.
#[derive(Error, Debug)]
#[error("cannot coerce value to {target}")]
pub struct CoerceError {
    pub target: String,
}

impl CoerceError {
    pub fn new(target: impl Into<String>) -> Self {
        CoerceError {
            target: target.into(),
        }
    }
}

/// Registry population failures.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("type already registered: {name}")]
    DuplicateType { name: String },
}
