//! Deterministic hash-based type identity for host classes.
//!
//! This module provides [`TypeHash`], a 64-bit hash that uniquely identifies
//! a host type by its qualified name. Hashes are computed deterministically,
//! enabling:
//!
//! - Forward references (hash computed before registration)
//! - No registration order dependencies
//! - Single map lookups (no secondary name-to-id maps)
//!
//! # Examples
//!
//! ```
//! use hostscript_core::TypeHash;
//!
//! let point = TypeHash::from_name("geom.Point");
//! let same = TypeHash::from_name("geom.Point");
//! assert_eq!(point, same);
//! ```

use std::fmt;

use xxhash_rust::xxh64::xxh64;

/// Domain-specific seed so type hashes never collide with other hash uses.
const TYPE_SEED: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit hash identifying a host type.
///
/// Computed from the qualified type name. The same name always produces the
/// same hash, so identities can be derived anywhere without consulting the
/// registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a qualified type name.
    pub fn from_name(name: &str) -> Self {
        TypeHash(xxh64(name.as_bytes(), TYPE_SEED))
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Well-known hashes for builtin host types.
pub mod builtins {
    use lazy_static::lazy_static;

    use super::TypeHash;

    /// Name of the root reference type every host object is assignable to.
    pub const OBJECT_NAME: &str = "Object";

    lazy_static! {
        /// Hash of the root reference type.
        pub static ref OBJECT: TypeHash = TypeHash::from_name(OBJECT_NAME);
    }
}
