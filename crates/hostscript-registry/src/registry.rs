//! HostRegistry - the in-memory host object-model binding.
//!
//! This module provides [`HostRegistry`], the central storage for host
//! class entries. It is the one [`ObjectModel`] implementation shipped with
//! the engine: classes are stored by `TypeHash` with a qualified-name index
//! for O(1) lookup either way.
//!
//! # Thread Safety
//!
//! `HostRegistry` is not thread-safe by design. In the typical usage
//! pattern the registry is populated single-threaded during embedding
//! setup, then becomes effectively read-only while scripts execute. If
//! multi-threaded execution is needed, the caller wraps the registry in
//! appropriate synchronization.
//!
//! # Example
//!
//! ```
//! use hostscript_core::{ClassEntry, builtins};
//! use hostscript_registry::HostRegistry;
//!
//! let mut registry = HostRegistry::with_builtins();
//! registry.register(ClassEntry::new("Player")).unwrap();
//!
//! assert!(registry.get_by_name("Player").is_some());
//! assert!(registry.get(*builtins::OBJECT).is_some());
//! ```

use rustc_hash::FxHashMap;

use hostscript_core::{
    ClassEntry, ObjectModel, RegistrationError, TypeHash, builtins,
};

/// Storage for host class entries, keyed by type hash with a name index.
#[derive(Default)]
pub struct HostRegistry {
    classes: FxHashMap<TypeHash, ClassEntry>,
    by_name: FxHashMap<String, TypeHash>,
}

impl HostRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the builtin root object type registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register(ClassEntry::new(builtins::OBJECT_NAME))
            .expect("builtins register into an empty registry");
        registry
    }

    /// Register a class entry. Fails on a duplicate qualified name.
    pub fn register(&mut self, class: ClassEntry) -> Result<TypeHash, RegistrationError> {
        let hash = class.type_hash;
        if self.classes.contains_key(&hash) {
            return Err(RegistrationError::DuplicateType {
                name: class.qualified_name,
            });
        }

        log::debug!(
            "registering host class {} ({} methods, {} fields)",
            class.qualified_name,
            class.methods.len(),
            class.fields.len()
        );

        self.by_name.insert(class.qualified_name.clone(), hash);
        self.classes.insert(hash, class);
        Ok(hash)
    }

    /// Get a class by its hash.
    pub fn get(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.classes.get(&hash)
    }

    /// Get a class by its qualified name.
    pub fn get_by_name(&self, name: &str) -> Option<&ClassEntry> {
        self.by_name.get(name).and_then(|hash| self.classes.get(hash))
    }

    /// Get the hash registered under a qualified name.
    pub fn type_hash_of(&self, name: &str) -> Option<TypeHash> {
        self.by_name.get(name).copied()
    }

    /// Check whether a class is registered by hash.
    pub fn contains(&self, hash: TypeHash) -> bool {
        self.classes.contains_key(&hash)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ObjectModel for HostRegistry {
    fn lookup(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.classes.get(&hash)
    }
}
