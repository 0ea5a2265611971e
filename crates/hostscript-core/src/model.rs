//! The object-model seam between the resolver and a host binding.
//!
//! The resolution algorithm never touches a concrete host API: it sees the
//! foreign type system only through [`ObjectModel`], implemented once per
//! host binding. The in-memory binding lives in `hostscript-registry`; a
//! port to a different host supplies its own implementation and reuses the
//! resolver unchanged.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::type_hash::builtins;
use crate::{ClassEntry, TypeHash};

/// Read-only view of the host type universe.
pub trait ObjectModel {
    /// Look up a class entry by its hash.
    fn lookup(&self, hash: TypeHash) -> Option<&ClassEntry>;

    /// A printable name for diagnostics; falls back to the hash.
    fn class_name(&self, hash: TypeHash) -> String {
        self.lookup(hash)
            .map(|c| c.qualified_name.clone())
            .unwrap_or_else(|| hash.to_string())
    }
}

/// Reference-type assignability: `sub` is `sup`, extends it, or implements
/// it (transitively). Every reference type is assignable to the builtin
/// root object type.
pub fn is_subtype(model: &dyn ObjectModel, sub: TypeHash, sup: TypeHash) -> bool {
    if sub == sup || sup == *builtins::OBJECT {
        return true;
    }

    let mut queue = VecDeque::from([sub]);
    let mut seen = FxHashSet::default();
    while let Some(hash) = queue.pop_front() {
        if hash == sup {
            return true;
        }
        if !seen.insert(hash) {
            continue;
        }
        if let Some(entry) = model.lookup(hash) {
            if let Some(superclass) = entry.superclass {
                queue.push_back(superclass);
            }
            queue.extend(entry.interfaces.iter().copied());
        }
    }
    false
}
