//! Accessibility resolution over the class graph.
//!
//! A concrete declaring class may be non-public while implementing a
//! public interface or extending a public superclass that redeclares the
//! same member publicly. Invocation must go through the publicly
//! accessible declaration to satisfy host access control, so resolution
//! walks the graph breadth-first from the concrete type and returns the
//! first public declaration of the fixed signature it finds. The traversal
//! only legalizes the handle; it never changes which overload was chosen.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use hostscript_core::{FieldEntry, MethodEntry, ObjectModel, ReflectError, TypeDesc, TypeHash};

use crate::signature::param_string;

/// A publicly invocable method handle: the declaring type plus the entry.
#[derive(Debug, Clone, Copy)]
pub struct AccessibleMethod<'m> {
    pub declaring: TypeHash,
    pub method: &'m MethodEntry,
}

/// Find a publicly accessible declaration of the exact-signature method.
///
/// Breadth-first from `class`: each dequeued type is checked only if the
/// type itself is public, and only for a public method declared directly
/// on it; the first hit wins. The superclass and all direct interfaces of
/// a node are enqueued together before the next level is processed.
pub fn find_accessible_method<'m>(
    model: &'m dyn ObjectModel,
    class: TypeHash,
    name: &str,
    params: &[TypeDesc],
) -> Result<AccessibleMethod<'m>, ReflectError> {
    let mut queue = VecDeque::from([class]);
    let mut seen = FxHashSet::default();

    while let Some(hash) = queue.pop_front() {
        if !seen.insert(hash) {
            continue;
        }
        let Some(entry) = model.lookup(hash) else {
            continue;
        };

        if entry.is_public {
            if let Some(method) = entry.declared_method_exact(name, params) {
                if method.is_public() {
                    return Ok(AccessibleMethod {
                        declaring: hash,
                        method,
                    });
                }
            }
        }

        if !entry.is_interface {
            if let Some(superclass) = entry.superclass {
                queue.push_back(superclass);
            }
        }
        queue.extend(entry.interfaces.iter().copied());
    }

    Err(ReflectError::AccessDenied {
        member: format!(
            "{} in interfaces or class hierarchy of {}",
            param_string(model, name, params),
            model.class_name(class)
        ),
    })
}

/// A readable field handle: the declaring type plus the entry.
#[derive(Debug, Clone, Copy)]
pub struct AccessibleField<'m> {
    pub declaring: TypeHash,
    pub field: &'m FieldEntry,
}

/// Find a public field visible on `class`, searching the type and its
/// ancestors breadth-first.
pub fn find_accessible_field<'m>(
    model: &'m dyn ObjectModel,
    class: TypeHash,
    name: &str,
) -> Result<AccessibleField<'m>, ReflectError> {
    let mut queue = VecDeque::from([class]);
    let mut seen = FxHashSet::default();

    while let Some(hash) = queue.pop_front() {
        if !seen.insert(hash) {
            continue;
        }
        let Some(entry) = model.lookup(hash) else {
            continue;
        };

        if let Some(field) = entry.declared_field(name) {
            if field.is_public() {
                return Ok(AccessibleField {
                    declaring: hash,
                    field,
                });
            }
        }

        if !entry.is_interface {
            if let Some(superclass) = entry.superclass {
                queue.push_back(superclass);
            }
        }
        queue.extend(entry.interfaces.iter().copied());
    }

    Err(ReflectError::NoSuchField {
        field: name.to_string(),
        type_name: model.class_name(class),
    })
}
