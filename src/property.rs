//! Field access and bean-property accessors.
//!
//! Field reads go through the same wrap discipline as call results, under
//! the field's declared type. Property access synthesizes
//! `get<Capitalized>`/`set<Capitalized>` accessor names and dispatches
//! them as zero-/one-argument instance calls; a missing accessor and an
//! accessor that fails both collapse into the one property-access
//! classification, detail discarded, so callers see a uniform surface.

use hostscript_core::{Lhs, ReflectError, ReflectResult, TypeHash, Value};

use crate::{access, invoke};
use crate::engine::Engine;

impl Engine<'_> {
    /// Read a field on a value target. Script targets read the variable
    /// from their backing namespace (unset variables read as void).
    pub fn get_object_field(&self, target: &Value, name: &str) -> ReflectResult<Value> {
        match target {
            Value::Script(script) => Ok(script
                .0
                .namespace()
                .variable(name)
                .unwrap_or(Value::Void)),
            Value::Object(obj) => {
                let class = invoke::runtime_class_hash(obj);
                let handle = access::find_accessible_field(self.model, class, name)?;
                let raw = match &handle.field.slot {
                    Some(slot) => slot.get(),
                    None => obj.field(name, &handle.field.declared),
                };
                invoke::wrap_value(raw, Some(&handle.field.declared))
            }
            Value::Void => Err(ReflectError::VoidTarget {
                member: name.to_string(),
            }),
            Value::Null => Err(ReflectError::NullTarget {
                member: name.to_string(),
            }),
            Value::Prim(_) => Err(ReflectError::PrimitiveTarget {
                member: name.to_string(),
            }),
        }
    }

    /// Read a static field on a class.
    pub fn get_static_field(&self, class: TypeHash, name: &str) -> ReflectResult<Value> {
        let handle = access::find_accessible_field(self.model, class, name)?;
        match &handle.field.slot {
            Some(slot) => invoke::wrap_value(slot.get(), Some(&handle.field.declared)),
            None => Err(ReflectError::Internal {
                message: format!("{name} is not a static field"),
            }),
        }
    }

    /// Construct an assignable reference for a field on a value target.
    pub fn get_lhs_object_field(&self, target: &Value, name: &str) -> ReflectResult<Lhs> {
        match target {
            Value::Script(script) => Ok(Lhs::Variable {
                namespace: script.0.namespace(),
                name: name.to_string(),
            }),
            Value::Object(obj) => {
                let class = invoke::runtime_class_hash(obj);
                let handle = access::find_accessible_field(self.model, class, name)?;
                Ok(match &handle.field.slot {
                    Some(slot) => Lhs::StaticField {
                        class: handle.declaring,
                        field: name.to_string(),
                        declared: handle.field.declared.clone(),
                        slot: slot.clone(),
                    },
                    None => Lhs::ObjectField {
                        object: obj.clone(),
                        field: name.to_string(),
                        declared: handle.field.declared.clone(),
                    },
                })
            }
            Value::Void => Err(ReflectError::VoidTarget {
                member: name.to_string(),
            }),
            Value::Null => Err(ReflectError::NullTarget {
                member: name.to_string(),
            }),
            Value::Prim(_) => Err(ReflectError::PrimitiveTarget {
                member: name.to_string(),
            }),
        }
    }

    /// Construct an assignable reference for a static field.
    pub fn get_lhs_static_field(&self, class: TypeHash, name: &str) -> ReflectResult<Lhs> {
        let handle = access::find_accessible_field(self.model, class, name)?;
        match &handle.field.slot {
            Some(slot) => Ok(Lhs::StaticField {
                class: handle.declaring,
                field: name.to_string(),
                declared: handle.field.declared.clone(),
                slot: slot.clone(),
            }),
            None => Err(ReflectError::Internal {
                message: format!("{name} is not a static field"),
            }),
        }
    }

    /// Read a bean property through its `get` accessor.
    pub fn get_object_property(&self, target: &Value, name: &str) -> ReflectResult<Value> {
        let accessor = accessor_name("get", name);
        self.invoke_object_method(target, &accessor, &[])
            .map_err(|_| ReflectError::PropertyAccessor {
                property: name.to_string(),
            })
    }

    /// Write a bean property through its `set` accessor.
    pub fn set_object_property(
        &self,
        target: &Value,
        name: &str,
        value: &Value,
    ) -> ReflectResult<()> {
        let accessor = accessor_name("set", name);
        self.invoke_object_method(target, &accessor, std::slice::from_ref(value))
            .map(|_| ())
            .map_err(|_| ReflectError::PropertyAccessor {
                property: name.to_string(),
            })
    }
}

/// Synthesize an accessor name: `get`/`set` plus the capitalized property.
pub(crate) fn accessor_name(prefix: &str, property: &str) -> String {
    let mut name = String::with_capacity(prefix.len() + property.len());
    name.push_str(prefix);
    let mut chars = property.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}
