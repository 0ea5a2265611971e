//! The call engine: name-context entry points and resolution orchestration.
//!
//! ## Resolution order
//!
//! 1. Compute runtime argument types (after eager void rejection)
//! 2. Exact-signature lookup through the accessibility resolver —
//!    exactness short-circuits overload ranking
//! 3. Most-specific scan over the full same-named candidate set
//! 4. Extended coercion fallback through the injected coercer
//! 5. Classified failure: `NoSuchMember`, or `NoZeroArgMember` for a
//!    zero-argument call
//!
//! Script-defined ("this"-like) targets are redirected to their
//! namespace's declared method table before host resolution starts.

use hostscript_core::{
    ConstructorEntry, ExtendedCoercer, HostCall, HostValue, Namespace, ObjectModel, ObjectRef,
    ReflectError, ReflectResult, ResolveObserver, Target, TypeHash, Value,
};

use crate::signature::signature_string;
use crate::{access, candidates, invoke};

/// Engine behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Report a true tie between incomparable maximally-specific
    /// candidates as [`ReflectError::Ambiguous`] instead of silently
    /// keeping the first one found. Off by default: the silent behavior
    /// is inherited and preserved.
    pub detect_ambiguity: bool,
}

/// The member-resolution and invocation engine.
///
/// Borrows a host object model and resolves symbolic member references
/// against it. Purely synchronous and re-entrant: every operation is a
/// function of its inputs plus the (read-only during the call) model.
pub struct Engine<'m> {
    pub(crate) model: &'m dyn ObjectModel,
    pub(crate) config: EngineConfig,
    pub(crate) observer: Option<Box<dyn ResolveObserver>>,
    pub(crate) coercer: Option<Box<dyn ExtendedCoercer>>,
}

impl<'m> Engine<'m> {
    /// Create an engine over a host object model.
    pub fn new(model: &'m dyn ObjectModel) -> Self {
        Engine {
            model,
            config: EngineConfig::default(),
            observer: None,
            coercer: None,
        }
    }

    /// Set behavior switches.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a resolution-checkpoint observer.
    pub fn with_observer(mut self, observer: Box<dyn ResolveObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Inject the extended coercion predicate used by the fallback pass.
    pub fn with_coercer(mut self, coercer: Box<dyn ExtendedCoercer>) -> Self {
        self.coercer = Some(coercer);
        self
    }

    /// The host object model this engine resolves against.
    pub fn model(&self) -> &'m dyn ObjectModel {
        self.model
    }

    pub(crate) fn observer(&self) -> Option<&dyn ResolveObserver> {
        self.observer.as_deref()
    }

    /// Invoke a method by its (possibly compound) name in a namespace.
    ///
    /// A non-compound name dispatches to the namespace's locally declared
    /// methods. A compound name splits at the last separator; the prefix
    /// resolves through the namespace to a value or class target.
    pub fn invoke_method(
        &self,
        namespace: &dyn Namespace,
        name: &str,
        args: &[Value],
    ) -> ReflectResult<Value> {
        let Some((prefix, method)) = name.rsplit_once('.') else {
            return match namespace.local_method(name) {
                Some(callable) => callable(args),
                None => Err(ReflectError::NoSuchMember {
                    member: format!("locally declared method {name}"),
                }),
            };
        };

        let target = namespace
            .resolve_target(prefix)
            .ok_or_else(|| ReflectError::AmbiguousTarget {
                name: prefix.to_string(),
            })?;

        match target {
            Target::Class(class) => self.invoke_static_method(class, method, args),
            Target::Value(value) => self.invoke_object_method(&value, method, args),
        }
    }

    /// Invoke a method on a value target.
    ///
    /// Script instances are consulted for a declared method, then their
    /// default invoke handler; only foreign objects enter host
    /// resolution. Void, null, and primitive targets fail with their
    /// dedicated classifications.
    pub fn invoke_object_method(
        &self,
        target: &Value,
        name: &str,
        args: &[Value],
    ) -> ReflectResult<Value> {
        match target {
            Value::Script(script) => {
                if let Some(callable) = script.0.declared_method(name) {
                    return callable(args);
                }
                if let Some(handler) = script.0.default_invoke_handler() {
                    return handler(name, args);
                }
                Err(ReflectError::NoSuchMember {
                    member: format!("locally declared method {name}"),
                })
            }
            Value::Object(obj) => {
                self.invoke_on_class(invoke::runtime_class_hash(obj), Some(obj), name, args)
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

    /// Invoke a static method on a class.
    pub fn invoke_static_method(
        &self,
        class: TypeHash,
        name: &str,
        args: &[Value],
    ) -> ReflectResult<Value> {
        self.invoke_on_class(class, None, name, args)
    }

    /// The full resolution pipeline for one call against one class.
    fn invoke_on_class(
        &self,
        class: TypeHash,
        target: Option<&ObjectRef>,
        name: &str,
        args: &[Value],
    ) -> ReflectResult<Value> {
        invoke::reject_void_args(args, name)?;
        let types = invoke::arg_types(args);
        let type_name = self.model.class_name(class);

        // Exact match short-circuits overload ranking. A null argument
        // type can never match a declared signature exactly.
        if let Some(exact) = invoke::known_types(&types) {
            if let Ok(handle) = access::find_accessible_method(self.model, class, name, &exact) {
                return invoke::dispatch_method(self.model, &handle, target, args);
            }
        }
        log::debug!(
            "exact method {} not found in {}",
            signature_string(self.model, name, &types),
            type_name
        );
        if let Some(o) = self.observer() {
            o.exact_miss(&type_name, name);
        }

        if args.is_empty() {
            return Err(ReflectError::NoZeroArgMember {
                member: format!("{name}() in class {type_name}"),
            });
        }

        let surface = candidates::public_methods(self.model, class);

        if let Some(best) = candidates::find_most_specific(
            self.model,
            name,
            &types,
            &surface,
            self.config.detect_ambiguity,
            self.observer(),
        )? {
            if let Some(o) = self.observer() {
                o.candidate_selected(name, &best.method.params);
            }
            let handle = access::find_accessible_method(
                self.model,
                class,
                &best.method.name,
                &best.method.params,
            )?;
            return invoke::dispatch_method(self.model, &handle, target, args);
        }

        if let Some(coercer) = self.coercer.as_deref() {
            if let Some(o) = self.observer() {
                o.fallback_engaged(name);
            }
            if let Some((candidate, converted)) =
                candidates::find_extended(name, args, &surface, coercer)
            {
                if let Some(o) = self.observer() {
                    o.candidate_selected(name, &candidate.method.params);
                }
                let handle = access::find_accessible_method(
                    self.model,
                    class,
                    &candidate.method.name,
                    &candidate.method.params,
                )?;
                return invoke::dispatch_method(self.model, &handle, target, &converted);
            }
        }

        Err(ReflectError::NoSuchMember {
            member: format!(
                "{} in class {}",
                signature_string(self.model, name, &types),
                type_name
            ),
        })
    }

    /// Construct a new instance of a class.
    ///
    /// Same pipeline as method resolution, against the class's public
    /// constructor table. A zero-argument call with no zero-argument
    /// constructor fails with the dedicated `NoZeroArgMember` kind.
    pub fn construct_object(&self, class: TypeHash, args: &[Value]) -> ReflectResult<Value> {
        let type_name = self.model.class_name(class);
        let entry = self
            .model
            .lookup(class)
            .ok_or_else(|| ReflectError::UnknownType {
                name: type_name.clone(),
            })?;

        let member = format!("{type_name} constructor");
        invoke::reject_void_args(args, &member)?;

        if entry.is_interface || entry.is_abstract {
            return Err(ReflectError::Instantiation {
                type_name,
                reason: "the class is abstract".to_string(),
            });
        }

        let types = invoke::arg_types(args);
        let mut converted: Option<Vec<Value>> = None;

        let mut chosen: Option<&ConstructorEntry> = None;
        if let Some(exact) = invoke::known_types(&types) {
            chosen = entry
                .constructors
                .iter()
                .find(|c| c.is_public() && c.params == exact);
        }

        if chosen.is_none() {
            if args.is_empty() {
                return Err(ReflectError::NoZeroArgMember {
                    member: format!("constructor {type_name}()"),
                });
            }

            chosen = candidates::find_most_specific_ctor(
                self.model,
                &type_name,
                &types,
                &entry.constructors,
                self.config.detect_ambiguity,
                self.observer(),
            )?;

            if chosen.is_none() {
                if let Some(coercer) = self.coercer.as_deref() {
                    if let Some(o) = self.observer() {
                        o.fallback_engaged(&member);
                    }
                    if let Some((ctor, values)) =
                        candidates::find_extended_ctor(args, &entry.constructors, coercer)
                    {
                        chosen = Some(ctor);
                        converted = Some(values);
                    }
                }
            }
        }

        let Some(ctor) = chosen else {
            return Err(ReflectError::NoSuchMember {
                member: format!(
                    "constructor {}",
                    signature_string(self.model, &type_name, &types)
                ),
            });
        };

        let call_args = converted.as_deref().unwrap_or(args);
        let raw_args = invoke::unwrap_args(call_args, &member)?;
        let raw = ctor
            .body
            .call(HostCall::new(None, &raw_args))
            .map_err(|source| ReflectError::Invocation {
                member: member.clone(),
                source,
            })?;

        match raw {
            HostValue::Object(obj) => Ok(Value::Object(obj)),
            other => Err(ReflectError::Internal {
                message: format!(
                    "constructor for {type_name} did not produce an object ({other:?})"
                ),
            }),
        }
    }
}
