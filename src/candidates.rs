//! Candidate collection and best-match selection.
//!
//! When the exact-signature fast path misses, resolution scans the type's
//! full candidate set for the most specific applicable member, then falls
//! back to the pluggable extended coercion pass.
//!
//! Tie policy: the scan keeps the first candidate encountered that is not
//! dominated by a later one. Two incomparable maximally-specific
//! candidates are not detected by default — inherited behavior, preserved
//! deliberately. `detect_ambiguity` upgrades that case to an error.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use hostscript_core::{
    ConstructorEntry, ExtendedCoercer, MethodEntry, ObjectModel, ReflectError, ResolveObserver,
    TypeDesc, TypeHash, Value,
};

use crate::signature::{is_applicable, is_signature_assignable, param_string};

/// One member of a candidate set: the entry plus where it was found.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'m> {
    pub declaring: TypeHash,
    pub method: &'m MethodEntry,
}

/// Collect the public API surface of a type: public methods declared on
/// the type and inherited from superclasses and interfaces, most-derived
/// first, deduplicated by name and signature (an override shadows the
/// declaration it overrides).
pub fn public_methods<'m>(model: &'m dyn ObjectModel, class: TypeHash) -> Vec<Candidate<'m>> {
    let mut queue = VecDeque::from([class]);
    let mut seen_types = FxHashSet::default();
    let mut seen_sigs: FxHashSet<(String, Vec<TypeDesc>)> = FxHashSet::default();
    let mut surface = Vec::new();

    while let Some(hash) = queue.pop_front() {
        if !seen_types.insert(hash) {
            continue;
        }
        let Some(entry) = model.lookup(hash) else {
            continue;
        };

        for method in entry.methods.iter().filter(|m| m.is_public()) {
            let key = (method.name.clone(), method.params.clone());
            if seen_sigs.insert(key) {
                surface.push(Candidate {
                    declaring: hash,
                    method,
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

    surface
}

/// Select the most specific applicable method named `name`.
///
/// Returns `Ok(None)` when nothing applies. Errors only when ambiguity
/// detection is enabled and hits a true tie.
pub fn find_most_specific<'m>(
    model: &dyn ObjectModel,
    name: &str,
    args: &[Option<TypeDesc>],
    candidates: &[Candidate<'m>],
    detect_ambiguity: bool,
    observer: Option<&dyn ResolveObserver>,
) -> Result<Option<Candidate<'m>>, ReflectError> {
    let named: Vec<&Candidate<'m>> = candidates
        .iter()
        .filter(|c| c.method.name == name)
        .collect();
    let lists: Vec<&[TypeDesc]> = named.iter().map(|c| c.method.params.as_slice()).collect();

    let index = most_specific_index(model, name, args, &lists, detect_ambiguity, observer)?;
    Ok(index.map(|i| *named[i]))
}

/// Select the most specific applicable public constructor.
pub fn find_most_specific_ctor<'m>(
    model: &dyn ObjectModel,
    type_name: &str,
    args: &[Option<TypeDesc>],
    constructors: &'m [ConstructorEntry],
    detect_ambiguity: bool,
    observer: Option<&dyn ResolveObserver>,
) -> Result<Option<&'m ConstructorEntry>, ReflectError> {
    let public: Vec<&ConstructorEntry> = constructors.iter().filter(|c| c.is_public()).collect();
    let lists: Vec<&[TypeDesc]> = public.iter().map(|c| c.params.as_slice()).collect();

    let index = most_specific_index(model, type_name, args, &lists, detect_ambiguity, observer)?;
    Ok(index.map(|i| public[i]))
}

/// The shared most-specific scan over parameter lists.
///
/// The current best is replaced only by a candidate whose signature is
/// assignable to it; the first applicable candidate otherwise stays.
fn most_specific_index(
    model: &dyn ObjectModel,
    member: &str,
    args: &[Option<TypeDesc>],
    lists: &[&[TypeDesc]],
    detect_ambiguity: bool,
    observer: Option<&dyn ResolveObserver>,
) -> Result<Option<usize>, ReflectError> {
    let mut applicable = Vec::new();
    let mut best: Option<usize> = None;

    for (i, params) in lists.iter().enumerate() {
        if !is_applicable(model, args, params) {
            if let Some(o) = observer {
                o.candidate_rejected(member, params);
            }
            continue;
        }
        applicable.push(i);
        match best {
            None => best = Some(i),
            Some(b) => {
                if is_signature_assignable(model, params, lists[b]) {
                    best = Some(i);
                }
            }
        }
    }

    if detect_ambiguity && applicable.len() > 1 {
        let maximal: Vec<usize> = applicable
            .iter()
            .copied()
            .filter(|&i| {
                !applicable.iter().any(|&j| {
                    j != i
                        && is_signature_assignable(model, lists[j], lists[i])
                        && !is_signature_assignable(model, lists[i], lists[j])
                })
            })
            .collect();
        if maximal.len() > 1 {
            let rendered: Vec<String> = maximal
                .iter()
                .map(|&i| param_string(model, member, lists[i]))
                .collect();
            return Err(ReflectError::Ambiguous {
                member: member.to_string(),
                candidates: rendered.join(" and "),
            });
        }
    }

    Ok(best)
}

/// The extended coercion fallback: try every same-named candidate of
/// matching arity, coercing each argument through the namespace-supplied
/// predicate. The first candidate for which all arguments coerce wins and
/// the converted values replace the originals. A failed candidate leaves
/// the arguments untouched.
pub fn find_extended<'m>(
    name: &str,
    args: &[Value],
    candidates: &[Candidate<'m>],
    coercer: &dyn ExtendedCoercer,
) -> Option<(Candidate<'m>, Vec<Value>)> {
    candidates
        .iter()
        .filter(|c| c.method.name == name && c.method.params.len() == args.len())
        .find_map(|c| coerce_all(args, &c.method.params, coercer).map(|converted| (*c, converted)))
}

/// The extended coercion fallback for constructors.
pub fn find_extended_ctor<'m>(
    args: &[Value],
    constructors: &'m [ConstructorEntry],
    coercer: &dyn ExtendedCoercer,
) -> Option<(&'m ConstructorEntry, Vec<Value>)> {
    constructors
        .iter()
        .filter(|c| c.is_public() && c.params.len() == args.len())
        .find_map(|c| coerce_all(args, &c.params, coercer).map(|converted| (c, converted)))
}

fn coerce_all(
    args: &[Value],
    params: &[TypeDesc],
    coercer: &dyn ExtendedCoercer,
) -> Option<Vec<Value>> {
    let mut converted = Vec::with_capacity(args.len());
    for (arg, param) in args.iter().zip(params) {
        match coercer.coerce(arg, param) {
            Ok(value) => converted.push(value),
            // Intentionally discarded: the fallback moves on to the next
            // candidate with the original arguments.
            Err(_) => return None,
        }
    }
    Some(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostscript_core::{
        ClassEntry, CoerceError, HostValue, NativeFn, Primitive, PrimitiveKind,
    };
    use hostscript_registry::HostRegistry;

    fn noop_body() -> NativeFn {
        NativeFn::new(|_| Ok(HostValue::Null))
    }

    fn method(name: &str, params: Vec<TypeDesc>) -> MethodEntry {
        MethodEntry::public(name, params, None, noop_body())
    }

    fn int() -> TypeDesc {
        TypeDesc::Prim(PrimitiveKind::Int)
    }

    fn long() -> TypeDesc {
        TypeDesc::Prim(PrimitiveKind::Long)
    }

    #[test]
    fn non_public_methods_stay_off_the_surface() {
        let mut registry = HostRegistry::with_builtins();
        let class = registry
            .register(
                ClassEntry::new("Vault")
                    .with_method(method("open", vec![]))
                    .with_method(MethodEntry::package_private("crack", vec![], None, noop_body())),
            )
            .unwrap();

        let surface = public_methods(&registry, class);
        assert!(surface.iter().any(|c| c.method.name == "open"));
        assert!(!surface.iter().any(|c| c.method.name == "crack"));
    }

    #[test]
    fn override_shadows_inherited_declaration() {
        let mut registry = HostRegistry::with_builtins();
        let base = registry
            .register(ClassEntry::new("Base").with_method(method("f", vec![int()])))
            .unwrap();
        let derived = registry
            .register(
                ClassEntry::new("Derived")
                    .with_super(base)
                    .with_method(method("f", vec![int()])),
            )
            .unwrap();

        let surface = public_methods(&registry, derived);
        let fs: Vec<_> = surface.iter().filter(|c| c.method.name == "f").collect();
        assert_eq!(fs.len(), 1);
        assert_eq!(fs[0].declaring, derived);
    }

    #[test]
    fn narrower_signature_wins_regardless_of_order() {
        let mut registry = HostRegistry::with_builtins();
        let class = registry
            .register(
                ClassEntry::new("Calc")
                    .with_method(method("f", vec![long()]))
                    .with_method(method("f", vec![int()])),
            )
            .unwrap();

        let surface = public_methods(&registry, class);
        let args = vec![Some(int())];
        let best = find_most_specific(&registry, "f", &args, &surface, false, None)
            .unwrap()
            .unwrap();
        assert_eq!(best.method.params, vec![int()]);
    }

    #[test]
    fn incomparable_tie_keeps_first_by_default() {
        let mut registry = HostRegistry::with_builtins();
        let a = registry.register(ClassEntry::interface("A")).unwrap();
        let b = registry.register(ClassEntry::interface("B")).unwrap();
        let both = registry
            .register(
                ClassEntry::new("Both")
                    .with_interface(a)
                    .with_interface(b),
            )
            .unwrap();
        let class = registry
            .register(
                ClassEntry::new("Sink")
                    .with_method(method("take", vec![TypeDesc::Object(a)]))
                    .with_method(method("take", vec![TypeDesc::Object(b)])),
            )
            .unwrap();

        let surface = public_methods(&registry, class);
        let args = vec![Some(TypeDesc::Object(both))];

        let best = find_most_specific(&registry, "take", &args, &surface, false, None)
            .unwrap()
            .unwrap();
        assert_eq!(best.method.params, vec![TypeDesc::Object(a)]);

        let detected = find_most_specific(&registry, "take", &args, &surface, true, None);
        assert!(matches!(detected, Err(ReflectError::Ambiguous { .. })));
    }

    struct DoubleToInt;

    impl ExtendedCoercer for DoubleToInt {
        fn coerce(&self, value: &Value, declared: &TypeDesc) -> Result<Value, CoerceError> {
            match (value, declared) {
                (Value::Prim(Primitive::Double(v)), TypeDesc::Prim(PrimitiveKind::Int)) => {
                    Ok(Value::from(*v as i32))
                }
                (v, d) if v.arg_type().as_ref() == Some(d) => Ok(v.clone()),
                _ => Err(CoerceError::new("int")),
            }
        }
    }

    #[test]
    fn extended_fallback_converts_all_arguments_or_none() {
        let mut registry = HostRegistry::with_builtins();
        let class = registry
            .register(
                ClassEntry::new("Calc")
                    .with_method(method("g", vec![int(), int()]))
                    .with_method(method("g", vec![int()])),
            )
            .unwrap();

        let surface = public_methods(&registry, class);
        let args = vec![Value::from(1.5f64), Value::from(2.5f64)];

        let (candidate, converted) =
            find_extended("g", &args, &surface, &DoubleToInt).unwrap();
        assert_eq!(candidate.method.params.len(), 2);
        assert_eq!(converted, vec![Value::from(1i32), Value::from(2i32)]);

        // Nothing coerces bool; original arguments stay untouched.
        let args = vec![Value::from(true)];
        assert!(find_extended("g", &args, &surface, &DoubleToInt).is_none());
        assert_eq!(args[0], Value::from(true));
    }
}
