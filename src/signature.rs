//! Signature matching for overload resolution.
//!
//! Implements pairwise assignability between argument and parameter types
//! and the "more specific than" comparison between two signatures.
//!
//! ## Rules
//!
//! - A null argument is applicable to any non-primitive parameter and
//!   never to a primitive one.
//! - Non-primitive compatibility is subtype compatibility over the class
//!   graph; every reference type is assignable to the root object type.
//! - Primitive compatibility is identity or one-directional widening
//!   (see [`PrimitiveKind::widens_to`]).
//! - Arrays are covariant in reference element types and invariant in
//!   primitive element types.

use hostscript_core::{ObjectModel, PrimitiveKind, TypeDesc, builtins, is_subtype};

/// Check whether a value of type `from` may be passed where `to` is
/// declared.
pub fn is_assignable(model: &dyn ObjectModel, from: &TypeDesc, to: &TypeDesc) -> bool {
    match (from, to) {
        (TypeDesc::Prim(f), TypeDesc::Prim(t)) => t.accepts(*f),
        (TypeDesc::Prim(_), _) | (_, TypeDesc::Prim(_)) => false,
        (TypeDesc::Object(f), TypeDesc::Object(t)) => is_subtype(model, *f, *t),
        (TypeDesc::Array(f), TypeDesc::Array(t)) => match (f.as_ref(), t.as_ref()) {
            (TypeDesc::Prim(fe), TypeDesc::Prim(te)) => fe == te,
            (fe, te) => is_assignable(model, fe, te),
        },
        // Arrays are objects; nothing else converts into an array.
        (TypeDesc::Array(_), TypeDesc::Object(t)) => *t == *builtins::OBJECT,
        (TypeDesc::Object(_), TypeDesc::Array(_)) => false,
    }
}

/// Check whether runtime argument types fit a parameter list.
///
/// `None` on the argument side is the null argument type.
pub fn is_applicable(
    model: &dyn ObjectModel,
    args: &[Option<TypeDesc>],
    params: &[TypeDesc],
) -> bool {
    if args.len() != params.len() {
        return false;
    }
    args.iter().zip(params).all(|(arg, param)| match arg {
        None => !param.is_primitive(),
        Some(ty) => is_assignable(model, ty, param),
    })
}

/// Check whether every parameter of `from` is assignable to the
/// corresponding parameter of `to` — i.e. `from` is at least as specific
/// as `to`.
pub fn is_signature_assignable(
    model: &dyn ObjectModel,
    from: &[TypeDesc],
    to: &[TypeDesc],
) -> bool {
    from.len() == to.len()
        && from
            .iter()
            .zip(to)
            .all(|(f, t)| is_assignable(model, f, t))
}

/// Render a type descriptor as a source-level name: primitives by their
/// keyword, object types by qualified name, arrays as `base[]...[]`.
pub fn describe_type(model: &dyn ObjectModel, desc: &TypeDesc) -> String {
    match desc {
        TypeDesc::Prim(kind) => kind.name().to_string(),
        TypeDesc::Object(hash) => model.class_name(*hash),
        TypeDesc::Array(_) => {
            let mut name = describe_type(model, desc.base_elem_type());
            for _ in 0..desc.dimensions() {
                name.push_str("[]");
            }
            name
        }
    }
}

/// Render `name(type, type, ...)` for diagnostics, with `null` standing in
/// for null argument types.
pub fn signature_string(model: &dyn ObjectModel, name: &str, args: &[Option<TypeDesc>]) -> String {
    let rendered: Vec<String> = args
        .iter()
        .map(|arg| match arg {
            None => "null".to_string(),
            Some(ty) => describe_type(model, ty),
        })
        .collect();
    format!("{}({})", name, rendered.join(", "))
}

/// Render `name(type, type, ...)` for a declared parameter list.
pub fn param_string(model: &dyn ObjectModel, name: &str, params: &[TypeDesc]) -> String {
    let rendered: Vec<String> = params.iter().map(|p| describe_type(model, p)).collect();
    format!("{}({})", name, rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostscript_core::ClassEntry;
    use hostscript_registry::HostRegistry;

    fn prim(kind: PrimitiveKind) -> TypeDesc {
        TypeDesc::Prim(kind)
    }

    fn fixture() -> HostRegistry {
        let mut registry = HostRegistry::with_builtins();
        let greeter = registry.register(ClassEntry::interface("Greeter")).unwrap();
        registry
            .register(ClassEntry::new("ConsoleGreeter").with_interface(greeter))
            .unwrap();
        registry
    }

    #[test]
    fn widening_is_one_directional() {
        let registry = fixture();
        for (from, to) in [
            (PrimitiveKind::Byte, PrimitiveKind::Long),
            (PrimitiveKind::Int, PrimitiveKind::Double),
            (PrimitiveKind::Float, PrimitiveKind::Double),
        ] {
            assert!(is_assignable(&registry, &prim(from), &prim(to)));
            assert!(!is_assignable(&registry, &prim(to), &prim(from)));
        }
    }

    #[test]
    fn char_argument_never_fits_short_or_byte() {
        let registry = fixture();
        assert!(!is_assignable(
            &registry,
            &prim(PrimitiveKind::Char),
            &prim(PrimitiveKind::Short)
        ));
        assert!(!is_assignable(
            &registry,
            &prim(PrimitiveKind::Char),
            &prim(PrimitiveKind::Byte)
        ));
        assert!(is_assignable(
            &registry,
            &prim(PrimitiveKind::Char),
            &prim(PrimitiveKind::Int)
        ));
    }

    #[test]
    fn null_matches_references_only() {
        let registry = fixture();
        let object_param = TypeDesc::object("Greeter");

        assert!(is_applicable(&registry, &[None], &[object_param]));
        assert!(!is_applicable(
            &registry,
            &[None],
            &[prim(PrimitiveKind::Int)]
        ));
    }

    #[test]
    fn subtype_arguments_fit_supertype_parameters() {
        let registry = fixture();
        let concrete = TypeDesc::object("ConsoleGreeter");
        let iface = TypeDesc::object("Greeter");
        let root = TypeDesc::Object(*builtins::OBJECT);

        assert!(is_assignable(&registry, &concrete, &iface));
        assert!(is_assignable(&registry, &concrete, &root));
        assert!(!is_assignable(&registry, &iface, &concrete));
    }

    #[test]
    fn arrays_are_covariant_in_reference_elements_only() {
        let registry = fixture();
        let concrete_arr = TypeDesc::array(TypeDesc::object("ConsoleGreeter"));
        let iface_arr = TypeDesc::array(TypeDesc::object("Greeter"));
        let int_arr = TypeDesc::array(prim(PrimitiveKind::Int));
        let long_arr = TypeDesc::array(prim(PrimitiveKind::Long));
        let root = TypeDesc::Object(*builtins::OBJECT);

        assert!(is_assignable(&registry, &concrete_arr, &iface_arr));
        assert!(!is_assignable(&registry, &iface_arr, &concrete_arr));
        assert!(is_assignable(&registry, &int_arr, &int_arr));
        assert!(!is_assignable(&registry, &int_arr, &long_arr));
        assert!(is_assignable(&registry, &int_arr, &root));
    }

    #[test]
    fn more_specific_signature_dominates() {
        let registry = fixture();
        let narrow = vec![prim(PrimitiveKind::Int)];
        let wide = vec![prim(PrimitiveKind::Long)];

        assert!(is_signature_assignable(&registry, &narrow, &wide));
        assert!(!is_signature_assignable(&registry, &wide, &narrow));
    }

    #[test]
    fn signature_rendering() {
        let registry = fixture();
        let rendered = signature_string(
            &registry,
            "greet",
            &[
                Some(prim(PrimitiveKind::Int)),
                None,
                Some(TypeDesc::array_of(prim(PrimitiveKind::Int), 2)),
            ],
        );
        assert_eq!(rendered, "greet(int, null, int[][])");
    }
}
