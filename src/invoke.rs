//! The invoker and value adapter.
//!
//! Bridges tagged interpreter values and the raw host ABI: rejects void
//! markers positionally, unwraps arguments, dispatches the call, and wraps
//! the raw result back under the member's declared return type.
//!
//! Instance calls dispatch virtually: the accessible handle fixes the
//! signature, the target's concrete class chain supplies the body.

use hostscript_core::{
    HostCall, HostValue, NativeError, NativeFn, ObjectModel, ObjectRef, ReflectError,
    ReflectResult, TypeDesc, TypeHash, Value, builtins,
};

use crate::access::AccessibleMethod;

/// Reject any void-marker argument before candidate search begins.
pub(crate) fn reject_void_args(args: &[Value], member: &str) -> ReflectResult<()> {
    for (position, arg) in args.iter().enumerate() {
        if arg.is_void() {
            return Err(ReflectError::VoidArgument {
                position,
                member: member.to_string(),
            });
        }
    }
    Ok(())
}

/// Runtime argument types for overload resolution.
pub(crate) fn arg_types(args: &[Value]) -> Vec<Option<TypeDesc>> {
    args.iter().map(Value::arg_type).collect()
}

/// All argument types, if none of them is the null type.
pub(crate) fn known_types(types: &[Option<TypeDesc>]) -> Option<Vec<TypeDesc>> {
    types.iter().cloned().collect()
}

/// The type hash candidate search runs against for an object target.
/// Arrays resolve members against the root object type.
pub(crate) fn runtime_class_hash(obj: &ObjectRef) -> TypeHash {
    match obj.class() {
        TypeDesc::Object(hash) => *hash,
        _ => *builtins::OBJECT,
    }
}

/// Unwrap tagged arguments to their raw host form.
///
/// Script instances are not convertible to host values; passing one
/// surfaces as an invocation-target failure.
pub(crate) fn unwrap_args(args: &[Value], member: &str) -> ReflectResult<Vec<HostValue>> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            Value::Void => Err(ReflectError::VoidArgument {
                position: index,
                member: member.to_string(),
            }),
            Value::Null => Ok(HostValue::Null),
            Value::Prim(p) => Ok(HostValue::Prim(*p)),
            Value::Object(obj) => Ok(HostValue::Object(obj.clone())),
            Value::Script(_) => Err(ReflectError::Invocation {
                member: member.to_string(),
                source: NativeError::WrongType { index },
            }),
        })
        .collect()
}

/// Wrap a raw host result under the declared return type.
///
/// A void declaration produces the void marker; a raw null normalizes to
/// the null marker; a primitive declaration re-tags the raw value under
/// the declared kind, whatever the runtime kind of the box was.
pub(crate) fn wrap_value(raw: HostValue, declared: Option<&TypeDesc>) -> ReflectResult<Value> {
    let Some(declared) = declared else {
        return Ok(Value::Void);
    };
    if raw.is_null() {
        return Ok(Value::Null);
    }

    match declared {
        TypeDesc::Prim(kind) => match raw {
            HostValue::Prim(p) => p.convert_to(*kind).map(Value::Prim).ok_or_else(|| {
                ReflectError::Internal {
                    message: format!("host returned a {} box for a declared {} result", p.kind(), kind),
                }
            }),
            HostValue::Object(_) => Err(ReflectError::Internal {
                message: format!("host returned a reference for a declared {kind} result"),
            }),
            HostValue::Null => unreachable!("null handled above"),
        },
        _ => Ok(match raw {
            HostValue::Null => Value::Null,
            HostValue::Prim(p) => Value::Prim(p),
            HostValue::Object(obj) => Value::Object(obj),
        }),
    }
}

/// Invoke a resolved method handle.
///
/// Static members ignore the target. Instance members require one and
/// resolve their body on its concrete class chain, falling back to the
/// handle's own body. Faults from the body surface as invocation-target
/// failures, undistinguished.
pub(crate) fn dispatch_method(
    model: &dyn ObjectModel,
    handle: &AccessibleMethod<'_>,
    target: Option<&ObjectRef>,
    args: &[Value],
) -> ReflectResult<Value> {
    let member = handle.method.name.clone();
    let raw_args = unwrap_args(args, &member)?;

    let (body, call_target) = if handle.method.is_static() {
        (handle.method.body.clone(), None)
    } else {
        let target = target.ok_or_else(|| ReflectError::Invocation {
            member: member.clone(),
            source: NativeError::MissingTarget,
        })?;
        let body = find_implementation(model, target, handle)
            .or_else(|| handle.method.body.clone());
        (body, Some(target))
    };

    let body = body.ok_or_else(|| ReflectError::Invocation {
        member: member.clone(),
        source: NativeError::AbstractCall,
    })?;

    let raw = body
        .call(HostCall::new(call_target, &raw_args))
        .map_err(|source| ReflectError::Invocation {
            member: member.clone(),
            source,
        })?;

    wrap_value(raw, handle.method.returns.as_ref())
}

/// Walk the concrete class chain for a body matching the handle's
/// signature.
fn find_implementation(
    model: &dyn ObjectModel,
    target: &ObjectRef,
    handle: &AccessibleMethod<'_>,
) -> Option<NativeFn> {
    let mut current = runtime_class_hash(target);
    loop {
        let entry = model.lookup(current)?;
        if let Some(method) =
            entry.declared_method_exact(&handle.method.name, &handle.method.params)
        {
            if let Some(body) = &method.body {
                return Some(body.clone());
            }
        }
        current = entry.superclass?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostscript_core::{Primitive, PrimitiveKind};

    #[test]
    fn void_arguments_are_rejected_positionally() {
        let args = vec![Value::from(1i32), Value::Void];
        let err = reject_void_args(&args, "f").unwrap_err();
        assert!(matches!(
            err,
            ReflectError::VoidArgument { position: 1, .. }
        ));
    }

    #[test]
    fn declared_kind_wins_over_the_box_kind() {
        let declared = TypeDesc::Prim(PrimitiveKind::Int);
        let wrapped = wrap_value(HostValue::from(41i64), Some(&declared)).unwrap();
        assert_eq!(wrapped, Value::Prim(Primitive::Int(41)));
    }

    #[test]
    fn void_declaration_produces_the_void_marker() {
        assert_eq!(wrap_value(HostValue::from(7i32), None).unwrap(), Value::Void);
    }

    #[test]
    fn null_results_normalize_to_the_null_marker() {
        let declared = TypeDesc::object("Player");
        assert_eq!(
            wrap_value(HostValue::Null, Some(&declared)).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn reference_box_for_primitive_result_is_internal() {
        let declared = TypeDesc::Prim(PrimitiveKind::Int);
        let obj = ObjectRef::instance(TypeDesc::object("Player"));
        assert!(matches!(
            wrap_value(HostValue::Object(obj), Some(&declared)),
            Err(ReflectError::Internal { .. })
        ));
    }

    #[test]
    fn unwrap_passes_null_and_primitives_through() {
        let args = vec![Value::Null, Value::from(2i32)];
        let raw = unwrap_args(&args, "f").unwrap();
        assert_eq!(raw, vec![HostValue::Null, HostValue::from(2i32)]);
    }
}
