//! End-to-end coverage of resolution, invocation, accessibility,
//! properties, arrays, and the namespace-facing entry points, against the
//! in-memory registry binding.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use hostscript::{
    ClassEntry, CoerceError, ConstructorEntry, Engine, EngineConfig, ExtendedCoercer, FieldEntry,
    HostRegistry, HostValue, Lhs, MethodEntry, Namespace, NativeError, NativeFn, ObjectRef,
    Primitive, PrimitiveKind, ReflectError, ResolveObserver, ScriptCallable, ScriptInstance,
    ScriptRef, Target, TypeDesc, TypeHash, TypeNode, Value, builtins, find_accessible_method,
};
use hostscript_core::DefaultInvokeHandler;

fn int() -> TypeDesc {
    TypeDesc::Prim(PrimitiveKind::Int)
}

fn long() -> TypeDesc {
    TypeDesc::Prim(PrimitiveKind::Long)
}

fn root_object() -> TypeDesc {
    TypeDesc::Object(*builtins::OBJECT)
}

fn const_body(result: i32) -> NativeFn {
    NativeFn::new(move |_| Ok(HostValue::from(result)))
}

/// Registry with the classes the tests below share.
fn fixture() -> HostRegistry {
    let mut registry = HostRegistry::with_builtins();

    // Calc: overloads for exactness/widening/null tests, a wide-boxed
    // return, and a raising body.
    registry
        .register(
            ClassEntry::new("Calc")
                .with_constructor(ConstructorEntry::public(
                    vec![],
                    NativeFn::new(|_| {
                        Ok(HostValue::Object(ObjectRef::instance(TypeDesc::object(
                            "Calc",
                        ))))
                    }),
                ))
                .with_method(MethodEntry::public("f", vec![int()], Some(int()), const_body(1)))
                .with_method(MethodEntry::public("f", vec![long()], Some(int()), const_body(2)))
                .with_method(MethodEntry::public(
                    "w",
                    vec![long()],
                    Some(long()),
                    NativeFn::new(|call| {
                        let v: i64 = call.arg(0)?;
                        Ok(HostValue::from(v))
                    }),
                ))
                .with_method(MethodEntry::public(
                    "narrow",
                    vec![int()],
                    Some(int()),
                    const_body(3),
                ))
                .with_method(MethodEntry::public(
                    "h",
                    vec![root_object()],
                    Some(TypeDesc::Prim(PrimitiveKind::Bool)),
                    NativeFn::new(|call| Ok(HostValue::from(call.arg_slot(0)?.is_null()))),
                ))
                .with_method(MethodEntry::public(
                    "h",
                    vec![int()],
                    Some(TypeDesc::Prim(PrimitiveKind::Bool)),
                    NativeFn::new(|_| Ok(HostValue::from(false))),
                ))
                .with_method(MethodEntry::public(
                    "boxed",
                    vec![],
                    Some(int()),
                    NativeFn::new(|_| Ok(HostValue::Prim(Primitive::Long(41)))),
                ))
                .with_method(MethodEntry::public(
                    "raise",
                    vec![],
                    Some(int()),
                    NativeFn::new(|_| Err(NativeError::Raised("host fault".to_string()))),
                )),
        )
        .unwrap();

    // Greeter: public interface implemented by a non-public class.
    let greeter = registry
        .register(
            ClassEntry::interface("Greeter")
                .with_method(MethodEntry::abstract_public("greet", vec![], Some(int()))),
        )
        .unwrap();
    registry
        .register(
            ClassEntry::new("HiddenGreeter")
                .non_public()
                .with_interface(greeter)
                .with_method(MethodEntry::public("greet", vec![], Some(int()), const_body(7))),
        )
        .unwrap();

    // Point: constructors for exact/specific/coerced selection, fields,
    // and property accessors over the score field.
    let point_desc = TypeDesc::object("Point");
    let make_point = |kind: i32| {
        let desc = point_desc.clone();
        NativeFn::new(move |call| {
            let x: i64 = call.arg(0)?;
            let y: i64 = call.arg(1)?;
            Ok(HostValue::Object(ObjectRef::instance_with_fields(
                desc.clone(),
                [
                    ("x".to_string(), HostValue::from(x as i32)),
                    ("y".to_string(), HostValue::from(y as i32)),
                    ("kind".to_string(), HostValue::from(kind)),
                ],
            )))
        })
    };
    registry
        .register(
            ClassEntry::new("Point")
                .with_constructor(ConstructorEntry::public(vec![int(), int()], make_point(1)))
                .with_constructor(ConstructorEntry::public(vec![long(), long()], make_point(2)))
                .with_field(FieldEntry::instance("x", int()))
                .with_field(FieldEntry::instance("y", int()))
                .with_field(FieldEntry::instance("score", int()))
                .with_field(FieldEntry::instance("kind", int()))
                .with_method(MethodEntry::public(
                    "getScore",
                    vec![],
                    Some(int()),
                    NativeFn::new(|call| {
                        Ok(call
                            .this()?
                            .field("score", &TypeDesc::Prim(PrimitiveKind::Int)))
                    }),
                ))
                .with_method(MethodEntry::public(
                    "setScore",
                    vec![int()],
                    None,
                    NativeFn::new(|call| {
                        let score: i32 = call.arg(0)?;
                        call.this()?.set_field("score", HostValue::from(score));
                        Ok(HostValue::Null)
                    }),
                ))
                .with_method(MethodEntry::public(
                    "getJam",
                    vec![],
                    Some(int()),
                    NativeFn::new(|_| Err(NativeError::Raised("jam".to_string()))),
                )),
        )
        .unwrap();

    // Counter: a static field slot shared with a static bump method.
    let count = FieldEntry::static_field("COUNT", int(), HostValue::from(0i32));
    let slot = count.slot.clone().expect("static field has a slot");
    registry
        .register(
            ClassEntry::new("Counter")
                .with_field(count)
                .with_method(MethodEntry::public_static(
                    "bump",
                    vec![],
                    Some(int()),
                    NativeFn::new(move |_| {
                        let next = match slot.get() {
                            HostValue::Prim(Primitive::Int(v)) => v + 1,
                            _ => 1,
                        };
                        slot.set(HostValue::from(next));
                        Ok(HostValue::from(next))
                    }),
                )),
        )
        .unwrap();

    registry
        .register(ClassEntry::new("Shape").as_abstract())
        .unwrap();

    registry
}

fn instance(registry: &HostRegistry, name: &str) -> Value {
    let hash = registry.type_hash_of(name).unwrap();
    Value::Object(ObjectRef::instance(TypeDesc::Object(hash)))
}

// === Overload selection ===

#[test]
fn exact_signature_beats_widening_overloads() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let calc = instance(&registry, "Calc");

    let by_int = engine.invoke_object_method(&calc, "f", &[Value::from(9i32)]);
    assert_eq!(by_int.unwrap(), Value::from(1i32));

    let by_long = engine.invoke_object_method(&calc, "f", &[Value::from(9i64)]);
    assert_eq!(by_long.unwrap(), Value::from(2i32));
}

#[test]
fn widening_applies_one_direction_only() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let calc = instance(&registry, "Calc");

    // int argument widens into w(long)
    let widened = engine.invoke_object_method(&calc, "w", &[Value::from(5i32)]);
    assert_eq!(widened.unwrap(), Value::from(5i64));

    // long argument never narrows into narrow(int)
    let narrowed = engine.invoke_object_method(&calc, "narrow", &[Value::from(5i64)]);
    assert!(matches!(narrowed, Err(ReflectError::NoSuchMember { .. })));
}

#[test]
fn char_argument_widens_to_int_but_never_to_short() {
    let mut registry = HostRegistry::with_builtins();
    registry
        .register(
            ClassEntry::new("Chars")
                .with_method(MethodEntry::public(
                    "s",
                    vec![TypeDesc::Prim(PrimitiveKind::Short)],
                    Some(int()),
                    const_body(1),
                ))
                .with_method(MethodEntry::public("i", vec![int()], Some(int()), const_body(2))),
        )
        .unwrap();
    let engine = Engine::new(&registry);
    let chars = instance(&registry, "Chars");

    let to_short = engine.invoke_object_method(&chars, "s", &[Value::from('a')]);
    assert!(matches!(to_short, Err(ReflectError::NoSuchMember { .. })));

    let to_int = engine.invoke_object_method(&chars, "i", &[Value::from('a')]);
    assert_eq!(to_int.unwrap(), Value::from(2i32));
}

#[test]
fn null_argument_selects_the_reference_overload() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let calc = instance(&registry, "Calc");

    let picked = engine.invoke_object_method(&calc, "h", &[Value::Null]);
    assert_eq!(picked.unwrap(), Value::from(true));

    // Only a primitive parameter available: an argument-type failure,
    // not a crash.
    let to_prim = engine.invoke_object_method(&calc, "narrow", &[Value::Null]);
    assert!(matches!(to_prim, Err(ReflectError::NoSuchMember { .. })));
}

#[test]
fn zero_argument_miss_gets_the_dedicated_kind() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let calc = instance(&registry, "Calc");

    let no_args = engine.invoke_object_method(&calc, "absent", &[]);
    assert!(matches!(no_args, Err(ReflectError::NoZeroArgMember { .. })));

    let with_args = engine.invoke_object_method(&calc, "absent", &[Value::from(1i32)]);
    assert!(matches!(with_args, Err(ReflectError::NoSuchMember { .. })));
}

// === Accessibility ===

#[test]
fn hidden_class_resolves_through_its_public_interface() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let hidden = registry.type_hash_of("HiddenGreeter").unwrap();
    let greeter = registry.type_hash_of("Greeter").unwrap();

    let handle = find_accessible_method(&registry, hidden, "greet", &[]).unwrap();
    assert_eq!(handle.declaring, greeter);

    // The handle is declared on the interface; the body still comes from
    // the concrete class.
    let target = instance(&registry, "HiddenGreeter");
    let result = engine.invoke_object_method(&target, "greet", &[]);
    assert_eq!(result.unwrap(), Value::from(7i32));
}

// === Invoker & value adapter ===

#[test]
fn void_arguments_fail_positionally_before_any_search() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let calc = instance(&registry, "Calc");

    // The member does not even exist; void rejection comes first.
    let err = engine
        .invoke_object_method(&calc, "no_such", &[Value::from(1i32), Value::Void])
        .unwrap_err();
    assert!(matches!(err, ReflectError::VoidArgument { position: 1, .. }));

    let point = registry.type_hash_of("Point").unwrap();
    let err = engine.construct_object(point, &[Value::Void]).unwrap_err();
    assert!(matches!(err, ReflectError::VoidArgument { position: 0, .. }));
}

#[test]
fn declared_return_kind_wins_over_the_boxed_kind() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let calc = instance(&registry, "Calc");

    let result = engine.invoke_object_method(&calc, "boxed", &[]).unwrap();
    assert_eq!(result, Value::Prim(Primitive::Int(41)));
}

#[test]
fn host_faults_surface_as_invocation_failures() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let calc = instance(&registry, "Calc");

    let err = engine.invoke_object_method(&calc, "raise", &[]).unwrap_err();
    assert!(matches!(
        err,
        ReflectError::Invocation {
            source: NativeError::Raised(_),
            ..
        }
    ));

    // Instance member through a static call: no target to dispatch on.
    let calc_hash = registry.type_hash_of("Calc").unwrap();
    let err = engine
        .invoke_static_method(calc_hash, "boxed", &[])
        .unwrap_err();
    assert!(matches!(
        err,
        ReflectError::Invocation {
            source: NativeError::MissingTarget,
            ..
        }
    ));
}

// === Constructors ===

#[test]
fn constructor_selection_exact_then_most_specific() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let point = registry.type_hash_of("Point").unwrap();

    let exact = engine
        .construct_object(point, &[Value::from(3i32), Value::from(4i32)])
        .unwrap();
    assert_eq!(engine.get_object_field(&exact, "x").unwrap(), Value::from(3i32));
    assert_eq!(
        engine.get_object_field(&exact, "kind").unwrap(),
        Value::from(1i32)
    );

    // short/short applies to both overloads; (int, int) is more specific.
    let specific = engine
        .construct_object(point, &[Value::from(3i16), Value::from(4i16)])
        .unwrap();
    assert_eq!(
        engine.get_object_field(&specific, "kind").unwrap(),
        Value::from(1i32)
    );

    let none = engine.construct_object(point, &[]).unwrap_err();
    assert!(matches!(none, ReflectError::NoZeroArgMember { .. }));
}

#[test]
fn abstract_classes_do_not_instantiate() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let shape = registry.type_hash_of("Shape").unwrap();

    let err = engine.construct_object(shape, &[]).unwrap_err();
    assert!(matches!(err, ReflectError::Instantiation { .. }));
}

// === Extended coercion fallback ===

struct NumericCoercer;

impl ExtendedCoercer for NumericCoercer {
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
fn fallback_converts_arguments_when_standard_resolution_fails() {
    let registry = fixture();
    let calc = instance(&registry, "Calc");

    // Without the coercer a double argument matches nothing.
    let strict = Engine::new(&registry);
    let err = strict.invoke_object_method(&calc, "f", &[Value::from(2.9f64)]);
    assert!(matches!(err, Err(ReflectError::NoSuchMember { .. })));

    let lenient = Engine::new(&registry).with_coercer(Box::new(NumericCoercer));
    let result = lenient.invoke_object_method(&calc, "f", &[Value::from(2.9f64)]);
    assert_eq!(result.unwrap(), Value::from(1i32));

    // Constructors take the same fallback.
    let point = registry.type_hash_of("Point").unwrap();
    let built = lenient
        .construct_object(point, &[Value::from(1.5f64), Value::from(2.5f64)])
        .unwrap();
    assert_eq!(
        lenient.get_object_field(&built, "x").unwrap(),
        Value::from(1i32)
    );
}

// === Properties and fields ===

#[test]
fn property_accessors_synthesize_get_and_set() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let point = registry.type_hash_of("Point").unwrap();
    let obj = engine
        .construct_object(point, &[Value::from(0i32), Value::from(0i32)])
        .unwrap();

    engine
        .set_object_property(&obj, "score", &Value::from(12i32))
        .unwrap();
    assert_eq!(
        engine.get_object_property(&obj, "score").unwrap(),
        Value::from(12i32)
    );
}

#[test]
fn missing_and_raising_accessors_collapse_to_one_kind() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let point = registry.type_hash_of("Point").unwrap();
    let obj = engine
        .construct_object(point, &[Value::from(0i32), Value::from(0i32)])
        .unwrap();

    let missing = engine.get_object_property(&obj, "vapor").unwrap_err();
    assert!(matches!(
        missing,
        ReflectError::PropertyAccessor { property } if property == "vapor"
    ));

    let raising = engine.get_object_property(&obj, "jam").unwrap_err();
    assert!(matches!(raising, ReflectError::PropertyAccessor { .. }));
}

#[test]
fn static_fields_read_and_produce_live_lhs_slots() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let counter = registry.type_hash_of("Counter").unwrap();

    assert_eq!(
        engine.get_static_field(counter, "COUNT").unwrap(),
        Value::from(0i32)
    );

    let lhs = engine.get_lhs_static_field(counter, "COUNT").unwrap();
    match &lhs {
        Lhs::StaticField { slot, .. } => slot.set(HostValue::from(5i32)),
        other => panic!("expected a static field lhs, got {other:?}"),
    }
    assert_eq!(
        engine.get_static_field(counter, "COUNT").unwrap(),
        Value::from(5i32)
    );

    // The static bump method shares the same slot.
    assert_eq!(
        engine.invoke_static_method(counter, "bump", &[]).unwrap(),
        Value::from(6i32)
    );

    let missing = engine.get_static_field(counter, "MISSING");
    assert!(matches!(missing, Err(ReflectError::NoSuchField { .. })));
}

#[test]
fn instance_field_lhs_names_the_object_slot() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let point = registry.type_hash_of("Point").unwrap();
    let obj = engine
        .construct_object(point, &[Value::from(8i32), Value::from(9i32)])
        .unwrap();

    let lhs = engine.get_lhs_object_field(&obj, "x").unwrap();
    assert!(matches!(lhs, Lhs::ObjectField { field, .. } if field == "x"));
}

// === Arrays ===

#[test]
fn array_type_construction_matches_a_direct_exemplar() {
    let registry = fixture();
    let engine = Engine::new(&registry);

    let node = TypeNode::with_dimensions(int(), 2);
    let direct = ObjectRef::zeroed_array(int(), 2);
    assert_eq!(node.resolve(), direct.class());

    assert_eq!(engine.normalize_class_name(node.resolve()), "int[][]");
    assert_eq!(engine.array_dimensions(node.resolve()), 2);
    assert_eq!(engine.array_base_type(node.resolve()).unwrap(), &int());
}

#[test]
fn array_element_access_round_trips_and_classifies_faults() {
    let registry = fixture();
    let engine = Engine::new(&registry);

    let arr = Value::Object(ObjectRef::array(long(), 2));
    engine.set_index(&arr, 1, &Value::from(3i32)).unwrap();
    assert_eq!(engine.get_index(&arr, 1).unwrap(), Value::from(3i64));

    let oob = engine.get_index(&arr, 5).unwrap_err();
    assert!(matches!(
        oob,
        ReflectError::ArrayAccess {
            source: NativeError::IndexOutOfBounds { .. }
        }
    ));

    let not_array = engine.get_index(&Value::from(1i32), 0).unwrap_err();
    assert!(matches!(
        not_array,
        ReflectError::ArrayAccess {
            source: NativeError::NotAnArray
        }
    ));
}

// === Namespace entry points ===

#[derive(Default)]
struct TestNamespace {
    targets: FxHashMap<String, Target>,
    locals: FxHashMap<String, ScriptCallable>,
    vars: FxHashMap<String, Value>,
}

impl Namespace for TestNamespace {
    fn resolve_target(&self, name: &str) -> Option<Target> {
        self.targets.get(name).cloned()
    }

    fn local_method(&self, name: &str) -> Option<ScriptCallable> {
        self.locals.get(name).cloned()
    }

    fn variable(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }
}

fn namespace_fixture(registry: &HostRegistry) -> TestNamespace {
    let mut ns = TestNamespace::default();
    ns.targets
        .insert("calc".to_string(), Target::Value(instance(registry, "Calc")));
    ns.targets.insert(
        "Counter".to_string(),
        Target::Class(registry.type_hash_of("Counter").unwrap()),
    );
    ns.targets
        .insert("nothing".to_string(), Target::Value(Value::Null));
    ns.targets
        .insert("pi".to_string(), Target::Value(Value::from(3.14f64)));
    ns.targets
        .insert("gap".to_string(), Target::Value(Value::Void));
    let twice: ScriptCallable = Arc::new(|args| match args {
        [Value::Prim(Primitive::Int(v))] => Ok(Value::from(v * 2)),
        _ => Ok(Value::Null),
    });
    ns.locals.insert("twice".to_string(), twice);
    ns.vars.insert("mood".to_string(), Value::from(1i32));
    ns
}

#[test]
fn compound_names_split_into_target_and_member() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let ns = namespace_fixture(&registry);

    let dynamic = engine.invoke_method(&ns, "calc.f", &[Value::from(1i32)]);
    assert_eq!(dynamic.unwrap(), Value::from(1i32));

    let stat = engine.invoke_method(&ns, "Counter.bump", &[]);
    assert_eq!(stat.unwrap(), Value::from(1i32));

    let local = engine.invoke_method(&ns, "twice", &[Value::from(4i32)]);
    assert_eq!(local.unwrap(), Value::from(8i32));

    let missing_local = engine.invoke_method(&ns, "thrice", &[]);
    assert!(matches!(
        missing_local,
        Err(ReflectError::NoSuchMember { .. })
    ));

    let unresolved = engine.invoke_method(&ns, "ghost.f", &[]);
    assert!(matches!(
        unresolved,
        Err(ReflectError::AmbiguousTarget { name }) if name == "ghost"
    ));
}

#[test]
fn null_void_and_primitive_targets_are_distinct_failures() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let ns = namespace_fixture(&registry);

    assert!(matches!(
        engine.invoke_method(&ns, "nothing.f", &[]),
        Err(ReflectError::NullTarget { .. })
    ));
    assert!(matches!(
        engine.invoke_method(&ns, "gap.f", &[]),
        Err(ReflectError::VoidTarget { .. })
    ));
    assert!(matches!(
        engine.invoke_method(&ns, "pi.f", &[]),
        Err(ReflectError::PrimitiveTarget { .. })
    ));
}

// === Script instances ===

struct Widget {
    ns: Arc<TestNamespace>,
}

impl ScriptInstance for Widget {
    fn declared_method(&self, name: &str) -> Option<ScriptCallable> {
        if name == "area" {
            let area: ScriptCallable = Arc::new(|_| Ok(Value::from(42i32)));
            Some(area)
        } else {
            None
        }
    }

    fn default_invoke_handler(&self) -> Option<DefaultInvokeHandler> {
        let handler: DefaultInvokeHandler =
            Arc::new(|name, args| Ok(Value::from((name.len() + args.len()) as i32)));
        Some(handler)
    }

    fn namespace(&self) -> Arc<dyn Namespace> {
        self.ns.clone()
    }
}

#[test]
fn script_targets_use_declared_methods_then_the_default_handler() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let ns = Arc::new(namespace_fixture(&registry));
    let widget = Value::Script(ScriptRef::new(Widget { ns }));

    let declared = engine.invoke_object_method(&widget, "area", &[]);
    assert_eq!(declared.unwrap(), Value::from(42i32));

    // "resize" (6) + one argument
    let handled = engine.invoke_object_method(&widget, "resize", &[Value::from(1i32)]);
    assert_eq!(handled.unwrap(), Value::from(7i32));
}

#[test]
fn script_field_access_routes_to_the_namespace() {
    let registry = fixture();
    let engine = Engine::new(&registry);
    let ns = Arc::new(namespace_fixture(&registry));
    let widget = Value::Script(ScriptRef::new(Widget { ns }));

    assert_eq!(
        engine.get_object_field(&widget, "mood").unwrap(),
        Value::from(1i32)
    );
    assert_eq!(
        engine.get_object_field(&widget, "unset").unwrap(),
        Value::Void
    );

    let lhs = engine.get_lhs_object_field(&widget, "mood").unwrap();
    assert!(matches!(lhs, Lhs::Variable { name, .. } if name == "mood"));
}

// === Observer and ambiguity configuration ===

struct Recording(Arc<Mutex<Vec<String>>>);

impl ResolveObserver for Recording {
    fn exact_miss(&self, _type_name: &str, member: &str) {
        self.0.lock().unwrap().push(format!("miss:{member}"));
    }

    fn candidate_rejected(&self, member: &str, _params: &[TypeDesc]) {
        self.0.lock().unwrap().push(format!("reject:{member}"));
    }

    fn candidate_selected(&self, member: &str, _params: &[TypeDesc]) {
        self.0.lock().unwrap().push(format!("select:{member}"));
    }

    fn fallback_engaged(&self, member: &str) {
        self.0.lock().unwrap().push(format!("fallback:{member}"));
    }
}

#[test]
fn observer_sees_the_resolution_checkpoints() {
    let registry = fixture();
    let events = Arc::new(Mutex::new(Vec::new()));
    let engine = Engine::new(&registry).with_observer(Box::new(Recording(events.clone())));
    let calc = instance(&registry, "Calc");

    // int widens into w(long): exact miss, then a selection.
    engine
        .invoke_object_method(&calc, "w", &[Value::from(5i32)])
        .unwrap();

    let seen = events.lock().unwrap().clone();
    assert!(seen.contains(&"miss:w".to_string()));
    assert!(seen.contains(&"select:w".to_string()));
}

#[test]
fn ambiguity_detection_is_opt_in() {
    let mut registry = HostRegistry::with_builtins();
    let a = registry.register(ClassEntry::interface("A")).unwrap();
    let b = registry.register(ClassEntry::interface("B")).unwrap();
    let both = registry
        .register(ClassEntry::new("Both").with_interface(a).with_interface(b))
        .unwrap();
    registry
        .register(
            ClassEntry::new("Sink")
                .with_method(MethodEntry::public(
                    "take",
                    vec![TypeDesc::Object(a)],
                    Some(int()),
                    const_body(1),
                ))
                .with_method(MethodEntry::public(
                    "take",
                    vec![TypeDesc::Object(b)],
                    Some(int()),
                    const_body(2),
                )),
        )
        .unwrap();

    let sink = instance(&registry, "Sink");
    let arg = Value::Object(ObjectRef::instance(TypeDesc::Object(both)));

    // Default: first found wins, silently.
    let silent = Engine::new(&registry);
    let picked = silent.invoke_object_method(&sink, "take", &[arg.clone()]);
    assert_eq!(picked.unwrap(), Value::from(1i32));

    // Opt-in: the same call reports the tie.
    let strict = Engine::new(&registry).with_config(EngineConfig {
        detect_ambiguity: true,
    });
    let detected = strict.invoke_object_method(&sink, "take", &[arg]);
    assert!(matches!(detected, Err(ReflectError::Ambiguous { .. })));
}

// Type hash sanity for the surface the interpreter uses.
#[test]
fn class_identity_is_name_deterministic() {
    let registry = fixture();
    assert_eq!(
        registry.type_hash_of("Calc").unwrap(),
        TypeHash::from_name("Calc")
    );
}
