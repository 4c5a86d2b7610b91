use super::*;
use crate::{ErrorCategory, ObjectId, PropertyTable};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use strata_ir::{Namespace, SlotDecl};

fn env_with(interner: &SharedInterner, base_names: &[&str]) -> Environment {
    let template = FrameTemplate::unqualified(interner, None, base_names);
    Environment::new(interner.clone(), Frame::instantiate(FrameId(0), &template))
}

fn mn(interner: &SharedInterner, name: &str) -> Multiname {
    Multiname::unqualified(interner.intern(name))
}

#[test]
fn test_base_frame_always_present() {
    let interner = SharedInterner::new();
    let mut env = env_with(&interner, &[]);
    assert_eq!(env.depth(), 1);
    assert_eq!(env.pop_frame().unwrap_err(), EvalError::FrameUnderflow);
    assert_eq!(env.depth(), 1);
}

#[test]
fn test_shadowing_and_pop_restores_outer() {
    let interner = SharedInterner::new();
    let x = mn(&interner, "x");
    let mut env = env_with(&interner, &["x"]);
    env.lexical_write(&x, Value::int(1), false, Phase::Run)
        .unwrap();

    let inner = FrameTemplate::unqualified(&interner, Some(FrameId(0)), &["x"]);
    env.push_frame(FrameId(1), &inner);
    env.lexical_write(&x, Value::int(2), false, Phase::Run)
        .unwrap();
    assert_eq!(env.lexical_read(&x, Phase::Run, None), Ok(Value::int(2)));
    assert_eq!(env.resolution_distance(&x), Some(0));

    env.pop_frame().unwrap();
    assert_eq!(env.lexical_read(&x, Phase::Run, None), Ok(Value::int(1)));
}

#[test]
fn test_write_then_read_same_frame() {
    let interner = SharedInterner::new();
    let x = mn(&interner, "x");
    let mut env = env_with(&interner, &[]);
    let inner = FrameTemplate::new(Some(FrameId(0)), vec![]);
    env.push_frame(FrameId(1), &inner);

    env.lexical_write(&x, Value::int(5), true, Phase::Run).unwrap();
    assert_eq!(env.lexical_read(&x, Phase::Run, None), Ok(Value::int(5)));
    assert_eq!(env.innermost().len(), 1);
    assert!(env.base().is_empty());
}

#[test]
fn test_undeclared_read_fails() {
    let interner = SharedInterner::new();
    let env = env_with(&interner, &[]);
    let err = env
        .lexical_read(&mn(&interner, "nope"), Phase::Run, None)
        .unwrap_err();
    assert_eq!(err, EvalError::UnresolvedBinding { name: "nope".into() });
    assert_eq!(err.category(), ErrorCategory::Runtime);
}

#[test]
fn test_undeclared_write_without_declare_fails() {
    let interner = SharedInterner::new();
    let mut env = env_with(&interner, &[]);
    let err = env
        .lexical_write(&mn(&interner, "y"), Value::int(1), false, Phase::Run)
        .unwrap_err();
    assert_eq!(err, EvalError::UnresolvedBinding { name: "y".into() });
    assert!(env.innermost().is_empty());
}

#[test]
fn test_declared_binding_lands_in_innermost_frame() {
    let interner = SharedInterner::new();
    let y = mn(&interner, "y");
    let mut env = env_with(&interner, &[]);
    env.push_frame(FrameId(1), &FrameTemplate::default());
    env.lexical_write(&y, Value::int(3), true, Phase::Run).unwrap();

    assert_eq!(env.innermost().get(&y), Some(&Value::int(3)));
    env.pop_frame().unwrap();
    assert!(env.lexical_read(&y, Phase::Run, None).is_err());
}

#[test]
fn test_uninitialized_read_depends_on_phase() {
    let interner = SharedInterner::new();
    let x = mn(&interner, "x");
    let env = env_with(&interner, &["x"]);

    assert_eq!(
        env.lexical_read(&x, Phase::Static, None),
        Err(EvalError::UsedBeforeInitialization { name: "x".into() })
    );
    assert_eq!(
        env.lexical_read(&x, Phase::Run, None),
        Ok(Value::Uninitialized)
    );
}

#[test]
fn test_policy_overrides_run_phase() {
    let interner = SharedInterner::new();
    let x = mn(&interner, "x");
    let mut env = env_with(&interner, &["x"]);

    env.set_policy(BindingPolicy {
        static_phase: UninitializedRead::Reject,
        run_phase: UninitializedRead::Undefined,
    });
    assert_eq!(env.lexical_read(&x, Phase::Run, None), Ok(Value::Undefined));

    let env = env.with_policy(BindingPolicy::STRICT);
    assert!(env.lexical_read(&x, Phase::Run, None).is_err());
}

#[test]
fn test_hoisted_slot_starts_undefined() {
    let interner = SharedInterner::new();
    let v = interner.intern("v");
    let template = FrameTemplate::new(
        None,
        vec![SlotDecl::new(QualifiedName::unqualified(v)).with_flags(SlotFlags::HOISTED)],
    );
    let env = Environment::new(interner.clone(), Frame::instantiate(FrameId(0), &template));
    assert_eq!(
        env.lexical_read(&Multiname::unqualified(v), Phase::Static, None),
        Ok(Value::Undefined)
    );
}

#[test]
fn test_immutable_slot_accepts_only_initializing_write() {
    let interner = SharedInterner::new();
    let k = interner.intern("k");
    let template = FrameTemplate::new(
        None,
        vec![SlotDecl::new(QualifiedName::unqualified(k)).with_flags(SlotFlags::IMMUTABLE)],
    );
    let mut env = Environment::new(interner.clone(), Frame::instantiate(FrameId(0), &template));
    let k = Multiname::unqualified(k);

    env.lexical_write(&k, Value::int(1), false, Phase::Run).unwrap();
    assert_eq!(
        env.lexical_write(&k, Value::int(2), false, Phase::Run),
        Err(EvalError::ImmutableBinding { name: "k".into() })
    );
    assert_eq!(env.lexical_read(&k, Phase::Run, None), Ok(Value::int(1)));
}

#[test]
fn test_writing_the_sentinel_initializes_the_slot() {
    let interner = SharedInterner::new();
    let k = interner.intern("k");
    let template = FrameTemplate::new(
        None,
        vec![SlotDecl::new(QualifiedName::unqualified(k)).with_flags(SlotFlags::IMMUTABLE)],
    );
    let mut env = Environment::new(interner.clone(), Frame::instantiate(FrameId(0), &template));
    let k = Multiname::unqualified(k);

    env.lexical_write(&k, Value::Uninitialized, false, Phase::Run)
        .unwrap();
    assert_eq!(
        env.lexical_read(&k, Phase::Static, None),
        Ok(Value::Uninitialized)
    );
    assert_eq!(
        env.lexical_write(&k, Value::int(2), false, Phase::Run),
        Err(EvalError::ImmutableBinding { name: "k".into() })
    );
}

#[test]
fn test_namespace_matching() {
    let interner = SharedInterner::new();
    let x = interner.intern("x");
    let public = Namespace(interner.intern("public"));
    let private = Namespace(interner.intern("private"));

    let mut env = env_with(&interner, &[]);
    env.define(QualifiedName::qualified(private, x), Value::int(1), SlotFlags::empty());
    env.define(QualifiedName::unqualified(x), Value::int(0), SlotFlags::empty());

    let qualified = Multiname::new(x, [public, private]);
    assert_eq!(
        env.lexical_read(&qualified, Phase::Run, None),
        Ok(Value::int(1))
    );
    assert_eq!(
        env.lexical_read(&Multiname::unqualified(x), Phase::Run, None),
        Ok(Value::int(0))
    );
    assert!(env
        .lexical_read(&Multiname::new(x, [public]), Phase::Run, None)
        .is_err());
}

#[test]
fn test_namespace_priority_follows_reference_order() {
    let interner = SharedInterner::new();
    let x = interner.intern("x");
    let public = Namespace(interner.intern("public"));
    let private = Namespace(interner.intern("private"));

    let mut env = env_with(&interner, &[]);
    env.define(QualifiedName::qualified(private, x), Value::int(1), SlotFlags::empty());
    env.define(QualifiedName::qualified(public, x), Value::int(2), SlotFlags::empty());

    assert_eq!(
        env.lexical_read(&Multiname::new(x, [public, private]), Phase::Run, None),
        Ok(Value::int(2))
    );
    assert_eq!(
        env.lexical_read(&Multiname::new(x, [private, public]), Phase::Run, None),
        Ok(Value::int(1))
    );
}

#[test]
fn test_qualified_declaration_uses_first_namespace() {
    let interner = SharedInterner::new();
    let x = interner.intern("x");
    let a = Namespace(interner.intern("a"));
    let b = Namespace(interner.intern("b"));
    let mut env = env_with(&interner, &[]);

    env.lexical_write(&Multiname::new(x, [a, b]), Value::int(4), true, Phase::Run)
        .unwrap();
    assert_eq!(
        env.lexical_read(&Multiname::new(x, [a]), Phase::Run, None),
        Ok(Value::int(4))
    );
    assert!(env
        .lexical_read(&Multiname::new(x, [b]), Phase::Run, None)
        .is_err());
}

#[test]
fn test_ambient_fallback() {
    let interner = SharedInterner::new();
    let g = interner.intern("g");
    let mut table = PropertyTable::new();
    table.set(ObjectId(0), QualifiedName::unqualified(g), Value::int(42));
    let receiver = Value::Object(ObjectId(0));

    let env = env_with(&interner, &[]);
    let ambient = Some(Ambient::new(&receiver, &table));
    assert_eq!(
        env.lexical_read(&Multiname::unqualified(g), Phase::Run, ambient),
        Ok(Value::int(42))
    );
    assert_eq!(
        env.lexical_read(&mn(&interner, "missing"), Phase::Run, ambient),
        Err(EvalError::UnresolvedBinding {
            name: "missing".into()
        })
    );
}

#[test]
fn test_frame_binding_beats_ambient() {
    let interner = SharedInterner::new();
    let g = interner.intern("g");
    let mut table = PropertyTable::new();
    table.set(ObjectId(0), QualifiedName::unqualified(g), Value::int(42));
    let receiver = Value::Object(ObjectId(0));

    let mut env = env_with(&interner, &[]);
    env.define_global(QualifiedName::unqualified(g), Value::int(7), SlotFlags::empty());
    assert_eq!(
        env.lexical_read(
            &Multiname::unqualified(g),
            Phase::Run,
            Some(Ambient::new(&receiver, &table))
        ),
        Ok(Value::int(7))
    );
}

#[test]
fn test_define_global_overwrites() {
    let interner = SharedInterner::new();
    let a = interner.intern("a");
    let mut env = env_with(&interner, &["a"]);
    env.push_frame(FrameId(1), &FrameTemplate::default());

    env.define_global(QualifiedName::unqualified(a), Value::int(1), SlotFlags::empty());
    env.define_global(QualifiedName::unqualified(a), Value::int(2), SlotFlags::empty());
    assert_eq!(env.base().len(), 1);
    assert!(env.innermost().is_empty());
    assert_eq!(
        env.lexical_read(&Multiname::unqualified(a), Phase::Run, None),
        Ok(Value::int(2))
    );
}

#[test]
fn test_for_unit_instantiates_base_template() {
    use strata_ir::{CodeUnit, CodeUnitImage, FrameImage, SlotImage};

    let image = CodeUnitImage {
        frames: vec![FrameImage {
            parent: None,
            slots: vec![SlotImage::named("a")],
        }],
        ..CodeUnitImage::default()
    };
    let unit = CodeUnit::load(&image, SharedInterner::new()).unwrap();
    let env = Environment::for_unit(&unit).unwrap();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.base().template(), Some(FrameId(0)));
    assert_eq!(env.base().len(), 1);
}

#[derive(Clone, Debug)]
enum FrameOp {
    Push,
    Pop,
}

fn frame_ops() -> impl Strategy<Value = Vec<FrameOp>> {
    prop::collection::vec(
        prop_oneof![Just(FrameOp::Push), Just(FrameOp::Pop)],
        0..64,
    )
}

proptest! {
    #[test]
    fn prop_depth_tracks_unmatched_pushes(ops in frame_ops()) {
        let interner = SharedInterner::new();
        let mut env = env_with(&interner, &[]);
        let template = FrameTemplate::default();
        let mut open = 0usize;

        for op in ops {
            match op {
                FrameOp::Push => {
                    env.push_frame(FrameId(1), &template);
                    open += 1;
                }
                FrameOp::Pop if open > 0 => {
                    prop_assert!(env.pop_frame().is_ok());
                    open -= 1;
                }
                FrameOp::Pop => {
                    let err = env.pop_frame().unwrap_err();
                    prop_assert!(err.is_fatal());
                }
            }
            prop_assert_eq!(env.depth(), open + 1);
        }
    }

    #[test]
    fn prop_innermost_binding_wins(values in prop::collection::vec(any::<i64>(), 1..16)) {
        let interner = SharedInterner::new();
        let x = mn(&interner, "x");
        let mut env = env_with(&interner, &[]);
        let template = FrameTemplate::unqualified(&interner, None, &["x"]);

        for &v in &values {
            env.push_frame(FrameId(1), &template);
            env.lexical_write(&x, Value::int(v), false, Phase::Run).unwrap();
        }
        for &v in values.iter().rev() {
            prop_assert_eq!(env.lexical_read(&x, Phase::Run, None), Ok(Value::int(v)));
            env.pop_frame().unwrap();
        }
        prop_assert!(env.lexical_read(&x, Phase::Run, None).is_err());
    }
}
