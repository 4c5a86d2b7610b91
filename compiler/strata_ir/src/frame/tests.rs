use super::*;
use crate::Namespace;
use pretty_assertions::assert_eq;

#[test]
fn test_push_returns_sequential_ids() {
    let interner = StringInterner::new();
    let mut arena = FrameArena::new();
    let base = arena
        .push(FrameTemplate::unqualified(&interner, None, &["a"]), &interner)
        .unwrap();
    let child = arena
        .push(
            FrameTemplate::unqualified(&interner, Some(base), &["b"]),
            &interner,
        )
        .unwrap();
    assert_eq!(base, FrameId(0));
    assert_eq!(child, FrameId(1));
    assert_eq!(arena.get(child).unwrap().parent(), Some(base));
}

#[test]
fn test_parent_must_precede_child() {
    let interner = StringInterner::new();
    let mut arena = FrameArena::new();
    let err = arena
        .push(FrameTemplate::new(Some(FrameId(0)), vec![]), &interner)
        .unwrap_err();
    assert_eq!(err, LoadError::ParentNotDeclared { child: 0, parent: 0 });
}

#[test]
fn test_duplicate_slot_rejected() {
    let interner = StringInterner::new();
    let mut arena = FrameArena::new();
    let err = arena
        .push(
            FrameTemplate::unqualified(&interner, None, &["x", "y", "x"]),
            &interner,
        )
        .unwrap_err();
    assert_eq!(
        err,
        LoadError::DuplicateSlot {
            frame: 0,
            name: "x".to_string()
        }
    );
}

#[test]
fn test_same_name_different_namespaces_allowed() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let ns = Namespace(interner.intern("private"));
    let mut arena = FrameArena::new();
    let template = FrameTemplate::new(
        None,
        vec![
            SlotDecl::new(QualifiedName::unqualified(x)),
            SlotDecl::new(QualifiedName::qualified(ns, x)).with_flags(SlotFlags::IMMUTABLE),
        ],
    );
    let id = arena.push(template, &interner).unwrap();
    assert_eq!(arena.get(id).unwrap().slots().len(), 2);
}

#[test]
fn test_nesting_depth() {
    let interner = StringInterner::new();
    let mut arena = FrameArena::new();
    let a = arena.push(FrameTemplate::new(None, vec![]), &interner).unwrap();
    let b = arena.push(FrameTemplate::new(Some(a), vec![]), &interner).unwrap();
    let c = arena.push(FrameTemplate::new(Some(b), vec![]), &interner).unwrap();
    assert_eq!(arena.nesting_depth(a).unwrap(), 0);
    assert_eq!(arena.nesting_depth(c).unwrap(), 2);
}

#[test]
fn test_get_out_of_range() {
    let arena = FrameArena::new();
    assert_eq!(
        arena.get(FrameId(3)),
        Err(LoadError::FrameOutOfRange { index: 3, len: 0 })
    );
}
