use super::*;
use crate::bytecode::{assemble, Opcode};
use crate::MultinameId;
use pretty_assertions::assert_eq;

fn image(code: Vec<u8>) -> CodeUnitImage {
    CodeUnitImage {
        multinames: vec![
            MultinameImage {
                name: "a".into(),
                namespaces: vec![],
            },
            MultinameImage {
                name: "b".into(),
                namespaces: vec!["public".into()],
            },
        ],
        frames: vec![
            FrameImage {
                parent: None,
                slots: vec![SlotImage::named("a")],
            },
            FrameImage {
                parent: Some(0),
                slots: vec![SlotImage {
                    name: "b".into(),
                    namespace: Some("public".into()),
                    hoisted: true,
                    immutable: false,
                }],
            },
        ],
        constants: vec![ConstantImage::Int(2), ConstantImage::Str("hi".into())],
        base_frame: 0,
        code,
    }
}

#[test]
fn test_load_builds_tables() {
    let code = assemble(&[
        Instruction::PushFrame(FrameId(1)),
        Instruction::Constant(ConstantId(0)),
        Instruction::LexicalWrite(MultinameId(1)),
        Instruction::PopFrame,
        Instruction::Return,
    ]);
    let interner = SharedInterner::new();
    let unit = CodeUnit::load(&image(code), interner.clone()).unwrap();

    assert_eq!(unit.multinames().len(), 2);
    assert_eq!(unit.frames().len(), 2);
    assert_eq!(unit.base_frame(), FrameId(0));
    assert_eq!(unit.constant(ConstantId(0)).unwrap(), &Constant::Int(2));
    assert_eq!(
        unit.constant(ConstantId(1)).unwrap(),
        &Constant::Str(interner.intern("hi"))
    );

    let child = unit.frames().get(FrameId(1)).unwrap();
    assert_eq!(child.parent(), Some(FrameId(0)));
    assert_eq!(child.slots()[0].flags, SlotFlags::HOISTED);
    assert_eq!(
        child.slots()[0].name.namespace,
        Some(Namespace(interner.intern("public")))
    );
}

#[test]
fn test_verify_rejects_out_of_range_multiname() {
    let code = assemble(&[Instruction::LexicalRead(MultinameId(9))]);
    let err = CodeUnit::load(&image(code), SharedInterner::new()).unwrap_err();
    assert_eq!(err, LoadError::MultinameOutOfRange { index: 9, len: 2 });
}

#[test]
fn test_verify_rejects_out_of_range_frame() {
    let code = assemble(&[Instruction::PushFrame(FrameId(5))]);
    let err = CodeUnit::load(&image(code), SharedInterner::new()).unwrap_err();
    assert_eq!(err, LoadError::FrameOutOfRange { index: 5, len: 2 });
}

#[test]
fn test_verify_rejects_out_of_range_constant() {
    let code = assemble(&[Instruction::Constant(ConstantId(2))]);
    let err = CodeUnit::load(&image(code), SharedInterner::new()).unwrap_err();
    assert_eq!(err, LoadError::ConstantOutOfRange { index: 2, len: 2 });
}

#[test]
fn test_verify_rejects_truncated_stream() {
    let code = vec![Opcode::LexicalRead as u8];
    let err = CodeUnit::load(&image(code), SharedInterner::new()).unwrap_err();
    assert!(matches!(err, LoadError::TruncatedOperand { .. }));
}

#[test]
fn test_verify_rejects_missing_base_frame() {
    let mut img = image(vec![]);
    img.base_frame = 4;
    let err = CodeUnit::load(&img, SharedInterner::new()).unwrap_err();
    assert_eq!(err, LoadError::FrameOutOfRange { index: 4, len: 2 });
}

#[test]
fn test_disassemble_resolves_operands() {
    let code = assemble(&[
        Instruction::PushFrame(FrameId(1)),
        Instruction::Constant(ConstantId(1)),
        Instruction::LexicalRead(MultinameId(1)),
        Instruction::Return,
    ]);
    let unit = CodeUnit::load(&image(code), SharedInterner::new()).unwrap();
    let listing = unit.disassemble();
    let lines: Vec<_> = listing.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("push_frame 1  ; [public::b]"));
    assert!(lines[1].ends_with("constant 1  ; \"hi\""));
    assert!(lines[2].ends_with("lexical_read 1  ; {public}::b"));
    assert!(lines[3].ends_with("return"));
}

#[cfg(feature = "serde")]
#[test]
fn test_image_bincode_roundtrip() {
    let img = image(assemble(&[Instruction::Return]));
    let bytes = img.to_bytes().unwrap();
    assert_eq!(CodeUnitImage::from_bytes(&bytes).unwrap(), img);
}
