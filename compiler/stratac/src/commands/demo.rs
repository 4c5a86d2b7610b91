//! The `demo` command: run the nested-scope scenario with an instruction trace.

use std::fmt::Write;

use rustc_hash::FxHashMap;
use strata_eval::{EvalError, InterpreterBuilder, Phase, Step};
use strata_ir::bytecode::{assemble, Decoder};
use strata_ir::{
    CodeUnit, CodeUnitImage, ConstantId, ConstantImage, FrameId, FrameImage, Instruction,
    MultinameId, MultinameImage, SharedInterner, SlotImage,
};

use super::CommandError;

/// The demo unit.
///
/// Base frame declares `a`, a child frame declares `b`. The program reads
/// `a` before initializing it, writes `a = 1`, enters the child scope, writes
/// `b = 2`, reads both, leaves the scope and reads `b` again, which fails.
pub fn demo_image() -> CodeUnitImage {
    let a = MultinameId(0);
    let b = MultinameId(1);
    CodeUnitImage {
        multinames: vec![
            MultinameImage {
                name: "a".to_string(),
                namespaces: Vec::new(),
            },
            MultinameImage {
                name: "b".to_string(),
                namespaces: Vec::new(),
            },
        ],
        frames: vec![
            FrameImage {
                parent: None,
                slots: vec![SlotImage::named("a")],
            },
            FrameImage {
                parent: Some(0),
                slots: vec![SlotImage::named("b")],
            },
        ],
        constants: vec![ConstantImage::Int(1), ConstantImage::Int(2)],
        base_frame: 0,
        code: assemble(&[
            Instruction::LexicalRead(a),
            Instruction::Pop,
            Instruction::Constant(ConstantId(0)),
            Instruction::LexicalWrite(a),
            Instruction::Pop,
            Instruction::PushFrame(FrameId(1)),
            Instruction::Constant(ConstantId(1)),
            Instruction::LexicalWrite(b),
            Instruction::Pop,
            Instruction::LexicalRead(a),
            Instruction::Pop,
            Instruction::LexicalRead(b),
            Instruction::Pop,
            Instruction::PopFrame,
            Instruction::LexicalRead(b),
            Instruction::Return,
        ]),
    }
}

/// Run the demo unit under `phase` and render a per-instruction trace.
///
/// With `emit`, the unit image is also written to that path for use with
/// `disasm` and `run`.
pub fn run_demo(phase: Phase, emit: Option<&str>) -> Result<String, CommandError> {
    let image = demo_image();
    if let Some(path) = emit {
        let bytes = image.to_bytes().map_err(|source| CommandError::Load {
            path: path.to_string(),
            source,
        })?;
        std::fs::write(path, bytes).map_err(|source| CommandError::Write {
            path: path.to_string(),
            source,
        })?;
    }

    let unit = CodeUnit::load(&image, SharedInterner::new()).map_err(EvalError::from)?;
    let instructions: FxHashMap<usize, Instruction> =
        Decoder::new(unit.code()).filter_map(Result::ok).collect();

    let mut interp = InterpreterBuilder::new(&unit).phase(phase).build()?;
    let mut out = String::new();
    let _ = writeln!(out, "phase: {phase:?}");
    loop {
        let pc = interp.pc();
        let text = instructions
            .get(&pc)
            .map_or_else(|| "<end>".to_string(), ToString::to_string);
        match interp.step() {
            Ok(Step::Continue) => {
                let top = interp
                    .stack()
                    .peek()
                    .map_or_else(|| "-".to_string(), ToString::to_string);
                let _ = writeln!(
                    out,
                    "{pc:>4}  {text:<18} depth={} top={top}",
                    interp.env().depth()
                );
            }
            Ok(Step::Finished(value)) => {
                let _ = writeln!(out, "{pc:>4}  {text:<18} => {value}");
                break;
            }
            Err(err) => {
                let _ = writeln!(out, "{pc:>4}  {text:<18} error: {err}");
                break;
            }
        }
    }
    Ok(out)
}
