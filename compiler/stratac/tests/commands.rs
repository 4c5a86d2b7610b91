//! Command-level tests for the `strata` CLI library.

#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use pretty_assertions::assert_eq;
use strata_eval::Phase;
use stratac::commands::{
    demo_image, disassemble_file, parse_phase, run_demo, run_file, show_registers, CommandError,
};

#[test]
fn regs_prints_named_target() {
    let out = show_registers(Some("x64-win64")).unwrap();
    assert!(out.starts_with("x64-win64 (stack pointer: rsp)"));
    assert!(out.contains("general registers: 16 total, 14 allocatable"));
    assert!(out.contains("float registers: 16 total, 15 allocatable"));
    assert!(out.contains("shadow space 32 bytes"));
}

#[test]
fn regs_rejects_unknown_target() {
    let err = show_registers(Some("sparc")).unwrap_err();
    assert!(matches!(err, CommandError::UnknownTarget(ref name) if name == "sparc"));
    assert!(err.to_string().contains("x64-sysv"));
}

#[test]
fn regs_defaults_to_host() {
    match strata_target::HOST {
        Some(host) => assert!(show_registers(None).unwrap().starts_with(host.name())),
        None => assert!(matches!(
            show_registers(None),
            Err(CommandError::NoHostTarget)
        )),
    }
}

#[test]
fn phase_parsing() {
    assert_eq!(parse_phase("static").unwrap(), Phase::Static);
    assert_eq!(parse_phase("run").unwrap(), Phase::Run);
    assert!(matches!(
        parse_phase("later"),
        Err(CommandError::InvalidPhase(_))
    ));
}

#[test]
fn demo_run_phase_traces_to_unresolved_binding() {
    let out = run_demo(Phase::Run, None).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "phase: Run");
    assert!(lines[1].contains("lexical_read 0"));
    assert!(lines[1].ends_with("top=<uninitialized>"));
    assert!(out.contains("push_frame 1"));
    assert!(out.contains("depth=2 top=2"));
    assert!(lines
        .last()
        .unwrap()
        .ends_with("error: unresolved binding: b"));
}

#[test]
fn demo_static_phase_rejects_forward_read() {
    let out = run_demo(Phase::Static, None).unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains("binding used before initialization: a"));
}

#[test]
fn emitted_demo_unit_disassembles_and_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.bin");
    let path = path.to_str().unwrap();

    run_demo(Phase::Run, Some(path)).unwrap();

    let listing = disassemble_file(path).unwrap();
    assert!(listing.contains("push_frame"));
    assert!(listing.contains("pop_frame"));

    let err = run_file(path, Phase::Run).unwrap_err();
    assert_eq!(err.to_string(), "unresolved binding: b");
}

#[test]
fn run_prints_result() {
    let mut image = demo_image();
    image.code = strata_ir::bytecode::assemble(&[
        strata_ir::Instruction::Constant(strata_ir::ConstantId(1)),
        strata_ir::Instruction::Return,
    ]);
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), image.to_bytes().unwrap()).unwrap();

    let out = run_file(file.path().to_str().unwrap(), Phase::Run).unwrap();
    assert_eq!(out, "2\n");
}

#[test]
fn missing_and_corrupt_files_are_reported() {
    let err = disassemble_file("/nonexistent/unit.bin").unwrap_err();
    assert!(matches!(err, CommandError::Read { .. }));

    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), [0xFF, 0x00]).unwrap();
    let err = run_file(file.path().to_str().unwrap(), Phase::Run).unwrap_err();
    assert!(matches!(err, CommandError::Load { .. }));
}
