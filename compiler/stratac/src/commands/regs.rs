//! The `regs` command: print an architecture descriptor.

use std::fmt::Write;

use strata_target::{ArchDescriptor, RegisterClass, RegisterSet, Volatility};

use super::CommandError;

/// Render the register tables of `target`, or of the host when `None`.
pub fn show_registers(target: Option<&str>) -> Result<String, CommandError> {
    let arch = match target {
        Some(name) => strata_target::by_name(name)
            .ok_or_else(|| CommandError::UnknownTarget(name.to_string()))?,
        None => strata_target::HOST.ok_or(CommandError::NoHostTarget)?,
    };
    arch.validate().map_err(|source| CommandError::Descriptor {
        name: arch.name(),
        source,
    })?;
    Ok(render(arch))
}

fn render(arch: &ArchDescriptor) -> String {
    let mut out = String::new();
    let sp = arch.general().name(arch.stack_pointer()).unwrap_or("?");
    let _ = writeln!(out, "{} (stack pointer: {sp})", arch.name());
    for class in [RegisterClass::General, RegisterClass::Float] {
        out.push('\n');
        render_set(&mut out, arch.registers(class));
    }

    let frame = arch.frame();
    let _ = writeln!(
        out,
        "\nframe: slot {} bytes, {} slots max, double alignment {}, slack {} bytes, shadow space {} bytes",
        frame.stack_slot_size,
        frame.max_stack_slots,
        frame.double_stack_alignment,
        frame.frame_slack_size,
        frame.shadow_stack_space,
    );
    out
}

fn render_set(out: &mut String, set: &RegisterSet) {
    let _ = writeln!(
        out,
        "{} registers: {} total, {} allocatable",
        set.class(),
        set.total(),
        set.allocatable_count()
    );
    let _ = writeln!(out, "  code  name   save          alloc  arg  ret");
    for (code, name) in set.registers() {
        let save = match set.classify(code) {
            Volatility::Volatile => "volatile",
            Volatility::NonVolatile => "non-volatile",
            Volatility::Unclassified => "-",
        };
        let flag = |yes: bool, text: &'static str| if yes { text } else { "-" };
        let _ = writeln!(
            out,
            "  {code:>4}  {name:<5}  {save:<12}  {:<5}  {:<3}  {}",
            flag(set.is_allocatable(code), "yes"),
            flag(set.argument_mask().contains(code), "arg"),
            flag(set.call_return_mask().contains(code), "ret"),
        );
    }
    for (role, mask) in [
        ("all", set.all_mask()),
        ("volatile", set.volatile_mask()),
        ("non-volatile", set.non_volatile_mask()),
        ("reserved", set.reserved_mask()),
        ("allocatable", set.allocatable_mask()),
        ("argument", set.argument_mask()),
        ("call-return", set.call_return_mask()),
        ("js-call-return", set.js_call_return_mask()),
        ("temp", set.temp_mask()),
    ] {
        let _ = writeln!(out, "  {role:<15} {mask}");
    }
}
