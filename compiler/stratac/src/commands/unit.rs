//! The `disasm` and `run` commands: operate on a code unit stored on disk.

use strata_eval::{InterpreterBuilder, Phase};

use super::{load_unit, CommandError};

/// Disassemble the code unit at `path`.
pub fn disassemble_file(path: &str) -> Result<String, CommandError> {
    let unit = load_unit(path)?;
    Ok(unit.disassemble())
}

/// Execute the code unit at `path` under `phase` and render its result.
pub fn run_file(path: &str, phase: Phase) -> Result<String, CommandError> {
    let unit = load_unit(path)?;
    let mut interp = InterpreterBuilder::new(&unit).phase(phase).build()?;
    let value = interp.run()?;
    tracing::debug!(path, depth = interp.env().depth(), "unit finished");
    Ok(format!("{value}\n"))
}
