//! Command handlers for the `strata` CLI.
//!
//! Shared helpers (unit loading, phase parsing, the error type) live here in
//! the module root.

use std::path::Path;

use strata_eval::{EvalError, Phase};
use strata_ir::{CodeUnit, CodeUnitImage, LoadError, SharedInterner};

mod demo;
mod regs;
mod unit;

pub use demo::{demo_image, run_demo};
pub use regs::show_registers;
pub use unit::{disassemble_file, run_file};

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid code unit '{path}': {source}")]
    Load { path: String, source: LoadError },

    #[error("{0}")]
    Eval(#[from] EvalError),

    #[error("unknown target '{0}' (known: {known})", known = known_targets())]
    UnknownTarget(String),

    #[error("no register model for the host architecture; name a target explicitly")]
    NoHostTarget,

    #[error("invalid phase '{0}' (expected 'static' or 'run')")]
    InvalidPhase(String),

    #[error("descriptor '{name}' is inconsistent: {source}")]
    Descriptor {
        name: &'static str,
        source: strata_target::RegisterError,
    },
}

fn known_targets() -> String {
    strata_target::targets::ALL
        .iter()
        .map(|arch| arch.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a `--phase=` value.
pub fn parse_phase(text: &str) -> Result<Phase, CommandError> {
    match text {
        "static" => Ok(Phase::Static),
        "run" => Ok(Phase::Run),
        other => Err(CommandError::InvalidPhase(other.to_string())),
    }
}

/// Read and verify a bincode-encoded code unit.
pub(crate) fn load_unit(path: &str) -> Result<CodeUnit, CommandError> {
    let bytes = std::fs::read(Path::new(path)).map_err(|source| CommandError::Read {
        path: path.to_string(),
        source,
    })?;
    let load_err = |source| CommandError::Load {
        path: path.to_string(),
        source,
    };
    let image = CodeUnitImage::from_bytes(&bytes).map_err(load_err)?;
    let unit = CodeUnit::load(&image, SharedInterner::new()).map_err(load_err)?;
    tracing::debug!(path, bytes = bytes.len(), "loaded code unit");
    Ok(unit)
}
