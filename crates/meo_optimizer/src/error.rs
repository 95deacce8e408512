use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced at the input/output boundary.
///
/// Invariant violations inside the engine (mutating a fixed edge, restoring
/// an orientation vector of the wrong length, ...) are programmer bugs and
/// panic instead of returning one of these.
#[derive(Error, Debug)]
pub enum MeoError {
    #[error("invalid value `{value}` for {key}")]
    Config { key: &'static str, value: String },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("reserved character '_' in vertex name `{name}`")]
    ReservedName { name: String },

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad solver solution: {reason}")]
    Solution { reason: String },
}
