use thiserror::Error;

use crate::host::HostError;

/// Errors surfaced by fold computation and the fold-state bridge.
///
/// A parse failure aborts the whole operation: fold ranges computed from a
/// broken tree would be garbage, so the caller sees the error instead of a
/// partial fold set. Host command failures (create/open/write) propagate the
/// same way. Everything softer — an unresolvable docstring range, a fold-state
/// query failure, a missing persisted variable — is handled in place and never
/// reaches this type.
#[derive(Debug, Error)]
pub enum FoldError {
    #[error("buffer source failed to parse (syntax error near line {line})")]
    Parse { line: usize },

    #[error("host command failed: {0}")]
    Host(#[from] HostError),
}
