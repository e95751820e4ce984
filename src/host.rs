use thiserror::Error;

/// Failure reported by the editing host for a single operation.
///
/// The host is a black box; all we can usefully carry is its message.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        HostError(message.into())
    }
}

/// The editing host's fold engine, injected as a capability.
///
/// All line numbers are 1-based and ranges are inclusive, matching how fold
/// commands address buffer lines. Implementations are expected to be queried
/// and commanded serially; nothing here is cached between calls.
///
/// `test_utils::MemoryHost` provides an in-memory implementation for tests.
pub trait FoldHost {
    /// Snapshot of the current buffer, one entry per line.
    fn buffer_lines(&self) -> Vec<String>;

    /// Whether a fold exists at `line` and is currently open. No fold at the
    /// line and a closed fold both report `false`.
    fn fold_is_open(&self, line: usize) -> Result<bool, HostError>;

    /// Collapse `start..=end` into a fold. The fold starts out closed.
    fn create_fold(&mut self, start: usize, end: usize) -> Result<(), HostError>;

    /// Open the fold covering `start..=end`.
    fn open_fold(&mut self, start: usize, end: usize) -> Result<(), HostError>;

    /// Read a named variable persisted across editor sessions. Fails when the
    /// variable was never written.
    fn read_persisted(&self, name: &str) -> Result<Vec<String>, HostError>;

    /// Write a named variable persisted across editor sessions.
    fn write_persisted(&mut self, name: &str, values: &[String]) -> Result<(), HostError>;
}
