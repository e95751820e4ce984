//! In-memory stand-in for the editing host, so the whole fold pipeline can be
//! exercised without a real editor process.

use std::collections::HashMap;

use docfold::host::{FoldHost, HostError};

/// One fold known to the fake host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fold {
    pub start: usize,
    pub end: usize,
    pub open: bool,
}

/// Fake [`FoldHost`]: a buffer snapshot, a fold table keyed by line range, a
/// persisted-variable store, and a recording of every create/open command.
///
/// Set `fail_fold_queries` to make every fold-state query return an error,
/// which the bridge is required to treat as "not open".
#[derive(Debug, Default)]
pub struct MemoryHost {
    lines: Vec<String>,
    folds: Vec<Fold>,
    variables: HashMap<String, Vec<String>>,
    pub created: Vec<(usize, usize)>,
    pub opened: Vec<(usize, usize)>,
    pub fail_fold_queries: bool,
}

impl MemoryHost {
    pub fn new(text: &str) -> Self {
        MemoryHost { lines: split_lines(text), ..Default::default() }
    }

    /// Replace the buffer contents, simulating an edit. Folds and variables
    /// are left alone, as an editor would.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
    }

    pub fn fold_at(&self, start: usize) -> Option<Fold> {
        self.folds.iter().copied().find(|fold| fold.start == start)
    }

    /// Start lines of all currently open folds, sorted.
    pub fn open_starts(&self) -> Vec<usize> {
        let mut starts: Vec<usize> =
            self.folds.iter().filter(|fold| fold.open).map(|fold| fold.start).collect();
        starts.sort_unstable();
        starts
    }

    pub fn close_all_folds(&mut self) {
        for fold in &mut self.folds {
            fold.open = false;
        }
    }

    pub fn open_fold_at(&mut self, start: usize) {
        for fold in &mut self.folds {
            if fold.start == start {
                fold.open = true;
            }
        }
    }

    pub fn set_variable(&mut self, name: &str, values: &[&str]) {
        self.variables
            .insert(name.to_owned(), values.iter().map(|v| (*v).to_owned()).collect());
    }

    pub fn variable(&self, name: &str) -> Option<&Vec<String>> {
        self.variables.get(name)
    }
}

impl FoldHost for MemoryHost {
    fn buffer_lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn fold_is_open(&self, line: usize) -> Result<bool, HostError> {
        if self.fail_fold_queries {
            return Err(HostError::new("fold query refused"));
        }
        Ok(self
            .folds
            .iter()
            .any(|fold| fold.start <= line && line <= fold.end && fold.open))
    }

    fn create_fold(&mut self, start: usize, end: usize) -> Result<(), HostError> {
        self.created.push((start, end));
        // Re-creating a fold at the same start replaces it, closed.
        self.folds.retain(|fold| fold.start != start);
        self.folds.push(Fold { start, end, open: false });
        Ok(())
    }

    fn open_fold(&mut self, start: usize, end: usize) -> Result<(), HostError> {
        self.opened.push((start, end));
        for fold in &mut self.folds {
            if start <= fold.start && fold.end <= end {
                fold.open = true;
            }
        }
        Ok(())
    }

    fn read_persisted(&self, name: &str) -> Result<Vec<String>, HostError> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::new(format!("variable '{name}' is not set")))
    }

    fn write_persisted(&mut self, name: &str, values: &[String]) -> Result<(), HostError> {
        self.variables.insert(name.to_owned(), values.to_vec());
        Ok(())
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}
