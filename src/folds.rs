use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::FoldError;
use crate::host::FoldHost;
use crate::identity::ScopeIdentity;
use crate::parser::parse_lines;
use crate::resolver::resolve_ranges;
use crate::scope::ScopeTree;

/// Host variable holding the per-buffer set of open docstring folds.
pub const DEFAULT_FOLDS_VARIABLE: &str = "docfold_open_folds";

/// Every operation re-reads and re-parses the buffer; nothing is cached
/// between host invocations, so there is no staleness to manage.
fn parse_buffer(host: &dyn FoldHost) -> Result<ScopeTree, FoldError> {
    parse_lines(&host.buffer_lines())
}

/// Fold every resolved docstring range, open or closed state regardless.
///
/// This is how folds are first materialized in a freshly opened buffer.
pub fn create_all_folds(host: &mut dyn FoldHost) -> Result<(), FoldError> {
    let tree = parse_buffer(host)?;
    let ranges = resolve_ranges(&tree);
    debug!("creating {} docstring folds", ranges.len());
    for range in ranges {
        host.create_fold(range.start, range.end)?;
    }
    Ok(())
}

/// Identities of every docstring scope whose fold is currently open.
///
/// A fold-state query failure for a line counts as "not open"; it never
/// aborts the collection.
pub fn open_scope_identities(host: &dyn FoldHost) -> Result<Vec<ScopeIdentity>, FoldError> {
    let tree = parse_buffer(host)?;
    let parents = tree.parent_index();

    let mut open = Vec::new();
    for range in resolve_ranges(&tree) {
        if host.fold_is_open(range.start).unwrap_or(false) {
            open.push(ScopeIdentity::of(range.scope, &parents));
        }
    }
    Ok(open)
}

/// Persist the identities of the currently open docstring folds under
/// `variable`, replacing whatever was saved before.
pub fn save_open_folds(host: &mut dyn FoldHost, variable: &str) -> Result<(), FoldError> {
    let open = open_scope_identities(host)?;
    debug!("saving {} open folds to '{}'", open.len(), variable);
    let values: Vec<String> = open.into_iter().map(|id| id.to_string()).collect();
    host.write_persisted(variable, &values)?;
    Ok(())
}

/// Re-open the folds recorded under `variable` against the current buffer.
///
/// The persisted identities are matched against freshly resolved ranges, so
/// the right scopes re-open even when their line numbers have drifted since
/// the save. Ranges that are already open are left untouched; running restore
/// twice is the same as running it once. An unset variable means there is
/// nothing to restore, which is not an error.
pub fn restore_open_folds(host: &mut dyn FoldHost, variable: &str) -> Result<(), FoldError> {
    let saved: HashSet<String> = match host.read_persisted(variable) {
        Ok(values) => values.into_iter().collect(),
        Err(err) => {
            info!("variable '{}' has no recorded open folds: {}", variable, err);
            return Ok(());
        }
    };

    let tree = parse_buffer(host)?;
    let parents = tree.parent_index();
    for range in resolve_ranges(&tree) {
        let identity = ScopeIdentity::of(range.scope, &parents);
        if !saved.contains(identity.as_str()) {
            continue;
        }
        if host.fold_is_open(range.start).unwrap_or(false) {
            continue;
        }
        debug!("re-opening fold {}..={} for {}", range.start, range.end, identity);
        host.open_fold(range.start, range.end)?;
    }
    Ok(())
}
