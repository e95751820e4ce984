use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scope::{ParentIndex, ScopeNode};

/// Name the module scope contributes to identities, since it has no name of
/// its own. Mirrors the name Python gives module-level code objects.
pub const MODULE_SCOPE_NAME: &str = "<module>";

const SEPARATOR: &str = ":";

/// Line-number-independent identity of a scope: the names of its named
/// ancestors, outermost first, joined with the scope's own name.
///
/// Inserting or deleting lines elsewhere in the file leaves the identity
/// unchanged, which is what lets saved open-fold state be re-applied after a
/// re-parse. Renaming a scope changes its identity; two sibling scopes that
/// share a name and ancestor chain collide. Both are documented limitations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeIdentity(String);

impl ScopeIdentity {
    /// Compute the identity of `scope` using the tree's parent index.
    ///
    /// Ancestors without a name (the module root) contribute nothing to the
    /// chain; a module *target* contributes [`MODULE_SCOPE_NAME`] instead.
    pub fn of(scope: &ScopeNode, parents: &ParentIndex<'_>) -> ScopeIdentity {
        let mut names: Vec<&str> = Vec::new();
        let mut current = parents.parent_of(scope.id);
        while let Some(ancestor) = current {
            if let Some(name) = &ancestor.name {
                names.push(name);
            }
            current = parents.parent_of(ancestor.id);
        }
        names.reverse();
        names.push(scope.name.as_deref().unwrap_or(MODULE_SCOPE_NAME));
        ScopeIdentity(names.join(SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ScopeIdentity {
    fn from(value: String) -> Self {
        ScopeIdentity(value)
    }
}
