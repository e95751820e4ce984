pub mod error;
pub mod folds;
pub mod host;
pub mod identity;
pub mod logging;
pub mod parser;
pub mod resolver;
pub mod scope;

pub use error::FoldError;
pub use folds::{
    DEFAULT_FOLDS_VARIABLE, create_all_folds, open_scope_identities, restore_open_folds,
    save_open_folds,
};
pub use host::{FoldHost, HostError};
pub use identity::{MODULE_SCOPE_NAME, ScopeIdentity};
pub use parser::{parse_lines, parse_source};
pub use resolver::{DocstringRange, resolve_range, resolve_ranges};
pub use scope::{ParentIndex, ScopeKind, ScopeNode, ScopeTree, Statement};
