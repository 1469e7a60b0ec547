//! Branch-name derivation: slug sanitization, budget-aware formatting and
//! branch-type prefix selection.

mod format;
mod provider;
mod resolver;
mod sanitize;

pub use format::{MAX_REF_LENGTH, format_branch_name, max_slug_length};
pub use provider::BranchNameProvider;
pub use resolver::BranchTypeResolver;
pub use sanitize::sanitize;
