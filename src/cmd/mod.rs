//! CLI command implementations.
//!
//! | Module   | Commands handled |
//! |----------|------------------|
//! | `branch` | `CreateBranch`   |
//! | `fork`   | `Fork`           |

pub mod branch;
pub mod fork;

pub use branch::cmd_create_branch;
pub use fork::cmd_fork;
