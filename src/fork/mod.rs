//! Fork detection and setup: recognizing a fork-shaped clone and driving a
//! clone into that shape.

mod detect;
mod setup;

pub use detect::{ForkStatus, ForkStatusDetector, normalize_remote_url, remotes_confirm_fork};
pub use setup::{ForkSetupOrchestrator, ForkSetupResult};
