//! Typed error hierarchy for sherpa.
//!
//! One enum per subsystem, mirroring the collaborator seams:
//! - `PromptError` — user interaction, including the cancellation sentinel
//! - `TrackerError` — issue lookup
//! - `HostingError` — hosting-platform API (fork and remote operations)
//! - `GitError` — local git operations
//! - `BranchError` — branch-name derivation
//! - `ForkError` — fork detection and setup

use thiserror::Error;

/// Errors from the user-interaction seam.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user aborted the prompt (Esc / Ctrl-C). Callers treat this as a
    /// distinct outcome, never as a generic failure.
    #[error("cancelled by user")]
    Cancelled,

    /// A required prompt had no default while running in default-values mode.
    #[error("no default available for required prompt: {prompt}")]
    NoDefault { prompt: String },

    #[error("prompt failed: {0}")]
    Render(String),
}

/// Errors from issue-tracker lookups.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("issue identifier must not be empty")]
    EmptyIdentifier,

    #[error("issue {identifier} not found")]
    NotFound { identifier: String },

    #[error("issue tracker call failed: {0}")]
    Request(String),

    #[error("failed to parse issue tracker response: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Errors from the hosting-platform client.
#[derive(Debug, Error)]
pub enum HostingError {
    /// The fork already exists on the platform. The setup flow downgrades
    /// this to a warning and keeps going.
    #[error("fork already exists: {0}")]
    AlreadyExists(String),

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("failed to parse {command} output: {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read remote configuration: {0}")]
    Remotes(String),
}

/// Errors from local git operations.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("not a git repository: {}", path.display())]
    NotARepo { path: std::path::PathBuf },

    #[error("base ref {refname} not found")]
    BaseRefNotFound { refname: String },

    #[error("git {args} failed: {message}")]
    Subprocess { args: String, message: String },

    #[error(transparent)]
    Internal(#[from] git2::Error),
}

/// Errors from branch-name derivation.
#[derive(Debug, Error)]
pub enum BranchError {
    /// Default-values mode cannot pick a prefix for Other/Unknown issues.
    #[error("undetermined issue type for {identifier}; rerun interactively to choose a branch type")]
    UndeterminedIssueType { identifier: String },

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

impl BranchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BranchError::Prompt(PromptError::Cancelled))
    }
}

/// Errors from fork detection and setup.
#[derive(Debug, Error)]
pub enum ForkError {
    /// The user declined fork creation; setup cannot proceed without it.
    #[error("fork setup cancelled by user")]
    Cancelled,

    #[error("failed to create fork: {0}")]
    CreateFailed(#[source] HostingError),

    #[error("failed to set default repository to {name}: {source}")]
    SetDefaultFailed {
        name: String,
        #[source]
        source: HostingError,
    },

    #[error(transparent)]
    Hosting(#[from] HostingError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl ForkError {
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ForkError::Cancelled | ForkError::Prompt(PromptError::Cancelled)
        )
    }
}
