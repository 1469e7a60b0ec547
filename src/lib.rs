//! sherpa: issue-driven branch names and fork remote repair for GitHub
//! repositories.

pub mod branch;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fork;
pub mod git;
pub mod hosting;
pub mod prompt;
pub mod ui;
