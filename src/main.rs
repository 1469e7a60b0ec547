use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "sherpa")]
#[command(version, about = "Issue-driven branch names and fork remote repair")]
pub struct Cli {
    /// Answer every prompt with its default instead of asking
    #[arg(long, global = true)]
    pub yes: bool,

    /// Operate on this directory instead of the current one
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create and check out a branch named after an issue
    CreateBranch {
        /// Issue identifier (e.g. 42 or #42)
        #[arg(short, long)]
        issue: String,

        /// Base branch to start from (defaults to the repository default)
        #[arg(short, long)]
        base: Option<String>,

        /// Skip fetching the base branch before branching
        #[arg(long)]
        no_fetch: bool,

        /// Ensure the work happens on a fork before branching
        #[arg(long)]
        fork: bool,

        /// owner/name for the fork when --fork creates one
        #[arg(long, requires = "fork")]
        fork_name: Option<String>,
    },
    /// Create a fork of the current repository and repair its remotes
    Fork {
        /// owner/name for the fork
        #[arg(long)]
        name: Option<String>,

        /// Report the current fork status without changing anything
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let workdir = match cli.dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::CreateBranch {
            issue,
            base,
            no_fetch,
            fork,
            fork_name,
        } => cmd::cmd_create_branch(
            &workdir,
            &cli,
            issue,
            base.as_deref(),
            *no_fetch,
            *fork,
            fork_name.as_deref(),
        )?,
        Commands::Fork { name, check } => cmd::cmd_fork(&workdir, &cli, name.as_deref(), *check)?,
    }

    Ok(())
}
