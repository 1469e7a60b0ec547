//! Fork creation and status — `sherpa fork`.

use std::path::Path;

use anyhow::{Context, Result};

use sherpa::config::Config;
use sherpa::fork::{ForkSetupOrchestrator, ForkStatusDetector};
use sherpa::git::Git;
use sherpa::hosting::{GhCli, HostingProvider};
use sherpa::prompt::{DefaultsPrompter, Prompter, TerminalPrompter};
use sherpa::ui;

use super::super::Cli;

pub fn cmd_fork(workdir: &Path, cli: &Cli, name: Option<&str>, check: bool) -> Result<()> {
    let git = Git::open(workdir)?;
    let config = Config::load(&git.workdir())?;
    let gh = GhCli::new(git.workdir());

    let repo = gh
        .get_repository()
        .context("Failed to read repository information")?;

    if check {
        let status = ForkStatusDetector::new(&gh).detect(&repo)?;
        if status.is_in_fork && status.has_correct_remotes {
            ui::success(&format!(
                "{}Working on fork {} of {}",
                ui::FORK,
                status.fork_name,
                status.upstream_name
            ));
        } else if status.is_in_fork {
            ui::warn(&format!(
                "fork {} detected, but remotes need repair; run 'sherpa fork'",
                status.fork_name
            ));
        } else {
            println!("Not working on a fork of {}", repo.name_with_owner);
        }
        return Ok(());
    }

    let prompter: Box<dyn Prompter> = if cli.yes {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(TerminalPrompter)
    };
    let orchestrator = ForkSetupOrchestrator::new(&config, &gh, &git, prompter.as_ref());
    let result = match orchestrator.setup(&repo, name) {
        Ok(result) => result,
        Err(err) if err.is_cancelled() => {
            ui::warn("fork setup cancelled; nothing changed");
            return Ok(());
        }
        Err(err) => return Err(err).context("Fork setup failed"),
    };

    if result.was_already_configured {
        ui::success(&format!(
            "{}Already working on fork {}",
            ui::FORK,
            result.fork_name
        ));
    } else if result.fork_created {
        ui::success(&format!(
            "{}Created fork {} of {}",
            ui::FORK,
            result.fork_name,
            result.upstream_name
        ));
    } else {
        ui::success(&format!(
            "{}Configured remotes for fork {}",
            ui::FORK,
            result.fork_name
        ));
    }

    Ok(())
}
