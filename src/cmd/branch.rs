//! Branch creation from an issue — `sherpa create-branch`.

use std::path::Path;

use anyhow::{Context, Result, bail};

use sherpa::branch::BranchNameProvider;
use sherpa::config::Config;
use sherpa::fork::ForkSetupOrchestrator;
use sherpa::git::{Git, RemoteFetcher};
use sherpa::hosting::{GhCli, HostingProvider, IssueTracker};
use sherpa::prompt::{DefaultsPrompter, Prompter, TerminalPrompter};
use sherpa::ui;

use super::super::Cli;

pub fn cmd_create_branch(
    workdir: &Path,
    cli: &Cli,
    issue_id: &str,
    base: Option<&str>,
    no_fetch: bool,
    fork: bool,
    fork_name: Option<&str>,
) -> Result<()> {
    let git = Git::open(workdir)?;
    let config = Config::load(&git.workdir())?;
    let gh = GhCli::new(git.workdir());
    let prompter: Box<dyn Prompter> = if cli.yes {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(TerminalPrompter)
    };

    let repo = gh
        .get_repository()
        .context("Failed to read repository information")?;
    let issue = gh
        .get_issue(issue_id)
        .with_context(|| format!("Failed to look up issue {issue_id}"))?;
    ui::step(&format!("{}: {}", issue.id, issue.title));

    if fork {
        let orchestrator = ForkSetupOrchestrator::new(&config, &gh, &git, prompter.as_ref());
        let result = match orchestrator.setup(&repo, fork_name) {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => {
                bail!("fork setup was declined; cannot branch without a fork")
            }
            Err(err) => return Err(err).context("Fork setup failed"),
        };
        if result.fork_created {
            ui::success(&format!("{}Created fork {}", ui::FORK, result.fork_name));
        }
    }

    let provider = BranchNameProvider::new(&config, prompter.as_ref());
    let name = provider.branch_name(&issue, &repo)?;

    if git.branch_exists(&name)? {
        ui::success(&format!("{}Branch {name} already exists", ui::BRANCH));
        return Ok(());
    }

    let base = base.unwrap_or(&repo.default_branch);
    if !no_fetch {
        ui::step(&format!("Fetching origin/{base}"));
        if git.fetch_branch("origin", base).is_err() {
            ui::warn(&format!("could not fetch {base} from origin"));
        }
    }

    git.create_and_checkout(&name, &format!("refs/remotes/origin/{base}"))
        .with_context(|| format!("Failed to create branch {name} from origin/{base}"))?;
    ui::success(&format!("{}Switched to new branch {name}", ui::BRANCH));

    Ok(())
}
