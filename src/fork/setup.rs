//! Fork creation and remote repair.

use crate::config::Config;
use crate::domain::Repository;
use crate::errors::{ForkError, HostingError};
use crate::fork::detect::ForkStatusDetector;
use crate::git::RemoteFetcher;
use crate::hosting::HostingProvider;
use crate::prompt::Prompter;
use crate::ui;

/// What setup did, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForkSetupResult {
    pub was_already_configured: bool,
    pub fork_created: bool,
    pub fork_name: String,
    pub upstream_name: String,
}

/// Drives a working copy to the canonical fork shape: a fork exists, it is
/// the default repository, and `origin` tracks it.
pub struct ForkSetupOrchestrator<'a> {
    config: &'a Config,
    hosting: &'a dyn HostingProvider,
    fetcher: &'a dyn RemoteFetcher,
    prompter: &'a dyn Prompter,
}

impl<'a> ForkSetupOrchestrator<'a> {
    pub fn new(
        config: &'a Config,
        hosting: &'a dyn HostingProvider,
        fetcher: &'a dyn RemoteFetcher,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            config,
            hosting,
            fetcher,
            prompter,
        }
    }

    /// Ensure `repo` is worked on through a fork. Idempotent: an already
    /// configured clone short-circuits without touching anything.
    ///
    /// `requested_name` overrides the fork's `owner/name`; otherwise the
    /// configured fork organization applies, and failing that the platform
    /// picks the name.
    pub fn setup(
        &self,
        repo: &Repository,
        requested_name: Option<&str>,
    ) -> Result<ForkSetupResult, ForkError> {
        let detector = ForkStatusDetector::new(self.hosting);
        let mut status = detector.detect(repo)?;

        if status.is_in_fork && status.has_correct_remotes {
            return Ok(ForkSetupResult {
                was_already_configured: true,
                fork_created: false,
                fork_name: status.fork_name,
                upstream_name: status.upstream_name,
            });
        }

        let target = match requested_name {
            Some(name) => name.to_string(),
            None => self
                .config
                .default_fork_organization
                .as_deref()
                .map(|org| format!("{org}/{}", repo.name))
                .unwrap_or_default(),
        };

        let mut fork_created = false;
        if !status.is_in_fork {
            let proceed = self.prompter.confirm(
                &format!("Create a fork of {}?", repo.name_with_owner),
                true,
            )?;
            if !proceed {
                return Err(ForkError::Cancelled);
            }
            ui::step(&format!("Creating fork of {}", repo.name_with_owner));
            match self.hosting.create_fork(&target) {
                Ok(()) => fork_created = true,
                Err(HostingError::AlreadyExists(detail)) => {
                    ui::warn(&format!("fork already exists, reusing it ({detail})"));
                }
                Err(err) => return Err(ForkError::CreateFailed(err)),
            }
            // The platform chose the name; re-detect to learn it.
            if target.is_empty() {
                status = detector.detect(repo)?;
            }
        }

        if !status.has_correct_remotes {
            self.repair_remotes(repo)?;
        }

        let fork_name = if !target.is_empty() {
            target
        } else if !status.fork_name.is_empty() {
            status.fork_name
        } else {
            repo.name_with_owner.clone()
        };

        Ok(ForkSetupResult {
            was_already_configured: false,
            fork_created,
            fork_name,
            upstream_name: repo.name_with_owner.clone(),
        })
    }

    /// Point the default repository at the fork and refresh `origin` so the
    /// new remote layout has refs to branch from.
    fn repair_remotes(&self, repo: &Repository) -> Result<(), ForkError> {
        ui::step("Configuring remotes");
        self.hosting
            .set_default_repository(&repo.name_with_owner)
            .map_err(|source| ForkError::SetDefaultFailed {
                name: repo.name_with_owner.clone(),
                source,
            })?;
        if self.fetcher.fetch_branch("origin", "main").is_err()
            && self.fetcher.fetch_branch("origin", "master").is_err()
        {
            ui::warn("could not fetch main or master from origin");
        }
        Ok(())
    }
}
