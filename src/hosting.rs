//! Hosting-platform and issue-tracker collaborator contracts, plus the
//! GitHub implementation.
//!
//! [`GhCli`] reaches GitHub through the `gh` CLI so authentication stays with
//! the user's existing `gh auth` session; structured data comes back through
//! `--json` and serde. Remote configuration is read from the local git
//! repository itself.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use crate::domain::{Issue, IssueType, Repository, Tracker};
use crate::errors::{HostingError, TrackerError};
use crate::git::Git;

/// Fork and remote operations against the hosting platform.
pub trait HostingProvider {
    fn get_repository(&self) -> Result<Repository, HostingError>;

    /// `{remote name -> URL}` for the working copy.
    fn get_remote_configuration(&self) -> Result<HashMap<String, String>, HostingError>;

    /// The platform's authoritative "is this repository a fork" flag.
    fn is_repository_fork(&self) -> Result<bool, HostingError>;

    /// Create a fork of the current repository. `name` is `owner/name` or
    /// empty, in which case the platform chooses.
    fn create_fork(&self, name: &str) -> Result<(), HostingError>;

    fn set_default_repository(&self, name_with_owner: &str) -> Result<(), HostingError>;
}

/// Resolves a ticket identifier to an [`Issue`].
pub trait IssueTracker {
    fn get_issue(&self, identifier: &str) -> Result<Issue, TrackerError>;
}

/// GitHub client backed by the `gh` CLI.
pub struct GhCli {
    workdir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoView {
    name: String,
    owner: OwnerView,
    name_with_owner: String,
    default_branch_ref: Option<BranchRefView>,
}

#[derive(Debug, Deserialize)]
struct OwnerView {
    login: String,
}

#[derive(Debug, Deserialize)]
struct BranchRefView {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForkView {
    is_fork: bool,
}

#[derive(Debug, Deserialize)]
struct IssueView {
    number: u64,
    title: String,
    #[serde(default)]
    labels: Vec<LabelView>,
}

#[derive(Debug, Deserialize)]
struct LabelView {
    name: String,
}

impl GhCli {
    pub fn new(workdir: PathBuf) -> Self {
        Self { workdir }
    }

    fn run(&self, args: &[&str]) -> Result<String, HostingError> {
        let command = format!("gh {}", args.join(" "));
        let output = Command::new("gh")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| HostingError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            // The one place platform error text is inspected; everything
            // downstream matches on the variant.
            if stderr.contains("already exists") {
                return Err(HostingError::AlreadyExists(stderr));
            }
            return Err(HostingError::CommandFailed {
                command,
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn parse<T: for<'de> Deserialize<'de>>(
        command: &str,
        output: &str,
    ) -> Result<T, HostingError> {
        serde_json::from_str(output).map_err(|source| HostingError::Parse {
            command: command.to_string(),
            source,
        })
    }
}

impl HostingProvider for GhCli {
    fn get_repository(&self) -> Result<Repository, HostingError> {
        let out = self.run(&[
            "repo",
            "view",
            "--json",
            "name,owner,nameWithOwner,defaultBranchRef",
        ])?;
        let view: RepoView = Self::parse("gh repo view", &out)?;
        Ok(Repository {
            name: view.name,
            owner: view.owner.login,
            name_with_owner: view.name_with_owner,
            default_branch: view
                .default_branch_ref
                .map(|r| r.name)
                .unwrap_or_else(|| "main".to_string()),
        })
    }

    fn get_remote_configuration(&self) -> Result<HashMap<String, String>, HostingError> {
        let git = Git::open(&self.workdir).map_err(|e| HostingError::Remotes(e.to_string()))?;
        git.remote_urls()
            .map_err(|e| HostingError::Remotes(e.to_string()))
    }

    fn is_repository_fork(&self) -> Result<bool, HostingError> {
        let out = self.run(&["repo", "view", "--json", "isFork"])?;
        let view: ForkView = Self::parse("gh repo view", &out)?;
        Ok(view.is_fork)
    }

    fn create_fork(&self, name: &str) -> Result<(), HostingError> {
        let mut args = vec!["repo", "fork", "--remote", "--default-branch-only"];
        if let Some((owner, repo_name)) = name.split_once('/') {
            args.extend(["--org", owner, "--fork-name", repo_name]);
        } else if !name.is_empty() {
            args.extend(["--fork-name", name]);
        }
        self.run(&args)?;
        Ok(())
    }

    fn set_default_repository(&self, name_with_owner: &str) -> Result<(), HostingError> {
        self.run(&["repo", "set-default", name_with_owner])?;
        Ok(())
    }
}

impl IssueTracker for GhCli {
    fn get_issue(&self, identifier: &str) -> Result<Issue, TrackerError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(TrackerError::EmptyIdentifier);
        }
        let number = identifier.trim_start_matches('#');
        let out = self
            .run(&["issue", "view", number, "--json", "number,title,labels"])
            .map_err(|err| match err {
                HostingError::CommandFailed { stderr, .. }
                    if stderr.to_lowercase().contains("could not resolve")
                        || stderr.to_lowercase().contains("not found") =>
                {
                    TrackerError::NotFound {
                        identifier: identifier.to_string(),
                    }
                }
                other => TrackerError::Request(other.to_string()),
            })?;
        let view: IssueView = serde_json::from_str(&out).map_err(TrackerError::Parse)?;
        let issue_type = IssueType::classify(view.labels.iter().map(|l| l.name.as_str()));
        Ok(Issue {
            id: format!("GH-{}", view.number),
            title: view.title,
            issue_type,
            tracker: Tracker::Github,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_view_deserializes() {
        let json = r#"{
            "name": "widgets",
            "owner": {"login": "acme"},
            "nameWithOwner": "acme/widgets",
            "defaultBranchRef": {"name": "main"}
        }"#;
        let view: RepoView = serde_json::from_str(json).unwrap();
        assert_eq!(view.name, "widgets");
        assert_eq!(view.owner.login, "acme");
        assert_eq!(view.name_with_owner, "acme/widgets");
        assert_eq!(view.default_branch_ref.unwrap().name, "main");
    }

    #[test]
    fn repo_view_tolerates_missing_default_branch() {
        let json = r#"{
            "name": "widgets",
            "owner": {"login": "acme"},
            "nameWithOwner": "acme/widgets",
            "defaultBranchRef": null
        }"#;
        let view: RepoView = serde_json::from_str(json).unwrap();
        assert!(view.default_branch_ref.is_none());
    }

    #[test]
    fn fork_view_deserializes() {
        let view: ForkView = serde_json::from_str(r#"{"isFork": true}"#).unwrap();
        assert!(view.is_fork);
    }

    #[test]
    fn issue_view_classifies_labels() {
        let json = r#"{
            "number": 17,
            "title": "Crash when config is missing",
            "labels": [{"name": "triage"}, {"name": "bug"}]
        }"#;
        let view: IssueView = serde_json::from_str(json).unwrap();
        let t = IssueType::classify(view.labels.iter().map(|l| l.name.as_str()));
        assert_eq!(t, IssueType::Bug);
    }

    #[test]
    fn issue_view_without_labels_is_unknown() {
        let json = r#"{"number": 3, "title": "Hmm"}"#;
        let view: IssueView = serde_json::from_str(json).unwrap();
        let t = IssueType::classify(view.labels.iter().map(|l| l.name.as_str()));
        assert_eq!(t, IssueType::Unknown);
    }
}
