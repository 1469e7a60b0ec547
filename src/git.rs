//! Local git operations.
//!
//! Repository inspection and branch creation go through libgit2; fetching
//! shells out to `git` so the user's credential helpers and SSH agent apply.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use git2::build::CheckoutBuilder;
use git2::{BranchType, ErrorCode, Repository};

use crate::errors::GitError;

/// Fetching a single branch from a remote, as a seam so flows can be tested
/// without a network.
pub trait RemoteFetcher {
    fn fetch_branch(&self, remote: &str, branch: &str) -> Result<(), GitError>;
}

pub struct Git {
    repo: Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository containing `path`, searching upward like git does.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    pub fn workdir(&self) -> PathBuf {
        self.repo
            .workdir()
            .unwrap_or_else(|| self.repo.path())
            .to_path_buf()
    }

    /// `{remote name -> URL}` for every configured remote.
    pub fn remote_urls(&self) -> Result<HashMap<String, String>, GitError> {
        let mut urls = HashMap::new();
        for name in self.repo.remotes()?.iter().flatten() {
            let remote = self.repo.find_remote(name)?;
            if let Some(url) = remote.url() {
                urls.insert(name.to_string(), url.to_string());
            }
        }
        Ok(urls)
    }

    /// Whether `name` exists locally or under `origin`.
    pub fn branch_exists(&self, name: &str) -> Result<bool, GitError> {
        if self.repo.find_branch(name, BranchType::Local).is_ok() {
            return Ok(true);
        }
        let remote_name = format!("origin/{name}");
        Ok(self
            .repo
            .find_branch(&remote_name, BranchType::Remote)
            .is_ok())
    }

    /// The checked-out branch name, or `None` on a detached or unborn HEAD.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(|s| s.to_string()))
    }

    /// Create `name` at `base_ref` and check it out.
    pub fn create_and_checkout(&self, name: &str, base_ref: &str) -> Result<(), GitError> {
        let reference =
            self.repo
                .find_reference(base_ref)
                .map_err(|_| GitError::BaseRefNotFound {
                    refname: base_ref.to_string(),
                })?;
        let commit = reference.peel_to_commit()?;
        self.repo.branch(name, &commit, false)?;
        self.repo.set_head(&format!("refs/heads/{name}"))?;
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().safe()))?;
        Ok(())
    }

    fn run_git(&self, args: &[&str]) -> Result<(), GitError> {
        let joined = args.join(" ");
        let output = Command::new("git")
            .args(args)
            .current_dir(self.workdir())
            .output()
            .map_err(|e| GitError::Subprocess {
                args: joined.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(GitError::Subprocess {
                args: joined,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl RemoteFetcher for Git {
    fn fetch_branch(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run_git(&["fetch", remote, branch])
    }
}
