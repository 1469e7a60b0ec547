//! Runtime configuration.
//!
//! Loaded once before any core operation runs and read-only afterwards.
//! Sources, in order: `.sherpa.toml` at the repository root, then the user
//! config directory (`sherpa/config.toml`). A missing file yields defaults.
//!
//! ```toml
//! [branches.prefixes]
//! feature = "feat"
//! bugfix = "fix"
//!
//! [fork]
//! default_organization = "my-org"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;

use crate::domain::IssueType;

/// Validated configuration, passed into core components by reference.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Per-issue-type branch prefix overrides. Keys are validated at load
    /// time; the sentinels `other`/`unknown` are rejected.
    pub branch_prefixes: HashMap<IssueType, String>,
    /// Organization to create forks under when the user supplies no name.
    pub default_fork_organization: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    branches: RawBranches,
    #[serde(default)]
    fork: RawFork,
}

#[derive(Debug, Default, Deserialize)]
struct RawBranches {
    #[serde(default)]
    prefixes: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFork {
    default_organization: Option<String>,
}

impl Config {
    pub fn load(repo_root: &Path) -> Result<Self> {
        match Self::find_config_file(repo_root) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn find_config_file(repo_root: &Path) -> Option<PathBuf> {
        let local = repo_root.join(".sherpa.toml");
        if local.exists() {
            return Some(local);
        }
        let user = dirs::config_dir()?.join("sherpa/config.toml");
        user.exists().then_some(user)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self> {
        let mut branch_prefixes = HashMap::new();
        for (key, prefix) in raw.branches.prefixes {
            let issue_type: IssueType = key
                .parse()
                .map_err(|_| anyhow!("unknown issue type '{key}' in [branches.prefixes]"))?;
            if !issue_type.is_determined() {
                bail!("issue type '{key}' cannot take a branch prefix override");
            }
            if prefix.trim().is_empty() {
                bail!("empty branch prefix configured for issue type '{key}'");
            }
            branch_prefixes.insert(issue_type, prefix);
        }

        let default_fork_organization = raw
            .fork
            .default_organization
            .map(|org| org.trim().to_string())
            .filter(|org| !org.is_empty());

        Ok(Self {
            branch_prefixes,
            default_fork_organization,
        })
    }

    /// Branch prefix for an issue type, honoring configured overrides.
    pub fn prefix_for(&self, issue_type: IssueType) -> String {
        self.branch_prefixes
            .get(&issue_type)
            .cloned()
            .unwrap_or_else(|| issue_type.to_string())
    }
}
