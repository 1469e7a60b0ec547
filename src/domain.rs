//! Domain value objects shared across the branch and fork flows.
//!
//! Everything here is an immutable snapshot created fresh per command
//! invocation; nothing is persisted.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which tracker an issue came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracker {
    Github,
    Jira,
}

/// Closed classification of issue types.
///
/// `Other` and `Unknown` are sentinels: they never map to a branch prefix on
/// their own and force either an interactive choice or a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueType {
    Bug,
    Bugfix,
    Feature,
    Enhancement,
    Refactoring,
    Documentation,
    Dependency,
    Hotfix,
    Internal,
    Release,
    Test,
    Other,
    Unknown,
}

impl IssueType {
    /// Types a user may pick a branch prefix from. Excludes `Bug` (it remaps
    /// to `Bugfix`) and the two sentinels.
    pub const SELECTABLE: &'static [IssueType] = &[
        IssueType::Bugfix,
        IssueType::Feature,
        IssueType::Enhancement,
        IssueType::Refactoring,
        IssueType::Documentation,
        IssueType::Dependency,
        IssueType::Hotfix,
        IssueType::Internal,
        IssueType::Release,
        IssueType::Test,
    ];

    /// False only for the `Other`/`Unknown` sentinels.
    pub fn is_determined(&self) -> bool {
        !matches!(self, IssueType::Other | IssueType::Unknown)
    }

    /// Map a single tracker label to a type, if it names one.
    pub fn from_label(label: &str) -> Option<IssueType> {
        match label.to_lowercase().as_str() {
            "bug" => Some(IssueType::Bug),
            "bugfix" | "fix" => Some(IssueType::Bugfix),
            "feature" => Some(IssueType::Feature),
            "enhancement" => Some(IssueType::Enhancement),
            "refactor" | "refactoring" => Some(IssueType::Refactoring),
            "documentation" | "docs" => Some(IssueType::Documentation),
            "dependency" | "dependencies" => Some(IssueType::Dependency),
            "hotfix" => Some(IssueType::Hotfix),
            "internal" | "chore" => Some(IssueType::Internal),
            "release" => Some(IssueType::Release),
            "test" | "tests" => Some(IssueType::Test),
            _ => None,
        }
    }

    /// Classify an issue from its labels: the first label that names a type
    /// wins, otherwise `Unknown`.
    pub fn classify<'a, I>(labels: I) -> IssueType
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels
            .into_iter()
            .find_map(IssueType::from_label)
            .unwrap_or(IssueType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Bug => "bug",
            IssueType::Bugfix => "bugfix",
            IssueType::Feature => "feature",
            IssueType::Enhancement => "enhancement",
            IssueType::Refactoring => "refactoring",
            IssueType::Documentation => "documentation",
            IssueType::Dependency => "dependency",
            IssueType::Hotfix => "hotfix",
            IssueType::Internal => "internal",
            IssueType::Release => "release",
            IssueType::Test => "test",
            IssueType::Other => "other",
            IssueType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown issue type: {0}")]
pub struct ParseIssueTypeError(String);

impl FromStr for IssueType {
    type Err = ParseIssueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bug" => Ok(IssueType::Bug),
            "bugfix" => Ok(IssueType::Bugfix),
            "feature" => Ok(IssueType::Feature),
            "enhancement" => Ok(IssueType::Enhancement),
            "refactoring" => Ok(IssueType::Refactoring),
            "documentation" => Ok(IssueType::Documentation),
            "dependency" => Ok(IssueType::Dependency),
            "hotfix" => Ok(IssueType::Hotfix),
            "internal" => Ok(IssueType::Internal),
            "release" => Ok(IssueType::Release),
            "test" => Ok(IssueType::Test),
            "other" => Ok(IssueType::Other),
            "unknown" => Ok(IssueType::Unknown),
            _ => Err(ParseIssueTypeError(s.to_string())),
        }
    }
}

/// A resolved issue, read-only to the core flows.
#[derive(Debug, Clone)]
pub struct Issue {
    /// Tracker-formatted identifier, e.g. `GH-42` or `PROJ-7`.
    pub id: String,
    pub title: String,
    pub issue_type: IssueType,
    pub tracker: Tracker,
}

/// Identity snapshot of the repository an operation runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub owner: String,
    /// `owner/name`.
    pub name_with_owner: String,
    pub default_branch: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_from_str() {
        for t in IssueType::SELECTABLE {
            let parsed: IssueType = t.as_str().parse().unwrap();
            assert_eq!(parsed, *t);
        }
        assert_eq!("bug".parse::<IssueType>().unwrap(), IssueType::Bug);
        assert!("nonsense".parse::<IssueType>().is_err());
    }

    #[test]
    fn selectable_excludes_sentinels_and_bug() {
        assert!(!IssueType::SELECTABLE.contains(&IssueType::Bug));
        assert!(!IssueType::SELECTABLE.contains(&IssueType::Other));
        assert!(!IssueType::SELECTABLE.contains(&IssueType::Unknown));
        for t in IssueType::SELECTABLE {
            assert!(t.is_determined());
        }
    }

    #[test]
    fn classify_takes_first_matching_label() {
        let t = IssueType::classify(["triage", "bug", "feature"]);
        assert_eq!(t, IssueType::Bug);
    }

    #[test]
    fn classify_without_known_labels_is_unknown() {
        assert_eq!(IssueType::classify(["wontfix"]), IssueType::Unknown);
        assert_eq!(IssueType::classify([]), IssueType::Unknown);
    }

    #[test]
    fn labels_are_case_insensitive() {
        assert_eq!(IssueType::from_label("Bug"), Some(IssueType::Bug));
        assert_eq!(IssueType::from_label("DOCS"), Some(IssueType::Documentation));
        assert_eq!(IssueType::from_label("chore"), Some(IssueType::Internal));
    }
}
