//! Fork detection from remote configuration, with the platform's own fork
//! flag as a fallback.

use crate::domain::Repository;
use crate::errors::ForkError;
use crate::hosting::HostingProvider;
use crate::ui;

const HOSTING_DOMAIN: &str = "github.com";

/// Snapshot of a working copy's fork situation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForkStatus {
    pub is_in_fork: bool,
    pub has_correct_remotes: bool,
    /// `owner/name` of the fork, when known.
    pub fork_name: String,
    /// `owner/name` of the upstream repository, when known.
    pub upstream_name: String,
}

/// Reduce a remote URL to `owner/name`, tolerating HTTPS, SSH and
/// `git@host:` forms. URLs not pointing at the hosting domain come back
/// unchanged so a mismatch stays visible.
pub fn normalize_remote_url(url: &str) -> String {
    let url = url.strip_suffix(".git").unwrap_or(url);
    let Some(index) = url.find(HOSTING_DOMAIN) else {
        return url.to_string();
    };
    let rest = url[index + HOSTING_DOMAIN.len()..].trim_start_matches([':', '/']);
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [.., owner, name] => format!("{owner}/{name}"),
        _ => rest.to_string(),
    }
}

/// The remote shape of a correctly configured fork clone: `origin` is the
/// default repository and `upstream` points somewhere else. Ownership is not
/// compared, so organization forks count the same as personal ones.
pub fn remotes_confirm_fork(
    origin: Option<&str>,
    upstream: Option<&str>,
    default_repo: &str,
) -> bool {
    matches!((origin, upstream), (Some(o), Some(u)) if o == default_repo && u != default_repo)
}

pub struct ForkStatusDetector<'a> {
    hosting: &'a dyn HostingProvider,
}

impl<'a> ForkStatusDetector<'a> {
    pub fn new(hosting: &'a dyn HostingProvider) -> Self {
        Self { hosting }
    }

    /// Classify the working copy against `repo`, the platform's current
    /// default repository.
    ///
    /// The remote shape is the primary signal. When remotes are inconclusive
    /// the platform's fork flag breaks the tie; a failed flag query is
    /// reported as a warning and treated as "not a fork" so detection never
    /// aborts the calling flow.
    pub fn detect(&self, repo: &Repository) -> Result<ForkStatus, ForkError> {
        let remotes = self.hosting.get_remote_configuration()?;
        let origin = remotes.get("origin").map(|u| normalize_remote_url(u));
        let upstream = remotes.get("upstream").map(|u| normalize_remote_url(u));

        if remotes_confirm_fork(
            origin.as_deref(),
            upstream.as_deref(),
            &repo.name_with_owner,
        ) {
            return Ok(ForkStatus {
                is_in_fork: true,
                has_correct_remotes: true,
                fork_name: repo.name_with_owner.clone(),
                upstream_name: upstream.unwrap_or_default(),
            });
        }

        let is_fork = match self.hosting.is_repository_fork() {
            Ok(flag) => flag,
            Err(err) => {
                ui::warn(&format!("could not query fork status: {err}"));
                false
            }
        };
        if !is_fork {
            return Ok(ForkStatus::default());
        }

        // The platform says fork but the remotes disagree, so the clone
        // needs repair.
        Ok(ForkStatus {
            is_in_fork: true,
            has_correct_remotes: false,
            fork_name: repo.name_with_owner.clone(),
            upstream_name: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::HostingError;
    use std::collections::HashMap;

    struct FakeHosting {
        remotes: HashMap<String, String>,
        is_fork: Result<bool, ()>,
    }

    impl HostingProvider for FakeHosting {
        fn get_repository(&self) -> Result<Repository, HostingError> {
            unreachable!("not used by detection")
        }

        fn get_remote_configuration(&self) -> Result<HashMap<String, String>, HostingError> {
            Ok(self.remotes.clone())
        }

        fn is_repository_fork(&self) -> Result<bool, HostingError> {
            self.is_fork
                .map_err(|_| HostingError::Remotes("offline".into()))
        }

        fn create_fork(&self, _name: &str) -> Result<(), HostingError> {
            unreachable!("not used by detection")
        }

        fn set_default_repository(&self, _name: &str) -> Result<(), HostingError> {
            unreachable!("not used by detection")
        }
    }

    fn repo(name_with_owner: &str) -> Repository {
        let (owner, name) = name_with_owner.split_once('/').unwrap();
        Repository {
            name: name.into(),
            owner: owner.into(),
            name_with_owner: name_with_owner.into(),
            default_branch: "main".into(),
        }
    }

    fn remotes(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn normalizes_https_ssh_and_scp_urls() {
        for url in [
            "https://github.com/user/repo.git",
            "https://github.com/user/repo",
            "ssh://git@github.com/user/repo.git",
            "git@github.com:user/repo.git",
        ] {
            assert_eq!(normalize_remote_url(url), "user/repo", "{url}");
        }
    }

    #[test]
    fn foreign_host_urls_pass_through() {
        assert_eq!(
            normalize_remote_url("https://gitlab.example.com/user/repo.git"),
            "https://gitlab.example.com/user/repo"
        );
    }

    #[test]
    fn fork_rule_requires_distinct_upstream() {
        assert!(remotes_confirm_fork(
            Some("user/repo"),
            Some("Org/repo"),
            "user/repo"
        ));
        // Both remotes on the same repository is not a fork clone.
        assert!(!remotes_confirm_fork(
            Some("user/repo"),
            Some("user/repo"),
            "user/repo"
        ));
        assert!(!remotes_confirm_fork(Some("user/repo"), None, "user/repo"));
        assert!(!remotes_confirm_fork(None, Some("Org/repo"), "user/repo"));
    }

    #[test]
    fn correct_remotes_are_detected_without_the_platform_flag() {
        let hosting = FakeHosting {
            remotes: remotes(&[
                ("origin", "git@github.com:user/repo.git"),
                ("upstream", "https://github.com/Org/repo.git"),
            ]),
            // Would fail if consulted; the remote shape alone must decide.
            is_fork: Err(()),
        };
        let status = ForkStatusDetector::new(&hosting)
            .detect(&repo("user/repo"))
            .unwrap();
        assert_eq!(
            status,
            ForkStatus {
                is_in_fork: true,
                has_correct_remotes: true,
                fork_name: "user/repo".into(),
                upstream_name: "Org/repo".into(),
            }
        );
    }

    #[test]
    fn platform_flag_flags_a_fork_with_broken_remotes() {
        let hosting = FakeHosting {
            remotes: remotes(&[("origin", "git@github.com:user/repo.git")]),
            is_fork: Ok(true),
        };
        let status = ForkStatusDetector::new(&hosting)
            .detect(&repo("user/repo"))
            .unwrap();
        assert!(status.is_in_fork);
        assert!(!status.has_correct_remotes);
        assert_eq!(status.fork_name, "user/repo");
        assert_eq!(status.upstream_name, "");
    }

    #[test]
    fn non_fork_clone_yields_default_status() {
        let hosting = FakeHosting {
            remotes: remotes(&[("origin", "git@github.com:Org/repo.git")]),
            is_fork: Ok(false),
        };
        let status = ForkStatusDetector::new(&hosting)
            .detect(&repo("Org/repo"))
            .unwrap();
        assert_eq!(status, ForkStatus::default());
    }

    #[test]
    fn flag_query_failure_degrades_to_not_a_fork() {
        let hosting = FakeHosting {
            remotes: remotes(&[("origin", "git@github.com:user/repo.git")]),
            is_fork: Err(()),
        };
        let status = ForkStatusDetector::new(&hosting)
            .detect(&repo("user/repo"))
            .unwrap();
        assert_eq!(status, ForkStatus::default());
    }
}
