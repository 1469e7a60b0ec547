//! Branch-name assembly and the shared length budget.

/// Git ref budget, shared with the remote path (`owner/name`).
pub const MAX_REF_LENGTH: usize = 63;

/// Assemble `{prefix}/{issue_id}[-{slug}]`, truncated to the repository's
/// remaining ref budget.
///
/// Truncation counts Unicode scalar values, not bytes, and a hyphen left
/// dangling by the cut is stripped. A zero or exhausted budget yields the
/// empty string; callers tolerate that degenerate case.
pub fn format_branch_name(
    repo_name_with_owner: &str,
    prefix: &str,
    issue_id: &str,
    slug: &str,
) -> String {
    let mut name = format!("{prefix}/{issue_id}");
    if !slug.is_empty() {
        name.push('-');
        name.push_str(slug);
    }
    let budget = MAX_REF_LENGTH.saturating_sub(repo_name_with_owner.chars().count());
    let truncated: String = name.chars().take(budget).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Characters left for the descriptive slug once the repository name, prefix,
/// issue id and the two separators are accounted for. Used to label the
/// interactive slug prompt with the real remaining budget.
pub fn max_slug_length(repo_name_with_owner: &str, prefix: &str, issue_id: &str) -> usize {
    MAX_REF_LENGTH
        .saturating_sub(repo_name_with_owner.chars().count())
        .saturating_sub(prefix.chars().count())
        .saturating_sub(issue_id.chars().count())
        .saturating_sub(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_passes_through() {
        let name = format_branch_name("acme/widgets", "feature", "GH-1", "add-retry");
        assert_eq!(name, "feature/GH-1-add-retry");
    }

    #[test]
    fn empty_slug_omits_the_separator() {
        let name = format_branch_name("acme/widgets", "bugfix", "GH-2", "");
        assert_eq!(name, "bugfix/GH-2");
    }

    #[test]
    fn long_title_is_truncated_to_the_repo_budget() {
        // 17-character repository name leaves a 46-character budget.
        let name = format_branch_name(
            "acme/payments-api",
            "feature",
            "GH-1",
            "my-title-is-too-long-and-it-should-be-truncated",
        );
        assert_eq!(name, "feature/GH-1-my-title-is-too-long-and-it-shoul");
        assert_eq!(name.chars().count(), 46);
    }

    #[test]
    fn truncation_strips_a_dangling_hyphen() {
        // 22-character repository name leaves a 41-character budget, which
        // cuts exactly on a hyphen.
        let name = format_branch_name(
            "acme-corp/payments-api",
            "feature",
            "GH-1",
            "my-title-is-too-long-and-it-should-be-truncated",
        );
        assert_eq!(name, "feature/GH-1-my-title-is-too-long-and-it");
        assert!(!name.ends_with('-'));
    }

    #[test]
    fn length_invariant_holds_across_repo_names() {
        let slug = "a-very-long-description-of-the-change-in-question-that-keeps-going";
        for repo in [
            "a/b",
            "acme/widgets",
            "some-organization/a-rather-long-repository-name",
        ] {
            let name = format_branch_name(repo, "feature", "GH-123", slug);
            assert!(
                name.chars().count() <= MAX_REF_LENGTH - repo.chars().count(),
                "budget exceeded for {repo}"
            );
        }
    }

    #[test]
    fn exhausted_budget_yields_empty_name() {
        let repo = "o".repeat(70);
        assert_eq!(format_branch_name(&repo, "feature", "GH-1", "slug"), "");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        // Multi-byte slug characters must not split or overrun the budget.
        let repo = "acme/payments-api"; // budget 46
        let name = format_branch_name(repo, "feature", "GH-1", &"é".repeat(60));
        assert_eq!(name.chars().count(), 46);
    }

    #[test]
    fn slug_budget_subtracts_all_fixed_parts() {
        // 63 - 17 - 7 - 4 - 2
        assert_eq!(max_slug_length("acme/payments-api", "feature", "GH-1"), 33);
        assert_eq!(max_slug_length(&"o".repeat(70), "feature", "GH-1"), 0);
    }
}
