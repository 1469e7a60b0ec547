//! Composes prefix resolution, slug sanitization and formatting into the
//! final branch name for an issue.

use crate::branch::resolver::BranchTypeResolver;
use crate::branch::{format_branch_name, max_slug_length, sanitize};
use crate::config::Config;
use crate::domain::{Issue, Repository};
use crate::errors::BranchError;
use crate::prompt::Prompter;

pub struct BranchNameProvider<'a> {
    config: &'a Config,
    prompter: &'a dyn Prompter,
}

impl<'a> BranchNameProvider<'a> {
    pub fn new(config: &'a Config, prompter: &'a dyn Prompter) -> Self {
        Self { config, prompter }
    }

    /// Derive the branch name for `issue` in `repo`.
    ///
    /// The slug prompt defaults to the sanitized issue title, so default-values
    /// runs keep the title-derived slug without asking. Whatever comes back is
    /// sanitized again before formatting.
    pub fn branch_name(&self, issue: &Issue, repo: &Repository) -> Result<String, BranchError> {
        let resolver = BranchTypeResolver::new(self.config, self.prompter);
        let prefix = resolver.resolve(&issue.id, issue.issue_type)?;

        let title_slug = sanitize(&issue.title);
        let budget = max_slug_length(&repo.name_with_owner, &prefix, &issue.id);
        let answer = self.prompter.select_or_input(
            &format!("Branch description (up to {budget} characters)"),
            &[],
            Some(&title_slug),
            false,
        )?;
        let slug = sanitize(&answer);

        Ok(format_branch_name(
            &repo.name_with_owner,
            &prefix,
            &issue.id,
            &slug,
        ))
    }
}
