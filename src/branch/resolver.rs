//! Branch-type prefix selection.

use crate::config::Config;
use crate::domain::IssueType;
use crate::errors::{BranchError, PromptError};
use crate::prompt::Prompter;

/// Select entry that escalates to the full issue-type list.
const OTHER_CHOICE: &str = "other";

/// Decides the prefix token for a branch name.
///
/// Every decision flows through the [`Prompter`] seam: interactive runs get
/// real prompts, default-values runs get each prompt's default. The one case
/// with no default — an `Other`/`Unknown` issue — is exactly the case that
/// must fail without a user.
pub struct BranchTypeResolver<'a> {
    config: &'a Config,
    prompter: &'a dyn Prompter,
}

impl<'a> BranchTypeResolver<'a> {
    pub fn new(config: &'a Config, prompter: &'a dyn Prompter) -> Self {
        Self { config, prompter }
    }

    pub fn resolve(&self, issue_id: &str, issue_type: IssueType) -> Result<String, BranchError> {
        match issue_type {
            IssueType::Bug | IssueType::Bugfix => {
                let options = vec![
                    self.config.prefix_for(IssueType::Bugfix),
                    self.config.prefix_for(IssueType::Hotfix),
                    OTHER_CHOICE.to_string(),
                ];
                let default = options[0].clone();
                let picked = self.prompter.select_or_input(
                    &format!("Branch type for {issue_id}"),
                    &options,
                    Some(&default),
                    true,
                )?;
                self.maybe_escalate(issue_id, picked)
            }
            t if t.is_determined() => {
                let current = self.config.prefix_for(t);
                let options = vec![current.clone(), OTHER_CHOICE.to_string()];
                let picked = self.prompter.select_or_input(
                    &format!("Branch type for {issue_id}"),
                    &options,
                    Some(&current),
                    true,
                )?;
                self.maybe_escalate(issue_id, picked)
            }
            _ => self.select_from_all(issue_id),
        }
    }

    fn maybe_escalate(&self, issue_id: &str, picked: String) -> Result<String, BranchError> {
        if picked == OTHER_CHOICE {
            self.select_from_all(issue_id)
        } else {
            Ok(picked)
        }
    }

    /// Required selection across every selectable issue type. Deliberately
    /// has no default, so default-values mode fails here and the failure is
    /// reported as an undetermined issue type.
    fn select_from_all(&self, issue_id: &str) -> Result<String, BranchError> {
        let options: Vec<String> = IssueType::SELECTABLE
            .iter()
            .map(|t| self.config.prefix_for(*t))
            .collect();
        match self.prompter.select_or_input(
            &format!("Branch type for {issue_id}"),
            &options,
            None,
            true,
        ) {
            Ok(prefix) => Ok(prefix),
            Err(PromptError::NoDefault { .. }) => Err(BranchError::UndeterminedIssueType {
                identifier: issue_id.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}
