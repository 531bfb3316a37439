//! Action configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults (no filters, `or` operator)
//! 2. **Configuration file** – `.project-triage.toml` in the current
//!    directory, home directory, or XDG config directory
//! 3. **Environment variables** – `PROJECT_TRIAGE_PROJECT_URL`,
//!    `PROJECT_TRIAGE_GITHUB_TOKEN`, and so on
//! 4. **Command-line arguments** – `--project-url`/`-u`, `--github-token`/`-t`,
//!    ...
//!
//! Values still unset after layering fall back to the GitHub Actions runner
//! environment: `INPUT_<NAME>` variables for action inputs, then
//! `GITHUB_TOKEN`, `GITHUB_EVENT_PATH` and `GITHUB_OUTPUT`.
//!
//! # Configuration File
//!
//! ```toml
//! project_url = "https://github.com/orgs/acme/projects/7"
//! labeled = "bug, needs-triage"
//! label_operator = "or"
//! milestoned = "v2"
//! remove_unmatched = "true"
//! fuzzy_match = "true"
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterConfig, LabelOperator, parse_flag, parse_list};
use crate::github::error::TriageError;

/// Reads a GitHub Actions input variable, treating blank values as unset.
///
/// The runner exports inputs as `INPUT_<NAME>` with the name uppercased and
/// hyphens kept, e.g. `INPUT_PROJECT-URL`.
#[must_use]
pub fn action_input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.to_uppercase());
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn runner_variable(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Action configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use project_triage::TriageConfig;
///
/// let config = TriageConfig::load().expect("failed to load configuration");
/// let project_url = config.require_project_url().expect("project URL required");
/// let filters = config.filter_config();
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PROJECT_TRIAGE",
    discovery(
        dotfile_name = ".project-triage.toml",
        config_file_name = "project-triage.toml",
        app_name = "project-triage"
    )
)]
pub struct TriageConfig {
    /// URL of the target project board.
    ///
    /// Falls back to the `project-url` action input.
    #[ortho_config(cli_short = 'u')]
    pub project_url: Option<String>,

    /// Token used for GitHub API calls.
    ///
    /// Falls back to the `github-token` action input, then `GITHUB_TOKEN`.
    #[ortho_config(cli_short = 't')]
    pub github_token: Option<String>,

    /// Comma-separated label filter.
    #[ortho_config(cli_short = 'l')]
    pub labeled: Option<String>,

    /// How the label filter combines: `and`, `not`, or `or` (default).
    #[ortho_config()]
    pub label_operator: Option<String>,

    /// Comma-separated milestone filter.
    #[ortho_config(cli_short = 'm')]
    pub milestoned: Option<String>,

    /// `true` to remove items whose milestone does not match.
    ///
    /// Kept as a string so the action's `true`/`True` convention applies to
    /// every source.
    #[ortho_config()]
    pub remove_unmatched: Option<String>,

    /// `true` to match milestones by prefix.
    #[ortho_config()]
    pub fuzzy_match: Option<String>,

    /// Path to the webhook event payload; falls back to `GITHUB_EVENT_PATH`.
    #[ortho_config(cli_short = 'e')]
    pub event_path: Option<String>,

    /// Path to the step output file; falls back to `GITHUB_OUTPUT`.
    #[ortho_config()]
    pub output_path: Option<String>,

    /// Log format: `text` (default) or `json`.
    #[ortho_config()]
    pub log_format: Option<String>,
}

impl TriageConfig {
    /// Returns the project URL from configuration or the action input.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::MissingProjectUrl`] when no source provides a
    /// value.
    pub fn require_project_url(&self) -> Result<String, TriageError> {
        non_blank(self.project_url.as_ref())
            .or_else(|| action_input("project-url"))
            .ok_or(TriageError::MissingProjectUrl)
    }

    /// Resolves the token from configuration, the action input, or the
    /// `GITHUB_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, TriageError> {
        non_blank(self.github_token.as_ref())
            .or_else(|| action_input("github-token"))
            .or_else(|| runner_variable("GITHUB_TOKEN"))
            .ok_or(TriageError::MissingToken)
    }

    /// Resolves the event payload path.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::MissingEventPath`] when neither the
    /// configuration nor `GITHUB_EVENT_PATH` provides a path.
    pub fn resolve_event_path(&self) -> Result<Utf8PathBuf, TriageError> {
        non_blank(self.event_path.as_ref())
            .or_else(|| runner_variable("GITHUB_EVENT_PATH"))
            .map(Utf8PathBuf::from)
            .ok_or(TriageError::MissingEventPath)
    }

    /// Resolves the step output file, if any.
    #[must_use]
    pub fn resolve_output_path(&self) -> Option<Utf8PathBuf> {
        non_blank(self.output_path.as_ref())
            .or_else(|| runner_variable("GITHUB_OUTPUT"))
            .map(Utf8PathBuf::from)
    }

    /// Returns true when JSON log lines were requested.
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format
            .as_deref()
            .is_some_and(|format| format.trim().eq_ignore_ascii_case("json"))
    }

    /// Builds the filter configuration from the raw inputs.
    ///
    /// Label entries are trimmed and lowercased; milestone entries are
    /// trimmed. Empty entries are dropped.
    #[must_use]
    pub fn filter_config(&self) -> FilterConfig {
        let labeled = non_blank(self.labeled.as_ref()).or_else(|| action_input("labeled"));
        let operator =
            non_blank(self.label_operator.as_ref()).or_else(|| action_input("label-operator"));
        let milestoned =
            non_blank(self.milestoned.as_ref()).or_else(|| action_input("milestoned"));
        let remove_unmatched = non_blank(self.remove_unmatched.as_ref())
            .or_else(|| action_input("remove-unmatched"));
        let fuzzy_match =
            non_blank(self.fuzzy_match.as_ref()).or_else(|| action_input("fuzzy-match"));

        FilterConfig {
            label_filter: labeled
                .as_deref()
                .map(parse_list)
                .unwrap_or_default()
                .into_iter()
                .map(|label| label.to_lowercase())
                .collect(),
            label_operator: operator
                .as_deref()
                .map(LabelOperator::from_input)
                .unwrap_or_default(),
            milestone_filter: milestoned.as_deref().map(parse_list).unwrap_or_default(),
            remove_unmatched: parse_flag(remove_unmatched.as_deref()),
            fuzzy_match: parse_flag(fuzzy_match.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests;
