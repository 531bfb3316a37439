//! Webhook event payload decoding.
//!
//! The workflow runner writes the triggering event to a JSON file. Only the
//! issue or pull request object and the repository owner are read from it.

use std::collections::BTreeSet;

use camino::Utf8Path;
use serde::Deserialize;

use super::error::TriageError;
use crate::files;

/// The issue or pull request a run is triaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    number: u64,
    labels: BTreeSet<String>,
    milestone: Option<String>,
    node_id: String,
    repository_owner: String,
}

impl EventContext {
    /// Builds a context directly; labels are lowercased.
    #[must_use]
    pub fn new<I, S>(
        number: u64,
        labels: I,
        milestone: Option<String>,
        node_id: impl Into<String>,
        repository_owner: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            number,
            labels: labels
                .into_iter()
                .map(|label| label.as_ref().to_lowercase())
                .collect(),
            milestone,
            node_id: node_id.into(),
            repository_owner: repository_owner.into(),
        }
    }

    /// Decodes a webhook payload.
    ///
    /// The `issue` object is preferred; `pull_request` is used when the event
    /// has no issue.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidEvent`] when the payload is not valid
    /// JSON, carries neither an issue nor a pull request, or lacks the
    /// repository owner.
    pub fn from_json(payload: &str) -> Result<Self, TriageError> {
        let event: ApiEvent =
            serde_json::from_str(payload).map_err(|error| TriageError::InvalidEvent {
                message: error.to_string(),
            })?;

        let subject = event
            .issue
            .or(event.pull_request)
            .ok_or_else(|| TriageError::InvalidEvent {
                message: "payload contains neither an issue nor a pull request".to_owned(),
            })?;
        let repository_owner = event
            .repository
            .and_then(|repository| repository.owner)
            .and_then(|owner| owner.login)
            .ok_or_else(|| TriageError::InvalidEvent {
                message: "payload is missing repository.owner.login".to_owned(),
            })?;

        Ok(Self::new(
            subject.number,
            subject.labels.into_iter().filter_map(|label| label.name),
            subject.milestone.and_then(|milestone| milestone.title),
            subject.node_id,
            repository_owner,
        ))
    }

    /// Reads and decodes the webhook payload at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Io`] when the file cannot be read and
    /// [`TriageError::InvalidEvent`] when decoding fails.
    pub fn load(path: &Utf8Path) -> Result<Self, TriageError> {
        let payload = files::read_to_string(path, "event payload")?;
        Self::from_json(&payload)
    }

    /// Issue or pull request number.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Lowercased label names.
    #[must_use]
    pub const fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// Milestone title, when the item has a milestone.
    #[must_use]
    pub fn milestone(&self) -> Option<&str> {
        self.milestone.as_deref()
    }

    /// Node id of the issue or pull request.
    #[must_use]
    pub const fn node_id(&self) -> &str {
        self.node_id.as_str()
    }

    /// Login of the repository owner.
    #[must_use]
    pub const fn repository_owner(&self) -> &str {
        self.repository_owner.as_str()
    }
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    issue: Option<ApiSubject>,
    pull_request: Option<ApiSubject>,
    repository: Option<ApiRepository>,
}

#[derive(Debug, Deserialize)]
struct ApiSubject {
    number: u64,
    node_id: String,
    #[serde(default)]
    labels: Vec<ApiLabel>,
    milestone: Option<ApiMilestone>,
}

#[derive(Debug, Deserialize)]
struct ApiLabel {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMilestone {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRepository {
    owner: Option<ApiOwner>,
}

#[derive(Debug, Deserialize)]
struct ApiOwner {
    login: Option<String>,
}
