//! Run orchestration: decide, resolve the project, then add or remove.
//!
//! [`plan`] is pure and runs the filters before the project URL is even
//! parsed, so a filtered-out item never triggers a remote call or a URL
//! error. [`ProjectTriage::execute`] performs the remote sequence for the
//! planned decision through a [`ProjectGateway`].

use tracing::{debug, info, warn};

use crate::filter::{Decision, FilterConfig, decide};
use crate::github::error::TriageError;
use crate::github::event::EventContext;
use crate::github::gateway::ProjectGateway;
use crate::github::locator::ProjectLocator;
use crate::github::models::{ItemId, ProjectId, ProjectItem};
use crate::github::pagination::PageRequest;
use crate::outputs::ActionOutput;

/// What a run should do once the filters have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriagePlan {
    /// The item was filtered out; nothing remote happens.
    Skip,
    /// Add or remove the item on the resolved project.
    Apply {
        /// Either [`Decision::Add`] or [`Decision::Remove`].
        decision: Decision,
        /// Target project.
        locator: ProjectLocator,
    },
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    /// Filters excluded the item.
    Skipped,
    /// The item was added to the project.
    Added {
        /// Id of the created project item.
        item_id: ItemId,
    },
    /// The item was removed from the project.
    Removed {
        /// Id of the deleted project item.
        deleted_item_id: ItemId,
    },
    /// Removal was requested but the item is not on the project.
    ItemNotFound,
}

impl TriageOutcome {
    /// Step output produced by this outcome, if any.
    #[must_use]
    pub fn output(&self) -> Option<ActionOutput> {
        match self {
            Self::Added { item_id } => Some(ActionOutput::ItemId(item_id.clone())),
            Self::Removed { deleted_item_id } => {
                Some(ActionOutput::DeletedItemId(deleted_item_id.clone()))
            }
            Self::Skipped | Self::ItemNotFound => None,
        }
    }
}

/// Applies the filters and, unless the item is skipped, resolves the
/// project URL.
///
/// # Errors
///
/// Returns the [`ProjectLocator::parse`] errors when the item passes the
/// filters but the project URL is malformed.
pub fn plan(
    event: &EventContext,
    filters: &FilterConfig,
    project_url: &str,
) -> Result<TriagePlan, TriageError> {
    let decision = decide(event, filters);
    if decision == Decision::Skip {
        info!(
            "skipping #{number}: labels or milestone do not match the configured filters",
            number = event.number()
        );
        return Ok(TriagePlan::Skip);
    }

    let locator = ProjectLocator::parse(project_url)?;
    Ok(TriagePlan::Apply { decision, locator })
}

/// Performs the remote calls for a planned decision.
pub struct ProjectTriage<'client, Gateway>
where
    Gateway: ProjectGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ProjectTriage<'client, Gateway>
where
    Gateway: ProjectGateway,
{
    /// Create a new orchestrator using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Runs a whole plan; a skip plan makes no remote calls.
    ///
    /// # Errors
    ///
    /// See [`ProjectTriage::execute`].
    pub async fn run(
        &self,
        plan: &TriagePlan,
        event: &EventContext,
    ) -> Result<TriageOutcome, TriageError> {
        match plan {
            TriagePlan::Skip => Ok(TriageOutcome::Skipped),
            TriagePlan::Apply { decision, locator } => {
                self.execute(*decision, locator, event).await
            }
        }
    }

    /// Adds or removes the event's item on the project.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::ProjectNotFound`] when the project cannot be
    /// resolved and propagates any gateway failure. A missing item during
    /// removal is not an error and yields [`TriageOutcome::ItemNotFound`].
    pub async fn execute(
        &self,
        decision: Decision,
        locator: &ProjectLocator,
        event: &EventContext,
    ) -> Result<TriageOutcome, TriageError> {
        if decision == Decision::Skip {
            return Ok(TriageOutcome::Skipped);
        }

        if !event
            .repository_owner()
            .eq_ignore_ascii_case(locator.owner().as_str())
        {
            debug!(
                "repository owner {repo_owner} differs from project owner {project_owner}",
                repo_owner = event.repository_owner(),
                project_owner = locator.owner().as_str()
            );
        }

        let project_id = self.resolve_project(locator).await?;

        match decision {
            Decision::Add => {
                let item_id = self.client.add_item(&project_id, event.node_id()).await?;
                info!(
                    "added #{number} to project {project_id} as item {item_id}",
                    number = event.number()
                );
                Ok(TriageOutcome::Added { item_id })
            }
            Decision::Remove => self.remove(&project_id, locator, event).await,
            Decision::Skip => Ok(TriageOutcome::Skipped),
        }
    }

    async fn resolve_project(&self, locator: &ProjectLocator) -> Result<ProjectId, TriageError> {
        self.client
            .project_id(locator)
            .await?
            .ok_or_else(|| TriageError::ProjectNotFound {
                owner: locator.owner().as_str().to_owned(),
                number: locator.number().get(),
            })
    }

    async fn remove(
        &self,
        project_id: &ProjectId,
        locator: &ProjectLocator,
        event: &EventContext,
    ) -> Result<TriageOutcome, TriageError> {
        let Some(item) = self.find_item(locator, event.node_id()).await? else {
            warn!(
                "#{number} is not on project {project_id}; nothing to remove",
                number = event.number()
            );
            return Ok(TriageOutcome::ItemNotFound);
        };

        let deleted_item_id = self.client.delete_item(project_id, &item.id).await?;
        info!(
            "removed #{number} from project {project_id} (item {deleted_item_id})",
            number = event.number()
        );
        Ok(TriageOutcome::Removed { deleted_item_id })
    }

    /// Walks the project's items page by page looking for `content_id`.
    ///
    /// The walk is bounded by the first page's `totalCount`, and also stops
    /// when the server reports no next page or hands back a missing or
    /// repeated cursor.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn find_item(
        &self,
        locator: &ProjectLocator,
        content_id: &str,
    ) -> Result<Option<ProjectItem>, TriageError> {
        let mut request = PageRequest::first_page();
        let mut budget: Option<u64> = None;
        let mut pages_read: u64 = 0;

        loop {
            let page = self.client.project_items(locator, &request).await?;
            pages_read = pages_read.saturating_add(1);
            debug!(
                "read page {pages_read} of project items ({count} items)",
                count = page.items.len()
            );

            if let Some(item) = page.items.into_iter().find(|item| item.links(content_id)) {
                return Ok(Some(item));
            }

            let limit = *budget.get_or_insert_with(|| page.page.page_budget(request.first()));
            if !page.page.has_next_page() {
                return Ok(None);
            }

            let Some(cursor) = page.page.end_cursor() else {
                warn!("project items page {pages_read} has a next page but no cursor");
                return Ok(None);
            };
            if request.after() == Some(cursor) {
                warn!("project items cursor did not advance after page {pages_read}");
                return Ok(None);
            }
            if pages_read >= limit {
                warn!("stopped after {pages_read} pages of project items");
                return Ok(None);
            }

            request = request.next(cursor);
        }
    }
}
