//! Gateway for reading and changing project boards through Octocrab.
//!
//! The [`ProjectGateway`] trait is the only place remote calls happen. It
//! keeps the filters and URL parsing free of network concerns and lets the
//! orchestration be tested with mocks, while [`OctocrabProjectGateway`]
//! sends real GraphQL requests.

mod client;
mod error_mapping;
mod graphql;
mod project;

pub use project::OctocrabProjectGateway;

use async_trait::async_trait;

use crate::github::error::TriageError;
use crate::github::locator::ProjectLocator;
use crate::github::models::{ItemId, ProjectId, ProjectItemsPage};
use crate::github::pagination::PageRequest;

/// Remote operations needed to add or remove a project item.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// Looks up the project's node id; `None` when no such project exists.
    async fn project_id(&self, locator: &ProjectLocator) -> Result<Option<ProjectId>, TriageError>;

    /// Adds the issue or pull request with `content_id` to the project.
    async fn add_item(&self, project_id: &ProjectId, content_id: &str)
    -> Result<ItemId, TriageError>;

    /// Lists one page of the project's items.
    async fn project_items(
        &self,
        locator: &ProjectLocator,
        request: &PageRequest,
    ) -> Result<ProjectItemsPage, TriageError>;

    /// Deletes a project item and returns the deleted id.
    async fn delete_item(
        &self,
        project_id: &ProjectId,
        item_id: &ItemId,
    ) -> Result<ItemId, TriageError>;
}
