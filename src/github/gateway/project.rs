//! Octocrab implementation of the project gateway.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::json;

use crate::github::error::TriageError;
use crate::github::locator::{PersonalAccessToken, ProjectLocator};
use crate::github::models::{
    ApiAddItemData, ApiDeleteItemData, ApiOwnerData, ApiProjectItems, ApiProjectNode, ItemId,
    ProjectId, ProjectItemsPage,
};
use crate::github::pagination::PageRequest;

use super::ProjectGateway;
use super::client::build_octocrab_client;
use super::graphql::execute;

const ADD_ITEM_MUTATION: &str = "mutation addProjectItem($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
    item { id }
  }
}";

const DELETE_ITEM_MUTATION: &str = "mutation deleteProjectItem($projectId: ID!, $itemId: ID!) {
  deleteProjectV2Item(input: { projectId: $projectId, itemId: $itemId }) {
    deletedItemId
  }
}";

/// The owner root cannot be a variable, so it is spliced in and the result
/// aliased to `owner` to keep the response shape stable.
fn project_id_query(root: &str) -> String {
    format!(
        "query projectId($owner: String!, $number: Int!) {{
  owner: {root}(login: $owner) {{
    projectV2(number: $number) {{ id }}
  }}
}}"
    )
}

fn project_items_query(root: &str) -> String {
    format!(
        "query projectItems($owner: String!, $number: Int!, $first: Int!, $after: String) {{
  owner: {root}(login: $owner) {{
    projectV2(number: $number) {{
      items(first: $first, after: $after) {{
        totalCount
        pageInfo {{ hasNextPage endCursor }}
        nodes {{
          id
          content {{
            ... on Issue {{ id }}
            ... on PullRequest {{ id }}
            ... on DraftIssue {{ id }}
          }}
        }}
      }}
    }}
  }}
}}"
    )
}

/// Octocrab-backed gateway talking to the GitHub GraphQL API.
pub struct OctocrabProjectGateway {
    client: Octocrab,
}

impl OctocrabProjectGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and project locator.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidUrl` when the base URI cannot be parsed or
    /// `TriageError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &ProjectLocator,
    ) -> Result<Self, TriageError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl ProjectGateway for OctocrabProjectGateway {
    async fn project_id(&self, locator: &ProjectLocator) -> Result<Option<ProjectId>, TriageError> {
        let query = project_id_query(locator.owner_kind().query_root());
        let variables = json!({
            "owner": locator.owner().as_str(),
            "number": locator.number().get(),
        });

        let data: ApiOwnerData<ApiProjectNode> =
            execute(&self.client, "project lookup", &query, variables).await?;

        Ok(data
            .owner
            .and_then(|owner| owner.project)
            .map(|project| ProjectId::new(project.id)))
    }

    async fn add_item(
        &self,
        project_id: &ProjectId,
        content_id: &str,
    ) -> Result<ItemId, TriageError> {
        let variables = json!({
            "projectId": project_id.as_str(),
            "contentId": content_id,
        });

        let data: ApiAddItemData =
            execute(&self.client, "add project item", ADD_ITEM_MUTATION, variables).await?;

        data.payload
            .and_then(|payload| payload.item)
            .map(|item| ItemId::new(item.id))
            .ok_or_else(|| TriageError::Api {
                message: "add project item returned no item".to_owned(),
            })
    }

    async fn project_items(
        &self,
        locator: &ProjectLocator,
        request: &PageRequest,
    ) -> Result<ProjectItemsPage, TriageError> {
        let query = project_items_query(locator.owner_kind().query_root());
        let variables = json!({
            "owner": locator.owner().as_str(),
            "number": locator.number().get(),
            "first": request.first(),
            "after": request.after(),
        });

        let data: ApiOwnerData<ApiProjectItems> =
            execute(&self.client, "list project items", &query, variables).await?;

        data.owner
            .and_then(|owner| owner.project)
            .map(|project| ProjectItemsPage::from(project.items))
            .ok_or_else(|| TriageError::ProjectNotFound {
                owner: locator.owner().as_str().to_owned(),
                number: locator.number().get(),
            })
    }

    async fn delete_item(
        &self,
        project_id: &ProjectId,
        item_id: &ItemId,
    ) -> Result<ItemId, TriageError> {
        let variables = json!({
            "projectId": project_id.as_str(),
            "itemId": item_id.as_str(),
        });

        let data: ApiDeleteItemData =
            execute(&self.client, "delete project item", DELETE_ITEM_MUTATION, variables).await?;

        data.payload
            .and_then(|payload| payload.deleted_item_id)
            .map(ItemId::new)
            .ok_or_else(|| TriageError::Api {
                message: "delete project item returned no item id".to_owned(),
            })
    }
}
