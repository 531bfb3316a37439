//! Data models for project boards and their items.
//!
//! Types prefixed with `Api` are internal deserialisation targets for the
//! GraphQL responses and convert into the public domain types.

use std::fmt;

use serde::Deserialize;

use super::pagination::CursorPage;

/// Node id of a project board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wraps a project node id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the node id.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Node id of a project item, the record linking content to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps a project item node id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the node id.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// A project item and the node id of the issue or pull request it links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    /// Project item id.
    pub id: ItemId,
    /// Linked content id; absent when the content is inaccessible.
    pub content_id: Option<String>,
}

impl ProjectItem {
    /// Returns true when this item links the given content node.
    #[must_use]
    pub fn links(&self, content_id: &str) -> bool {
        self.content_id.as_deref() == Some(content_id)
    }
}

/// One page of project items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItemsPage {
    /// Items on this page.
    pub items: Vec<ProjectItem>,
    /// Cursor state for requesting the next page.
    pub page: CursorPage,
}

/// GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(super) struct GraphQlResponse<T> {
    pub(super) data: Option<T>,
    #[serde(default)]
    pub(super) errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct GraphQlError {
    pub(super) message: String,
    #[serde(rename = "type")]
    pub(super) kind: Option<String>,
}

impl GraphQlError {
    pub(super) fn is_not_found(&self) -> bool {
        self.kind.as_deref() == Some("NOT_FOUND")
    }
}

/// Query data aliased under `owner` regardless of the owner kind root.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
pub(super) struct ApiOwnerData<P> {
    pub(super) owner: Option<ApiOwner<P>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
pub(super) struct ApiOwner<P> {
    #[serde(rename = "projectV2")]
    pub(super) project: Option<P>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiProjectNode {
    pub(super) id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiProjectItems {
    pub(super) items: ApiItemConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiItemConnection {
    #[serde(default)]
    pub(super) total_count: u64,
    pub(super) page_info: ApiPageInfo,
    #[serde(default)]
    pub(super) nodes: Vec<Option<ApiItem>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiPageInfo {
    pub(super) has_next_page: bool,
    pub(super) end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiItem {
    pub(super) id: String,
    pub(super) content: Option<ApiContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiContent {
    pub(super) id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiAddItemData {
    #[serde(rename = "addProjectV2ItemById")]
    pub(super) payload: Option<ApiAddItemPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiAddItemPayload {
    pub(super) item: Option<ApiItemRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiItemRef {
    pub(super) id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiDeleteItemData {
    #[serde(rename = "deleteProjectV2Item")]
    pub(super) payload: Option<ApiDeleteItemPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiDeleteItemPayload {
    pub(super) deleted_item_id: Option<String>,
}

impl From<ApiItem> for ProjectItem {
    fn from(value: ApiItem) -> Self {
        Self {
            id: ItemId::new(value.id),
            content_id: value.content.and_then(|content| content.id),
        }
    }
}

impl From<ApiItemConnection> for ProjectItemsPage {
    fn from(value: ApiItemConnection) -> Self {
        let page = CursorPage::new(value.total_count)
            .with_has_next_page(value.page_info.has_next_page)
            .with_end_cursor(value.page_info.end_cursor);
        Self {
            items: value
                .nodes
                .into_iter()
                .flatten()
                .map(ProjectItem::from)
                .collect(),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{ApiItemConnection, ApiOwnerData, ApiProjectItems, GraphQlResponse, ProjectItemsPage};

    #[rstest]
    fn converts_item_connection_into_page() {
        let body = json!({
            "data": {
                "owner": {
                    "projectV2": {
                        "items": {
                            "totalCount": 3,
                            "pageInfo": { "hasNextPage": true, "endCursor": "Y3Vyc29yOjI=" },
                            "nodes": [
                                { "id": "PVTI_1", "content": { "id": "I_1" } },
                                null,
                                { "id": "PVTI_3", "content": null }
                            ]
                        }
                    }
                }
            }
        });

        let response: GraphQlResponse<ApiOwnerData<ApiProjectItems>> =
            serde_json::from_value(body).expect("response should deserialise");
        let connection: ApiItemConnection = response
            .data
            .and_then(|data| data.owner)
            .and_then(|owner| owner.project)
            .map(|project| project.items)
            .expect("items should be present");
        let page = ProjectItemsPage::from(connection);

        assert_eq!(page.items.len(), 2, "null nodes should be skipped");
        assert!(
            page.items.first().is_some_and(|item| item.links("I_1")),
            "first item should link I_1"
        );
        assert_eq!(
            page.items.get(1).and_then(|item| item.content_id.clone()),
            None,
            "missing content should map to None"
        );
        assert!(page.page.has_next_page(), "has_next_page mismatch");
        assert_eq!(page.page.end_cursor(), Some("Y3Vyc29yOjI="), "cursor mismatch");
        assert_eq!(page.page.total_count(), 3, "total count mismatch");
    }

    #[rstest]
    fn flags_not_found_errors() {
        let body = json!({
            "data": { "owner": null },
            "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to an Organization" }]
        });

        let response: GraphQlResponse<ApiOwnerData<ApiProjectItems>> =
            serde_json::from_value(body).expect("response should deserialise");

        assert!(
            response.errors.iter().all(super::GraphQlError::is_not_found),
            "NOT_FOUND errors should be recognised"
        );
        assert!(
            response.data.is_some_and(|data| data.owner.is_none()),
            "owner should be null"
        );
    }
}
