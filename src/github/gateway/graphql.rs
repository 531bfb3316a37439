//! GraphQL request execution shared by the project gateway operations.

use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::github::error::TriageError;
use crate::github::models::{GraphQlError, GraphQlResponse};

use super::error_mapping::{map_graphql_errors, map_octocrab_error};

/// Posts a GraphQL document and returns its `data` member.
///
/// `NOT_FOUND` errors that accompany data are tolerated: GitHub reports an
/// unknown owner or project that way and leaves the node `null`, which the
/// caller turns into a more precise error.
pub(super) async fn execute<T>(
    client: &Octocrab,
    operation: &str,
    query: &str,
    variables: Value,
) -> Result<T, TriageError>
where
    T: DeserializeOwned + Send,
{
    let body = json!({ "query": query, "variables": variables });
    let response: GraphQlResponse<T> = client
        .graphql(&body)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;

    let GraphQlResponse { data, errors } = response;
    if !errors.is_empty() {
        let only_missing_nodes = errors.iter().all(GraphQlError::is_not_found);
        if !only_missing_nodes || data.is_none() {
            return Err(map_graphql_errors(operation, &errors));
        }
        tracing::debug!("{operation}: treating NOT_FOUND errors as absent nodes");
    }

    data.ok_or_else(|| TriageError::Api {
        message: format!("{operation} returned no data"),
    })
}
