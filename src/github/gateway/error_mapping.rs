//! Error mapping helpers for the Octocrab project gateway.

use http::StatusCode;

use crate::github::error::TriageError;
use crate::github::models::GraphQlError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> TriageError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            TriageError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            TriageError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return TriageError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    TriageError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_graphql_errors(operation: &str, errors: &[GraphQlError]) -> TriageError {
    let joined = errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    TriageError::GraphQl {
        message: format!("{operation} failed: {joined}"),
    }
}
