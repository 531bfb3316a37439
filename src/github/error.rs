//! Error types exposed by the project triage action.

use thiserror::Error;

/// Errors surfaced while reading inputs or communicating with GitHub.
///
/// Every variant is fatal for a run. A filtered-out item or a missing
/// project item during removal are normal outcomes and never appear here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TriageError {
    /// No project URL was configured.
    #[error("project URL is required")]
    MissingProjectUrl,

    /// The authentication token was missing.
    #[error("GitHub token is required")]
    MissingToken,

    /// No webhook event payload path was configured.
    #[error("event payload path is required (set GITHUB_EVENT_PATH or --event-path)")]
    MissingEventPath,

    /// The provided URL could not be parsed.
    #[error("project URL is invalid: {0}")]
    InvalidUrl(String),

    /// The project URL path does not have the expected shape.
    #[error("project URL must match /orgs/<owner>/projects/<number> or /users/<owner>/projects/<number>")]
    InvalidProjectPath,

    /// The project number is not a positive integer.
    #[error("project number must be a positive integer")]
    InvalidProjectNumber,

    /// The owner kind token is neither an organisation nor a user.
    #[error("unsupported project owner kind: {kind}")]
    UnsupportedOwnerKind {
        /// Token that failed to resolve.
        kind: String,
    },

    /// The project could not be resolved to a node id.
    #[error("project {number} was not found for {owner}")]
    ProjectNotFound {
        /// Owner login used for the lookup.
        owner: String,
        /// Project number used for the lookup.
        number: u64,
    },

    /// The webhook event payload is unusable.
    #[error("invalid event payload: {message}")]
    InvalidEvent {
        /// Description of the payload problem.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// The GraphQL endpoint answered with an `errors` array.
    #[error("GitHub GraphQL error: {message}")]
    GraphQl {
        /// Joined error messages reported by the endpoint.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl TriageError {
    /// Returns true for failures caused by the action's own inputs rather
    /// than by a remote call.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingProjectUrl
                | Self::MissingToken
                | Self::MissingEventPath
                | Self::InvalidUrl(_)
                | Self::InvalidProjectPath
                | Self::InvalidProjectNumber
                | Self::UnsupportedOwnerKind { .. }
                | Self::ProjectNotFound { .. }
                | Self::InvalidEvent { .. }
                | Self::Configuration { .. }
        )
    }
}
