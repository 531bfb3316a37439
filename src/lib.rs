//! Project triage library: file issues and pull requests on project boards.
//!
//! Given the webhook event that triggered a workflow run, the crate decides
//! from label and milestone filters whether the issue or pull request should
//! be added to a GitHub project board, removed from it, or left alone, and
//! then performs that change through the GitHub GraphQL API.

pub mod config;
pub mod filter;
pub mod github;
pub mod logging;
pub mod outputs;
pub mod triage;

mod files;

pub use config::TriageConfig;
pub use filter::{Decision, FilterConfig, LabelOperator};
pub use github::{
    EventContext, OctocrabProjectGateway, PersonalAccessToken, ProjectGateway, ProjectLocator,
    TriageError,
};
pub use outputs::{ActionOutput, OutputSink};
pub use triage::{ProjectTriage, TriageOutcome, TriagePlan, plan};
