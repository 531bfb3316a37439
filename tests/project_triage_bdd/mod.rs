//! Support modules for the project triage BDD tests.

pub(crate) mod state;

pub(crate) use state::{TriageState, mount_graphql, run_triage};
