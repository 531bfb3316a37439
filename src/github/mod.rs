//! GitHub project board access.
//!
//! This module parses project URLs, decodes the triggering webhook event,
//! and wraps Octocrab's GraphQL support to look up projects and add or
//! delete their items. Errors are mapped into user-friendly variants so that
//! callers can surface precise failures without exposing Octocrab internals.

pub mod error;
pub mod event;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;

pub use error::TriageError;
pub use event::EventContext;
pub use gateway::{OctocrabProjectGateway, ProjectGateway};
pub use locator::{
    OwnerKind, PersonalAccessToken, ProjectLocator, ProjectNumber, ProjectOwner,
    resolve_query_root,
};
pub use models::{ItemId, ProjectId, ProjectItem, ProjectItemsPage};
pub use pagination::{CursorPage, ITEMS_PAGE_SIZE, PageRequest};

#[cfg(test)]
pub use gateway::MockProjectGateway;

#[cfg(test)]
mod tests;
