//! Label and milestone filters deciding what happens to an item.
//!
//! Everything here is pure: the functions only look at the event's labels
//! and milestone and at the configured filters, so every outcome can be
//! tested without a network.

use std::collections::BTreeSet;

use crate::github::EventContext;

/// How the label filter combines its entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelOperator {
    /// Every filter label must be present.
    And,
    /// At least one filter label must be present.
    #[default]
    Or,
    /// None of the filter labels may be present.
    Not,
}

impl LabelOperator {
    /// Parses the operator input; anything other than `and` or `not` is `Or`.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "and" => Self::And,
            "not" => Self::Not,
            _ => Self::Or,
        }
    }
}

/// Configured filters for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Label names to match, compared case-insensitively.
    pub label_filter: Vec<String>,
    /// How `label_filter` entries combine.
    pub label_operator: LabelOperator,
    /// Milestone titles (or prefixes when fuzzy) to match.
    pub milestone_filter: Vec<String>,
    /// Remove items whose milestone no longer matches.
    pub remove_unmatched: bool,
    /// Match milestones by prefix instead of exact title.
    pub fuzzy_match: bool,
}

/// What a run does with the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Leave the project untouched.
    Skip,
    /// Add the item to the project.
    Add,
    /// Remove the item from the project.
    Remove,
}

/// Splits a comma-separated input into trimmed, non-empty entries.
#[must_use]
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Reads a boolean action input; only `true` and `True` enable it.
#[must_use]
pub fn parse_flag(input: Option<&str>) -> bool {
    matches!(input.map(str::trim), Some("true" | "True"))
}

/// Checks the item's labels against the label filter.
///
/// An empty filter always matches, whatever the operator.
#[must_use]
pub fn matches_labels(
    issue_labels: &BTreeSet<String>,
    filter: &[String],
    operator: LabelOperator,
) -> bool {
    if filter.is_empty() {
        return true;
    }

    let present: BTreeSet<String> = issue_labels
        .iter()
        .map(|label| label.to_lowercase())
        .collect();
    let mut wanted = filter.iter().map(|label| label.to_lowercase());

    match operator {
        LabelOperator::And => wanted.all(|label| present.contains(&label)),
        LabelOperator::Or => wanted.any(|label| present.contains(&label)),
        LabelOperator::Not => !wanted.any(|label| present.contains(&label)),
    }
}

/// Checks the item's milestone against the milestone filter.
///
/// An empty filter always matches. Otherwise an item without a milestone
/// never matches.
#[must_use]
pub fn matches_milestone(milestone: Option<&str>, filter: &[String], fuzzy: bool) -> bool {
    if filter.is_empty() {
        return true;
    }

    let Some(title) = milestone else {
        return false;
    };

    if fuzzy {
        filter.iter().any(|prefix| title.starts_with(prefix.as_str()))
    } else {
        filter.iter().any(|entry| entry == title)
    }
}

/// Decides what to do with the event's item.
///
/// Label mismatches always skip. A milestone mismatch removes the item when
/// `remove_unmatched` is set and skips it otherwise.
#[must_use]
pub fn decide(event: &EventContext, config: &FilterConfig) -> Decision {
    if !matches_labels(event.labels(), &config.label_filter, config.label_operator) {
        return Decision::Skip;
    }

    if !config.milestone_filter.is_empty()
        && !matches_milestone(event.milestone(), &config.milestone_filter, config.fuzzy_match)
    {
        return if config.remove_unmatched {
            Decision::Remove
        } else {
            Decision::Skip
        };
    }

    Decision::Add
}
