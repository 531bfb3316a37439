//! Unit tests for action configuration.

mod helpers;
