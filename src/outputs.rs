//! Step outputs written once per run.
//!
//! Under GitHub Actions outputs are appended to the file named by
//! `GITHUB_OUTPUT` as `name=value` lines. Outside a runner they are written
//! to stdout in the same form.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};

use crate::files;
use crate::github::TriageError;
use crate::github::models::ItemId;

/// A named step output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutput {
    /// Id of the project item created by an add.
    ItemId(ItemId),
    /// Id of the project item deleted by a removal.
    DeletedItemId(ItemId),
}

impl ActionOutput {
    /// Output name as seen by later workflow steps.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ItemId(_) => "itemId",
            Self::DeletedItemId(_) => "deletedItemId",
        }
    }

    /// Output value.
    #[must_use]
    pub const fn value(&self) -> &str {
        match self {
            Self::ItemId(id) | Self::DeletedItemId(id) => id.as_str(),
        }
    }

    /// `name=value` line understood by the runner.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{}={}", self.name(), self.value())
    }
}

/// A destination for step outputs.
pub trait OutputSink {
    /// Records one output.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Io`] when the output cannot be written.
    fn write(&self, output: &ActionOutput) -> Result<(), TriageError>;
}

/// Appends outputs to the runner's output file.
#[derive(Debug, Clone)]
pub struct OutputFileSink {
    path: Utf8PathBuf,
}

impl OutputFileSink {
    /// Creates a sink appending to `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the sink appends to.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl OutputSink for OutputFileSink {
    fn write(&self, output: &ActionOutput) -> Result<(), TriageError> {
        files::append_line(&self.path, &output.to_line(), "output file")
    }
}

/// Writes outputs to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutputSink;

impl OutputSink for StdoutOutputSink {
    fn write(&self, output: &ActionOutput) -> Result<(), TriageError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", output.to_line()).map_err(|error| TriageError::Io {
            message: error.to_string(),
        })
    }
}

/// Picks the file sink when an output path is configured, stdout otherwise.
#[must_use]
pub fn sink_for(path: Option<&Utf8Path>) -> Box<dyn OutputSink> {
    match path {
        Some(output_path) => Box::new(OutputFileSink::new(output_path)),
        None => Box::new(StdoutOutputSink),
    }
}
