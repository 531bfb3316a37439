//! Capability-scoped access to the files handed over by the workflow runner.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::github::TriageError;

/// Opens the directory containing `path` and returns it with the file name.
fn open_parent<'path>(
    path: &'path Utf8Path,
    purpose: &str,
) -> Result<(Dir, &'path str), TriageError> {
    let file_name = path.file_name().ok_or_else(|| TriageError::Io {
        message: format!("invalid {purpose} path '{path}': no file name"),
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        TriageError::Io {
            message: format!("failed to open {purpose} directory '{parent}': {error}"),
        }
    })?;
    Ok((dir, file_name))
}

/// Reads the whole file at `path` as UTF-8.
pub(crate) fn read_to_string(path: &Utf8Path, purpose: &str) -> Result<String, TriageError> {
    let (dir, file_name) = open_parent(path, purpose)?;
    dir.read_to_string(file_name)
        .map_err(|error| TriageError::Io {
            message: format!("failed to read {purpose} '{path}': {error}"),
        })
}

/// Appends `line` and a trailing newline to the file at `path`, creating it
/// when missing.
pub(crate) fn append_line(path: &Utf8Path, line: &str, purpose: &str) -> Result<(), TriageError> {
    let (dir, file_name) = open_parent(path, purpose)?;
    let mut options = OpenOptions::new();
    options.append(true).create(true);

    let mut file = dir
        .open_with(file_name, &options)
        .map_err(|error| TriageError::Io {
            message: format!("failed to open {purpose} '{path}': {error}"),
        })?;
    writeln!(file, "{line}").map_err(|error| TriageError::Io {
        message: format!("failed to write {purpose} '{path}': {error}"),
    })
}
