//! Path mapping from the input tree onto the output tree.
//!
//! A source file at `<input>/a/b/track.flac` maps to `<output>/a/b/track.mp3`:
//! the relative structure is kept and only the final extension changes.

use crate::{DestinationFile, Error, Extension, Result, SourceFile};
use std::path::PathBuf;

/// Mirrors source files under one root onto destination files under another.
#[derive(Debug, Clone)]
pub struct PathMapper {
    input_root: PathBuf,
    output_root: PathBuf,
    target: Extension,
}

impl PathMapper {
    /// Create a mapper. Both roots should already be absolute.
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        target: Extension,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            target,
        }
    }

    /// Compute the destination for `source` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `source` is not under the input root
    /// or has no file name.
    pub fn map(&self, source: &SourceFile) -> Result<DestinationFile> {
        let relative = source.path().strip_prefix(&self.input_root).map_err(|_| {
            Error::invalid_input(format!(
                "{} is not under {}",
                source,
                self.input_root.display()
            ))
        })?;

        if relative.file_name().is_none() {
            return Err(Error::invalid_input(format!(
                "{source} does not name a file"
            )));
        }

        let destination = self
            .output_root
            .join(relative)
            .with_extension(self.target.as_str());

        Ok(DestinationFile::new(destination))
    }

    /// Compute the destination for `source` and create its parent directory.
    ///
    /// Directory creation is idempotent: a directory that already exists,
    /// including one created concurrently by another job, is fine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Filesystem`] if a directory cannot be created, e.g. on
    /// a permission error or when a regular file occupies the path.
    pub fn prepare(&self, source: &SourceFile) -> Result<DestinationFile> {
        let destination = self.map(source)?;

        if let Some(parent) = destination.path().parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
        }

        Ok(destination)
    }
}
