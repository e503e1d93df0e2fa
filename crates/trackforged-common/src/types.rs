//! Core type definitions for encode jobs.
//!
//! Source and destination paths are kept as distinct newtypes so a job can
//! never be handed its own input as the output path.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A file name extension without the leading dot, e.g. `flac`.
///
/// Matching is case-sensitive: `track.FLAC` is not a `flac` file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Extension(String);

impl Extension {
    /// Create an extension, accepting an optional leading dot (`.mp3` or `mp3`).
    pub fn new(ext: impl AsRef<str>) -> Result<Self> {
        let ext = ext.as_ref();
        let ext = ext.strip_prefix('.').unwrap_or(ext);

        if ext.is_empty() {
            return Err(Error::invalid_input("extension cannot be empty"));
        }

        if ext.contains(['.', '/', '\\']) {
            return Err(Error::invalid_input(format!(
                "extension '{ext}' must not contain dots or path separators"
            )));
        }

        Ok(Self(ext.to_string()))
    }

    /// Default source extension.
    pub fn flac() -> Self {
        Self("flac".to_string())
    }

    /// Default target extension.
    pub fn mp3() -> Self {
        Self("mp3".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `path` ends in this extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.0)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.0)
    }
}

impl FromStr for Extension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Extension {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Extension> for String {
    fn from(ext: Extension) -> Self {
        ext.0
    }
}

/// Encoder quality selector, `0..=9`.
///
/// Lower values mean higher audio quality. The default of 3 corresponds to
/// roughly 196 kbps for a VBR mp3 encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    /// Highest quality setting.
    pub const BEST: Quality = Quality(0);
    /// Lowest quality setting.
    pub const WORST: Quality = Quality(9);

    pub fn new(value: u8) -> Result<Self> {
        if value > Self::WORST.0 {
            return Err(Error::invalid_input(format!(
                "quality must be between {} and {}, got {}",
                Self::BEST.0,
                Self::WORST.0,
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Quality {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// An audio file found under the input root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile(PathBuf);

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for SourceFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Where the encoded form of a [`SourceFile`] is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DestinationFile(PathBuf);

impl DestinationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Whether something already occupies this path.
    pub fn exists(&self) -> bool {
        self.0.exists()
    }
}

impl AsRef<Path> for DestinationFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DestinationFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
