//! Trackforged-Common: Shared types and path utilities.
//!
//! This crate provides functionality used across trackforged:
//!
//! - **Core Types**: [`SourceFile`], [`DestinationFile`], [`Extension`] and [`Quality`]
//! - **Path Mapping**: Mirroring a source tree onto an output tree
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use trackforged_common::paths::PathMapper;
//! use trackforged_common::{Extension, SourceFile};
//!
//! let mapper = PathMapper::new("/music/flac", "/music/mp3", Extension::new("mp3")?);
//! let source = SourceFile::new("/music/flac/album/01 intro.flac");
//! let destination = mapper.map(&source)?;
//! assert_eq!(destination.path().to_str(), Some("/music/mp3/album/01 intro.mp3"));
//! # Ok::<(), trackforged_common::Error>(())
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
