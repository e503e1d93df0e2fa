//! # trackforged-av
//!
//! External encoder handling for trackforged.
//!
//! This crate provides functionality for:
//! - Locating the encoder executable (`PATH` lookup or a configured path)
//! - Building and launching one encoder process per file
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use trackforged_av::{require_tool, EncodeCommand, OutputMode};
//! use trackforged_common::{DestinationFile, Quality, SourceFile};
//!
//! let ffmpeg = require_tool("ffmpeg")?;
//! let status = EncodeCommand::new(
//!     ffmpeg,
//!     &SourceFile::new("/music/track.flac"),
//!     &DestinationFile::new("/mp3/track.mp3"),
//!     Quality::BEST,
//! )
//! .run(OutputMode::Inherit)?;
//! println!("encoder exited with {status}");
//! # Ok::<(), trackforged_av::Error>(())
//! ```

pub mod encode;
mod error;
pub mod tools;

// Re-exports
pub use encode::{EncodeCommand, OutputMode};
pub use error::{Error, Result};
pub use tools::{get_tool_path, require_tool};

/// Encoder used when none is configured.
pub const DEFAULT_ENCODER: &str = "ffmpeg";
