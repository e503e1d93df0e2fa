//! Checks that run before any file is touched.
//!
//! The input must be an existing directory, the output must be a writable
//! directory (it is created when missing), and the encoder must be
//! executable. Both directories are returned canonicalised so that source
//! paths found under the input can be mapped onto the output.

use colored::Colorize;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::config::ToolsConfig;

/// A precondition that does not hold.
#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("Input path {} does not exist", .0.display())]
    InputMissing(PathBuf),

    #[error("Input path {} is not a valid directory", .0.display())]
    InputNotDirectory(PathBuf),

    #[error("Output path {} is not a directory", .0.display())]
    OutputNotDirectory(PathBuf),

    #[error("Output path {} is not writable: {source}", path.display())]
    OutputNotWritable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Output path {} could not be created: {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error! Please install {encoder} first.")]
    EncoderMissing { encoder: String },
}

/// Validated paths handed to the conversion core.
#[derive(Debug, Clone)]
pub struct Preflight {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoder: PathBuf,
}

/// Run every check, encoder first.
pub fn run(input: &Path, output: &Path, tools: &ToolsConfig) -> Result<Preflight, PreflightError> {
    let encoder = check_encoder(tools)?;
    let input = check_input(input)?;
    let output = check_output(output)?;

    tracing::debug!(
        "Preflight passed: input {:?}, output {:?}, encoder {:?}",
        input,
        output,
        encoder
    );

    Ok(Preflight {
        input,
        output,
        encoder,
    })
}

/// Resolve the encoder executable.
pub fn check_encoder(tools: &ToolsConfig) -> Result<PathBuf, PreflightError> {
    trackforged_av::get_tool_path(&tools.encoder, tools.encoder_path.as_deref()).map_err(|e| {
        tracing::debug!("Encoder lookup failed: {}", e);
        PreflightError::EncoderMissing {
            encoder: tools.encoder.clone(),
        }
    })
}

/// The input must be an existing directory.
pub fn check_input(path: &Path) -> Result<PathBuf, PreflightError> {
    if !path.exists() {
        return Err(PreflightError::InputMissing(path.to_path_buf()));
    }

    if !path.is_dir() {
        return Err(PreflightError::InputNotDirectory(path.to_path_buf()));
    }

    path.canonicalize()
        .map_err(|_| PreflightError::InputMissing(path.to_path_buf()))
}

/// The output must be a writable directory; a missing one is created.
///
/// Writability is probed by creating and removing a temporary file.
pub fn check_output(path: &Path) -> Result<PathBuf, PreflightError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PreflightError::OutputNotDirectory(path.to_path_buf()));
        }

        NamedTempFile::new_in(path)
            .and_then(|probe| probe.close())
            .map_err(|source| PreflightError::OutputNotWritable {
                path: path.to_path_buf(),
                source,
            })?;
    } else {
        println!(
            "{}",
            format!("Output path {} does not exist", path.display()).red()
        );
        println!(
            "{}",
            format!("Trying to create {}...", path.display()).cyan()
        );

        std::fs::create_dir_all(path).map_err(|source| PreflightError::OutputCreate {
            path: path.to_path_buf(),
            source,
        })?;

        println!(
            "{}",
            format!("SUCCESS! {} Created...", path.display()).cyan()
        );
    }

    path.canonicalize()
        .map_err(|source| PreflightError::OutputCreate {
            path: path.to_path_buf(),
            source,
        })
}
