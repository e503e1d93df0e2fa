//! Encode jobs and their outcomes.

use std::fmt;
use std::path::Path;
use std::process::ExitStatus;
use trackforged_av::EncodeCommand;
use trackforged_common::{DestinationFile, Quality, SourceFile};

/// One source file bound to its destination and quality setting.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    pub source: SourceFile,
    pub destination: DestinationFile,
    pub quality: Quality,
}

impl EncodeJob {
    pub fn new(source: SourceFile, destination: DestinationFile, quality: Quality) -> Self {
        Self {
            source,
            destination,
            quality,
        }
    }

    /// A job whose destination already exists has nothing to do.
    pub fn is_done(&self) -> bool {
        self.destination.exists()
    }

    pub fn command(&self, encoder: &Path) -> EncodeCommand {
        EncodeCommand::new(encoder, &self.source, &self.destination, self.quality)
    }
}

/// Terminal state of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The destination already existed; the encoder was not run.
    Skipped,
    /// The encoder ran to exit. A non-zero status does not fail the run.
    Encoded { status: ExitStatus },
    /// The destination could not be prepared or the encoder not started.
    Failed { reason: String },
}

impl JobOutcome {
    pub fn is_nonzero_exit(&self) -> bool {
        matches!(self, Self::Encoded { status } if !status.success())
    }
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Encoded { status } => write!(f, "encoded ({status})"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// The outcome of one job, keyed by its source file.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub source: SourceFile,
    pub outcome: JobOutcome,
}
