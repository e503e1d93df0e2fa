//! Batch scheduling of encoder processes.
//!
//! Files are either encoded one after another, or split into consecutive
//! chunks of at most `n` files. Within a chunk one encoder process is started
//! per file; the next chunk starts only once every process of the current one
//! has exited. A chunk therefore takes as long as its slowest member, and no
//! more than `n` encoders ever run at once.

mod job;
mod summary;

pub use job::{EncodeJob, JobOutcome, JobReport};
pub use summary::RunSummary;

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::Child;
use tracing::{debug, info, warn};
use trackforged_av::{EncodeCommand, OutputMode};
use trackforged_common::paths::PathMapper;
use trackforged_common::{Quality, SourceFile};

/// How many encoder processes run side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// One file at a time, in order.
    #[default]
    Sequential,
    /// Chunks of at most this many concurrent encoders.
    Chunked(NonZeroUsize),
}

impl Parallelism {
    /// Interpret a job count; zero or negative means sequential.
    pub fn from_jobs(jobs: i64) -> Self {
        if jobs <= 0 {
            return Self::Sequential;
        }
        let size = usize::try_from(jobs).unwrap_or(usize::MAX);
        NonZeroUsize::new(size).map_or(Self::Sequential, Self::Chunked)
    }
}

/// Settings shared by every job of a run.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub parallelism: Parallelism,
    pub quality: Quality,
    pub output: OutputMode,
    /// Encoder executable.
    pub encoder: PathBuf,
}

/// A job that was either settled immediately or is still running.
enum Launch {
    Settled(JobOutcome),
    Running(Child),
}

/// Runs encode jobs for a list of source files.
pub struct Dispatcher {
    mapper: PathMapper,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(mapper: PathMapper, settings: DispatchSettings) -> Self {
        Self { mapper, settings }
    }

    /// Encode `files` in order according to the configured parallelism.
    ///
    /// Encoder exit statuses are recorded but never abort the run.
    ///
    /// # Errors
    ///
    /// In sequential mode, failing to create a destination directory aborts
    /// the run. In chunked mode the failure only affects that one job.
    pub fn run(&self, files: &[SourceFile]) -> Result<RunSummary> {
        match self.settings.parallelism {
            Parallelism::Sequential => self.run_sequential(files),
            Parallelism::Chunked(size) => Ok(self.run_chunked(files, size)),
        }
    }

    fn run_sequential(&self, files: &[SourceFile]) -> Result<RunSummary> {
        info!("Encoding {} files sequentially", files.len());
        let mut summary = RunSummary::new(files.len());

        for source in files {
            let destination = self
                .mapper
                .prepare(source)
                .with_context(|| format!("Failed to prepare destination for {source}"))?;
            let job = EncodeJob::new(source.clone(), destination, self.settings.quality);

            let outcome = match self.command_for(&job) {
                None => JobOutcome::Skipped,
                Some(cmd) => match cmd.run(self.settings.output) {
                    Ok(status) => JobOutcome::Encoded { status },
                    Err(e) => {
                        warn!("Encoder for {} did not complete: {}", job.source, e);
                        JobOutcome::Failed {
                            reason: e.to_string(),
                        }
                    }
                },
            };
            summary.record(job.source, outcome);
        }

        Ok(summary)
    }

    fn run_chunked(&self, files: &[SourceFile], size: NonZeroUsize) -> RunSummary {
        info!(
            "Encoding {} files in chunks of {}",
            files.len(),
            size.get()
        );
        let mut summary = RunSummary::new(files.len());

        for (index, chunk) in files.chunks(size.get()).enumerate() {
            let mut launched = Vec::with_capacity(chunk.len());

            for source in chunk {
                let launch = match self.mapper.prepare(source) {
                    Ok(destination) => {
                        let job =
                            EncodeJob::new(source.clone(), destination, self.settings.quality);
                        self.launch(&job)
                    }
                    Err(e) => {
                        warn!("Failed to prepare destination for {}: {}", source, e);
                        Launch::Settled(JobOutcome::Failed {
                            reason: e.to_string(),
                        })
                    }
                };
                launched.push((source, launch));
            }

            let running = launched
                .iter()
                .filter(|(_, l)| matches!(l, Launch::Running(_)))
                .count();
            debug!("Chunk {}: waiting on {} encoders", index + 1, running);

            for (source, launch) in launched {
                let outcome = match launch {
                    Launch::Settled(outcome) => outcome,
                    Launch::Running(child) => wait(child),
                };
                summary.record(source.clone(), outcome);
            }
        }

        summary
    }

    /// The announced encoder command for `job`, or `None` if its destination
    /// already exists.
    fn command_for(&self, job: &EncodeJob) -> Option<EncodeCommand> {
        if job.is_done() {
            debug!("Skipping {}, {} exists", job.source, job.destination);
            return None;
        }

        let cmd = job.command(&self.settings.encoder);
        announce(&mut std::io::stdout().lock(), &cmd);
        Some(cmd)
    }

    /// Skip a finished job or start its encoder.
    fn launch(&self, job: &EncodeJob) -> Launch {
        let Some(cmd) = self.command_for(job) else {
            return Launch::Settled(JobOutcome::Skipped);
        };

        match cmd.spawn(self.settings.output) {
            Ok(child) => Launch::Running(child),
            Err(e) => {
                warn!("Failed to start encoder for {}: {}", job.source, e);
                Launch::Settled(JobOutcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// Print the command about to run. Flushed before the encoder starts so its
/// output cannot land in the middle of the line.
fn announce(out: &mut impl Write, cmd: &EncodeCommand) {
    let written =
        writeln!(out, "{} {}", "Running Command:".green(), cmd).and_then(|()| out.flush());
    if let Err(e) = written {
        debug!("Failed to print command line: {}", e);
    }
}

fn wait(mut child: Child) -> JobOutcome {
    match child.wait() {
        Ok(status) => JobOutcome::Encoded { status },
        Err(e) => JobOutcome::Failed {
            reason: format!("failed waiting for encoder: {e}"),
        },
    }
}
