use super::{JobOutcome, JobReport};
use std::fmt;
use trackforged_common::SourceFile;

/// Tally of one conversion run.
#[derive(Debug, Default)]
pub struct RunSummary {
    discovered: usize,
    reports: Vec<JobReport>,
}

impl RunSummary {
    pub fn new(discovered: usize) -> Self {
        Self {
            discovered,
            reports: Vec::with_capacity(discovered),
        }
    }

    pub fn record(&mut self, source: SourceFile, outcome: JobOutcome) {
        self.reports.push(JobReport { source, outcome });
    }

    pub fn reports(&self) -> &[JobReport] {
        &self.reports
    }

    pub fn discovered(&self) -> usize {
        self.discovered
    }

    /// Jobs whose encoder exited successfully.
    pub fn encoded(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Encoded { status } if status.success()))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Failed { .. }))
    }

    pub fn nonzero_exits(&self) -> usize {
        self.count(JobOutcome::is_nonzero_exit)
    }

    /// Number of encoder processes that were started.
    pub fn launched(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Encoded { .. }))
    }

    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// Log every job that did not finish cleanly, then the totals.
    pub fn log(&self) {
        for report in &self.reports {
            match &report.outcome {
                JobOutcome::Encoded { status } if !status.success() => {
                    tracing::warn!("Encoder {} for {}", status, report.source);
                }
                JobOutcome::Failed { reason } => {
                    tracing::warn!("Job for {} failed: {}", report.source, reason);
                }
                _ => {}
            }
        }

        tracing::info!("Run complete: {}", self);
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} discovered, {} encoded, {} skipped, {} failed, {} non-zero exits",
            self.discovered,
            self.encoded(),
            self.skipped(),
            self.failed(),
            self.nonzero_exits()
        )
    }
}
