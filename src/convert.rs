//! End-to-end conversion of one input tree.

use anyhow::Result;
use trackforged_av::OutputMode;
use trackforged_common::paths::PathMapper;

use crate::config::Config;
use crate::dispatch::{DispatchSettings, Dispatcher, Parallelism, RunSummary};
use crate::preflight::Preflight;
use crate::scanner;

/// Discover every source file under the input and encode it into the output.
pub fn convert_tree(paths: &Preflight, config: &Config, verbose: bool) -> Result<RunSummary> {
    let files = scanner::discover(&paths.input, &config.encode.source_extension);

    let mapper = PathMapper::new(
        &paths.input,
        &paths.output,
        config.encode.target_extension.clone(),
    );
    let settings = DispatchSettings {
        parallelism: Parallelism::from_jobs(config.dispatch.parallel),
        quality: config.encode.quality,
        output: OutputMode::from_verbose(verbose),
        encoder: paths.encoder.clone(),
    };

    Dispatcher::new(mapper, settings).run(&files)
}
