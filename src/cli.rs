use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use trackforged::config::Config;
use trackforged_common::{Extension, Quality};

#[derive(Parser)]
#[command(name = "trackforged")]
#[command(author, version, about = "Convert all flac files to mp3 format")]
pub struct Cli {
    /// Path to search for flac files
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output path
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// No. of parallel processes to run (0 runs one file at a time) [default: 0]
    #[arg(short = 'j', long, allow_negative_numbers = true)]
    pub parallel: Option<i64>,

    /// Quality of mp3, (0-9), default is 3 that corresponds to ~196 kbps.
    /// Larger value refers to lower quality
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub quality: Option<u8>,

    /// Output full encoder log and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extension of the files to convert [default: flac]
    #[arg(long, value_name = "EXT")]
    pub source_ext: Option<Extension>,

    /// Extension of the converted files [default: mp3]
    #[arg(long, value_name = "EXT")]
    pub target_ext: Option<Extension>,

    /// Encoder executable, by name or path [default: ffmpeg]
    #[arg(long)]
    pub encoder: Option<String>,
}

impl Cli {
    /// Override config values with the flags given on the command line.
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        if let Some(parallel) = self.parallel {
            config.dispatch.parallel = parallel;
        }

        if let Some(quality) = self.quality {
            config.encode.quality = Quality::new(quality)?;
        }

        if let Some(ref ext) = self.source_ext {
            config.encode.source_extension = ext.clone();
        }

        if let Some(ref ext) = self.target_ext {
            config.encode.target_extension = ext.clone();
        }

        if let Some(ref encoder) = self.encoder {
            config.tools.encoder = encoder.clone();
            config.tools.encoder_path = None;
        }

        Ok(())
    }
}
