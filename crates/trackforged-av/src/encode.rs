//! Encoder invocation.
//!
//! Every encode uses the same argument template:
//!
//! ```text
//! <encoder> -i <source> -qscale:a <quality> <destination>
//! ```

use crate::{Error, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use trackforged_common::{DestinationFile, Quality, SourceFile};

/// Where the encoder's stdout and stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Throw encoder output away.
    #[default]
    Discard,
    /// Let the encoder write to this process's terminal.
    Inherit,
}

impl OutputMode {
    /// Pick the mode for a verbosity flag.
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Self::Inherit
        } else {
            Self::Discard
        }
    }

    fn stdio(self) -> Stdio {
        match self {
            Self::Discard => Stdio::null(),
            Self::Inherit => Stdio::inherit(),
        }
    }
}

/// One encoder invocation turning a source file into a destination file.
///
/// # Example
///
/// ```no_run
/// use trackforged_av::{EncodeCommand, OutputMode};
/// use trackforged_common::{DestinationFile, Quality, SourceFile};
///
/// let cmd = EncodeCommand::new(
///     "ffmpeg",
///     &SourceFile::new("/music/flac/track.flac"),
///     &DestinationFile::new("/music/mp3/track.mp3"),
///     Quality::default(),
/// );
/// println!("{cmd}");
/// let status = cmd.run(OutputMode::Discard)?;
/// # Ok::<(), trackforged_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EncodeCommand {
    program: PathBuf,
    source: PathBuf,
    destination: PathBuf,
    quality: Quality,
}

impl EncodeCommand {
    pub fn new(
        program: impl Into<PathBuf>,
        source: &SourceFile,
        destination: &DestinationFile,
        quality: Quality,
    ) -> Self {
        Self {
            program: program.into(),
            source: source.path().to_path_buf(),
            destination: destination.path().to_path_buf(),
            quality,
        }
    }

    /// Arguments passed to the encoder, in order.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "-i".into(),
            self.source.clone().into_os_string(),
            "-qscale:a".into(),
            self.quality.to_string().into(),
            self.destination.clone().into_os_string(),
        ]
    }

    /// Build the process command. Stdin is always closed so parallel
    /// encoders never compete for the terminal.
    pub fn to_command(&self, output: OutputMode) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args())
            .stdin(Stdio::null())
            .stdout(output.stdio())
            .stderr(output.stdio());
        cmd
    }

    /// Start the encoder without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if the program does not exist and
    /// [`Error::Spawn`] for any other launch failure.
    pub fn spawn(&self, output: OutputMode) -> Result<Child> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Spawning encoder: {}", self);

        self.to_command(output)
            .spawn()
            .map_err(|e| Error::spawn(self.program_name(), e))
    }

    /// Run the encoder to completion.
    ///
    /// A non-zero exit is returned as `Ok(status)`; only launch and wait
    /// failures are errors.
    pub fn run(&self, output: OutputMode) -> Result<ExitStatus> {
        let mut child = self.spawn(output)?;
        Ok(child.wait()?)
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }
}

impl fmt::Display for EncodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in self.args() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
