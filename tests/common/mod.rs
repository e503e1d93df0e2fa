//! Shared test harness for integration tests.
//!
//! Provides [`FakeEncoder`], a shell script standing in for ffmpeg. It takes
//! the same `-i <src> -qscale:a <q> <dst>` arguments, writes the destination,
//! and appends `start <running> <src>` / `end <src>` lines to a log so tests
//! can check invocation order and concurrency. Like ffmpeg it also talks on
//! stdout and stderr, printing [`ENCODER_STDOUT`] and [`ENCODER_STDERR`].

#![cfg(unix)]
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ENCODER_STDOUT: &str = "fake-encoder: encoding";
pub const ENCODER_STDERR: &str = "fake-encoder: size=0kB";

/// A parsed line of the fake encoder log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start { running: usize, source: PathBuf },
    End { source: PathBuf },
}

pub struct FakeEncoder {
    dir: TempDir,
}

impl FakeEncoder {
    /// An encoder that succeeds after `delay` seconds.
    pub fn new(delay: &str) -> Self {
        Self::with_exit(delay, 0)
    }

    /// An encoder that exits with `code`; the destination is only written on 0.
    pub fn with_exit(delay: &str, code: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("encoder.log");
        let running = dir.path().join("running");
        fs::create_dir(&running).unwrap();

        let script = format!(
            r#"#!/bin/sh
src="$2"
dst="$5"
marker="{running}/$$"
touch "$marker"
count=$(ls "{running}" | wc -l | tr -d ' ')
echo "start $count $src" >> "{log}"
echo "{stdout_line} $src"
echo "{stderr_line}" >&2
sleep {delay}
echo "end $src" >> "{log}"
rm -f "$marker"
if [ {code} -eq 0 ]; then
    printf 'encoded at q%s' "$4" > "$dst"
fi
exit {code}
"#,
            running = running.display(),
            log = log.display(),
            stdout_line = ENCODER_STDOUT,
            stderr_line = ENCODER_STDERR,
        );

        let path = dir.path().join("fake-ffmpeg");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("fake-ffmpeg")
    }

    pub fn events(&self) -> Vec<Event> {
        let log = self.dir.path().join("encoder.log");
        let Ok(content) = fs::read_to_string(log) else {
            return Vec::new();
        };

        content
            .lines()
            .map(|line| {
                if let Some(rest) = line.strip_prefix("start ") {
                    let (count, source) = rest.split_once(' ').unwrap();
                    Event::Start {
                        running: count.parse().unwrap(),
                        source: PathBuf::from(source),
                    }
                } else {
                    let source = line.strip_prefix("end ").unwrap();
                    Event::End {
                        source: PathBuf::from(source),
                    }
                }
            })
            .collect()
    }

    /// Sources passed to the encoder, in start order.
    pub fn invocations(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Start { source, .. } => Some(source),
                Event::End { .. } => None,
            })
            .collect()
    }
}

/// Input and output roots, canonicalised.
pub struct Tree {
    _input: TempDir,
    _output: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Tree {
    pub fn new(files: &[&str]) -> Self {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let input = input_dir.path().canonicalize().unwrap();
        let output = output_dir.path().canonicalize().unwrap();

        for file in files {
            touch(&input.join(file));
        }

        Self {
            _input: input_dir,
            _output: output_dir,
            input,
            output,
        }
    }

    /// Relative paths of every file under the output root, sorted.
    pub fn output_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = walkdir::WalkDir::new(&self.output)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(&self.output).unwrap().to_path_buf())
            .collect();
        files.sort();
        files
    }
}

pub fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}
