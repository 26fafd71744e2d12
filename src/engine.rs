use crate::config::AppConfig;
use crate::error::Error;
use crate::platform::Filesystem;
use crate::prompt::{ConfirmationPrompt, Decision, KeySource};
use crate::report::Reporter;
use crate::scanner::{Candidate, ChannelScanner};
use crate::version::DEFAULT_EXTENSION;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A subdirectory of the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    NoChannels,
    NoArtifacts,
    Completed(RunSummary),
}

pub struct CleanupEngine<F: Filesystem> {
    fs: F,
    root: PathBuf,
    extension: String,
}

impl<F: Filesystem> CleanupEngine<F> {
    pub fn new(fs: F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn from_config(fs: F, config: &AppConfig) -> Self {
        Self::new(fs, config.source.clone()).with_extension(&config.extension)
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Immediate subdirectories of the root, in listing order.
    pub fn find_channels(&self) -> Result<Vec<Channel>, Error> {
        let entries = self.fs.list_dir(&self.root).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                Error::RootNotFound(self.root.clone())
            } else {
                Error::Io(io::Error::new(
                    err.kind(),
                    format!("Error reading directory {}: {}", self.root.display(), err),
                ))
            }
        })?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.is_dir())
            .map(|entry| Channel {
                name: entry.name,
                path: entry.path,
            })
            .collect())
    }

    /// Latest artifact of each channel; channels without one are dropped.
    pub fn find_latest(&self, channels: Vec<Channel>) -> Vec<(Channel, Candidate)> {
        let scanner = ChannelScanner::with_extension(&self.fs, &self.extension);

        channels
            .into_iter()
            .filter_map(|channel| {
                let candidate = scanner.scan(&channel.path);
                if candidate.is_none() {
                    debug!(channel = %channel.name, "No versioned artifacts");
                }
                candidate.map(|candidate| (channel, candidate))
            })
            .collect()
    }

    /// Finds the latest artifact per channel and asks about each one in turn.
    ///
    /// A failed deletion is reported and the run moves on to the next
    /// channel. Only a missing root or a broken key source ends it early.
    pub fn run<K, R>(&self, keys: &mut K, reporter: &mut R) -> Result<RunOutcome, Error>
    where
        K: KeySource,
        R: Reporter,
    {
        let channels = self.find_channels()?;
        reporter.on_root(&self.root);
        info!(root = %self.root.display(), channels = channels.len(), "Scanning channels");

        if channels.is_empty() {
            reporter.on_no_channels(&self.root);
            return Ok(RunOutcome::NoChannels);
        }

        let latest = self.find_latest(channels);
        if latest.is_empty() {
            reporter.on_no_artifacts();
            return Ok(RunOutcome::NoArtifacts);
        }

        reporter.on_artifacts_found(latest.len());

        let mut summary = RunSummary::default();
        for (channel, candidate) in &latest {
            let size_bytes = match self.fs.file_size(&candidate.path) {
                Ok(size) => Some(size),
                Err(err) => {
                    warn!(path = %candidate.path.display(), error = %err, "Could not read file size");
                    None
                }
            };
            reporter.on_candidate(&channel.name, candidate, size_bytes);

            let decision = ConfirmationPrompt::new().wait(keys)?;
            match decision {
                Decision::Delete => match self.fs.delete_file(&candidate.path) {
                    Ok(()) => {
                        info!(channel = %channel.name, path = %candidate.path.display(), "Deleted");
                        summary.deleted += 1;
                        reporter.on_deleted(candidate);
                    }
                    Err(err) => {
                        warn!(channel = %channel.name, path = %candidate.path.display(), error = %err, "Delete failed");
                        summary.failed += 1;
                        reporter.on_delete_failed(candidate, &err);
                    }
                },
                Decision::Skip => {
                    info!(channel = %channel.name, path = %candidate.path.display(), "Skipped");
                    summary.skipped += 1;
                    reporter.on_skipped(candidate);
                }
            }
        }

        info!(
            deleted = summary.deleted,
            skipped = summary.skipped,
            failed = summary.failed,
            "Cleanup complete"
        );
        reporter.on_complete(&summary);

        Ok(RunOutcome::Completed(summary))
    }
}
