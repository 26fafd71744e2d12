use crate::platform::Filesystem;
use crate::version::{Version, DEFAULT_EXTENSION};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A versioned artifact found in a channel directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub path: PathBuf,
    pub version: Version,
}

/// Picks the highest-versioned artifact in a single directory.
pub struct ChannelScanner<'a, F: Filesystem> {
    fs: &'a F,
    extension: &'a str,
}

impl<'a, F: Filesystem> ChannelScanner<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self::with_extension(fs, DEFAULT_EXTENSION)
    }

    pub fn with_extension(fs: &'a F, extension: &'a str) -> Self {
        Self { fs, extension }
    }

    /// Returns the latest artifact directly inside `dir`, or `None` when the
    /// directory is missing, unreadable or holds no versioned artifacts.
    /// On equal versions the first entry listed wins.
    pub fn scan(&self, dir: &Path) -> Option<Candidate> {
        let entries = match self.fs.list_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "Channel not scannable");
                return None;
            }
        };

        let mut latest: Option<Candidate> = None;

        for entry in entries {
            if !entry.is_file() || !self.has_artifact_extension(&entry.path) {
                continue;
            }

            let Some(version) = Version::parse_with_extension(&entry.name, self.extension) else {
                trace!(file = %entry.name, "No version in filename");
                continue;
            };

            if latest.as_ref().map_or(true, |best| version > best.version) {
                latest = Some(Candidate {
                    name: entry.name,
                    path: entry.path,
                    version,
                });
            }
        }

        if let Some(candidate) = &latest {
            debug!(
                dir = %dir.display(),
                file = %candidate.name,
                version = %candidate.version,
                "Latest artifact"
            );
        }

        latest
    }

    fn has_artifact_extension(&self, path: &Path) -> bool {
        path.extension()
            .map_or(false, |ext| ext.to_str() == Some(self.extension))
    }
}
