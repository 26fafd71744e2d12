pub mod keyboard;

pub use keyboard::TerminalKeys;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// One direct child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// The filesystem operations the cleanup run needs.
///
/// The engine only talks to this trait so tests can inject failures.
pub trait Filesystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
    fn file_size(&self, path: &Path) -> io::Result<u64>;
    fn delete_file(&self, path: &Path) -> io::Result<()>;
}

/// [`Filesystem`] backed by `std::fs`.
///
/// Listings are sorted by name so channel order and tie-breaking do not
/// depend on the platform's directory order.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        for entry_result in fs::read_dir(path)? {
            let entry = entry_result?;
            let path = entry.path();
            // Follows symlinks, like `Path::is_file` / `Path::is_dir`.
            let kind = match fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => EntryKind::File,
                Ok(metadata) if metadata.is_dir() => EntryKind::Dir,
                Ok(_) => EntryKind::Other,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "Unreadable entry");
                    EntryKind::Other
                }
            };

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
