use crate::engine::RunSummary;
use crate::scanner::Candidate;
use colored::*;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Operator-facing output of a cleanup run.
///
/// The console implementation prints colored text, tests record calls.
/// All methods have default no-op implementations.
pub trait Reporter {
    fn on_root(&mut self, _root: &Path) {}
    fn on_no_channels(&mut self, _root: &Path) {}
    fn on_no_artifacts(&mut self) {}
    fn on_artifacts_found(&mut self, _count: usize) {}
    fn on_candidate(&mut self, _channel: &str, _candidate: &Candidate, _size_bytes: Option<u64>) {}
    fn on_deleted(&mut self, _candidate: &Candidate) {}
    fn on_delete_failed(&mut self, _candidate: &Candidate, _err: &io::Error) {}
    fn on_skipped(&mut self, _candidate: &Candidate) {}
    fn on_complete(&mut self, _summary: &RunSummary) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Bytes as binary megabytes with two decimals.
pub fn format_size_mb(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / (1024.0 * 1024.0))
}

/// Line-oriented console output.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Console write failures never abort a cleanup.
    fn line(&mut self, text: impl std::fmt::Display) {
        if let Err(err) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            debug!(error = %err, "Console write failed");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_root(&mut self, root: &Path) {
        self.line(format!("{} {}\n", "Working directory:".cyan(), root.display()));
    }

    fn on_no_channels(&mut self, root: &Path) {
        self.line(format!(
            "{} {}",
            "No channel subdirectories found in".yellow(),
            root.display()
        ));
    }

    fn on_no_artifacts(&mut self) {
        self.line("No versioned artifacts found".yellow());
    }

    fn on_artifacts_found(&mut self, count: usize) {
        self.line(format!("Found {} latest artifact(s):\n", count));
    }

    fn on_candidate(&mut self, channel: &str, candidate: &Candidate, size_bytes: Option<u64>) {
        let size = size_bytes
            .map(format_size_mb)
            .unwrap_or_else(|| "unknown".to_string());

        self.line(format!("{} {}", "Channel:".cyan(), channel));
        self.line(format!("{} {}", "File:   ".cyan(), candidate.name));
        self.line(format!("{} {}", "Version:".cyan(), candidate.version));
        self.line(format!("{} {}", "Size:   ".cyan(), size));
        self.line(format!("{} {}", "Path:   ".cyan(), candidate.path.display()));
        self.line(format!("\n{}", "Delete? [Enter = delete, Esc = skip]".bold()));
    }

    fn on_deleted(&mut self, candidate: &Candidate) {
        self.line(format!("{} {}\n", "✓ Deleted:".green(), candidate.name));
    }

    fn on_delete_failed(&mut self, candidate: &Candidate, err: &io::Error) {
        self.line(format!(
            "{} {}: {}\n",
            "✗ Delete failed:".red(),
            candidate.name,
            err
        ));
    }

    fn on_skipped(&mut self, candidate: &Candidate) {
        self.line(format!("{} {}\n", "⊘ Skipped:".yellow(), candidate.name));
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        self.line(format!(
            "{} {} deleted, {} skipped, {} failed",
            "Done:".green().bold(),
            summary.deleted,
            summary.skipped,
            summary.failed
        ));
    }
}
