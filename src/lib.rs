pub mod config;
pub mod engine;
pub mod error;
pub mod platform;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod version;

pub use config::AppConfig;
pub use engine::{CleanupEngine, RunOutcome, RunSummary};
pub use error::Error;
pub use prompt::{ConfirmationPrompt, Decision, Key, KeySource};
pub use report::{ConsoleReporter, Reporter, SilentReporter};
pub use scanner::{Candidate, ChannelScanner};
pub use version::Version;
