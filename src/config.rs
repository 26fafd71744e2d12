use crate::error::Error;
use crate::version::DEFAULT_EXTENSION;
use config::{Config, File as ConfigFile, FileStoredFormat, Format, Map, Value, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "removelatest.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root working directory; each subdirectory is a channel.
    pub source: PathBuf,
    /// Artifact extension without the leading dot.
    pub extension: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    source: Option<String>,
    extension: Option<String>,
}

/// Plain `key=value` lines, as in `source=D:\builds\channels`.
///
/// Values are taken verbatim (no escapes) so Windows paths survive. Blank
/// lines, `#`/`;` comments and lines without `=` are skipped; the first
/// occurrence of a key wins.
#[derive(Debug, Clone, Copy)]
pub struct KeyValueFormat;

impl Format for KeyValueFormat {
    fn parse(
        &self,
        uri: Option<&String>,
        text: &str,
    ) -> Result<Map<String, Value>, Box<dyn std::error::Error + Send + Sync>> {
        let mut result = Map::new();

        for line in text.trim_start_matches('\u{feff}').lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            result
                .entry(key.trim().to_lowercase())
                .or_insert_with(|| Value::new(uri, ValueKind::String(value.trim().to_string())));
        }

        Ok(result)
    }
}

impl FileStoredFormat for KeyValueFormat {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["txt", "cfg"]
    }
}

/// Reads the config file at `path` (relative paths resolve against the
/// current directory).
pub fn load_configuration(path: &Path) -> Result<AppConfig, Error> {
    let settings = Config::builder()
        .add_source(ConfigFile::new(&path.to_string_lossy(), KeyValueFormat).required(true))
        .build()?;
    resolve(settings, path)
}

/// Same as [`load_configuration`] for config text already in memory.
pub fn parse_configuration(text: &str, origin: &Path) -> Result<AppConfig, Error> {
    let settings = Config::builder()
        .add_source(ConfigFile::from_str(text, KeyValueFormat))
        .build()?;
    resolve(settings, origin)
}

fn resolve(settings: Config, origin: &Path) -> Result<AppConfig, Error> {
    let raw = settings.try_deserialize::<RawConfig>()?;

    let source = raw
        .source
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::MissingSource(origin.to_path_buf()))?;

    let extension = raw
        .extension
        .map(|ext| ext.trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    Ok(AppConfig {
        source: PathBuf::from(source),
        extension,
    })
}
