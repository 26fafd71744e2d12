use std::fmt;

/// Extension used by the artifact family when none is configured.
pub const DEFAULT_EXTENSION: &str = "exe";

/// Version encoded in an artifact filename: `(year, major, minor, build)`.
///
/// Field order matters: the derived `Ord` compares year first and build last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub year: u64,
    pub major: u64,
    pub minor: u64,
    pub build: u64,
}

impl Version {
    pub fn new(year: u64, major: u64, minor: u64, build: u64) -> Self {
        Self {
            year,
            major,
            minor,
            build,
        }
    }

    /// Parses `..._2025.1.3.exe` or `..._2025.1.3.1230.exe`.
    pub fn parse(filename: &str) -> Option<Version> {
        Self::parse_with_extension(filename, DEFAULT_EXTENSION)
    }

    /// Same as [`Version::parse`] for a configured extension (without the dot).
    ///
    /// The four-segment shape is tried first: the three-segment shape is a
    /// suffix of it and would otherwise swallow the build number.
    pub fn parse_with_extension(filename: &str, extension: &str) -> Option<Version> {
        let stem = strip_extension(filename, extension)?;
        parse_four_segments(stem).or_else(|| parse_three_segments(stem))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.build == 0 {
            write!(f, "{}.{}.{}", self.year, self.major, self.minor)
        } else {
            write!(
                f,
                "{}.{}.{}.{}",
                self.year, self.major, self.minor, self.build
            )
        }
    }
}

fn strip_extension<'a>(filename: &'a str, extension: &str) -> Option<&'a str> {
    let stem = filename.strip_suffix(extension)?;
    stem.strip_suffix('.')
}

fn parse_four_segments(stem: &str) -> Option<Version> {
    let mut parts = stem.rsplitn(4, '.');
    let build = parts.next().and_then(number)?;
    let minor = parts.next().and_then(number)?;
    let major = parts.next().and_then(number)?;
    let year = parts.next().and_then(year_after_underscore)?;
    Some(Version::new(year, major, minor, build))
}

fn parse_three_segments(stem: &str) -> Option<Version> {
    let mut parts = stem.rsplitn(3, '.');
    let minor = parts.next().and_then(number)?;
    let major = parts.next().and_then(number)?;
    let year = parts.next().and_then(year_after_underscore)?;
    Some(Version::new(year, major, minor, 0))
}

/// `head` must end in `_` followed by exactly four digits.
fn year_after_underscore(head: &str) -> Option<u64> {
    let (_, year) = head.rsplit_once('_')?;
    if year.len() != 4 {
        return None;
    }
    number(year)
}

/// Digit runs too long for `u64` saturate instead of failing, so a file with
/// an oversized build number still counts as an artifact.
fn number(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(segment.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_segments_defaults_build() {
        assert_eq!(
            Version::parse("game_2025.1.3.exe"),
            Some(Version::new(2025, 1, 3, 0))
        );
    }

    #[test]
    fn test_parse_four_segments() {
        assert_eq!(
            Version::parse("game_2025.1.3.1230.exe"),
            Some(Version::new(2025, 1, 3, 1230))
        );
    }

    #[test]
    fn test_parse_keeps_build_when_prefix_has_dots_and_underscores() {
        assert_eq!(
            Version::parse("my.app_beta_2024.12.0.7.exe"),
            Some(Version::new(2024, 12, 0, 7))
        );
        assert_eq!(
            Version::parse("_2025.2.10.exe"),
            Some(Version::new(2025, 2, 10, 0))
        );
    }

    #[test]
    fn test_parse_rejects_missing_or_wrong_suffix() {
        assert_eq!(Version::parse("game_2025.1.3"), None);
        assert_eq!(Version::parse("game_2025.1.3.zip"), None);
        assert_eq!(Version::parse("game_2025.1.3.EXE"), None);
        assert_eq!(Version::parse("game_2025.1.3exe"), None);
        assert_eq!(Version::parse("readme.txt"), None);
    }

    #[test]
    fn test_parse_rejects_non_numeric_segments() {
        assert_eq!(Version::parse("game_2025.1.x.exe"), None);
        assert_eq!(Version::parse("game_2025.1.3.beta.exe"), None);
        assert_eq!(Version::parse("game_2025..3.exe"), None);
        assert_eq!(Version::parse("game_2025.1.+3.exe"), None);
    }

    #[test]
    fn test_parse_requires_underscore_and_four_digit_year() {
        assert_eq!(Version::parse("game-2025.1.3.exe"), None);
        assert_eq!(Version::parse("game_25.1.3.exe"), None);
        assert_eq!(Version::parse("game_20250.1.3.exe"), None);
        assert_eq!(Version::parse("game_v1.2025.1.3.exe"), None);
    }

    #[test]
    fn test_parse_timestamp_build_number() {
        assert_eq!(
            Version::parse("app_2025.1.3.202510171230.exe"),
            Some(Version::new(2025, 1, 3, 202_510_171_230))
        );
        assert_eq!(
            Version::parse("app_2025.1.3.5000000000.exe"),
            Some(Version::new(2025, 1, 3, 5_000_000_000))
        );
        assert!(Version::parse("app_2025.1.3.202510171230.exe") > Version::parse("app_2025.1.3.exe"));
    }

    #[test]
    fn test_parse_saturates_oversized_segment() {
        assert_eq!(
            Version::parse("app_2025.1.3.99999999999999999999999.exe"),
            Some(Version::new(2025, 1, 3, u64::MAX))
        );
    }

    #[test]
    fn test_parse_with_custom_extension() {
        assert_eq!(
            Version::parse_with_extension("tool_2023.4.5.6.msi", "msi"),
            Some(Version::new(2023, 4, 5, 6))
        );
        assert_eq!(Version::parse_with_extension("tool_2023.4.5.exe", "msi"), None);
    }

    #[test]
    fn test_ordering_build_breaks_tie() {
        assert!(Version::new(2025, 1, 3, 1230) > Version::new(2025, 1, 3, 0));
    }

    #[test]
    fn test_ordering_year_dominates() {
        assert!(Version::new(2025, 0, 0, 0) > Version::new(2024, 9, 9, 9999));
        assert!(Version::new(2025, 1, 10, 0) > Version::new(2025, 1, 9, 500));
    }

    #[test]
    fn test_display_hides_zero_build() {
        assert_eq!(Version::new(2025, 1, 3, 0).to_string(), "2025.1.3");
        assert_eq!(Version::new(2025, 1, 3, 1230).to_string(), "2025.1.3.1230");
    }
}
