use std::path::Path;

use crate::error::Error;
use crate::goto::DEFAULT_SCROLL_MS;
use crate::render::Format;

/// Project configuration loaded from `.defnav.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Output format used when no `--format` flag is given.
    pub format: Format,
    /// Upper bound on goto scroll animations.
    pub scroll_duration_ms: u64,
}

/// Raw TOML structure for `.defnav.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct DefnavTomlConfig {
    /// Default output format name.
    #[serde(default)]
    format: Option<String>,
    /// Scroll animation bound in milliseconds.
    #[serde(default)]
    scroll_duration_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            format: Format::Text,
            scroll_duration_ms: DEFAULT_SCROLL_MS,
        };
    }
}

impl Config {
    /// Load config from `.defnav.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; it never silently
    /// falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::ConfigInvalid` if the TOML is malformed,
    /// or `Error::UnknownFormat` if `format` names no known format.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".defnav.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigInvalid` if the TOML is malformed,
    /// or `Error::UnknownFormat` if `format` names no known format.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: DefnavTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        let format = match raw.format {
            Some(name) => name.parse()?,
            None => defaults.format,
        };
        return Ok(Self {
            format,
            scroll_duration_ms: raw.scroll_duration_ms.unwrap_or(defaults.scroll_duration_ms),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scroll_duration_ms, 200);
    }

    #[test]
    fn reads_both_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".defnav.toml"), "format = \"json\"\nscroll_duration_ms = 80\n").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.scroll_duration_ms, 80);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(matches!(Config::parse("format = "), Err(Error::ConfigInvalid(_))));
        assert!(matches!(Config::parse("colour = true"), Err(Error::ConfigInvalid(_))));
        assert!(matches!(Config::parse("format = \"xml\""), Err(Error::UnknownFormat { .. })));
    }
}
