use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub defaults: DefaultSettings,
}

/// Startup values read from `[defaults]`; command-line flags win
#[derive(Debug, Default, Deserialize)]
pub struct DefaultSettings {
    pub mode: Option<String>,
    pub rows: Option<usize>,
    pub speed: Option<f32>,
    pub fractal_predicate: Option<String>,
    pub prime_row: Option<usize>,
    pub binomial_row: Option<usize>,
    pub start_col: Option<usize>,
    pub length: Option<usize>,
}

impl Settings {
    /// Load from `path`, or the default location when `None`.
    /// A missing or unreadable file yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(Self::config_path, Path::to_path_buf);
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed config");
                Self::default()
            }),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "config not readable");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pascalart")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_section() {
        let settings = Settings::parse(
            r#"
            [defaults]
            mode = "fibonacci"
            rows = 12
            speed = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(settings.defaults.mode.as_deref(), Some("fibonacci"));
        assert_eq!(settings.defaults.rows, Some(12));
        assert_eq!(settings.defaults.prime_row, None);
    }

    #[test]
    fn empty_file_is_default() {
        let settings = Settings::parse("").unwrap();
        assert!(settings.defaults.rows.is_none());
    }

    #[test]
    fn bad_types_rejected() {
        assert!(Settings::parse("[defaults]\nrows = \"many\"").is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        let settings = Settings::load(Some(Path::new("/nonexistent/pascalart.toml")));
        assert!(settings.defaults.mode.is_none());
    }
}
