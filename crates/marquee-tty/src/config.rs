#![forbid(unsafe_code)]

//! Demo configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults.
//! 2. A JSON file named by `MARQUEE_CONFIG` (missing fields keep defaults).
//! 3. Individual variables:
//!
//! | Variable          | Field                    | Format                 |
//! |-------------------|--------------------------|------------------------|
//! | `MARQUEE_SPACING` | `marquee.text_spacing`   | float, cells           |
//! | `MARQUEE_SPEED`   | `marquee.scroll_speed`   | float, cells/second    |
//! | `MARQUEE_FPS`     | `fps`                    | integer                |
//! | `MARQUEE_WIDTH`   | `width`                  | integer, cells         |
//! | `MARQUEE_TEXT`    | `texts`                  | items separated by `\|` |

use std::path::{Path, PathBuf};

use marquee_core::MarqueeConfig;
use marquee_core::style::Color;
use serde::{Deserialize, Serialize};

pub const ENV_CONFIG: &str = "MARQUEE_CONFIG";
pub const ENV_SPACING: &str = "MARQUEE_SPACING";
pub const ENV_SPEED: &str = "MARQUEE_SPEED";
pub const ENV_FPS: &str = "MARQUEE_FPS";
pub const ENV_WIDTH: &str = "MARQUEE_WIDTH";
pub const ENV_TEXT: &str = "MARQUEE_TEXT";

/// Separator between items in `MARQUEE_TEXT`.
pub const TEXT_SEPARATOR: char = '|';

const DEFAULT_TEXTS: &[&str] = &[
    "Markets open higher on tech earnings",
    "Rain expected across the north by evening",
    "新浪手机讯",
    "Local team clinches playoff spot",
];

const ALTERNATE_TEXTS: &[&str] = &[
    "Service notice: line 4 running with delays",
    "Next departure in 3 minutes",
];

/// Everything the demo binary needs to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Marquee properties. Units are terminal cells.
    pub marquee: MarqueeConfig,
    /// Frame rate of the ticker.
    pub fps: u32,
    /// Strip width in cells. `None` follows the terminal width.
    pub width: Option<u16>,
    /// Texts shown at start.
    pub texts: Vec<String>,
    /// Texts swapped in by the list-swap key.
    pub alternate_texts: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            marquee: MarqueeConfig::default()
                .with_text_spacing(8.0)
                .with_scroll_speed(12.0)
                .with_text_color(Color::WHITE),
            fps: 30,
            width: None,
            texts: DEFAULT_TEXTS.iter().map(|s| s.to_string()).collect(),
            alternate_texts: ALTERNATE_TEXTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DemoConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(v) = lookup(ENV_SPACING) {
            config.marquee.text_spacing = parse_var(ENV_SPACING, &v)?;
        }
        if let Some(v) = lookup(ENV_SPEED) {
            config.marquee.scroll_speed = parse_var(ENV_SPEED, &v)?;
        }
        if let Some(v) = lookup(ENV_FPS) {
            config.fps = parse_var(ENV_FPS, &v)?;
        }
        if let Some(v) = lookup(ENV_WIDTH) {
            config.width = Some(parse_var(ENV_WIDTH, &v)?);
        }
        if let Some(v) = lookup(ENV_TEXT) {
            config.texts = v
                .split(TEXT_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect();
        }

        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        tracing::debug!(
            fps = config.fps,
            width = ?config.width,
            texts = config.texts.len(),
            "demo config loaded"
        );
        Ok(config)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.marquee.validate();
        if self.fps == 0 {
            errors.push("fps must be > 0".into());
        }
        if self.width == Some(0) {
            errors.push("width must be > 0 when set".into());
        }
        errors
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Parse {
        key,
        value: value.to_string(),
    })
}

/// Errors from loading the demo configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading the config file.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// JSON parse error.
    Json(serde_json::Error),
    /// An environment variable did not parse.
    Parse { key: &'static str, value: String },
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error reading {}: {source}", path.display()),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Parse { key, value } => write!(f, "cannot parse {key}={value:?}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::Parse { .. } | Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = DemoConfig::default();
        assert!(config.validate().is_empty());
        assert!(!config.texts.is_empty());
        assert!(!config.alternate_texts.is_empty());
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(DemoConfig::from_lookup(lookup(&[])).unwrap(), DemoConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = DemoConfig::from_lookup(lookup(&[
            (ENV_SPACING, "4"),
            (ENV_SPEED, " 20.5 "),
            (ENV_FPS, "60"),
            (ENV_WIDTH, "40"),
            (ENV_TEXT, "one| two ||three"),
        ]))
        .unwrap();
        assert_eq!(config.marquee.text_spacing, 4.0);
        assert_eq!(config.marquee.scroll_speed, 20.5);
        assert_eq!(config.fps, 60);
        assert_eq!(config.width, Some(40));
        assert_eq!(config.texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn unparseable_variable_is_reported() {
        let err = DemoConfig::from_lookup(lookup(&[(ENV_FPS, "fast")])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { key: ENV_FPS, .. }));
        assert_eq!(err.to_string(), "cannot parse MARQUEE_FPS=\"fast\"");
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let err = DemoConfig::from_lookup(lookup(&[(ENV_SPEED, "-3"), (ENV_FPS, "0")])).unwrap_err();
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DemoConfig::from_json_str(r#"{"fps": 12, "marquee": {"text_spacing": 3.0}}"#).unwrap();
        assert_eq!(config.fps, 12);
        assert_eq!(config.marquee.text_spacing, 3.0);
        assert_eq!(config.marquee.scroll_speed, marquee_core::config::DEFAULT_SCROLL_SPEED);
        assert_eq!(config.texts, DemoConfig::default().texts);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(DemoConfig::from_json_str("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = DemoConfig::from_lookup(lookup(&[(ENV_CONFIG, "/nonexistent/marquee.json")])).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/marquee.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn config_file_then_variables() {
        let path = std::env::temp_dir().join(format!("marquee-demo-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"fps": 10, "texts": ["from file"]}"#).unwrap();
        let config = DemoConfig::from_lookup(lookup(&[
            (ENV_CONFIG, path.to_str().unwrap()),
            (ENV_FPS, "20"),
        ]))
        .unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.fps, 20);
        assert_eq!(config.texts, vec!["from file"]);
    }
}
