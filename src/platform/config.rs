// PlaceBoard - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::filter::FilterFields;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for PlaceBoard data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/placeboard/)
    pub config_dir: PathBuf,

    /// Data directory; the default store lives in `<data_dir>/store`.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default config file location.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }

    /// Default Record Store directory.
    pub fn default_store_dir(&self) -> PathBuf {
        self.data_dir.join(constants::STORE_DIR_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[store]` section.
    pub store: StoreSection,
    /// `[filter]` section.
    pub filter: FilterSection,
    /// `[feedback]` section.
    pub feedback: FeedbackSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[store]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Directory holding the collection files.
    pub data_dir: Option<String>,
}

/// `[filter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Attributes searched by the free-text term.
    pub term_attributes: Option<Vec<String>>,
    /// Attribute matched by the location filter.
    pub location_attribute: Option<String>,
    /// Attribute matched by the company filter.
    pub company_attribute: Option<String>,
}

/// `[feedback]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FeedbackSection {
    /// Window for the "recent reviews" count, in days.
    pub recent_window_days: Option<i64>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Refuse exports larger than this.
    pub max_records: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store directory override (None = platform default).
    pub store_dir: Option<PathBuf>,

    /// Attribute mapping for the filter criteria.
    pub filter_fields: FilterFields,

    /// Window for the "recent reviews" count.
    pub recent_window_days: i64,

    /// Maximum records per export.
    pub max_export_records: usize,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            filter_fields: FilterFields::default(),
            recent_window_days: constants::DEFAULT_RECENT_WINDOW_DAYS,
            max_export_records: constants::MAX_EXPORT_RECORDS,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and every problem found along
/// the way. If the file does not exist, returns defaults with no problems
/// (first run). If the file cannot be read or parsed, returns defaults with
/// one `Io`/`TomlParse` entry so the application still starts and the user
/// is informed.
///
/// Runs before logging is initialised (the config chooses the log level),
/// so callers should log the returned problems once tracing is up.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut problems: Vec<ConfigError> = Vec::new();

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), problems);
        }
        Err(source) => {
            problems.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            });
            return (AppConfig::default(), problems);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            problems.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source,
            });
            return (AppConfig::default(), problems);
        }
    };

    let config = validate(raw, &mut problems);
    (config, problems)
}

fn out_of_range(field: &str, value: impl ToString, expected: String) -> ConfigError {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Validate each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, problems: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Store: data_dir --
    if let Some(dir) = raw.store.data_dir {
        if dir.is_empty() {
            problems.push(out_of_range(
                "store.data_dir",
                "",
                "a directory path".to_string(),
            ));
        } else {
            config.store_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Filter: term_attributes --
    if let Some(attrs) = raw.filter.term_attributes {
        let count_ok = !attrs.is_empty() && attrs.len() <= constants::MAX_TERM_ATTRIBUTES;
        if count_ok && attrs.iter().all(|a| !a.is_empty()) {
            config.filter_fields.term_attributes = attrs;
        } else {
            problems.push(out_of_range(
                "filter.term_attributes",
                format!("{attrs:?}"),
                format!(
                    "1-{} non-empty attribute names",
                    constants::MAX_TERM_ATTRIBUTES
                ),
            ));
        }
    }

    // -- Filter: location_attribute / company_attribute --
    for (field, value, target) in [
        (
            "filter.location_attribute",
            raw.filter.location_attribute,
            &mut config.filter_fields.location_attribute,
        ),
        (
            "filter.company_attribute",
            raw.filter.company_attribute,
            &mut config.filter_fields.company_attribute,
        ),
    ] {
        match value {
            Some(v) if v.is_empty() => problems.push(out_of_range(
                field,
                "",
                "a non-empty attribute name".to_string(),
            )),
            Some(v) => *target = v,
            None => {}
        }
    }

    // -- Feedback: recent_window_days --
    if let Some(days) = raw.feedback.recent_window_days {
        if (constants::MIN_RECENT_WINDOW_DAYS..=constants::MAX_RECENT_WINDOW_DAYS).contains(&days) {
            config.recent_window_days = days;
        } else {
            problems.push(out_of_range(
                "feedback.recent_window_days",
                days,
                format!(
                    "{}-{}",
                    constants::MIN_RECENT_WINDOW_DAYS,
                    constants::MAX_RECENT_WINDOW_DAYS
                ),
            ));
        }
    }

    // -- Export: max_records --
    if let Some(max) = raw.export.max_records {
        if (constants::MIN_EXPORT_RECORDS..=constants::MAX_EXPORT_RECORDS).contains(&max) {
            config.max_export_records = max;
        } else {
            problems.push(out_of_range(
                "export.max_records",
                max,
                format!(
                    "{}-{}",
                    constants::MIN_EXPORT_RECORDS,
                    constants::MAX_EXPORT_RECORDS
                ),
            ));
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            problems.push(out_of_range(
                "logging.level",
                level,
                valid.join(", "),
            ));
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    config
}
