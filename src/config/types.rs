use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationsDir")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// バリデーションエラーを番号付きで整形する
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Locale used when no valid preference is stored, and the load
    /// fallback.
    pub default_locale: Locale,

    /// Directory holding one `<code>.json` dictionary per locale.
    pub translations_dir: PathBuf,

    /// File persisting the last-selected locale code.
    pub preference_file: PathBuf,

    /// Whether to warm the dictionary cache for every locale at startup.
    pub preload_all: bool,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            translations_dir: PathBuf::from("translations"),
            preference_file: PathBuf::from(".locale"),
            preload_all: false,
        }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Required path is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translations_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "translationsDir",
                "The directory cannot be empty. Example: \"translations\"",
            ));
        }

        if self.preference_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "preferenceFile",
                "The path cannot be empty. Example: \".locale\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
