//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// 設定ファイル名
const CONFIG_FILE_NAME: &str = ".site-i18n.json";

/// ディレクトリから設定を読み込む
///
/// `.site-i18n.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_dir(dir: &Path) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: I18nSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

/// 設定を検出する：ファイルがあれば読み込み、なければデフォルト。
/// いずれの場合もバリデーションを行う。
///
/// # Errors
/// - ファイル読み込み／パースエラー
/// - バリデーションエラー
pub fn discover(dir: &Path) -> Result<I18nSettings, ConfigError> {
    let settings = load_from_dir(dir)?.map_or_else(I18nSettings::default, |loaded| {
        tracing::debug!("Loaded settings: {:?}", loaded);
        loaded
    });

    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(settings)
}
