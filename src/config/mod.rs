//! 設定（デフォルトロケール、辞書ディレクトリ、プリファレンスファイル）

mod loader;
mod types;

pub use loader::discover;
pub use types::{
    ConfigError,
    I18nSettings,
    ValidationError,
};
