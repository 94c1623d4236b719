//! site-i18n
//!
//! マーケティングサイト向けのロケール対応翻訳ランタイム
//!
//! Dictionaries are nested JSON documents addressed by dotted keys
//! (e.g. `"hero.title"`). Lookups never fail: a missing dictionary degrades
//! to the default locale, a missing key degrades to the literal key, and a
//! missing template variable degrades to the literal placeholder.

pub mod config;
pub mod dictionary;
pub mod format;
pub mod loader;
pub mod locale;
pub mod prefs;
pub mod provider;

#[cfg(test)]
mod test_utils;

// I18n を再エクスポート
pub use provider::I18n;
