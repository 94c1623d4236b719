//! Dictionary resource fetching.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::dictionary::Dictionary;
use crate::locale::Locale;

/// Failure while fetching or parsing a dictionary resource.
///
/// These never reach the provider's public API: the loader degrades to the
/// fallback locale (or the empty dictionary) and logs instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read translation resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse translation resource: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A source of translation dictionaries, addressed by locale.
///
/// Fetches are expected to be idempotent; the loader may issue duplicate
/// fetches for the same locale under concurrent first access.
pub trait DictionarySource: Send + Sync {
    /// Fetches the dictionary document for `locale`.
    fn fetch(
        &self,
        locale: Locale,
    ) -> impl Future<Output = Result<Dictionary, SourceError>> + Send;
}

/// Loads `<root>/<code>.json` from the filesystem.
#[derive(Debug, Clone)]
pub struct FsDictionarySource {
    /// Directory containing one JSON document per locale.
    root: PathBuf,
}

impl FsDictionarySource {
    /// Creates a source rooted at the given translations directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DictionarySource for FsDictionarySource {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary, SourceError> {
        let path = self.root.join(format!("{}.json", locale.code()));
        tracing::debug!(path = %path.display(), %locale, "Fetching translation dictionary");

        let content = tokio::fs::read_to_string(&path).await?;
        let root: Value = serde_json::from_str(&content)?;

        Ok(Dictionary::new(root))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// fetch: 有効な辞書ファイルを読み込める
    #[rstest]
    #[tokio::test]
    async fn fetch_reads_locale_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), r#"{"hero": {"title": "Hi"}}"#).unwrap();

        let source = FsDictionarySource::new(temp_dir.path());
        let dictionary = source.fetch(Locale::En).await.unwrap();

        assert_that!(dictionary.resolve("hero.title").into_text(), eq("Hi"));
    }

    /// fetch: ファイルがない場合は Io エラー
    #[rstest]
    #[tokio::test]
    async fn fetch_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let source = FsDictionarySource::new(temp_dir.path());
        let result = source.fetch(Locale::Tr).await;

        assert_that!(matches!(result, Err(SourceError::Io(_))), eq(true));
    }

    /// fetch: 壊れた JSON は Parse エラー
    #[rstest]
    #[tokio::test]
    async fn fetch_malformed_json_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("de.json"), "not json").unwrap();

        let source = FsDictionarySource::new(temp_dir.path());
        let result = source.fetch(Locale::De).await;

        assert_that!(matches!(result, Err(SourceError::Parse(_))), eq(true));
    }
}
