//! 翻訳辞書の読み込みとキャッシュ
//!
//! The loader owns the process-wide dictionary cache and implements the
//! degrade-gracefully policy: a locale whose resource cannot be fetched
//! falls back one level to the default locale, and if the default itself
//! fails the empty dictionary is returned. `load` never errors.

mod source;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

pub use source::{
    DictionarySource,
    FsDictionarySource,
    SourceError,
};

use crate::dictionary::Dictionary;
use crate::locale::Locale;

/// Caching dictionary loader.
///
/// The cache is keyed by locale and bounded by the closed locale set, so
/// entries are never evicted. Dictionaries are immutable once loaded; there
/// is no hot reload.
#[derive(Clone)]
pub struct TranslationLoader<S> {
    /// Where dictionary documents come from.
    source: S,

    /// Fallback locale used when a fetch fails.
    default_locale: Locale,

    /// ロケール → 読み込み済み辞書のキャッシュ
    cache: Arc<RwLock<HashMap<Locale, Arc<Dictionary>>>>,
}

impl<S: DictionarySource> TranslationLoader<S> {
    /// Creates a loader with an empty cache.
    pub fn new(source: S, default_locale: Locale) -> Self {
        Self { source, default_locale, cache: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Returns the dictionary for `locale`, fetching it on first access.
    ///
    /// A cached locale is returned without I/O. On a fetch failure the
    /// default locale is tried once and cached under its own key; the
    /// failed locale stays uncached and will be retried on the next call.
    /// If the default also fails, the empty dictionary is returned.
    ///
    /// The cache check is not held across the fetch: two concurrent calls
    /// for the same uncached locale may both fetch, and the last write to
    /// the cache wins. Fetches are idempotent, so this is wasted work at
    /// worst.
    pub async fn load(&self, locale: Locale) -> Arc<Dictionary> {
        if let Some(dictionary) = self.cached(locale).await {
            return dictionary;
        }

        match self.source.fetch(locale).await {
            Ok(dictionary) => self.store(locale, dictionary).await,
            Err(err) => {
                tracing::warn!(%locale, error = %err, "Failed to load dictionary");
                if locale == self.default_locale {
                    return Arc::new(Dictionary::empty());
                }
                self.load_default().await
            }
        }
    }

    /// Warms the cache for a set of locales concurrently.
    pub async fn preload(&self, locales: &[Locale]) {
        let futures: Vec<_> = locales.iter().map(|locale| self.load(*locale)).collect();
        futures::future::join_all(futures).await;
    }

    /// Whether `locale` currently has a cached dictionary.
    pub async fn is_cached(&self, locale: Locale) -> bool {
        self.cache.read().await.contains_key(&locale)
    }

    /// One level of fallback: load the default locale, degrading to the
    /// empty dictionary if that fails too.
    async fn load_default(&self) -> Arc<Dictionary> {
        if let Some(dictionary) = self.cached(self.default_locale).await {
            return dictionary;
        }

        match self.source.fetch(self.default_locale).await {
            Ok(dictionary) => self.store(self.default_locale, dictionary).await,
            Err(err) => {
                tracing::warn!(
                    locale = %self.default_locale,
                    error = %err,
                    "Default locale failed to load, degrading to empty dictionary"
                );
                Arc::new(Dictionary::empty())
            }
        }
    }

    /// Cached dictionary for `locale`, if any.
    async fn cached(&self, locale: Locale) -> Option<Arc<Dictionary>> {
        self.cache.read().await.get(&locale).cloned()
    }

    /// Inserts a freshly fetched dictionary and returns the shared handle.
    async fn store(&self, locale: Locale, dictionary: Dictionary) -> Arc<Dictionary> {
        let dictionary = Arc::new(dictionary);
        self.cache.write().await.insert(locale, Arc::clone(&dictionary));
        tracing::debug!(%locale, "Dictionary cached");
        dictionary
    }
}

impl<S> std::fmt::Debug for TranslationLoader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationLoader")
            .field("source", &"<DictionarySource>")
            .field("default_locale", &self.default_locale)
            .field("cache", &"<HashMap<Locale, Arc<Dictionary>>>")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        FailingSource,
        StaticSource,
    };

    /// load: 初回はフェッチし、2回目はキャッシュから返す
    #[rstest]
    #[tokio::test]
    async fn second_load_is_a_cache_hit() {
        let source = StaticSource::new(&[(Locale::En, json!({"a": "A"}))]);
        let loader = TranslationLoader::new(source, Locale::En);

        let first = loader.load(Locale::En).await;
        let second = loader.load(Locale::En).await;

        assert_that!(Arc::ptr_eq(&first, &second), eq(true));
        assert_that!(loader.source.fetch_count(), eq(1));
    }

    /// load: 失敗時はデフォルトロケールにフォールバック
    #[rstest]
    #[tokio::test]
    async fn failed_locale_falls_back_to_default() {
        let source = StaticSource::new(&[(Locale::En, json!({"a": "A"}))]);
        let loader = TranslationLoader::new(source, Locale::En);

        let dictionary = loader.load(Locale::Tr).await;

        assert_that!(dictionary.resolve("a").into_text(), eq("A"));
        // フォールバック結果はデフォルト側のキーでのみキャッシュされる
        assert_that!(loader.is_cached(Locale::En).await, eq(true));
        assert_that!(loader.is_cached(Locale::Tr).await, eq(false));
    }

    /// load: デフォルトロケール自体の失敗は空辞書
    #[rstest]
    #[tokio::test]
    async fn failing_default_degrades_to_empty_dictionary() {
        let loader = TranslationLoader::new(FailingSource, Locale::En);

        let dictionary = loader.load(Locale::En).await;

        assert_that!(dictionary.resolve("anything").into_text(), eq("anything"));
        assert_that!(loader.is_cached(Locale::En).await, eq(false));
    }

    /// load: 非デフォルトの失敗→デフォルトも失敗→空辞書
    #[rstest]
    #[tokio::test]
    async fn double_failure_degrades_to_empty_dictionary() {
        let loader = TranslationLoader::new(FailingSource, Locale::En);

        let dictionary = loader.load(Locale::Ar).await;

        assert_that!(dictionary.resolve("hero.title").into_text(), eq("hero.title"));
    }

    /// load: フォールバック先が既にキャッシュ済みなら再フェッチしない
    #[rstest]
    #[tokio::test]
    async fn fallback_reuses_cached_default() {
        let source = StaticSource::new(&[(Locale::En, json!({"a": "A"}))]);
        let loader = TranslationLoader::new(source, Locale::En);

        let _ = loader.load(Locale::En).await;
        let _ = loader.load(Locale::Ur).await;

        // en 1回 + ur の失敗フェッチ1回のみ。デフォルトの再フェッチはなし
        assert_that!(loader.source.fetch_count(), eq(2));
    }

    /// preload: 全ロケールのキャッシュを温める
    #[rstest]
    #[tokio::test]
    async fn preload_warms_every_available_locale() {
        let source = StaticSource::new(&[
            (Locale::En, json!({"a": "A"})),
            (Locale::Tr, json!({"a": "T"})),
        ]);
        let loader = TranslationLoader::new(source, Locale::En);

        loader.preload(&[Locale::En, Locale::Tr]).await;

        assert_that!(loader.is_cached(Locale::En).await, eq(true));
        assert_that!(loader.is_cached(Locale::Tr).await, eq(true));
    }
}
