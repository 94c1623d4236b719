//! 翻訳セッションの管理
//!
//! [`I18n`] is the injectable service a host constructs once and shares
//! (typically behind an `Arc`). It owns the loader, the persisted
//! preference and the active session state, and exposes the `t()` accessor
//! used on every render pass.
//!
//! `t()` is a synchronous in-memory read and never suspends; only locale
//! changes await the fetch boundary. No operation here returns an error:
//! load failures degrade to the fallback locale or the empty dictionary,
//! and unresolved keys echo literally (consumers check [`I18n::is_loading`]
//! to avoid flashing raw keys during the first load).

mod scoped;
mod state;

use std::sync::{
    Arc,
    RwLock,
};
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};

use serde_json::Value;
use tokio::sync::watch;

pub use scoped::ScopedI18n;
pub use state::DocumentAttributes;

use crate::config::I18nSettings;
use crate::dictionary::{
    Dictionary,
    Resolution,
};
use crate::format::{
    TemplateVars,
    apply_vars,
};
use crate::loader::{
    DictionarySource,
    FsDictionarySource,
    TranslationLoader,
};
use crate::locale::{
    Locale,
    TextDirection,
};
use crate::prefs::{
    FsPreferenceStore,
    PreferenceStore,
};
use crate::provider::state::SessionState;

/// Translation provider: active locale, dictionary and loading flag.
pub struct I18n<S, P> {
    /// Dictionary loader with its process-wide cache.
    loader: TranslationLoader<S>,

    /// Persisted locale preference.
    prefs: P,

    /// Locale used when nothing valid is stored and as the load fallback.
    default_locale: Locale,

    /// アクティブなセッション状態（`t()` からの同期読み取り用）
    ///
    /// Never held across an `await`.
    state: RwLock<SessionState>,

    /// Sequence number of the most recently issued `set_locale` request.
    ///
    /// A completion whose number is no longer the latest is discarded, so
    /// the most recently requested locale always wins even when fetch
    /// completions are reordered by latency.
    request_seq: AtomicU64,

    /// Document attribute publisher; the host mirrors these onto its page.
    attributes: watch::Sender<DocumentAttributes>,
}

impl<S: DictionarySource, P: PreferenceStore> I18n<S, P> {
    /// Creates a provider in the uninitialized state.
    ///
    /// Call [`I18n::init`] to load the starting locale.
    pub fn new(source: S, prefs: P, default_locale: Locale) -> Self {
        let (attributes, _) = watch::channel(DocumentAttributes::for_locale(default_locale));
        Self {
            loader: TranslationLoader::new(source, default_locale),
            prefs,
            default_locale,
            state: RwLock::new(SessionState::uninitialized(default_locale)),
            request_seq: AtomicU64::new(0),
            attributes,
        }
    }

    /// Loads the starting locale: a valid persisted preference if one
    /// exists, the default locale otherwise.
    pub async fn init(&self) {
        let stored = self.prefs.load();
        let starting = stored
            .as_deref()
            .and_then(Locale::from_code)
            .unwrap_or(self.default_locale);

        tracing::debug!(stored = ?stored, %starting, "Initializing translation session");
        self.set_locale(starting).await;
    }

    /// Switches the active locale.
    ///
    /// Sets the loading flag, loads the dictionary (cache, fetch or
    /// fallback), then commits locale and dictionary together, persists the
    /// preference and publishes the document attributes. If a newer
    /// `set_locale` was issued while the load was in flight, this
    /// completion is discarded and the newer request's commit stands.
    pub async fn set_locale(&self, locale: Locale) {
        let seq = self.request_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(%locale, seq, "Locale change requested");

        self.write_state().loading = true;

        let dictionary = self.loader.load(locale).await;

        if !self.try_commit(seq, locale, dictionary) {
            tracing::debug!(%locale, seq, "Discarding stale locale change");
            return;
        }

        if let Err(err) = self.prefs.save(locale.code()) {
            tracing::warn!(%locale, error = %err, "Failed to persist locale preference");
        }

        self.attributes.send_replace(DocumentAttributes::for_locale(locale));
        tracing::debug!(%locale, "Locale change committed");
    }

    /// 完了した読み込みのコミットを試みる。
    ///
    /// The freshness check and the commit happen under a single write
    /// guard: a completion commits only while its request is still the
    /// latest issued and no higher-sequence commit has landed, so a stale
    /// completion can never overwrite a newer one.
    fn try_commit(&self, seq: u64, locale: Locale, dictionary: Arc<Dictionary>) -> bool {
        let mut state = self.write_state();
        if self.request_seq.load(Ordering::SeqCst) != seq || state.committed_seq >= seq {
            return false;
        }
        state.locale = locale;
        state.dictionary = dictionary;
        state.loading = false;
        state.committed_seq = seq;
        true
    }

    /// Translates a dotted key, applying `{{var}}` substitution.
    ///
    /// Callable at any time; before the first dictionary is ready every key
    /// echoes literally.
    #[must_use]
    pub fn t(&self, key: &str, vars: Option<&TemplateVars>) -> String {
        let dictionary = self.read_state().dictionary.clone();
        apply_vars(&dictionary.resolve(key).into_text(), vars)
    }

    /// Structured lookup for array- or object-shaped translation values
    /// (repeatable lists). `None` on a miss.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Value> {
        let dictionary = self.read_state().dictionary.clone();
        match dictionary.resolve(key) {
            Resolution::Resolved(value) => Some(value.clone()),
            Resolution::Missing(_) => None,
        }
    }

    /// A namespace-scoped view (`scoped("hero").t("title", ..)` resolves
    /// `hero.title`).
    #[must_use]
    pub const fn scoped<'a>(&'a self, namespace: &'a str) -> ScopedI18n<'a, S, P> {
        ScopedI18n::new(self, namespace)
    }

    /// Currently active locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.read_state().locale
    }

    /// Whether a locale change is in flight. Consumers branch on this to
    /// avoid rendering raw keys during the first load.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    /// Layout direction of the active locale (registry lookup).
    #[must_use]
    pub fn direction(&self) -> TextDirection {
        self.locale().direction()
    }

    /// Current document attributes.
    #[must_use]
    pub fn attributes(&self) -> DocumentAttributes {
        self.attributes.borrow().clone()
    }

    /// Subscribes to document attribute changes.
    #[must_use]
    pub fn subscribe_attributes(&self) -> watch::Receiver<DocumentAttributes> {
        self.attributes.subscribe()
    }

    /// Warms the dictionary cache for every supported locale.
    pub async fn preload_all(&self) {
        self.loader.preload(&Locale::ALL).await;
    }

    /// 読み取りロックを取得（ポイズニングは吸収する）
    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// 書き込みロックを取得（ポイズニングは吸収する）
    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl I18n<FsDictionarySource, FsPreferenceStore> {
    /// Wires a provider from settings: filesystem dictionaries and a
    /// file-backed preference.
    #[must_use]
    pub fn from_settings(settings: &I18nSettings) -> Self {
        Self::new(
            FsDictionarySource::new(&settings.translations_dir),
            FsPreferenceStore::new(&settings.preference_file),
            settings.default_locale,
        )
    }
}

impl<S, P> std::fmt::Debug for I18n<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("loader", &self.loader)
            .field("prefs", &"<PreferenceStore>")
            .field("default_locale", &self.default_locale)
            .field("state", &"<RwLock<SessionState>>")
            .field("request_seq", &self.request_seq)
            .finish()
    }
}
