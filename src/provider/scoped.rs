//! Namespace-scoped accessor.
//!
//! Page sections look their strings up under a common prefix
//! (`hero.title`, `hero.subtitle`, ...). A scoped accessor carries that
//! prefix so section code reads `section.t("title")`.

use serde_json::Value;

use crate::format::TemplateVars;
use crate::loader::DictionarySource;
use crate::prefs::PreferenceStore;
use crate::provider::I18n;

/// A borrow of [`I18n`] that prefixes every key with a namespace.
#[derive(Debug, Clone, Copy)]
pub struct ScopedI18n<'a, S, P> {
    /// The underlying provider.
    inner: &'a I18n<S, P>,

    /// Prefix joined to every key with the `.` separator.
    namespace: &'a str,
}

impl<'a, S: DictionarySource, P: PreferenceStore> ScopedI18n<'a, S, P> {
    /// Creates a scope over `inner`.
    pub(super) const fn new(inner: &'a I18n<S, P>, namespace: &'a str) -> Self {
        Self { inner, namespace }
    }

    /// Translates `{namespace}.{key}`.
    ///
    /// An unresolved key echoes the full prefixed path, which is what the
    /// consuming section renders while its dictionary is still loading.
    #[must_use]
    pub fn t(&self, key: &str, vars: Option<&TemplateVars>) -> String {
        self.inner.t(&self.prefixed(key), vars)
    }

    /// Structured lookup of `{namespace}.{key}` (array-shaped values).
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.inner.lookup(&self.prefixed(key))
    }

    /// Joins the namespace and key.
    fn prefixed(&self, key: &str) -> String {
        format!("{}.{}", self.namespace, key)
    }
}
