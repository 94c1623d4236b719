//! Session state shared by every consumer of the provider.

use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::locale::{
    Locale,
    TextDirection,
};

/// The active translation session.
///
/// `locale` and `dictionary` are always committed together under one guard,
/// so consumers never observe a dictionary that disagrees with the locale.
#[derive(Debug, Clone)]
pub(super) struct SessionState {
    /// Currently selected locale.
    pub(super) locale: Locale,

    /// Dictionary for the selected locale (empty until the first load).
    pub(super) dictionary: Arc<Dictionary>,

    /// Whether a locale change is in flight.
    pub(super) loading: bool,

    /// Sequence number of the request that last committed (0 before the
    /// first commit). Commits are monotonic in this number.
    pub(super) committed_seq: u64,
}

impl SessionState {
    /// State before the first `set_locale` completes: the default locale
    /// with the empty dictionary, so early `t()` calls echo their keys.
    pub(super) fn uninitialized(default_locale: Locale) -> Self {
        Self {
            locale: default_locale,
            dictionary: Arc::new(Dictionary::empty()),
            loading: false,
            committed_seq: 0,
        }
    }
}

/// Host document attributes derived from the active locale.
///
/// Published on a watch channel whenever a locale change commits; the host
/// mirrors them onto its document (`lang` / `dir` attributes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAttributes {
    /// Document language attribute value (the locale code).
    pub lang: String,

    /// Document direction attribute value.
    pub dir: TextDirection,
}

impl DocumentAttributes {
    /// Attributes for a locale, per the registry.
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        Self { lang: locale.code().to_string(), dir: locale.direction() }
    }
}
