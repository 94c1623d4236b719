//! Translation dictionary and dotted-path key resolution.
//!
//! A dictionary is an immutable, arbitrarily nested JSON document. Keys are
//! addressed with dot-separated paths (e.g. `"hero.title"`). Resolution
//! never fails: a path that cannot be walked yields [`Resolution::Missing`],
//! which renders as the literal path so unresolved keys surface visibly in
//! the UI instead of crashing or disappearing.

use serde_json::{
    Map,
    Value,
};

/// Path separator for nested keys.
const KEY_SEPARATOR: char = '.';

/// An immutable translation dictionary for a single locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dictionary {
    /// Nested JSON document holding the translations.
    root: Value,
}

/// Result of resolving a dotted path against a [`Dictionary`].
///
/// The miss case carries the original path, keeping the
/// degrade-to-literal-key contract explicit in the type instead of implicit
/// in string equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The path resolved to a value (possibly an array or object; callers
    /// that expect repeatable lists handle those through [`Resolution::value`]).
    Resolved(&'a Value),
    /// The path could not be fully walked; carries the original dotted path.
    Missing(&'a str),
}

impl Dictionary {
    /// Wraps a parsed translation document.
    #[must_use]
    pub const fn new(root: Value) -> Self {
        Self { root }
    }

    /// The empty dictionary (`{}`), the terminal degradation target when no
    /// translations could be loaded. Every lookup against it misses.
    #[must_use]
    pub fn empty() -> Self {
        Self { root: Value::Object(Map::new()) }
    }

    /// Resolves a dotted path segment by segment.
    ///
    /// At each step the current value must be an object containing the next
    /// segment; anything else aborts the walk with [`Resolution::Missing`].
    /// No case folding, no fuzzy matching, no wildcards.
    #[must_use]
    pub fn resolve<'a>(&'a self, path: &'a str) -> Resolution<'a> {
        let mut current = &self.root;
        for segment in path.split(KEY_SEPARATOR) {
            let Value::Object(map) = current else {
                return Resolution::Missing(path);
            };
            let Some(next) = map.get(segment) else {
                return Resolution::Missing(path);
            };
            current = next;
        }
        Resolution::Resolved(current)
    }
}

impl<'a> Resolution<'a> {
    /// Renders the resolution as display text.
    ///
    /// String leaves are returned verbatim; non-string leaves use their JSON
    /// rendering (same rule the loaders apply to non-string values); a miss
    /// echoes the dotted path.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Resolved(Value::String(text)) => text.clone(),
            Self::Resolved(other) => other.to_string(),
            Self::Missing(path) => path.to_string(),
        }
    }

    /// The resolved value, if any. Used for array-shaped translation values
    /// (repeatable lists) that `into_text` would stringify.
    #[must_use]
    pub const fn value(self) -> Option<&'a Value> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Missing(_) => None,
        }
    }
}
