//! Supported locale registry.
//!
//! The locale set is closed: locales are defined at compile time and never
//! created at runtime. Every locale carries its display names, flag glyph
//! and writing direction.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// A supported locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (the fallback locale)
    #[default]
    En,
    /// Turkish
    Tr,
    /// German
    De,
    /// Urdu
    Ur,
    /// Arabic
    Ar,
}

/// Text and layout direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left-to-right
    Ltr,
    /// Right-to-left
    Rtl,
}

impl TextDirection {
    /// Value for the document `dir` attribute.
    #[must_use]
    pub const fn attr(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// Registry entry for a single locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleInfo {
    /// Locale code (e.g. `"en"`)
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
    /// Name in the locale's own language
    pub native_name: &'static str,
    /// Flag glyph shown in the locale switcher
    pub flag: &'static str,
    /// Writing direction
    pub direction: TextDirection,
}

/// English registry entry
const EN: LocaleInfo = LocaleInfo {
    code: "en",
    name: "English",
    native_name: "English",
    flag: "🇬🇧",
    direction: TextDirection::Ltr,
};

/// Turkish registry entry
const TR: LocaleInfo = LocaleInfo {
    code: "tr",
    name: "Turkish",
    native_name: "Türkçe",
    flag: "🇹🇷",
    direction: TextDirection::Ltr,
};

/// German registry entry
const DE: LocaleInfo = LocaleInfo {
    code: "de",
    name: "German",
    native_name: "Deutsch",
    flag: "🇩🇪",
    direction: TextDirection::Ltr,
};

/// Urdu registry entry
const UR: LocaleInfo = LocaleInfo {
    code: "ur",
    name: "Urdu",
    native_name: "اردو",
    flag: "🇵🇰",
    direction: TextDirection::Rtl,
};

/// Arabic registry entry
const AR: LocaleInfo = LocaleInfo {
    code: "ar",
    name: "Arabic",
    native_name: "العربية",
    flag: "🇸🇦",
    direction: TextDirection::Rtl,
};

impl Locale {
    /// All supported locales, in display order.
    pub const ALL: [Self; 5] = [Self::En, Self::Tr, Self::De, Self::Ur, Self::Ar];

    /// Registry entry for this locale.
    #[must_use]
    pub const fn info(self) -> &'static LocaleInfo {
        match self {
            Self::En => &EN,
            Self::Tr => &TR,
            Self::De => &DE,
            Self::Ur => &UR,
            Self::Ar => &AR,
        }
    }

    /// Locale code (e.g. `"en"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        self.info().code
    }

    /// Writing direction per the registry.
    #[must_use]
    pub const fn direction(self) -> TextDirection {
        self.info().direction
    }

    /// Whether this locale is written right-to-left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self.direction(), TextDirection::Rtl)
    }

    /// Strict membership test against the supported set.
    ///
    /// Used to validate persisted preferences; unknown or differently-cased
    /// codes are rejected rather than normalized.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
