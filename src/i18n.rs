//! Locale handling for the bilingual (Japanese/English) site.
//!
//! Japanese is the base locale: its pages live at the unprefixed path, while
//! English pages are served under `/en`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported site locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    /// The locale served at unprefixed paths.
    pub const BASE: Locale = Locale::Ja;

    /// All supported locales, base locale first.
    pub const ALL: [Locale; 2] = [Locale::Ja, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }

    /// Parse a language tag, ignoring case and any region subtag.
    ///
    /// "ja" -> Ja, "en-US" -> En, "EN_gb" -> En, "fr" -> None
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        Locale::ALL
            .into_iter()
            .find(|locale| primary.eq_ignore_ascii_case(locale.as_str()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// A string with one value per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub ja: String,
    #[serde(default)]
    pub en: String,
}

impl Localized {
    pub fn new(ja: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ja: ja.into(),
            en: en.into(),
        }
    }

    /// Use the same text for every locale.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ja: text.clone(),
            en: text,
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ja => &self.ja,
            Locale::En => &self.en,
        }
    }

    /// Get the text for `locale`, falling back to the other locale when empty.
    pub fn get_or_fallback(&self, locale: Locale) -> &str {
        let text = self.get(locale);
        if !text.is_empty() {
            return text;
        }
        match locale {
            Locale::Ja => &self.en,
            Locale::En => &self.ja,
        }
    }
}

/// Pick the locale for a visitor.
///
/// Priority order:
/// 1. Stored preference
/// 2. URL parameter
/// 3. First supported browser language
/// 4. The base locale (Japanese)
pub fn detect_locale<S: AsRef<str>>(
    stored: Option<&str>,
    url_param: Option<&str>,
    browser_languages: &[S],
) -> Locale {
    if let Some(locale) = stored.and_then(Locale::parse) {
        return locale;
    }
    if let Some(locale) = url_param.and_then(Locale::parse) {
        return locale;
    }
    browser_languages
        .iter()
        .find_map(|lang| Locale::parse(lang.as_ref()))
        .unwrap_or(Locale::BASE)
}

/// Build the path a page is served at for `locale`.
///
/// "/blog/intro" + Ja -> "/blog/intro"
/// "/blog/intro" + En -> "/en/blog/intro"
/// "/" + En -> "/en"
pub fn localize_path(path: &str, locale: Locale) -> String {
    let (_, bare) = delocalize_path(path);
    if locale == Locale::BASE {
        return bare;
    }
    if bare == "/" {
        format!("/{}", locale)
    } else {
        format!("/{}{}", locale, bare)
    }
}

/// Strip a locale prefix from a path, returning the locale it named.
///
/// Paths without a prefix belong to the base locale.
pub fn delocalize_path(path: &str) -> (Locale, String) {
    let trimmed = path.trim_start_matches('/');
    let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

    match Locale::parse(first) {
        // Only exact prefixes count; "/english" is an ordinary path.
        Some(locale) if first.eq_ignore_ascii_case(locale.as_str()) && locale != Locale::BASE => {
            (locale, format!("/{}", rest))
        }
        _ if trimmed.is_empty() => (Locale::BASE, "/".to_string()),
        _ => (Locale::BASE, format!("/{}", trimmed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_tags() {
        assert_eq!(Locale::parse("ja"), Some(Locale::Ja));
        assert_eq!(Locale::parse("ja-JP"), Some(Locale::Ja));
        assert_eq!(Locale::parse("en-US"), Some(Locale::En));
        assert_eq!(Locale::parse("EN_gb"), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
        assert_eq!(Locale::parse(""), None);
        for locale in Locale::ALL {
            assert_eq!(Locale::parse(locale.as_str()), Some(locale));
            assert_eq!(Locale::parse(&locale.as_str().to_uppercase()), Some(locale));
        }
    }

    #[test]
    fn test_detect_prefers_stored_preference() {
        let langs = ["ja-JP"];
        assert_eq!(detect_locale(Some("en"), Some("ja"), &langs), Locale::En);
    }

    #[test]
    fn test_detect_uses_url_param_before_browser() {
        let langs = ["en-US"];
        assert_eq!(detect_locale(None, Some("ja"), &langs), Locale::Ja);
        assert_eq!(detect_locale(Some("de"), Some("en"), &langs), Locale::En);
    }

    #[test]
    fn test_detect_uses_first_supported_browser_language() {
        let langs = ["fr-FR", "en-GB", "ja"];
        assert_eq!(detect_locale(None, None, &langs), Locale::En);
    }

    #[test]
    fn test_detect_defaults_to_japanese() {
        let langs: [&str; 0] = [];
        assert_eq!(detect_locale(None, None, &langs), Locale::Ja);
        assert_eq!(detect_locale(None, Some("xx"), &["de"]), Locale::Ja);
    }

    #[test]
    fn test_localized_fallback() {
        let text = Localized::new("", "Hello");
        assert_eq!(text.get(Locale::Ja), "");
        assert_eq!(text.get_or_fallback(Locale::Ja), "Hello");
        assert_eq!(Localized::uniform("Folio").get(Locale::En), "Folio");
    }

    #[test]
    fn test_localize_path() {
        assert_eq!(localize_path("/blog/intro", Locale::Ja), "/blog/intro");
        assert_eq!(localize_path("/blog/intro", Locale::En), "/en/blog/intro");
        assert_eq!(localize_path("/", Locale::En), "/en");
        assert_eq!(localize_path("/en/works", Locale::Ja), "/works");
        assert_eq!(localize_path("/en/works", Locale::En), "/en/works");
    }

    #[test]
    fn test_delocalize_path() {
        assert_eq!(delocalize_path("/en/blog"), (Locale::En, "/blog".to_string()));
        assert_eq!(delocalize_path("/en"), (Locale::En, "/".to_string()));
        assert_eq!(delocalize_path("/english"), (Locale::Ja, "/english".to_string()));
        assert_eq!(delocalize_path("/"), (Locale::Ja, "/".to_string()));
        assert_eq!(delocalize_path("/ja/blog"), (Locale::Ja, "/ja/blog".to_string()));
    }
}
