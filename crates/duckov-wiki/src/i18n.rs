//! Locales, UI string dictionaries, and `Accept-Language` negotiation.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::DictionaryError;

/// The closed set of languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

    /// Where every fallback lands: missing translations, failed negotiation.
    pub const DEFAULT: Locale = Locale::En;

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// The `lang` attribute value for rendered pages.
    pub fn html_lang(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            _ => Err(()),
        }
    }
}

/// Per-locale flat key-value UI string tables, loaded once at startup from
/// `{dir}/{locale}.json`. Lookups for a key missing from a translation fall
/// back to the default locale, then to the key itself.
pub struct Dictionaries {
    tables: FxHashMap<Locale, FxHashMap<String, String>>,
}

impl Dictionaries {
    pub fn load(dir: &Path) -> Result<Self, DictionaryError> {
        let mut tables = FxHashMap::default();

        for locale in Locale::ALL {
            let path = dir.join(format!("{}.json", locale));
            let raw = std::fs::read_to_string(&path).map_err(|source| {
                DictionaryError::ReadFailed {
                    path: path.clone(),
                    source,
                }
            })?;
            let table: FxHashMap<String, String> = serde_json::from_str(&raw)
                .map_err(|source| DictionaryError::Invalid { path, source })?;

            tables.insert(locale, table);
        }

        Ok(Self { tables })
    }

    pub fn get<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        if let Some(value) = self.tables.get(&locale).and_then(|table| table.get(key)) {
            return value;
        }

        match self
            .tables
            .get(&Locale::DEFAULT)
            .and_then(|table| table.get(key))
        {
            Some(value) => value,
            None => {
                warn!(target: "i18n", "Missing dictionary key `{}`", key);
                key
            }
        }
    }
}

/// Picks the best supported locale from an `Accept-Language` header value.
///
/// Candidates are ordered by quality weight, then matched against the
/// supported set by exact tag first, primary subtag second (`zh-CN` matches
/// `zh`). Anything unparseable degrades to [`Locale::DEFAULT`], never to an
/// error.
pub fn negotiate(header: &str) -> Locale {
    let mut candidates: Vec<(f32, &str)> = Vec::new();

    for entry in header.split(',') {
        let mut parts = entry.trim().split(';');
        let tag = match parts.next() {
            Some(tag) if !tag.trim().is_empty() => tag.trim(),
            _ => continue,
        };

        let mut quality = 1.0f32;
        for param in parts {
            if let Some(value) = param.trim().strip_prefix("q=") {
                match value.parse::<f32>() {
                    Ok(q) if (0.0..=1.0).contains(&q) => quality = q,
                    // A malformed weight invalidates the whole entry.
                    _ => {
                        quality = -1.0;
                        break;
                    }
                }
            }
        }

        if quality >= 0.0 {
            candidates.push((quality, tag));
        }
    }

    // Stable sort: ties keep the header's own ordering.
    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    for (_, tag) in candidates {
        if tag == "*" {
            return Locale::DEFAULT;
        }

        let tag_lower = tag.to_ascii_lowercase();
        if let Ok(locale) = tag_lower.parse() {
            return locale;
        }

        let primary = tag_lower.split('-').next().unwrap_or(&tag_lower);
        if let Ok(locale) = primary.parse() {
            return locale;
        }
    }

    Locale::DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_negotiate_region_variant() {
        assert_eq!(negotiate("zh-CN,zh;q=0.9,en;q=0.8"), Locale::Zh);
    }

    #[test]
    fn test_negotiate_quality_ordering() {
        assert_eq!(negotiate("en;q=0.5,zh"), Locale::Zh);
        assert_eq!(negotiate("en;q=0.9,zh;q=0.8"), Locale::En);
    }

    #[test]
    fn test_negotiate_unsupported_falls_back() {
        assert_eq!(negotiate("fr-FR,de;q=0.7"), Locale::En);
    }

    #[test]
    fn test_negotiate_garbage_falls_back() {
        assert_eq!(negotiate(""), Locale::DEFAULT);
        assert_eq!(negotiate(";;;"), Locale::DEFAULT);
        assert_eq!(negotiate("zh;q=banana"), Locale::DEFAULT);
    }

    #[test]
    fn test_negotiate_wildcard() {
        assert_eq!(negotiate("*"), Locale::DEFAULT);
    }

    #[test]
    fn test_dictionary_fallback_chain() {
        let dir = tempfile::tempdir().unwrap();

        let mut en = std::fs::File::create(dir.path().join("en.json")).unwrap();
        write!(en, r#"{{"nav.home": "Home", "nav.guides": "Guides"}}"#).unwrap();
        let mut zh = std::fs::File::create(dir.path().join("zh.json")).unwrap();
        write!(zh, r#"{{"nav.home": "首页"}}"#).unwrap();

        let dicts = Dictionaries::load(dir.path()).unwrap();
        assert_eq!(dicts.get(Locale::Zh, "nav.home"), "首页");
        // Missing in zh, present in en.
        assert_eq!(dicts.get(Locale::Zh, "nav.guides"), "Guides");
        // Missing everywhere.
        assert_eq!(dicts.get(Locale::Zh, "nav.nope"), "nav.nope");
    }
}
