//! Embedded message catalogs for the few strings the compiler writes itself.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

use crate::document::LocalizedText;

pub const FALLBACK_LOCALE: &str = "en";

type Catalog = BTreeMap<String, String>;

static CATALOGS: Lazy<BTreeMap<&'static str, Catalog>> = Lazy::new(|| {
    let mut catalogs = BTreeMap::new();
    catalogs.insert(
        "en",
        parse_catalog(include_str!("../i18n/en.json"), "i18n/en.json"),
    );
    catalogs.insert(
        "de",
        parse_catalog(include_str!("../i18n/de.json"), "i18n/de.json"),
    );
    catalogs.insert(
        "et",
        parse_catalog(include_str!("../i18n/et.json"), "i18n/et.json"),
    );
    catalogs.insert(
        "fr",
        parse_catalog(include_str!("../i18n/fr.json"), "i18n/fr.json"),
    );
    catalogs.insert(
        "ru",
        parse_catalog(include_str!("../i18n/ru.json"), "i18n/ru.json"),
    );
    catalogs
});

fn parse_catalog(raw: &str, name: &str) -> Catalog {
    serde_json::from_str(raw).unwrap_or_else(|err| panic!("parse embedded {name} catalog: {err}"))
}

/// Canonical form of a survey language code (`pt_BR` -> `pt-BR`).
///
/// Codes that do not parse as language identifiers are only lowercased.
pub fn normalize_locale(raw: &str) -> String {
    let cleaned = raw.trim().replace('_', "-");
    cleaned
        .parse::<LanguageIdentifier>()
        .map(|lid| lid.to_string())
        .unwrap_or_else(|_| cleaned.to_ascii_lowercase())
}

fn catalog_for(locale: &str) -> Option<&'static Catalog> {
    let normalized = normalize_locale(locale);
    if let Some(catalog) = CATALOGS.get(normalized.as_str()) {
        return Some(catalog);
    }
    let base = normalized.split('-').next()?.to_ascii_lowercase();
    CATALOGS.get(base.as_str())
}

/// Message for `key` in `locale`, without any fallback.
pub fn lookup(locale: &str, key: &str) -> Option<&'static str> {
    catalog_for(locale)
        .and_then(|catalog| catalog.get(key))
        .map(String::as_str)
}

/// Message for `key` in `locale`, falling back to English and then the key.
pub fn tr(locale: &str, key: &str) -> String {
    lookup(locale, key)
        .or_else(|| lookup(FALLBACK_LOCALE, key))
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

/// Per-language text for `key`: the default language first, then every
/// listed language that has a catalog entry.
pub fn localized(key: &str, default_locale: &str, languages: &[&str]) -> LocalizedText {
    let mut text = LocalizedText::new(tr(default_locale, key));
    for language in languages {
        if let Some(message) = lookup(language, key) {
            text = text.with(*language, message);
        }
    }
    text
}
