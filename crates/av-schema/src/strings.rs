//! Localized group titles
//!
//! A static string table keyed by locale, then by the English template
//! string the group schema carries. Lookup falls back from the exact
//! locale to its language prefix, then to the default locale, then to the
//! template string itself, so an untranslated title still renders.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Locale used when a translation is missing
pub const DEFAULT_LOCALE: &str = "en";

type Table = HashMap<&'static str, HashMap<&'static str, &'static str>>;

static STRINGS: OnceLock<Table> = OnceLock::new();

fn strings() -> &'static Table {
    STRINGS.get_or_init(|| {
        HashMap::from([
            (
                "en",
                HashMap::from([
                    ("Climate", "Climate"),
                    ("Scenes", "Scenes"),
                    ("Sensors", "Sensors"),
                    ("Automations", "Automations"),
                ]),
            ),
            (
                "de",
                HashMap::from([
                    ("Climate", "Klima"),
                    ("Scenes", "Szenen"),
                    ("Sensors", "Sensoren"),
                    ("Automations", "Automatisierungen"),
                ]),
            ),
            (
                "fr",
                HashMap::from([
                    ("Climate", "Climat"),
                    ("Scenes", "Scènes"),
                    ("Sensors", "Capteurs"),
                    ("Automations", "Automatisations"),
                ]),
            ),
            (
                "nl",
                HashMap::from([
                    ("Climate", "Klimaat"),
                    ("Scenes", "Scènes"),
                    ("Sensors", "Sensoren"),
                    ("Automations", "Automatiseringen"),
                ]),
            ),
        ])
    })
}

/// Look up the translation of `key` for `locale`.
pub fn localize(locale: &str, key: &str) -> String {
    let table = strings();
    let language = locale.split(['-', '_']).next().unwrap_or(locale);
    [locale, language, DEFAULT_LOCALE]
        .iter()
        .find_map(|candidate| table.get(*candidate).and_then(|entries| entries.get(key)))
        .map(|translated| (*translated).to_string())
        .unwrap_or_else(|| key.to_string())
}
