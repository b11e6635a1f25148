use serde::{Deserialize, Serialize};

/// Display name shown when a record carries no usable translation.
pub const UNTITLED: &str = "Untitled";

/// A single localized `name`/`description` pair attached to a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub language: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Picks the best translation for the caller's preferred languages.
///
/// Preferred languages are tried in order; the first translation whose
/// `language` matches wins. If none match and `show_any` is set, the first
/// available translation is used instead.
pub fn best_translation<'a>(
    translations: &'a [Translation],
    preferred_languages: &[String],
    show_any: bool,
) -> Option<&'a Translation> {
    preferred_languages
        .iter()
        .find_map(|lang| translations.iter().find(|t| &t.language == lang))
        .or_else(|| if show_any { translations.first() } else { None })
}

/// Resolves the display `name` and `description` for a record.
///
/// A missing or empty name falls back to [`UNTITLED`]; a missing description
/// stays `None`. Absent data is a default, not an error.
pub fn display_fields(
    translations: &[Translation],
    preferred_languages: &[String],
) -> (String, Option<String>) {
    match best_translation(translations, preferred_languages, true) {
        Some(t) => {
            let name = match &t.name {
                Some(name) if !name.is_empty() => name.clone(),
                _ => UNTITLED.to_string(),
            };
            (name, t.description.clone())
        }
        None => (UNTITLED.to_string(), None),
    }
}
