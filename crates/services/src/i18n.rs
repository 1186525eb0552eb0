//! Translation tables in the i18next JSON layout.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use joi_core::catalog::{Catalog, DefaultText, TextLookup};
use joi_core::checkin::CheckinProgress;
use joi_core::model::Language;
use serde_json::Value;

use crate::error::LocaleError;

/// Key and default for the check-in header line.
pub const HEADER_SUBTITLE_KEY: &str = "survey.headerSubtitle";
pub const HEADER_SUBTITLE_DEFAULT: &str = "Question {{n}} of {{total}}";

/// [`TextLookup`] over a nested JSON document, flattened to dotted keys.
///
/// `{"survey": {"q1": {"text": "..."}}}` answers the key `survey.q1.text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonLookup {
    entries: HashMap<String, String>,
}

impl JsonLookup {
    /// Parse a translation document.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if `json` is not valid JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut entries = HashMap::new();
        flatten(value, String::new(), &mut entries);
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TextLookup for JsonLookup {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Translation file for `language` inside `dir`, e.g. `locales/ko.json`.
#[must_use]
pub fn locale_path(dir: &Path, language: Language) -> PathBuf {
    dir.join(format!("{}.json", language.code()))
}

/// Load the translation document for `language` from `dir`.
///
/// Returns `Ok(None)` when the directory has no file for that language.
///
/// # Errors
///
/// Returns `LocaleError` if the file exists but cannot be read or parsed.
pub fn load_locale(dir: &Path, language: Language) -> Result<Option<JsonLookup>, LocaleError> {
    let path = locale_path(dir, language);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::debug!("no translation file at {}", path.display());
            return Ok(None);
        }
        Err(source) => return Err(LocaleError::Io { path, source }),
    };
    match JsonLookup::from_json(&raw) {
        Ok(lookup) => {
            log::info!(
                "loaded {} translation entries from {}",
                lookup.len(),
                path.display()
            );
            Ok(Some(lookup))
        }
        Err(source) => Err(LocaleError::Json { path, source }),
    }
}

/// Texts for the language the user picked.
pub struct Localization {
    language: Language,
    text: Box<dyn TextLookup + Send + Sync>,
}

impl Localization {
    /// Built-in English texts.
    #[must_use]
    pub fn defaults(language: Language) -> Self {
        Self {
            language,
            text: Box::new(DefaultText),
        }
    }

    #[must_use]
    pub fn new(language: Language, text: impl TextLookup + Send + Sync + 'static) -> Self {
        Self {
            language,
            text: Box::new(text),
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn text(&self) -> &dyn TextLookup {
        self.text.as_ref()
    }

    /// The question catalog rendered in this language.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::localized(self.text())
    }
}

impl std::fmt::Debug for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localization")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

fn flatten(value: &Value, prefix: String, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(child, child_key(&prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                flatten(child, child_key(&prefix, &idx.to_string()), out);
            }
        }
        Value::String(text) => {
            out.insert(prefix, text.clone());
        }
        Value::Number(n) => {
            out.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix, b.to_string());
        }
        Value::Null => {}
    }
}

fn child_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Expand `{{name}}` placeholders. Unknown placeholders are left untouched.
#[must_use]
pub fn interpolate(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = after[..end].trim();
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// "Question n of total" for the check-in header.
#[must_use]
pub fn header_subtitle(text: &dyn TextLookup, progress: CheckinProgress) -> String {
    let template = text.text_or(HEADER_SUBTITLE_KEY, HEADER_SUBTITLE_DEFAULT);
    interpolate(
        &template,
        &[
            ("n", progress.number.to_string()),
            ("total", progress.total.to_string()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use joi_core::catalog::{Catalog, DefaultText};
    use joi_core::model::{OptionLetter, QuestionId};

    const KO: &str = r#"{
        "survey": {
            "headerSubtitle": "질문 {{n}} / {{total}}",
            "q7": { "text": "일주일에 며칠 잠들기 어렵습니까?", "A": "0일" }
        },
        "count": 3,
        "flags": [true, null]
    }"#;

    #[test]
    fn nested_documents_flatten_to_dotted_keys() {
        let lookup = JsonLookup::from_json(KO).unwrap();
        assert_eq!(lookup.lookup("survey.q7.A").as_deref(), Some("0일"));
        assert_eq!(lookup.lookup("count").as_deref(), Some("3"));
        assert_eq!(lookup.lookup("flags.0").as_deref(), Some("true"));
        assert_eq!(lookup.lookup("flags.1"), None);
        assert_eq!(lookup.len(), 5);
    }

    #[test]
    fn localized_catalog_uses_json_lookup() {
        let lookup = JsonLookup::from_json(KO).unwrap();
        let catalog = Catalog::localized(&lookup);
        let q7 = catalog.get(QuestionId::new(7)).unwrap();
        assert_eq!(q7.text(), "일주일에 며칠 잠들기 어렵습니까?");
        assert_eq!(q7.option(OptionLetter::A).text, "0일");
        assert_eq!(q7.option(OptionLetter::B).text, "1–2 days");
    }

    #[test]
    fn interpolate_fills_known_and_keeps_unknown() {
        let out = interpolate(
            "Hi {{ name }}, {{missing}} {{",
            &[("name", "Joi".to_string())],
        );
        assert_eq!(out, "Hi Joi, {{missing}} {{");
    }

    #[test]
    fn header_uses_default_or_translation() {
        let progress = CheckinProgress {
            number: 2,
            total: 4,
            answered: 1,
        };
        assert_eq!(header_subtitle(&DefaultText, progress), "Question 2 of 4");

        let lookup = JsonLookup::from_json(KO).unwrap();
        assert_eq!(header_subtitle(&lookup, progress), "질문 2 / 4");
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(JsonLookup::from_json("{not json").is_err());
    }

    #[test]
    fn locale_files_are_named_by_language_code() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ko.json"), KO).unwrap();

        assert_eq!(
            locale_path(dir.path(), Language::Korean),
            dir.path().join("ko.json")
        );
        let ko = load_locale(dir.path(), Language::Korean).unwrap().unwrap();
        assert_eq!(ko.lookup("survey.q7.A").as_deref(), Some("0일"));
        assert!(load_locale(dir.path(), Language::English).unwrap().is_none());
    }

    #[test]
    fn broken_locale_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), "{").unwrap();

        let err = load_locale(dir.path(), Language::English).unwrap_err();
        assert!(matches!(err, LocaleError::Json { .. }));
        assert!(err.to_string().contains("en.json"));
    }
}
