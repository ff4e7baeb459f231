//! Loading translation sources into a [`Catalog`].
//!
//! A source directory holds one JSON document per language, named
//! `<lang>.json`, with exactly one of them named `<lang>.default.json`.
//! Nested objects are flattened into dotted keys:
//!
//! ```json
//! { "app": { "name": "Demo" }, "greeting": "Hello" }
//! ```
//!
//! becomes `app.name = Demo`, `greeting = Hello`, in document order.

use std::{fs, path::Path};

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use unic_langid::LanguageIdentifier;

use crate::{
    convention::validate_language,
    error::Error,
    types::{SupportedLanguages, TranslationMap},
};

lazy_static! {
    static ref SOURCE_FILE_REGEX: Regex = Regex::new(r"^(.+?)(\.default)?\.json$").unwrap();
}

/// Every language's translations for one synchronization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    default_language: String,
    translations: Vec<(String, TranslationMap)>,
}

impl Catalog {
    pub fn new(default_language: impl Into<String>) -> Self {
        Catalog {
            default_language: default_language.into(),
            translations: Vec::new(),
        }
    }

    /// Adds or replaces the translations of `language`.
    pub fn insert(&mut self, language: impl Into<String>, translations: TranslationMap) {
        let language = language.into();
        match self.translations.iter_mut().find(|(l, _)| *l == language) {
            Some((_, existing)) => *existing = translations,
            None => self.translations.push((language, translations)),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn get(&self, language: &str) -> Option<&TranslationMap> {
        self.translations
            .iter()
            .find(|(l, _)| l == language)
            .map(|(_, map)| map)
    }

    /// Languages with their translations, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationMap)> {
        self.translations.iter().map(|(l, map)| (l.as_str(), map))
    }

    pub fn supported_languages(&self) -> SupportedLanguages {
        self.translations.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Loads every `<lang>[.default].json` file in `dir`, sorted by file name.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let mut file_names = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        file_names.sort();

        let mut default_language: Option<String> = None;
        let mut translations: Vec<(String, TranslationMap)> = Vec::new();

        for file_name in file_names {
            let Some(captures) = SOURCE_FILE_REGEX.captures(&file_name) else {
                continue;
            };
            let path = dir.join(&file_name);
            if !path.is_file() {
                continue;
            }
            let language = captures[1].to_string();
            validate_language(&language)?;
            if language.parse::<LanguageIdentifier>().is_err() {
                tracing::warn!(
                    "'{}' is not a BCP 47 language identifier; using it as-is",
                    language
                );
            }
            if translations.iter().any(|(l, _)| *l == language) {
                return Err(Error::invalid_source(format!(
                    "more than one source file for language `{}`",
                    language
                )));
            }

            if captures.get(2).is_some() {
                if let Some(previous) = &default_language {
                    return Err(Error::invalid_source(format!(
                        "both `{}` and `{}` are marked as default",
                        previous, language
                    )));
                }
                default_language = Some(language.clone());
            }

            let content = fs::read_to_string(&path)?;
            let map = parse_source(&content)
                .map_err(|e| Error::invalid_source(format!("{}: {}", path.display(), e)))?;
            tracing::debug!(language = %language, entries = map.len(), "loaded translations");
            translations.push((language, map));
        }

        let default_language = default_language.ok_or(Error::NoDefaultLanguage)?;
        Ok(Catalog {
            default_language,
            translations,
        })
    }
}

/// Parses one JSON source document into a flat, ordered map.
pub fn parse_source(content: &str) -> Result<TranslationMap, Error> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(_) = &value else {
        return Err(Error::invalid_source("root must be a JSON object"));
    };
    let mut map = TranslationMap::new();
    flatten_into(&mut map, None, &value)?;
    Ok(map)
}

fn flatten_into(map: &mut TranslationMap, prefix: Option<&str>, value: &Value) -> Result<(), Error> {
    let key = || prefix.unwrap_or_default().to_string();
    match value {
        Value::Object(object) => {
            for (name, child) in object {
                let child_key = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, name),
                    None => name.clone(),
                };
                flatten_into(map, Some(&child_key), child)?;
            }
        }
        Value::String(text) => {
            map.insert(key(), text.as_str());
        }
        Value::Number(number) => {
            map.insert(key(), number.to_string());
        }
        Value::Bool(flag) => {
            map.insert(key(), flag.to_string());
        }
        Value::Null | Value::Array(_) => {
            return Err(Error::invalid_source(format!(
                "`{}` must be a string, number, boolean or object",
                key()
            )));
        }
    }
    Ok(())
}
