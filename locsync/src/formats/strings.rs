//! Support for Apple `.strings` localization files.
//!
//! Only writing is supported: locsync owns these files and never needs to
//! read them back. A [`TranslationMap`] renders as `"key" = "value";` lines.

use std::fmt::{Display, Formatter};

use crate::types::TranslationMap;

/// Escapes a value so it can be embedded in a double-quoted `.strings` literal.
pub fn encode_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => encoded.push_str(r"\\"),
            '"' => encoded.push_str(r#"\""#),
            '\n' => encoded.push_str(r"\n"),
            '\r' => encoded.push_str(r"\r"),
            '\t' => encoded.push_str(r"\t"),
            other => encoded.push(other),
        }
    }
    encoded
}

/// Escapes a localization key.
///
/// `.strings` keys are quoted literals too, so they follow the value rules.
/// Only `Localizable.strings` keys go through here; `InfoPlist.strings`
/// keys are plist identifiers and are written raw.
pub fn encode_key(key: &str) -> String {
    encode_value(key)
}

/// Whether keys are escaped when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    /// Keys go through [`encode_key`] (`Localizable.strings`).
    Encoded,
    /// Keys are written as given (`InfoPlist.strings`).
    Raw,
}

/// An Apple `.strings` file: ordered pairs plus the key rendering rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// Unescaped key-value pairs, in file order.
    pub pairs: Vec<Pair>,
    pub key_encoding: KeyEncoding,
}

impl Format {
    /// Builds the file for `map`, keeping the map's order.
    pub fn from_map(map: &TranslationMap, key_encoding: KeyEncoding) -> Self {
        Format {
            pairs: map
                .iter()
                .map(|(key, value)| Pair {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            key_encoding,
        }
    }
}

/// Renders one `"key" = "value";` line per pair, no header and no comments.
impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for pair in &self.pairs {
            let key = match self.key_encoding {
                KeyEncoding::Encoded => encode_key(&pair.key),
                KeyEncoding::Raw => pair.key.clone(),
            };
            writeln!(f, "\"{}\" = \"{}\";", key, encode_value(&pair.value))?;
        }
        Ok(())
    }
}

/// A single key-value pair in a `.strings` file, stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}
