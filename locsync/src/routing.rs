//! Rules deriving descriptor (`Info.plist`) entries from translation keys.
//!
//! Rules are evaluated in table order for every key; the first rule that
//! matches decides which descriptor keys the value is copied to. Keys no
//! rule matches stay out of the descriptor.

use crate::types::TranslationMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `key` is copied verbatim to each of `targets`.
    Alias {
        key: &'static str,
        targets: &'static [&'static str],
    },
    /// Keys starting with `prefix` are copied to the rest of the key.
    StripPrefix { prefix: &'static str },
}

impl Rule {
    /// Descriptor keys `key` maps to, or `None` if the rule does not apply.
    pub fn targets(&self, key: &str) -> Option<Vec<String>> {
        match self {
            Rule::Alias { key: alias, targets } if *alias == key => {
                Some(targets.iter().map(|t| t.to_string()).collect())
            }
            Rule::Alias { .. } => None,
            Rule::StripPrefix { prefix } => match key.strip_prefix(*prefix) {
                // A bare prefix names no descriptor key.
                Some("") => Some(Vec::new()),
                Some(rest) => Some(vec![rest.to_string()]),
                None => None,
            },
        }
    }
}

/// Derives the descriptor subset of `map` under `rules`, in map order.
///
/// When two keys route to the same descriptor key, the later value wins
/// and the entry keeps the position of the first.
pub fn descriptor_entries(rules: &[Rule], map: &TranslationMap) -> TranslationMap {
    let mut entries = TranslationMap::new();
    for (key, value) in map.iter() {
        if let Some(targets) = rules.iter().find_map(|rule| rule.targets(key)) {
            for target in targets {
                entries.insert(target, value);
            }
        }
    }
    entries
}
