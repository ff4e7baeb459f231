//! Core types for locsync.
//! Sources decode into these; the synchronizer derives every artifact from them.

use std::{collections::BTreeSet, fmt::Display, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::merge::DescriptorMerge;

/// Ordered key → value translations for a single language.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// the key at its original position, so generated files stay stable when a
/// source is re-read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: Vec<(String, String)>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TranslationMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for TranslationMap {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// The languages that currently have translations.
///
/// Anything else found on disk is obsolete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedLanguages(BTreeSet<String>);

impl SupportedLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: impl Into<String>) -> bool {
        self.0.insert(language.into())
    }

    pub fn contains(&self, language: &str) -> bool {
        self.0.contains(language)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SupportedLanguages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Signal raised when on-disk state actually changed during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeSignal {
    /// A per-language `.strings` artifact was written or removed.
    ResourceChanged,
    /// The main `Info.plist` was rewritten.
    ConfigurationChanged,
}

impl Display for ChangeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeSignal::ResourceChanged => write!(f, "RESOURCE_CHANGED"),
            ChangeSignal::ConfigurationChanged => write!(f, "CONFIGURATION_CHANGED"),
        }
    }
}

/// The signals raised by one or more operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChangeSet {
    pub resources_changed: bool,
    pub configuration_changed: bool,
}

impl ChangeSet {
    pub fn raise(&mut self, signal: ChangeSignal) {
        match signal {
            ChangeSignal::ResourceChanged => self.resources_changed = true,
            ChangeSignal::ConfigurationChanged => self.configuration_changed = true,
        }
    }

    pub fn absorb(&mut self, other: ChangeSet) {
        self.resources_changed |= other.resources_changed;
        self.configuration_changed |= other.configuration_changed;
    }

    /// Raised signals, `ResourceChanged` first.
    pub fn signals(&self) -> Vec<ChangeSignal> {
        let mut signals = Vec::new();
        if self.resources_changed {
            signals.push(ChangeSignal::ResourceChanged);
        }
        if self.configuration_changed {
            signals.push(ChangeSignal::ConfigurationChanged);
        }
        signals
    }

    pub fn is_empty(&self) -> bool {
        !self.resources_changed && !self.configuration_changed
    }
}

/// Outcome of a synchronization step or of a whole pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub changes: ChangeSet,
    /// Artifacts whose content was (re)written.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub written: Vec<PathBuf>,
    /// Artifacts and directories that were deleted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<PathBuf>,
    /// Result of the `Info.plist` merge, if one was attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<DescriptorMerge>,
}

impl SyncReport {
    pub fn signals(&self) -> Vec<ChangeSignal> {
        self.changes.signals()
    }

    pub fn absorb(&mut self, other: SyncReport) {
        self.changes.absorb(other.changes);
        self.written.extend(other.written);
        self.removed.extend(other.removed);
        if other.descriptor.is_some() {
            self.descriptor = other.descriptor;
        }
    }
}
