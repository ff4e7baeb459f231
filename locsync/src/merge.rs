//! Structured merge of localization keys into the main descriptor (`Info.plist`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    formats::plist::{Dictionary, Document, Value},
    traits::Parser,
    types::TranslationMap,
};

/// What happened to the descriptor document during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorMerge {
    /// At least one key was added or changed and the file was rewritten.
    Updated,
    /// Every update was already present; the file was not touched.
    Unchanged,
    /// The document does not exist; nothing was merged.
    Missing,
}

/// Applies `updates` in order onto `dict`.
///
/// A key is written only when it is absent or its value is not the same
/// string. Keys not named in `updates` are left alone. Returns whether
/// anything was written.
pub fn merge(dict: &mut Dictionary, updates: &TranslationMap) -> bool {
    let mut changed = false;
    for (key, value) in updates.iter() {
        if dict.get(key).and_then(Value::as_str) != Some(value) {
            dict.insert(key, Value::String(value.to_string()));
            changed = true;
        }
    }
    changed
}

/// Merges `updates` into the property list at `path`.
///
/// A missing file is only worth a warning: the project may not have been
/// prepared yet. A file that cannot be parsed is an error.
pub fn merge_descriptor_file<P: AsRef<Path>>(
    path: P,
    updates: &TranslationMap,
) -> Result<DescriptorMerge, Error> {
    let path = path.as_ref();
    let Some(mut document) = Document::read_if_exists(path)? else {
        tracing::warn!(
            "'{}' doesn't exist: unable to set default language",
            path.display()
        );
        return Ok(DescriptorMerge::Missing);
    };

    if !merge(&mut document.root, updates) {
        return Ok(DescriptorMerge::Unchanged);
    }

    document.save(path)?;
    tracing::debug!(path = %path.display(), "descriptor updated");
    Ok(DescriptorMerge::Updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn descriptor(entries: &[(&str, Value)]) -> Dictionary {
        let mut dict = Dictionary::new();
        for (key, value) in entries {
            dict.insert(*key, value.clone());
        }
        dict
    }

    #[test]
    fn test_merge_adds_missing_keys() {
        let mut dict = Dictionary::new();
        let changed = merge(&mut dict, &TranslationMap::from([("CFBundleName", "Foo")]));
        assert!(changed);
        assert_eq!(dict.get("CFBundleName").and_then(Value::as_str), Some("Foo"));
    }

    #[test]
    fn test_merge_identical_values_is_noop() {
        let mut dict = descriptor(&[("CFBundleName", Value::String("Foo".to_string()))]);
        let before = dict.clone();
        let changed = merge(&mut dict, &TranslationMap::from([("CFBundleName", "Foo")]));
        assert!(!changed);
        assert_eq!(dict, before);
    }

    #[test]
    fn test_merge_replaces_different_value_in_place() {
        let mut dict = descriptor(&[
            ("CFBundleName", Value::String("Old".to_string())),
            ("Other", Value::Boolean(true)),
        ]);
        let changed = merge(&mut dict, &TranslationMap::from([("CFBundleName", "New")]));
        assert!(changed);
        let keys: Vec<_> = dict.keys().collect();
        assert_eq!(keys, vec!["CFBundleName", "Other"]);
        assert_eq!(dict.get("CFBundleName").and_then(Value::as_str), Some("New"));
    }

    #[test]
    fn test_merge_non_string_value_counts_as_different() {
        let mut dict = descriptor(&[("Flag", Value::Boolean(true))]);
        assert!(merge(&mut dict, &TranslationMap::from([("Flag", "true")])));
        assert_eq!(dict.get("Flag"), Some(&Value::String("true".to_string())));
    }

    #[test]
    fn test_merge_preserves_foreign_keys() {
        let mut dict = descriptor(&[
            ("SomeOtherSetting", Value::Boolean(true)),
            ("CFBundleName", Value::String("Old".to_string())),
        ]);
        merge(
            &mut dict,
            &TranslationMap::from([("CFBundleName", "New"), ("CFBundleDevelopmentRegion", "fr")]),
        );
        assert_eq!(dict.get("SomeOtherSetting"), Some(&Value::Boolean(true)));
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_merge_descriptor_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Info.plist");
        let outcome =
            merge_descriptor_file(&path, &TranslationMap::from([("CFBundleName", "Foo")])).unwrap();
        assert_eq!(outcome, DescriptorMerge::Missing);
        assert!(!path.exists());
    }

    #[test]
    fn test_merge_descriptor_file_updates_then_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Info.plist");
        fs::write(
            &path,
            "<plist version=\"1.0\"><dict><key>SomeOtherSetting</key><true/></dict></plist>",
        )
        .unwrap();
        let updates = TranslationMap::from([("CFBundleName", "Foo")]);

        assert_eq!(
            merge_descriptor_file(&path, &updates).unwrap(),
            DescriptorMerge::Updated
        );
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            merge_descriptor_file(&path, &updates).unwrap(),
            DescriptorMerge::Unchanged
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), written);

        let document = Document::read_from(&path).unwrap();
        assert_eq!(
            document.root.get("SomeOtherSetting"),
            Some(&Value::Boolean(true))
        );
    }

    #[test]
    fn test_merge_descriptor_file_malformed_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Info.plist");
        fs::write(&path, "not a plist").unwrap();
        let result = merge_descriptor_file(&path, &TranslationMap::from([("CFBundleName", "Foo")]));
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not a plist");
    }

    #[test]
    fn test_merge_descriptor_file_rejects_duplicate_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Info.plist");
        let content = "<plist version=\"1.0\"><dict><key>X</key><string>1</string><key>X</key><string>2</string></dict></plist>";
        fs::write(&path, content).unwrap();

        let result = merge_descriptor_file(&path, &TranslationMap::from([("CFBundleName", "Foo")]));

        assert!(matches!(result, Err(Error::MalformedDescriptor(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_merge_descriptor_file_unencodable_value_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Info.plist");
        let content = "<plist version=\"1.0\"><dict><key>SomeOtherSetting</key><true/></dict></plist>";
        fs::write(&path, content).unwrap();

        let result =
            merge_descriptor_file(&path, &TranslationMap::from([("CFBundleName", "bad\u{1}")]));

        assert!(matches!(result, Err(Error::UnencodableText(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}
