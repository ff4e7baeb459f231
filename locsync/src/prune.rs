//! Removal of per-language artifacts for languages that are no longer supported.

use std::{fs, io, path::Path};

use crate::{
    convention::Convention,
    error::Error,
    types::{ChangeSignal, SupportedLanguages, SyncReport},
    writer::{remove_dir_if_empty, remove_file_if_exists},
};

/// Deletes the managed files of every obsolete language directory under `root`.
///
/// Only the file names listed by [`Convention::managed_files`] are removed.
/// A directory goes away only once it is empty, so anything else a user
/// keeps there survives. A missing `root` has nothing to prune.
pub fn prune_obsolete<P: AsRef<Path>>(
    root: P,
    convention: &Convention,
    supported: &SupportedLanguages,
) -> Result<SyncReport, Error> {
    let root = root.as_ref();
    let mut report = SyncReport::default();

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(report),
        Err(e) => return Err(Error::Io(e)),
    };
    let mut names = entries
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();

    for name in names {
        let Some(language) = convention.language_of_dir(&name) else {
            continue;
        };
        if supported.contains(language) {
            continue;
        }
        let language_dir = root.join(&name);
        if !language_dir.is_dir() {
            continue;
        }

        let mut changed = false;
        for file_name in convention.managed_files() {
            let file = language_dir.join(file_name);
            if remove_file_if_exists(&file)? {
                report.removed.push(file);
                changed = true;
            }
        }
        if remove_dir_if_empty(&language_dir)? {
            report.removed.push(language_dir);
            changed = true;
        }
        if changed {
            tracing::debug!(language, "pruned obsolete language resources");
            report.changes.raise(ChangeSignal::ResourceChanged);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::IOS;

    fn language_dir(root: &Path, language: &str, files: &[&str]) {
        let dir = root.join(format!("{language}.lproj"));
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), "\"k\" = \"v\";\n").unwrap();
        }
    }

    fn supported(languages: &[&str]) -> SupportedLanguages {
        languages.iter().copied().collect()
    }

    #[test]
    fn test_prune_removes_obsolete_language_dir() {
        let root = tempfile::tempdir().unwrap();
        for language in ["en", "fr", "de"] {
            language_dir(
                root.path(),
                language,
                &["InfoPlist.strings", "Localizable.strings"],
            );
        }

        let report = prune_obsolete(root.path(), &IOS, &supported(&["en", "fr"])).unwrap();

        assert!(report.changes.resources_changed);
        assert!(root.path().join("en.lproj").is_dir());
        assert!(root.path().join("fr.lproj").is_dir());
        assert!(!root.path().join("de.lproj").exists());
        assert_eq!(report.removed.len(), 3);
    }

    #[test]
    fn test_prune_keeps_dir_with_unmanaged_files() {
        let root = tempfile::tempdir().unwrap();
        language_dir(
            root.path(),
            "de",
            &["InfoPlist.strings", "Localizable.strings", "Main.storyboard"],
        );

        let report = prune_obsolete(root.path(), &IOS, &supported(&["en"])).unwrap();

        let de = root.path().join("de.lproj");
        assert!(report.changes.resources_changed);
        assert!(de.is_dir());
        assert!(de.join("Main.storyboard").exists());
        assert!(!de.join("InfoPlist.strings").exists());
        assert!(!de.join("Localizable.strings").exists());
    }

    #[test]
    fn test_prune_empty_obsolete_dir_is_removed() {
        let root = tempfile::tempdir().unwrap();
        language_dir(root.path(), "it", &[]);

        let report = prune_obsolete(root.path(), &IOS, &supported(&["en"])).unwrap();

        assert!(report.changes.resources_changed);
        assert!(!root.path().join("it.lproj").exists());
    }

    #[test]
    fn test_prune_untouched_when_nothing_obsolete() {
        let root = tempfile::tempdir().unwrap();
        language_dir(root.path(), "en", &["Localizable.strings"]);
        language_dir(root.path(), "de", &["Other.txt"]);

        let report = prune_obsolete(root.path(), &IOS, &supported(&["en"])).unwrap();

        assert!(report.changes.is_empty());
        assert!(report.removed.is_empty());
        assert!(root.path().join("de.lproj").join("Other.txt").exists());
    }

    #[test]
    fn test_prune_ignores_non_matching_entries() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("Assets.xcassets")).unwrap();
        fs::write(root.path().join("es.lproj"), "a file, not a directory").unwrap();
        fs::write(root.path().join("Info.plist"), "<plist/>").unwrap();

        let report = prune_obsolete(root.path(), &IOS, &supported(&["en"])).unwrap();

        assert!(report.changes.is_empty());
        assert!(root.path().join("Assets.xcassets").is_dir());
        assert!(root.path().join("es.lproj").is_file());
    }

    #[test]
    fn test_prune_missing_root() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("missing");
        let report = prune_obsolete(&missing, &IOS, &supported(&["en"])).unwrap();
        assert!(report.changes.is_empty());
    }
}
