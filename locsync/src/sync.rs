//! The synchronization orchestrator.
//!
//! A [`Synchronizer`] owns one resource root. For every language it writes
//! two `.strings` artifacts into `<root>/<lang>.lproj/`, merges the default
//! language's descriptor entries into `<root>/Info.plist`, and prunes the
//! directories of languages that disappeared. Each step reports whether it
//! changed anything, so callers only rebuild when needed.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::{
    convention::{Convention, IOS},
    error::Error,
    formats::strings::{Format, KeyEncoding},
    merge::{DescriptorMerge, merge_descriptor_file},
    prune,
    routing::descriptor_entries,
    source::Catalog,
    types::{ChangeSignal, SupportedLanguages, SyncReport, TranslationMap},
    writer::{create_dir_if_needed, write_if_needed},
};

/// Materializes translations under one resource root.
///
/// Passes over the same root must not run concurrently; nothing here locks.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    root: PathBuf,
    convention: Convention,
}

impl Synchronizer {
    /// Synchronizer for an iOS resource directory (`App_Resources/iOS`).
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self::with_convention(root, IOS)
    }

    pub fn with_convention<P: Into<PathBuf>>(root: P, convention: Convention) -> Self {
        Synchronizer {
            root: root.into(),
            convention,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn convention(&self) -> &Convention {
        &self.convention
    }

    /// Directory holding the artifacts of `language`.
    pub fn language_dir(&self, language: &str) -> Result<PathBuf, Error> {
        Ok(self.root.join(self.convention.language_dir_name(language)?))
    }

    /// Path of the main descriptor document.
    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(self.convention.main_descriptor_file)
    }

    /// The descriptor entries `translations` yields under this convention.
    pub fn descriptor_entries(&self, translations: &TranslationMap) -> TranslationMap {
        descriptor_entries(self.convention.descriptor_rules, translations)
    }

    /// Writes the artifacts of one language.
    ///
    /// For the default language the descriptor entries, plus the
    /// development region, are also merged into the main descriptor.
    /// The root itself must already exist; only `<lang>.lproj` is created.
    pub fn sync_language(
        &self,
        language: &str,
        is_default_language: bool,
        translations: &TranslationMap,
    ) -> Result<SyncReport, Error> {
        let language_dir = self.language_dir(language)?;
        if !self.root.is_dir() {
            return Err(Error::MissingResourceRoot(self.root.clone()));
        }
        let mut descriptor = self.descriptor_entries(translations);
        let mut report = SyncReport::default();

        create_dir_if_needed(&language_dir)?;
        let artifacts = [
            (
                self.convention.localization_file,
                Format::from_map(translations, KeyEncoding::Encoded),
            ),
            (
                self.convention.descriptor_strings_file,
                Format::from_map(&descriptor, KeyEncoding::Raw),
            ),
        ];
        for (file_name, format) in artifacts {
            let path = language_dir.join(file_name);
            if write_if_needed(&path, format.to_string())? {
                report.written.push(path);
                report.changes.raise(ChangeSignal::ResourceChanged);
            }
        }

        if is_default_language {
            descriptor.insert(self.convention.development_region_key, language);
            let outcome = merge_descriptor_file(self.descriptor_path(), &descriptor)?;
            if outcome == DescriptorMerge::Updated {
                report.written.push(self.descriptor_path());
                report.changes.raise(ChangeSignal::ConfigurationChanged);
            }
            report.descriptor = Some(outcome);
        }

        Ok(report)
    }

    /// Removes the artifacts of languages not in `supported`.
    pub fn prune_obsolete(&self, supported: &SupportedLanguages) -> Result<SyncReport, Error> {
        prune::prune_obsolete(&self.root, &self.convention, supported)
    }

    /// Runs one full synchronization pass.
    ///
    /// Languages are synced in catalog order, then obsolete ones pruned.
    /// An error stops the pass; artifacts already written stay on disk and
    /// the next pass picks up from there.
    pub fn run(&self, catalog: &Catalog) -> Result<SyncReport, Error> {
        if catalog.get(catalog.default_language()).is_none() {
            return Err(Error::invalid_source(format!(
                "no translations for the default language `{}`",
                catalog.default_language()
            )));
        }

        let mut report = SyncReport::default();
        for (language, translations) in catalog.iter() {
            let is_default_language = language == catalog.default_language();
            report.absorb(self.sync_language(language, is_default_language, translations)?);
        }
        report.absorb(self.prune_obsolete(&catalog.supported_languages())?);

        tracing::info!(
            root = %self.root.display(),
            written = report.written.len(),
            removed = report.removed.len(),
            resources_changed = report.changes.resources_changed,
            configuration_changed = report.changes.configuration_changed,
            "synchronization pass finished"
        );
        Ok(report)
    }

    /// Glob patterns matching every artifact this synchronizer generates.
    ///
    /// A live-reload watcher excludes these so that regenerating resources
    /// does not trigger another pass.
    pub fn exclusion_patterns(&self) -> Vec<PathBuf> {
        let any_language_dir = format!("*{}", self.convention.language_dir_suffix);
        self.convention
            .managed_files()
            .iter()
            .map(|file_name| self.root.join(&any_language_dir).join(file_name))
            .collect()
    }

    /// [`Synchronizer::exclusion_patterns`] compiled into a matcher.
    ///
    /// `*` does not match across path separators.
    pub fn exclusion_matcher(&self) -> Result<GlobSet, Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in self.exclusion_patterns() {
            let glob = GlobBuilder::new(&pattern.to_string_lossy())
                .literal_separator(true)
                .build()?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_language_dir_and_descriptor_path() {
        let sync = Synchronizer::new("/app/App_Resources/iOS");
        assert_eq!(
            sync.language_dir("fr").unwrap(),
            PathBuf::from("/app/App_Resources/iOS/fr.lproj")
        );
        assert_eq!(
            sync.descriptor_path(),
            PathBuf::from("/app/App_Resources/iOS/Info.plist")
        );
        assert!(sync.language_dir("../fr").is_err());
    }

    #[test]
    fn test_exclusion_patterns() {
        let sync = Synchronizer::new("/res");
        assert_eq!(
            sync.exclusion_patterns(),
            vec![
                PathBuf::from("/res/*.lproj/InfoPlist.strings"),
                PathBuf::from("/res/*.lproj/Localizable.strings"),
            ]
        );
    }

    #[test]
    fn test_exclusion_matcher() {
        let sync = Synchronizer::new("/res");
        let matcher = sync.exclusion_matcher().unwrap();
        assert!(matcher.is_match("/res/fr.lproj/Localizable.strings"));
        assert!(matcher.is_match("/res/zh-Hans.lproj/InfoPlist.strings"));
        assert!(!matcher.is_match("/res/fr.lproj/Main.storyboard"));
        assert!(!matcher.is_match("/res/nested/fr.lproj/Localizable.strings"));
        assert!(!matcher.is_match("/app/i18n/fr.json"));
    }

    #[test]
    fn test_sync_language_writes_both_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let sync = Synchronizer::new(root.path());
        let translations = TranslationMap::from([
            ("app.name", "Foo"),
            ("ios.info.plist.CFBundleVersion", "2"),
            ("other.key", "x"),
        ]);

        let report = sync.sync_language("fr", false, &translations).unwrap();

        assert_eq!(report.signals(), vec![ChangeSignal::ResourceChanged]);
        assert_eq!(report.descriptor, None);
        let dir = root.path().join("fr.lproj");
        assert_eq!(
            fs::read_to_string(dir.join("Localizable.strings")).unwrap(),
            "\"app.name\" = \"Foo\";\n\"ios.info.plist.CFBundleVersion\" = \"2\";\n\"other.key\" = \"x\";\n"
        );
        assert_eq!(
            fs::read_to_string(dir.join("InfoPlist.strings")).unwrap(),
            "\"CFBundleDisplayName\" = \"Foo\";\n\"CFBundleName\" = \"Foo\";\n\"CFBundleVersion\" = \"2\";\n"
        );
    }

    #[test]
    fn test_sync_language_requires_existing_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("does").join("not").join("exist");
        let sync = Synchronizer::new(&root);

        let result = sync.sync_language("en", false, &TranslationMap::from([("a", "b")]));

        assert!(matches!(result, Err(Error::MissingResourceRoot(path)) if path == root));
        assert!(!temp.path().join("does").exists());
    }

    #[test]
    fn test_sync_language_second_run_is_silent() {
        let root = tempfile::tempdir().unwrap();
        let sync = Synchronizer::new(root.path());
        let translations = TranslationMap::from([("hello", "Hello")]);

        sync.sync_language("en", false, &translations).unwrap();
        let report = sync.sync_language("en", false, &translations).unwrap();

        assert!(report.changes.is_empty());
        assert!(report.written.is_empty());
    }

    #[test]
    fn test_run_requires_default_translations() {
        let root = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::new("en");
        catalog.insert("fr", TranslationMap::new());
        let result = Synchronizer::new(root.path()).run(&catalog);
        assert!(matches!(result, Err(Error::InvalidSource(_))));
    }
}
