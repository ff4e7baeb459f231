//! Platform naming conventions: where artifacts live and what they are called.

use crate::{error::Error, routing::Rule};

/// The naming table one synchronizer works with.
///
/// Everything platform specific the engine needs is here, so another
/// resource layout can be targeted by passing a different value to
/// [`crate::Synchronizer::with_convention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convention {
    /// Appended to a language identifier to name its directory (`.lproj`).
    pub language_dir_suffix: &'static str,
    /// Full translation set, keys encoded.
    pub localization_file: &'static str,
    /// Descriptor subset, keys raw.
    pub descriptor_strings_file: &'static str,
    /// Main descriptor document, directly under the resource root.
    pub main_descriptor_file: &'static str,
    /// Descriptor key set to the default language.
    pub development_region_key: &'static str,
    pub descriptor_rules: &'static [Rule],
}

pub const IOS_DESCRIPTOR_RULES: &[Rule] = &[
    Rule::Alias {
        key: "app.name",
        targets: &["CFBundleDisplayName", "CFBundleName"],
    },
    Rule::StripPrefix {
        prefix: "ios.info.plist.",
    },
];

/// iOS / Xcode resource layout.
pub const IOS: Convention = Convention {
    language_dir_suffix: ".lproj",
    localization_file: "Localizable.strings",
    descriptor_strings_file: "InfoPlist.strings",
    main_descriptor_file: "Info.plist",
    development_region_key: "CFBundleDevelopmentRegion",
    descriptor_rules: IOS_DESCRIPTOR_RULES,
};

impl Default for Convention {
    fn default() -> Self {
        IOS
    }
}

impl Convention {
    /// Every file name the synchronizer may create inside a language directory.
    pub fn managed_files(&self) -> [&'static str; 2] {
        [self.descriptor_strings_file, self.localization_file]
    }

    /// Directory name for `language`, e.g. `fr.lproj`.
    pub fn language_dir_name(&self, language: &str) -> Result<String, Error> {
        validate_language(language)?;
        Ok(format!("{}{}", language, self.language_dir_suffix))
    }

    /// The language a directory name stands for, if it follows the convention.
    pub fn language_of_dir<'a>(&self, dir_name: &'a str) -> Option<&'a str> {
        dir_name
            .strip_suffix(self.language_dir_suffix)
            .filter(|language| !language.is_empty())
    }
}

/// Rejects identifiers that would not stay a single path component.
pub fn validate_language(language: &str) -> Result<(), Error> {
    let invalid = language.is_empty()
        || language == "."
        || language == ".."
        || language.contains(['/', '\\', '\0']);
    if invalid {
        return Err(Error::InvalidLanguage(language.to_string()));
    }
    Ok(())
}
