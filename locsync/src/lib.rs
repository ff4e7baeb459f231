#![forbid(unsafe_code)]
//! Keeps an iOS app's localized resources in sync with its translations.
//!
//! Given one ordered key/value map per language, locsync writes
//! `<lang>.lproj/Localizable.strings` and `<lang>.lproj/InfoPlist.strings`,
//! merges the default language's display name and region into
//! `Info.plist`, and removes the resources of languages that are gone.
//! Files are only written when their content actually changes, and every
//! operation reports which [`ChangeSignal`]s it raised, so a build hook can
//! skip rebuilds when nothing moved.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locsync::{Catalog, Synchronizer};
//!
//! let catalog = Catalog::load_dir("app/i18n")?;
//! let report = Synchronizer::new("App_Resources/iOS").run(&catalog)?;
//! for signal in report.signals() {
//!     println!("{signal}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Descriptor keys
//!
//! - `app.name` sets `CFBundleDisplayName` and `CFBundleName`
//! - `ios.info.plist.<Key>` sets `<Key>`
//!
//! Everything else only lands in `Localizable.strings`.

pub mod convention;
pub mod error;
pub mod formats;
pub mod merge;
pub mod prune;
pub mod routing;
pub mod source;
pub mod sync;
pub mod traits;
pub mod types;
pub mod writer;

// Re-export most used types for easy consumption
pub use crate::{
    convention::{Convention, IOS},
    error::Error,
    merge::DescriptorMerge,
    source::Catalog,
    sync::Synchronizer,
    types::{ChangeSet, ChangeSignal, SupportedLanguages, SyncReport, TranslationMap},
};
