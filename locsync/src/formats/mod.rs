//! File formats locsync reads and writes.
//!
//! - [`strings`]: Apple `.strings`, generated per language.
//! - [`plist`]: XML property lists, used for the main `Info.plist`.

pub mod plist;
pub mod strings;

// Reexporting the formats for easier access
pub use plist::Document as PlistDocument;
pub use strings::Format as StringsFormat;
