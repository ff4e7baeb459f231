//! CLI library for testing purposes

pub mod patterns;
pub mod sync;
pub mod validation;

pub use locsync::Synchronizer;
pub use sync::{SyncOptions, render_report};
