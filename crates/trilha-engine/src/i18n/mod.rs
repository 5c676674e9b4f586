pub mod manifest;

pub use manifest::{ManifestEntry, ManifestIssue, TranslationManifest};
