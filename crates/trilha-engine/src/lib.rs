pub mod api;
pub mod badges;
pub mod catalog;
pub mod i18n;
pub mod nav;
pub mod progress;
pub mod projection;

// Re-export key types at crate root for convenience
pub use api::config::PlayerConfig;
pub use api::types::{BlockReason, CueKind, NavCommand, Outcome, PlayerEvent};
pub use badges::ledger::{BadgeLedger, UnlockRequirement};
pub use catalog::descriptor::{CatalogError, CourseDescriptor, ModuleDescriptor, PageDescriptor};
pub use catalog::flatten::{Catalog, FlatPage, PageKind};
pub use i18n::manifest::{ManifestEntry, ManifestIssue, TranslationManifest};
pub use nav::machine::NavigationMachine;
pub use nav::policy::{page_navigable, UnlockStatus};
pub use progress::keys;
pub use progress::store::{MemoryStore, ProgressStore, StoreError};
pub use projection::view::{MenuEntry, MenuModule, NavButtons, UiSnapshot};
