use std::collections::HashMap;

use serde::Serialize;

use crate::badges::ledger::UnlockRequirement;
use crate::catalog::descriptor::{CatalogError, CourseDescriptor};

/// Page-level marker in the descriptor that flags bonus pages.
const EXTRAS_TYPE: &str = "extras";

/// Classification of a page within the linear sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Ordinary page, subject to linear unlocking.
    Curriculum,
    /// Bonus page, governed by the badge ledger instead.
    Extras,
}

/// A page in the flattened sequence, with its owning module denormalized in.
#[derive(Debug, Clone, Serialize)]
pub struct FlatPage {
    pub id: String,
    pub title: String,
    pub file: String,
    pub module_id: String,
    pub module_title: String,
    pub kind: PageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<UnlockRequirement>,
}

/// Module header kept for menu grouping: id, title, and the flat indices of
/// its pages.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleGroup {
    pub id: String,
    pub title: String,
    pub page_indices: Vec<usize>,
}

/// The loaded course: ordered modules plus the flattened page sequence.
/// An integer index into the flattened sequence is the canonical position.
/// Flattening happens once per load, never per navigation.
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<ModuleGroup>,
    flat: Vec<FlatPage>,
    index_by_id: HashMap<String, usize>,
}

impl Catalog {
    /// An empty catalog. Navigation against it is a safe no-op; used when the
    /// descriptor fails to load.
    pub fn empty() -> Self {
        Self {
            modules: Vec::new(),
            flat: Vec::new(),
            index_by_id: HashMap::new(),
        }
    }

    /// Flatten a descriptor into the linear sequence, module order then page
    /// order. `extras_module` names the module exempt from linear unlocking.
    pub fn from_descriptor(
        desc: &CourseDescriptor,
        extras_module: &str,
    ) -> Result<Self, CatalogError> {
        let mut flat = Vec::new();
        let mut modules = Vec::with_capacity(desc.modules.len());
        let mut index_by_id = HashMap::new();

        for module in &desc.modules {
            let mut page_indices = Vec::with_capacity(module.pages.len());
            for page in &module.pages {
                let index = flat.len();
                if index_by_id.insert(page.id.clone(), index).is_some() {
                    return Err(CatalogError::DuplicatePage { id: page.id.clone() });
                }
                let kind = if module.id == extras_module
                    || page.kind.as_deref() == Some(EXTRAS_TYPE)
                {
                    PageKind::Extras
                } else {
                    PageKind::Curriculum
                };
                flat.push(FlatPage {
                    id: page.id.clone(),
                    title: page.title.clone(),
                    file: page.file.clone(),
                    module_id: module.id.clone(),
                    module_title: module.title.clone(),
                    kind,
                    requires: page.requires.clone(),
                });
                page_indices.push(index);
            }
            modules.push(ModuleGroup {
                id: module.id.clone(),
                title: module.title.clone(),
                page_indices,
            });
        }

        Ok(Self { modules, flat, index_by_id })
    }

    /// Parse and flatten in one step.
    pub fn from_json(json: &str, extras_module: &str) -> Result<Self, CatalogError> {
        let desc = CourseDescriptor::from_json(json)?;
        Self::from_descriptor(&desc, extras_module)
    }

    /// The flattened sequence.
    pub fn pages(&self) -> &[FlatPage] {
        &self.flat
    }

    /// Page at a flat index.
    pub fn page(&self, index: usize) -> Option<&FlatPage> {
        self.flat.get(index)
    }

    /// Resolve a page id to its flat index.
    pub fn index_of(&self, page_id: &str) -> Option<usize> {
        self.index_by_id.get(page_id).copied()
    }

    /// Module grouping for menu rendering.
    pub fn modules(&self) -> &[ModuleGroup] {
        &self.modules
    }

    /// Number of pages in the flattened sequence.
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Number of curriculum pages (extras excluded); the progress denominator.
    pub fn curriculum_count(&self) -> usize {
        self.flat
            .iter()
            .filter(|p| p.kind == PageKind::Curriculum)
            .count()
    }
}
