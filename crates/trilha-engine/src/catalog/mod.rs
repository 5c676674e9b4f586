pub mod descriptor;
pub mod flatten;

pub use descriptor::{CatalogError, CourseDescriptor, ModuleDescriptor, PageDescriptor};
pub use flatten::{Catalog, FlatPage, ModuleGroup, PageKind};
