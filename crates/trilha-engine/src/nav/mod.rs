pub mod machine;
pub mod policy;

pub use machine::NavigationMachine;
pub use policy::{page_navigable, UnlockStatus};
