pub mod view;

pub use view::{MenuEntry, MenuModule, NavButtons, UiSnapshot};
