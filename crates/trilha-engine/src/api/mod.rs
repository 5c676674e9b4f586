pub mod config;
pub mod types;

pub use config::PlayerConfig;
pub use types::{BlockReason, CueKind, NavCommand, Outcome, PlayerEvent};
