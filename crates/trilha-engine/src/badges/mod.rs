pub mod ledger;

pub use ledger::{BadgeLedger, UnlockRequirement};
