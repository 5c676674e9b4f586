use serde::Serialize;

use crate::badges::ledger::BadgeLedger;
use crate::catalog::flatten::{FlatPage, PageKind};

/// Menu/query state of a page relative to the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnlockStatus {
    /// Not yet reachable by linear progress.
    Locked,
    /// Bonus page whose badge requirement is unmet.
    ExtrasLocked,
    /// Reachable, ahead of or at the frontier.
    Unlocked,
    /// Reachable and behind the current position.
    Completed,
    /// The current page.
    Active,
}

/// The unlock policy: pure function of page, position bookkeeping, and the
/// badge ledger.
///
/// A curriculum page is navigable iff its flat index has been reached.
/// An extras page is governed by its badge requirement alone (the hub and
/// requirement-free pages are always open) — linear position never locks
/// extras, and extras never advance linear position.
pub fn page_navigable(
    page: &FlatPage,
    index: usize,
    max_index_reached: usize,
    ledger: &BadgeLedger,
) -> bool {
    match page.kind {
        PageKind::Extras => page
            .requires
            .as_ref()
            .is_none_or(|req| ledger.satisfies(req)),
        PageKind::Curriculum => index <= max_index_reached,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::ledger::UnlockRequirement;

    fn page(kind: PageKind, requires: Option<UnlockRequirement>) -> FlatPage {
        FlatPage {
            id: "p".to_string(),
            title: "P".to_string(),
            file: "p.html".to_string(),
            module_id: "m1".to_string(),
            module_title: "M1".to_string(),
            kind,
            requires,
        }
    }

    #[test]
    fn curriculum_locked_past_frontier() {
        let ledger = BadgeLedger::new();
        let p = page(PageKind::Curriculum, None);
        assert!(page_navigable(&p, 3, 3, &ledger));
        assert!(page_navigable(&p, 1, 3, &ledger));
        assert!(!page_navigable(&p, 4, 3, &ledger));
    }

    #[test]
    fn extras_without_requirement_always_open() {
        let ledger = BadgeLedger::new();
        let p = page(PageKind::Extras, None);
        assert!(page_navigable(&p, 99, 0, &ledger));
    }

    #[test]
    fn extras_requirement_gates_regardless_of_position() {
        let mut ledger = BadgeLedger::new();
        let p = page(
            PageKind::Extras,
            Some(UnlockRequirement::Module { module: "m1".to_string() }),
        );
        // Even an extras page inside the reached range stays badge-locked.
        assert!(!page_navigable(&p, 2, 10, &ledger));
        ledger.award("m1", "quiz");
        assert!(page_navigable(&p, 2, 10, &ledger));
    }
}
