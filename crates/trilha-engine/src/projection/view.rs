use serde::Serialize;

use crate::badges::ledger::BadgeLedger;
use crate::catalog::flatten::PageKind;
use crate::nav::machine::NavigationMachine;
use crate::nav::policy::UnlockStatus;

/// View model for the whole chrome: menu tree, nav buttons, progress bar.
///
/// A pure re-synchronization pass — recomputed from machine state after every
/// transition, holding nothing the host couldn't rebuild. The host applies it
/// to the DOM; nothing here mutates navigation state.
#[derive(Debug, Clone, Serialize)]
pub struct UiSnapshot {
    pub menu: Vec<MenuModule>,
    pub nav: NavButtons,
    /// Percentage over curriculum pages only; extras never count.
    pub progress_percent: u32,
}

/// One collapsible module group in the sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct MenuModule {
    pub id: String,
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

/// One page link in the menu, with exactly one state.
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub page_id: String,
    pub title: String,
    pub state: UnlockStatus,
}

/// Previous/next button state. `visible` is false on extras pages, where the
/// linear footer is hidden entirely.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavButtons {
    pub visible: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl UiSnapshot {
    /// Project the machine's current state into a renderable snapshot.
    pub fn project(machine: &NavigationMachine, ledger: &BadgeLedger) -> Self {
        let catalog = machine.catalog();

        let menu = catalog
            .modules()
            .iter()
            .map(|module| MenuModule {
                id: module.id.clone(),
                title: module.title.clone(),
                entries: module
                    .page_indices
                    .iter()
                    .filter_map(|&index| {
                        catalog.page(index).map(|page| MenuEntry {
                            page_id: page.id.clone(),
                            title: page.title.clone(),
                            state: machine.unlock_status(index, ledger),
                        })
                    })
                    .collect(),
            })
            .collect();

        let on_extras = machine
            .current_page()
            .map(|p| p.kind == PageKind::Extras)
            .unwrap_or(false);
        let last_index = catalog.len().saturating_sub(1);
        let nav = NavButtons {
            visible: !on_extras,
            prev_enabled: !catalog.is_empty() && machine.current_index() > 0,
            next_enabled: !catalog.is_empty()
                && machine.current_index() < last_index
                && !machine.gateway_blocked(),
        };

        Self {
            menu,
            nav,
            progress_percent: progress_percent(machine),
        }
    }
}

/// Progress over curriculum pages. While the learner sits on an extras page,
/// the last curriculum position is used instead of the extras index.
fn progress_percent(machine: &NavigationMachine) -> u32 {
    let catalog = machine.catalog();
    let total = catalog.curriculum_count();
    if total == 0 {
        return 0;
    }
    let position = machine.last_curriculum_index();
    let reached = catalog
        .pages()
        .iter()
        .take(position + 1)
        .filter(|p| p.kind == PageKind::Curriculum)
        .count();
    ((reached as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::PlayerConfig;
    use crate::api::types::NavCommand;
    use crate::catalog::flatten::Catalog;
    use crate::progress::store::MemoryStore;

    fn course_json() -> &'static str {
        r#"{
            "modules": [
                { "id": "m1", "title": "Módulo 1", "pages": [
                    { "id": "intro", "title": "Boas-vindas", "file": "paginas/intro.html" },
                    { "id": "m1-p1", "title": "P1", "file": "paginas/m1/p1.html" },
                    { "id": "m1-p2", "title": "P2", "file": "paginas/m1/p2.html" },
                    { "id": "m1-p3", "title": "P3", "file": "paginas/m1/p3.html" },
                    { "id": "m1-p4", "title": "P4", "file": "paginas/m1/p4.html" }
                ] },
                { "id": "extras", "title": "Extras", "pages": [
                    { "id": "extras-hub", "title": "Hub", "file": "paginas/extras/hub.html" },
                    { "id": "extras-arraste", "title": "Arraste", "file": "paginas/extras/a.html",
                      "requires": { "module": "m1" } }
                ] }
            ]
        }"#
    }

    fn machine(config: PlayerConfig) -> NavigationMachine {
        let catalog = Catalog::from_json(course_json(), "extras").unwrap();
        let mut machine =
            NavigationMachine::new(catalog, Box::new(MemoryStore::new()), config);
        machine.initialize();
        machine
    }

    fn no_gateway() -> PlayerConfig {
        PlayerConfig { gateway_page: None, ..PlayerConfig::default() }
    }

    #[test]
    fn fresh_snapshot() {
        let machine = machine(no_gateway());
        let snapshot = UiSnapshot::project(&machine, &BadgeLedger::new());

        assert_eq!(snapshot.menu.len(), 2);
        assert_eq!(snapshot.menu[0].entries[0].state, UnlockStatus::Active);
        assert_eq!(snapshot.menu[0].entries[1].state, UnlockStatus::Locked);
        assert_eq!(snapshot.menu[1].entries[0].state, UnlockStatus::Unlocked);
        assert_eq!(snapshot.menu[1].entries[1].state, UnlockStatus::ExtrasLocked);
        assert!(!snapshot.nav.prev_enabled);
        assert!(snapshot.nav.next_enabled);
        assert!(snapshot.nav.visible);
        // 1 of 5 curriculum pages.
        assert_eq!(snapshot.progress_percent, 20);
    }

    #[test]
    fn gateway_disables_next() {
        let machine = machine(PlayerConfig {
            gateway_page: Some("intro".to_string()),
            ..PlayerConfig::default()
        });
        let snapshot = UiSnapshot::project(&machine, &BadgeLedger::new());
        assert!(!snapshot.nav.next_enabled);
    }

    #[test]
    fn progress_counts_curriculum_only() {
        let mut machine = machine(no_gateway());
        let ledger = BadgeLedger::new();
        for _ in 0..4 {
            machine.handle(NavCommand::Next, &ledger);
        }
        let snapshot = UiSnapshot::project(&machine, &ledger);
        assert_eq!(snapshot.progress_percent, 100);
        // Last flat index is an extras page, but next is still enabled into it.
        assert!(snapshot.nav.next_enabled);
    }

    #[test]
    fn extras_page_hides_nav_and_keeps_progress() {
        let mut machine = machine(no_gateway());
        let ledger = BadgeLedger::new();
        machine.handle(NavCommand::Next, &ledger);
        machine.handle(NavCommand::Next, &ledger);
        machine.handle(NavCommand::Jump("extras-hub".to_string()), &ledger);

        let snapshot = UiSnapshot::project(&machine, &ledger);
        assert!(!snapshot.nav.visible);
        // 3 of 5 curriculum pages, unchanged by extras browsing.
        assert_eq!(snapshot.progress_percent, 60);
        assert_eq!(snapshot.menu[1].entries[0].state, UnlockStatus::Active);
    }

    #[test]
    fn completed_pages_marked_behind_current() {
        let mut machine = machine(no_gateway());
        let ledger = BadgeLedger::new();
        for _ in 0..3 {
            machine.handle(NavCommand::Next, &ledger);
        }
        machine.handle(NavCommand::Previous, &ledger);

        let snapshot = UiSnapshot::project(&machine, &ledger);
        let states: Vec<UnlockStatus> =
            snapshot.menu[0].entries.iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            [
                UnlockStatus::Completed,
                UnlockStatus::Completed,
                UnlockStatus::Active,
                UnlockStatus::Unlocked,
                UnlockStatus::Locked,
            ]
        );
    }

    #[test]
    fn empty_catalog_projects_inert_chrome() {
        let mut machine = NavigationMachine::new(
            Catalog::empty(),
            Box::new(MemoryStore::new()),
            no_gateway(),
        );
        machine.initialize();
        let snapshot = UiSnapshot::project(&machine, &BadgeLedger::new());
        assert!(snapshot.menu.is_empty());
        assert!(!snapshot.nav.prev_enabled);
        assert!(!snapshot.nav.next_enabled);
        assert_eq!(snapshot.progress_percent, 0);
    }

    #[test]
    fn snapshot_serializes_for_the_host() {
        let machine = machine(no_gateway());
        let json = serde_json::to_string(&UiSnapshot::project(&machine, &BadgeLedger::new()))
            .unwrap();
        assert!(json.contains(r#""state":"active""#));
        assert!(json.contains(r#""state":"extras-locked""#));
        assert!(json.contains(r#""progress_percent":20"#));
    }
}
