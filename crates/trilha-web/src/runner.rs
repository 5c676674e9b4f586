use trilha_engine::{
    keys, BadgeLedger, Catalog, MemoryStore, NavCommand, NavigationMachine, Outcome,
    PlayerConfig, ProgressStore, UiSnapshot,
};

use crate::scorm::ScormStore;
use crate::storage::LocalStore;

/// Wires the navigation machine to the browser: store selection (LMS bridge
/// → localStorage → memory), badge ledger persistence, and JSON hand-off to
/// the JS host.
///
/// The host drives it through the `#[wasm_bindgen]` exports in `lib.rs` and
/// owns all fetching and DOM work; after each command it re-reads the
/// snapshot and drains the event queue.
pub struct PlayerRunner {
    machine: NavigationMachine,
    ledger: BadgeLedger,
    local: Option<LocalStore>,
}

impl PlayerRunner {
    /// Build the player from the fetched `content.json` text. A malformed
    /// descriptor degrades to an empty catalog (inert navigation) rather than
    /// failing init.
    pub fn new(content_json: &str, config: PlayerConfig) -> Self {
        let catalog = match Catalog::from_json(content_json, &config.extras_module) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("failed to load content descriptor: {err}");
                Catalog::empty()
            }
        };

        let local = LocalStore::open();
        let store: Box<dyn ProgressStore> = match ScormStore::connect() {
            Some(bridge) => Box::new(bridge),
            None => match local.clone() {
                Some(fallback) => {
                    log::info!("no LMS API found; running in standalone mode");
                    Box::new(fallback)
                }
                None => {
                    log::warn!("localStorage unavailable; progress will not persist");
                    Box::new(MemoryStore::new())
                }
            },
        };

        let ledger = match local.as_ref().and_then(|l| l.get(keys::BADGES)) {
            Some(json) => BadgeLedger::from_json(&json).unwrap_or_else(|err| {
                log::warn!("corrupt badge ledger, resetting: {err}");
                BadgeLedger::new()
            }),
            None => BadgeLedger::new(),
        };

        let mut machine = NavigationMachine::new(catalog, store, config);
        let gateway_cleared = local
            .as_ref()
            .and_then(|l| l.get(keys::TUTORIAL_COMPLETED))
            .as_deref()
            == Some("true");
        machine.set_gateway_cleared(gateway_cleared);
        machine.initialize();

        Self { machine, ledger, local }
    }

    pub fn handle(&mut self, command: NavCommand) -> Outcome {
        self.machine.handle(command, &self.ledger)
    }

    /// Mark the onboarding walkthrough done, persistently.
    pub fn clear_gateway(&mut self) {
        if let Some(local) = &self.local {
            local.set(keys::TUTORIAL_COMPLETED, "true");
        }
        self.machine.handle(NavCommand::ClearGateway, &self.ledger);
    }

    /// Record a badge and persist the ledger.
    pub fn award_badge(&mut self, module_id: &str, badge: &str) {
        self.ledger.award(module_id, badge);
        if let Some(local) = &self.local {
            local.set(keys::BADGES, &self.ledger.to_json());
        }
    }

    pub fn language(&self) -> String {
        self.local
            .as_ref()
            .and_then(|l| l.get(keys::LANGUAGE))
            .unwrap_or_else(|| self.machine.config().default_language.clone())
    }

    /// Persist the language choice. Navigation state is untouched; the host
    /// reloads its translation tree and re-renders.
    pub fn set_language(&mut self, lang: &str) {
        if let Some(local) = &self.local {
            local.set(keys::LANGUAGE, lang);
        }
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&UiSnapshot::project(&self.machine, &self.ledger))
            .unwrap_or_else(|_| "{}".to_string())
    }

    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.machine.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn current_page_json(&self) -> String {
        self.machine
            .current_page()
            .and_then(|page| serde_json::to_string(page).ok())
            .unwrap_or_else(|| "null".to_string())
    }

    pub fn finish(&mut self) {
        self.machine.finish();
    }
}
