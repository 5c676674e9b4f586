use crate::api::config::PlayerConfig;
use crate::api::types::{BlockReason, CueKind, NavCommand, Outcome, PlayerEvent};
use crate::badges::ledger::BadgeLedger;
use crate::catalog::flatten::{Catalog, FlatPage, PageKind};
use crate::nav::policy::{self, UnlockStatus};
use crate::progress::store::ProgressStore;

/// The navigation state machine: a position machine over the flattened page
/// sequence.
///
/// Owns `current_index` and `max_index_reached` (monotonically non-decreasing
/// for the lifetime of the session), persists through the progress store, and
/// emits `PlayerEvent`s for the host to drain after each command — the
/// machine itself performs no fetches and no UI writes.
pub struct NavigationMachine {
    catalog: Catalog,
    store: Box<dyn ProgressStore>,
    config: PlayerConfig,
    current: usize,
    max_reached: usize,
    /// Flat index of the last curriculum page visited; drives the progress
    /// bar while the learner browses extras.
    last_curriculum: usize,
    gateway_cleared: bool,
    events: Vec<PlayerEvent>,
}

impl NavigationMachine {
    pub fn new(catalog: Catalog, store: Box<dyn ProgressStore>, config: PlayerConfig) -> Self {
        Self {
            catalog,
            store,
            config,
            current: 0,
            max_reached: 0,
            last_curriculum: 0,
            gateway_cleared: false,
            events: Vec::new(),
        }
    }

    /// Restore position from the progress store. A saved id missing from the
    /// flattened sequence (stale or renamed page) falls back to the start.
    pub fn initialize(&mut self) {
        self.current = 0;
        self.max_reached = 0;
        self.last_curriculum = 0;
        if self.catalog.is_empty() {
            log::warn!("empty catalog: navigation disabled until content loads");
            return;
        }
        if let Some(saved) = self.store.restore() {
            match self.catalog.index_of(&saved) {
                Some(index) => {
                    self.current = index;
                    self.max_reached = index;
                    log::info!("restored position {index} ({saved})");
                }
                None => {
                    log::warn!("saved location {saved} not in catalog; starting over");
                }
            }
        }
        self.sync_last_curriculum();
        self.emit_page_changed();
    }

    /// Dispatch one navigation command.
    pub fn handle(&mut self, command: NavCommand, ledger: &BadgeLedger) -> Outcome {
        match command {
            NavCommand::ClearGateway => {
                self.gateway_cleared = true;
                Outcome::NoOp
            }
            // The only hard failure mode is an empty sequence; every
            // transition degrades to a no-op.
            _ if self.catalog.is_empty() => Outcome::NoOp,
            NavCommand::Next => self.go_next(),
            NavCommand::Previous => self.go_previous(),
            NavCommand::Jump(page_id) => self.jump_to(&page_id, ledger),
        }
    }

    fn go_next(&mut self) -> Outcome {
        if self.gateway_blocked() {
            let page_id = self
                .catalog
                .page(self.current)
                .map(|p| p.id.clone())
                .unwrap_or_default();
            self.events.push(PlayerEvent::Cue { cue: CueKind::Error });
            self.events.push(PlayerEvent::Blocked {
                reason: BlockReason::Gateway,
                page_id,
            });
            return Outcome::Blocked(BlockReason::Gateway);
        }
        if self.current + 1 >= self.catalog.len() {
            return Outcome::NoOp;
        }
        self.current += 1;
        self.max_reached = self.max_reached.max(self.current);
        self.note_curriculum_landing();
        self.persist();
        self.events.push(PlayerEvent::Cue { cue: CueKind::Click });
        self.emit_page_changed();
        Outcome::Moved
    }

    fn go_previous(&mut self) -> Outcome {
        if self.current == 0 {
            return Outcome::NoOp;
        }
        // max_reached is untouched: it never decreases.
        self.current -= 1;
        self.note_curriculum_landing();
        self.persist();
        self.events.push(PlayerEvent::Cue { cue: CueKind::Click });
        self.emit_page_changed();
        Outcome::Moved
    }

    fn jump_to(&mut self, page_id: &str, ledger: &BadgeLedger) -> Outcome {
        let Some(index) = self.catalog.index_of(page_id) else {
            log::warn!("jump to unknown page: {page_id}");
            return Outcome::NoOp;
        };
        let navigable = {
            let page = &self.catalog.pages()[index];
            policy::page_navigable(page, index, self.max_reached, ledger)
        };
        if !navigable {
            self.events.push(PlayerEvent::Cue { cue: CueKind::Error });
            self.events.push(PlayerEvent::Blocked {
                reason: BlockReason::Locked,
                page_id: page_id.to_string(),
            });
            return Outcome::Blocked(BlockReason::Locked);
        }
        if index == self.current {
            // Legal no-op: re-render without touching state or the store.
            self.emit_page_changed();
            return Outcome::Moved;
        }
        let kind = self.catalog.pages()[index].kind;
        self.current = index;
        if kind == PageKind::Curriculum {
            // A menu jump behaves like next/previous for bookkeeping.
            self.max_reached = self.max_reached.max(index);
            self.note_curriculum_landing();
            self.persist();
        }
        // Extras browsing must not raise max_reached or touch the store.
        self.events.push(PlayerEvent::Cue { cue: CueKind::Click });
        self.emit_page_changed();
        Outcome::Moved
    }

    /// Pure query for menu rendering. Out-of-range indices report Locked.
    pub fn unlock_status(&self, index: usize, ledger: &BadgeLedger) -> UnlockStatus {
        let Some(page) = self.catalog.page(index) else {
            return UnlockStatus::Locked;
        };
        if index == self.current {
            return UnlockStatus::Active;
        }
        match page.kind {
            PageKind::Extras => {
                if page.requires.as_ref().is_none_or(|req| ledger.satisfies(req)) {
                    UnlockStatus::Unlocked
                } else {
                    UnlockStatus::ExtrasLocked
                }
            }
            PageKind::Curriculum => {
                if index > self.max_reached {
                    UnlockStatus::Locked
                } else if index < self.current {
                    UnlockStatus::Completed
                } else {
                    UnlockStatus::Unlocked
                }
            }
        }
    }

    /// Whether forward navigation is currently held by the gateway guard.
    pub fn gateway_blocked(&self) -> bool {
        if self.gateway_cleared {
            return false;
        }
        match (&self.config.gateway_page, self.catalog.page(self.current)) {
            (Some(gate), Some(page)) => page.id == *gate,
            _ => false,
        }
    }

    /// Seed the gateway flag from persisted state (e.g. a completed
    /// walkthrough from an earlier session).
    pub fn set_gateway_cleared(&mut self, cleared: bool) {
        self.gateway_cleared = cleared;
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn max_index_reached(&self) -> usize {
        self.max_reached
    }

    pub fn last_curriculum_index(&self) -> usize {
        self.last_curriculum
    }

    pub fn current_page(&self) -> Option<&FlatPage> {
        self.catalog.page(self.current)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Session teardown; forwards to the store (`LMSFinish` on a bridge).
    pub fn finish(&mut self) {
        self.store.finish();
    }

    fn note_curriculum_landing(&mut self) {
        if self.catalog.page(self.current).map(|p| p.kind) == Some(PageKind::Curriculum) {
            self.last_curriculum = self.current;
        }
    }

    fn sync_last_curriculum(&mut self) {
        let mut index = self.current;
        loop {
            if self.catalog.page(index).map(|p| p.kind) == Some(PageKind::Curriculum) {
                self.last_curriculum = index;
                return;
            }
            if index == 0 {
                return;
            }
            index -= 1;
        }
    }

    fn persist(&mut self) {
        let Some(page) = self.catalog.page(self.current) else {
            return;
        };
        let page_id = page.id.clone();
        let is_final = self.current + 1 == self.catalog.len();
        if let Err(err) = self.store.save(&page_id, is_final) {
            log::warn!("progress save failed: {err}");
        }
        if is_final {
            self.events.push(PlayerEvent::CourseCompleted);
        }
    }

    fn emit_page_changed(&mut self) {
        if let Some(page) = self.catalog.page(self.current) {
            let event = PlayerEvent::PageChanged {
                index: self.current,
                id: page.id.clone(),
                file: page.file.clone(),
                markdown: page.file.to_lowercase().ends_with(".md"),
            };
            self.events.push(event);
        }
    }
}
