pub mod runner;
pub mod scorm;
pub mod storage;

pub use runner::PlayerRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use trilha_engine::{NavCommand, Outcome, PlayerConfig};

thread_local! {
    static RUNNER: RefCell<Option<PlayerRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut PlayerRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Player not initialized. Call player_init() first.");
        f(runner)
    })
}

/// Initialize the player from the fetched `content.json` text.
/// The host then drains events to load the first page body.
#[wasm_bindgen]
pub fn player_init(content_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = PlayerRunner::new(content_json, PlayerConfig::default());
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("course player: initialized");
}

/// Returns true if the position changed.
#[wasm_bindgen]
pub fn player_next() -> bool {
    with_runner(|r| r.handle(NavCommand::Next) == Outcome::Moved)
}

#[wasm_bindgen]
pub fn player_prev() -> bool {
    with_runner(|r| r.handle(NavCommand::Previous) == Outcome::Moved)
}

#[wasm_bindgen]
pub fn player_jump(page_id: &str) -> bool {
    with_runner(|r| r.handle(NavCommand::Jump(page_id.to_string())) == Outcome::Moved)
}

/// Called when the onboarding walkthrough finishes.
#[wasm_bindgen]
pub fn player_clear_gateway() {
    with_runner(|r| r.clear_gateway());
}

#[wasm_bindgen]
pub fn player_award_badge(module_id: &str, badge: &str) {
    with_runner(|r| r.award_badge(module_id, badge));
}

// ---- Data accessors ----

/// Full chrome view model (menu states, nav buttons, progress) as JSON.
#[wasm_bindgen]
pub fn player_snapshot_json() -> String {
    with_runner(|r| r.snapshot_json())
}

/// Pending events as a JSON array; clears the queue.
#[wasm_bindgen]
pub fn player_drain_events_json() -> String {
    with_runner(|r| r.drain_events_json())
}

#[wasm_bindgen]
pub fn player_current_page_json() -> String {
    with_runner(|r| r.current_page_json())
}

#[wasm_bindgen]
pub fn player_language() -> String {
    with_runner(|r| r.language())
}

#[wasm_bindgen]
pub fn player_set_language(lang: &str) {
    with_runner(|r| r.set_language(lang));
}

/// Session teardown, wired to the page unload handler.
#[wasm_bindgen]
pub fn player_finish() {
    with_runner(|r| r.finish());
}
