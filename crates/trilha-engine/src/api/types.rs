use serde::Serialize;

/// A navigation command dispatched into the state machine.
/// The host UI translates clicks into commands; the machine stays DOM-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    /// Advance one page (subject to the gateway guard).
    Next,
    /// Go back one page.
    Previous,
    /// Jump to a page by id (subject to the unlock policy).
    Jump(String),
    /// Mark the gateway prerequisite as completed for this session.
    ClearGateway,
}

/// Result of handling a navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Position changed (or an idempotent re-render was requested).
    Moved,
    /// Nothing to do: at an edge, empty catalog, or unknown page.
    NoOp,
    /// The transition was rejected. Advisory, not an error.
    Blocked(BlockReason),
}

/// Why a transition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The gateway page's prerequisite has not been completed.
    Gateway,
    /// The target page fails the unlock policy.
    Locked,
}

/// An audio/visual cue for the host to play. Hosts without an audio
/// collaborator simply ignore these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    Click,
    Error,
}

/// An event emitted by the state machine, drained by the host after each
/// command. The host owns all side effects: fetching page bodies, DOM writes,
/// sound playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// The current position changed; the host should fetch and inject `file`.
    /// Rapid navigation can overlap fetches — the last response wins, which
    /// is the accepted behavior.
    PageChanged {
        index: usize,
        id: String,
        file: String,
        markdown: bool,
    },
    /// A transition was rejected; the host shows advisory feedback (shake,
    /// error tone). Expected and frequent, not a failure.
    Blocked {
        reason: BlockReason,
        page_id: String,
    },
    /// The final curriculum position was reached.
    CourseCompleted,
    /// Play a UI sound.
    Cue { cue: CueKind },
}
