//! Fixed key space for persisted state.
//!
//! These keys are a stable schema: existing saved progress depends on them,
//! so renaming any of them breaks restore for learners mid-course.

/// SCORM 1.2 element holding the current page id.
pub const LESSON_LOCATION: &str = "cmi.core.lesson_location";
/// SCORM 1.2 element holding the completion status.
pub const LESSON_STATUS: &str = "cmi.core.lesson_status";

/// Local fallback for `LESSON_LOCATION` when no LMS bridge is present.
pub const LOCAL_LOCATION: &str = "scorm_location";
/// Local fallback for `LESSON_STATUS`.
pub const LOCAL_STATUS: &str = "scorm_status";

/// Chosen UI language.
pub const LANGUAGE: &str = "courseLanguage";
/// Set to "true" once the onboarding walkthrough finishes (gateway clear).
pub const TUTORIAL_COMPLETED: &str = "tutorial-completed";
/// Badge ledger JSON (`{"m1":["quiz"]}`).
pub const BADGES: &str = "badges";
/// Per-quiz attempt record.
pub const QUIZ_PROGRESS: &str = "quiz_progress";
/// Accessibility: auto-read toggle.
pub const AUTO_READ: &str = "auto-read";
/// Accessibility: chosen text-to-speech voice.
pub const TTS_VOICE: &str = "tts-voice";
/// Usage analytics blob.
pub const ANALYTICS: &str = "curso_analytics";

/// `LESSON_STATUS` values the player reads or writes.
pub mod status {
    pub const NOT_ATTEMPTED: &str = "not attempted";
    pub const INCOMPLETE: &str = "incomplete";
    pub const COMPLETED: &str = "completed";
}
