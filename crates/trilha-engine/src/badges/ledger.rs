use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-module achievement record controlling extras unlock eligibility.
/// The navigation machine treats this as a read-only oracle; gamification
/// code awards into it.
///
/// JSON shape matches the persisted `badges` value: `{"m1":["quiz","video"]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeLedger {
    #[serde(flatten)]
    badges: HashMap<String, Vec<String>>,
}

/// What a bonus page demands before it becomes navigable.
/// Declared per page in the content descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnlockRequirement {
    /// At least `modules` distinct modules have earned any badge.
    AnyModules { modules: u32 },
    /// A specific module has earned any badge.
    Module { module: String },
}

impl BadgeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a ledger from its persisted JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize back to the persisted JSON form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Record a badge for a module. Idempotent.
    pub fn award(&mut self, module_id: &str, badge: &str) {
        let entry = self.badges.entry(module_id.to_string()).or_default();
        if !entry.iter().any(|b| b == badge) {
            entry.push(badge.to_string());
        }
    }

    /// Whether the module has earned at least one badge.
    pub fn module_badged(&self, module_id: &str) -> bool {
        self.badges.get(module_id).is_some_and(|b| !b.is_empty())
    }

    /// Number of modules with at least one badge.
    pub fn badged_module_count(&self) -> u32 {
        self.badges.values().filter(|b| !b.is_empty()).count() as u32
    }

    /// Badges earned in a module, if any.
    pub fn badges_for(&self, module_id: &str) -> Option<&[String]> {
        self.badges.get(module_id).map(|b| b.as_slice())
    }

    /// Evaluate an unlock requirement against the ledger.
    pub fn satisfies(&self, req: &UnlockRequirement) -> bool {
        match req {
            UnlockRequirement::AnyModules { modules } => self.badged_module_count() >= *modules,
            UnlockRequirement::Module { module } => self.module_badged(module),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_persisted_shape() {
        let ledger = BadgeLedger::from_json(r#"{"m1":["quiz"],"m2":[]}"#).unwrap();
        assert!(ledger.module_badged("m1"));
        assert!(!ledger.module_badged("m2"));
        assert!(!ledger.module_badged("m3"));
        assert_eq!(ledger.badged_module_count(), 1);
    }

    #[test]
    fn award_is_idempotent() {
        let mut ledger = BadgeLedger::new();
        ledger.award("m1", "quiz");
        ledger.award("m1", "quiz");
        assert_eq!(ledger.badges_for("m1").unwrap(), ["quiz"]);
    }

    #[test]
    fn round_trips_through_json() {
        let mut ledger = BadgeLedger::new();
        ledger.award("m2", "flashcard");
        let back = BadgeLedger::from_json(&ledger.to_json()).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn requirement_any_modules() {
        let mut ledger = BadgeLedger::new();
        ledger.award("m1", "quiz");
        assert!(ledger.satisfies(&UnlockRequirement::AnyModules { modules: 1 }));
        assert!(!ledger.satisfies(&UnlockRequirement::AnyModules { modules: 2 }));
        ledger.award("m3", "video");
        assert!(ledger.satisfies(&UnlockRequirement::AnyModules { modules: 2 }));
    }

    #[test]
    fn requirement_specific_module() {
        let mut ledger = BadgeLedger::new();
        ledger.award("m2", "drag-drop");
        let req = UnlockRequirement::Module { module: "m1".to_string() };
        assert!(!ledger.satisfies(&req));
        ledger.award("m1", "quiz");
        assert!(ledger.satisfies(&req));
    }

    #[test]
    fn requirement_deserializes_both_forms() {
        let any: UnlockRequirement = serde_json::from_str(r#"{"modules":1}"#).unwrap();
        assert_eq!(any, UnlockRequirement::AnyModules { modules: 1 });
        let one: UnlockRequirement = serde_json::from_str(r#"{"module":"m1"}"#).unwrap();
        assert_eq!(one, UnlockRequirement::Module { module: "m1".to_string() });
    }
}
