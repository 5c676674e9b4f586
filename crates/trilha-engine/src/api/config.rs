/// Configuration for the player, fixed at construction time.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Module id whose pages are exempt from linear unlocking (default: "extras").
    pub extras_module: String,
    /// Page whose forward navigation is blocked until the gateway is cleared
    /// (e.g. an onboarding walkthrough on the intro page). None disables the gate.
    pub gateway_page: Option<String>,
    /// UI language used when no saved choice exists (default: "pt").
    pub default_language: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            extras_module: "extras".to_string(),
            gateway_page: Some("intro".to_string()),
            default_language: "pt".to_string(),
        }
    }
}
