//! Guest content configuration: where it loads from and what it may reach.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestConfig {
    /// Default entry URL for the guest.
    pub url: String,
    /// Whether the guest feature is enabled for this profile.
    pub enabled: bool,
    /// Extra origins top-level navigation may reach, e.g. `https://*.example.com`.
    pub allowed_origins: Vec<String>,
    /// URL patterns blocked by administrator policy. `*` matches any run of characters.
    pub admin_blocked_patterns: Vec<String>,
    /// Origins whose pages are treated as sign-in pages.
    pub login_origins: Vec<String>,
    /// Open guest popups as sized popups instead of tabs.
    pub enable_popups: bool,
    /// Disables the origin allowlist.
    pub dev_mode: bool,
    /// Reload the last post-connect URL instead of the entry URL.
    pub reload_after_navigation: bool,
}

impl Default for GuestConfig {
    fn default() -> Self {
        Self {
            url: "https://panel.example.com/".to_string(),
            enabled: true,
            allowed_origins: Vec::new(),
            admin_blocked_patterns: Vec::new(),
            login_origins: vec!["https://accounts.google.com".to_string()],
            enable_popups: false,
            dev_mode: false,
            reload_after_navigation: false,
        }
    }
}
