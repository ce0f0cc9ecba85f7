//! Configuration schema types for webpanel.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod guest;
mod loading;
mod system;
mod window;

pub use guest::*;
pub use loading::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Read once at startup and treated as constant afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct WebPanelConfig {
    pub loading: LoadingConfig,
    pub guest: GuestConfig,
    pub window: WindowConfig,
    pub debug: DebugConfig,
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_loading_timings() {
        let config = WebPanelConfig::default();
        assert_eq!(config.loading.pre_loading_time_ms, 100);
        assert_eq!(config.loading.min_loading_time_ms, 1000);
        assert_eq!(config.loading.max_loading_time_ms, 15000);
        assert_eq!(config.loading.finish_loading(), Duration::from_millis(14000));
    }

    #[test]
    fn finish_loading_saturates() {
        let loading = LoadingConfig {
            pre_loading_time_ms: 0,
            min_loading_time_ms: 500,
            max_loading_time_ms: 100,
        };
        assert_eq!(loading.finish_loading(), Duration::ZERO);
    }

    #[test]
    fn default_guest_is_locked_down() {
        let config = WebPanelConfig::default();
        assert!(config.guest.enabled);
        assert!(!config.guest.dev_mode);
        assert!(!config.guest.enable_popups);
        assert!(!config.guest.reload_after_navigation);
        assert!(config.guest.allowed_origins.is_empty());
        assert!(config.guest.url.starts_with("https://"));
    }

    #[test]
    fn default_debug_is_off() {
        let config = WebPanelConfig::default();
        assert!(!config.debug.enable_debug);
        assert!(!config.debug.simulate_offline);
        assert!(!config.debug.log_host_calls);
    }

    #[test]
    fn window_sizes() {
        let window = WindowConfig::default();
        assert_eq!(window.guest_size(), webpanel_common::Size::new(400, 600));
        assert_eq!(window.login_size(), webpanel_common::Size::new(600, 700));
        assert_eq!(window.debug_size(), webpanel_common::Size::new(800, 900));
        assert_eq!(window.status_size(), webpanel_common::Size::new(400, 120));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: WebPanelConfig = toml::from_str(
            r#"
[loading]
max_loading_time_ms = 5000

[guest]
allowed_origins = ["https://*.example.org"]
"#,
        )
        .unwrap();
        assert_eq!(config.loading.max_loading_time_ms, 5000);
        assert_eq!(config.loading.min_loading_time_ms, 1000);
        assert_eq!(config.guest.allowed_origins, vec!["https://*.example.org"]);
        assert_eq!(config.window.width, 400);
    }
}
