//! Window, network and logging validation.

use crate::schema::WebPanelConfig;

use super::helpers::{validate_range, validate_range_ms};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub(super) fn validate_window(errors: &mut Vec<String>, config: &WebPanelConfig) {
    let w = &config.window;
    for (name, value) in [
        ("window.width", w.width),
        ("window.height", w.height),
        ("window.login_width", w.login_width),
        ("window.login_height", w.login_height),
        ("window.debug_width", w.debug_width),
        ("window.debug_height", w.debug_height),
        ("window.status_width", w.status_width),
        ("window.status_height", w.status_height),
    ] {
        validate_range(errors, name, value, 50, 10_000);
    }
    validate_range_ms(errors, "window.resize_duration_ms", w.resize_duration_ms, 0, 5_000);
}

pub(super) fn validate_network(errors: &mut Vec<String>, config: &WebPanelConfig) {
    let n = &config.network;
    validate_range_ms(errors, "network.probe_interval_ms", n.probe_interval_ms, 100, 600_000);
    validate_range_ms(errors, "network.probe_timeout_ms", n.probe_timeout_ms, 10, 600_000);
    if n.probe_timeout_ms > n.probe_interval_ms {
        errors.push(format!(
            "network.probe_timeout_ms ({}) must be <= network.probe_interval_ms ({})",
            n.probe_timeout_ms, n.probe_interval_ms
        ));
    }
}

pub(super) fn validate_logging(errors: &mut Vec<String>, config: &WebPanelConfig) {
    if !VALID_LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level '{}' must be one of: {}",
            config.logging.level,
            VALID_LOG_LEVELS.join(", ")
        ));
    }
}
