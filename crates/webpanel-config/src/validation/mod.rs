//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod guest;
mod helpers;
mod loading;
mod misc;


use crate::schema::WebPanelConfig;
use webpanel_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WebPanelConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    loading::validate_loading(&mut errors, config);
    guest::validate_guest(&mut errors, config);
    misc::validate_window(&mut errors, config);
    misc::validate_network(&mut errors, config);
    misc::validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
