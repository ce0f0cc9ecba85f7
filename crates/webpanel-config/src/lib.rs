//! webpanel configuration system.
//!
//! TOML-based configuration with full validation. All sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use webpanel_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.guest.url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::WebPanelConfig;

use std::path::Path;

use webpanel_common::ConfigError;

/// Load and validate config from `path`, or from the platform default
/// path when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<WebPanelConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"chatty\"\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
