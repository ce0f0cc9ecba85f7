//! Reading and parsing config files.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};
use webpanel_common::ConfigError;

use super::paths::{default_config_path, write_template};
use crate::schema::WebPanelConfig;

/// Parse config text. Missing sections and fields take their defaults.
pub fn parse_str(content: &str) -> Result<WebPanelConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("invalid TOML: {e}")))
}

/// Read and parse `path`. Values are not validated here.
pub fn load_from_path(path: &Path) -> Result<WebPanelConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("{}: {e}", path.display())),
    })?;
    let config = parse_str(&content)?;
    debug!(path = %path.display(), "config file parsed");
    Ok(config)
}

/// Load the platform default file, seeding it from the template on first run.
///
/// A missing file yields the defaults even when the template cannot be
/// written; a file that exists but does not parse is an error.
pub fn load_default() -> Result<WebPanelConfig, ConfigError> {
    let path = match default_config_path() {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "no config location, using defaults");
            return Ok(WebPanelConfig::default());
        }
    };
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config file, using defaults");
            if let Err(e) = write_template(&path) {
                warn!(error = %e, "could not write config template");
            }
            Ok(WebPanelConfig::default())
        }
        other => other,
    }
}
