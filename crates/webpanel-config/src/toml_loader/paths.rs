//! Where the config file lives, and seeding it with the template.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use webpanel_common::ConfigError;

use super::template::default_config_toml;

const APP_DIR: &str = "webpanel";
const FILE_NAME: &str = "config.toml";

/// `<config_dir>/webpanel/config.toml` for the current platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

fn io_error(path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("{}: {e}", path.display()))
}

/// Write the commented template to `path`. An existing file is left alone.
///
/// Returns whether a file was written.
pub fn write_template(path: &Path) -> Result<bool, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(io_error(path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_error(path, e))?;

    info!(path = %path.display(), "wrote default config");
    Ok(true)
}
