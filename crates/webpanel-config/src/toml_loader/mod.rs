//! TOML config file loading and the default template.

mod loader;
mod paths;
mod template;


pub use loader::{load_default, load_from_path, parse_str};
pub use paths::{default_config_path, write_template};
