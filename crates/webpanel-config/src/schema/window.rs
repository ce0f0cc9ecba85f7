//! Host window sizing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use webpanel_common::Size;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub login_width: u32,
    pub login_height: u32,
    pub debug_width: u32,
    pub debug_height: u32,
    pub status_width: u32,
    pub status_height: u32,
    pub resize_duration_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 600,
            login_width: 600,
            login_height: 700,
            debug_width: 800,
            debug_height: 900,
            status_width: 400,
            status_height: 120,
            resize_duration_ms: 0,
        }
    }
}

impl WindowConfig {
    pub fn guest_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn login_size(&self) -> Size {
        Size::new(self.login_width, self.login_height)
    }

    pub fn debug_size(&self) -> Size {
        Size::new(self.debug_width, self.debug_height)
    }

    pub fn status_size(&self) -> Size {
        Size::new(self.status_width, self.status_height)
    }

    pub fn resize_duration(&self) -> Duration {
        Duration::from_millis(self.resize_duration_ms)
    }
}
