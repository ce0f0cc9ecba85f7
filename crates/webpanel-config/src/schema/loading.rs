//! Loading-panel timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing of the loading sequence, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Grace period after a load starts before the loading panel is shown.
    pub pre_loading_time_ms: u64,
    /// Minimum time the loading panel stays visible once shown.
    pub min_loading_time_ms: u64,
    /// Total wait, measured from showing the loading panel, before giving up.
    pub max_loading_time_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            pre_loading_time_ms: 100,
            min_loading_time_ms: 1000,
            max_loading_time_ms: 15000,
        }
    }
}

impl LoadingConfig {
    pub fn pre_loading(&self) -> Duration {
        Duration::from_millis(self.pre_loading_time_ms)
    }

    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_time_ms)
    }

    pub fn max_loading(&self) -> Duration {
        Duration::from_millis(self.max_loading_time_ms)
    }

    /// Time left to wait after the minimum hold has elapsed.
    pub fn finish_loading(&self) -> Duration {
        self.max_loading().saturating_sub(self.min_loading())
    }
}
