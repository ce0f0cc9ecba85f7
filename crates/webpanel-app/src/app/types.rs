//! Internal types and constants for the app module.

use std::time::Duration;

use webpanel_common::Size;

/// Requests from the panel host, delivered through the event-loop proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Resize the panel window.
    Resize { size: Size, duration: Duration },
    /// Dismiss the panel window.
    Close,
}

/// How often to pump the panel controller (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);
