//! Events reported by a guest view.

use serde::{Deserialize, Serialize};
use webpanel_common::Size;

/// Whether a request targets the guest's main frame or a subframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    TopLevel,
    Subframe,
}

/// Permission kinds a guest can request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionKind {
    Media,
    Geolocation,
    Other(String),
}

impl PermissionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "media" => Self::Media,
            "geolocation" => Self::Geolocation,
            other => Self::Other(other.to_string()),
        }
    }
}

/// How the guest asked for a new window to be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowDisposition {
    NewPopup,
    NewForegroundTab,
    NewBackgroundTab,
    NewWindow,
    Other,
}

impl WindowDisposition {
    pub fn from_name(name: &str) -> Self {
        match name {
            "new_popup" => Self::NewPopup,
            "new_foreground_tab" => Self::NewForegroundTab,
            "new_background_tab" => Self::NewBackgroundTab,
            "new_window" => Self::NewWindow,
            _ => Self::Other,
        }
    }
}

/// Lifecycle and content events emitted by a guest view.
#[derive(Debug, Clone, PartialEq)]
pub enum GuestEvent {
    /// A navigation committed. Carries the committed URL.
    NavigationCommitted { url: String, frame: FrameKind },
    /// A request was canceled by administrator policy.
    AdminBlocked { url: String },
    /// A bridge message arrived from the guest page (raw JSON).
    Message { body: String },
    /// The guest renderer stopped responding.
    Unresponsive,
    /// The guest renderer exited.
    Exited { reason: String },
    /// The guest asked for a permission.
    PermissionRequested {
        request_id: u64,
        permission: PermissionKind,
    },
    /// The guest asked to open a new window.
    NewWindow {
        url: String,
        disposition: WindowDisposition,
        size: Option<Size>,
    },
}
