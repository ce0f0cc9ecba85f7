use serde::{Deserialize, Serialize};
use std::fmt;

/// The mutually exclusive states of the panel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    BeginLoad,
    ShowLoading,
    HoldLoading,
    FinishLoading,
    Ready,
    Error,
    Offline,
    Unavailable,
    Unresponsive,
}

impl PanelState {
    pub const ALL: [PanelState; 9] = [
        PanelState::BeginLoad,
        PanelState::ShowLoading,
        PanelState::HoldLoading,
        PanelState::FinishLoading,
        PanelState::Ready,
        PanelState::Error,
        PanelState::Offline,
        PanelState::Unavailable,
        PanelState::Unresponsive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::BeginLoad => "begin_load",
            Self::ShowLoading => "show_loading",
            Self::HoldLoading => "hold_loading",
            Self::FinishLoading => "finish_loading",
            Self::Ready => "ready",
            Self::Error => "error",
            Self::Offline => "offline",
            Self::Unavailable => "unavailable",
            Self::Unresponsive => "unresponsive",
        }
    }

    /// True for the states between starting a load and revealing the guest.
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            Self::BeginLoad | Self::ShowLoading | Self::HoldLoading | Self::FinishLoading
        )
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which visual panel the presentation layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Loading,
    Guest,
    Error,
    Offline,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Where a guest-initiated link should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkTarget {
    NewTab,
    Popup { width: u32, height: u32 },
}
