//! Callback contracts between a guest surface and its owner.

use std::time::Duration;

use webpanel_common::{LinkTarget, Size};

use crate::exit_reason::ExitReason;
use crate::page::PageType;

/// Lifecycle reports from the guest surface to its owner.
pub trait GuestDelegate: Send + Sync {
    fn on_page_committed(&self, url: &str, page: PageType);
    fn on_unresponsive(&self);
    fn on_crash(&self, reason: ExitReason);
    fn on_admin_denied(&self, url: &str);
}

/// Requests the guest client makes of whatever embeds the panel.
pub trait GuestEmbedder: Send + Sync {
    fn resize_requested(&self, size: Size, duration: Duration);
    fn show_requested(&self);
    fn close_requested(&self);
    fn open_url(&self, url: &str, target: LinkTarget);
}
