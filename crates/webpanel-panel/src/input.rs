//! Inputs to the panel controller.
//!
//! Everything that can change the panel's state arrives as a
//! [`PanelInput`] on the controller's queue: host signals, timer firings,
//! host RPC completions and guest callbacks. Asynchronous completions carry
//! the generation they were started under so stale ones can be dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;
use webpanel_common::{LinkTarget, Size};
use webpanel_webview::{
    ExitReason, GuestDelegate, GuestEmbedder, GuestEvent, GuestEventSink, PageType,
    Responsiveness,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelInput {
    NetworkChanged { online: bool },
    TimerFired { generation: u64 },
    PrepareFinished {
        generation: u64,
        enabled: bool,
        success: bool,
    },
    Guest { generation: u64, signal: GuestSignal },
    /// The panel is about to be revealed.
    IntentToShow,
    Reload,
    Close,
    ShowDebug,
}

/// Something a guest surface reported.
#[derive(Debug, Clone, PartialEq)]
pub enum GuestSignal {
    View(GuestEvent),
    Responsiveness(Responsiveness),
    PageCommitted { url: String, page: PageType },
    Unresponsive,
    Crashed(ExitReason),
    AdminDenied { url: String },
    ResizeRequested { size: Size, duration: Duration },
    ShowRequested,
    CloseRequested,
    OpenUrl { url: String, target: LinkTarget },
}

/// Connects one guest surface to the controller queue, stamping every
/// signal with the surface's generation.
#[derive(Debug, Clone)]
pub struct PanelLink {
    generation: u64,
    tx: UnboundedSender<PanelInput>,
}

impl PanelLink {
    pub fn new(generation: u64, tx: UnboundedSender<PanelInput>) -> Self {
        Self { generation, tx }
    }

    pub fn send(&self, signal: GuestSignal) {
        let input = PanelInput::Guest {
            generation: self.generation,
            signal,
        };
        if self.tx.send(input).is_err() {
            trace!(generation = self.generation, "panel queue closed, guest signal dropped");
        }
    }

    /// Sink for raw view events.
    pub fn sink(self: &Arc<Self>) -> GuestEventSink {
        let link = Arc::clone(self);
        Arc::new(move |event: GuestEvent| link.send(GuestSignal::View(event)))
    }
}

impl GuestDelegate for PanelLink {
    fn on_page_committed(&self, url: &str, page: PageType) {
        self.send(GuestSignal::PageCommitted {
            url: url.to_string(),
            page,
        });
    }

    fn on_unresponsive(&self) {
        self.send(GuestSignal::Unresponsive);
    }

    fn on_crash(&self, reason: ExitReason) {
        self.send(GuestSignal::Crashed(reason));
    }

    fn on_admin_denied(&self, url: &str) {
        self.send(GuestSignal::AdminDenied {
            url: url.to_string(),
        });
    }
}

impl GuestEmbedder for PanelLink {
    fn resize_requested(&self, size: Size, duration: Duration) {
        self.send(GuestSignal::ResizeRequested { size, duration });
    }

    fn show_requested(&self) {
        self.send(GuestSignal::ShowRequested);
    }

    fn close_requested(&self) {
        self.send(GuestSignal::CloseRequested);
    }

    fn open_url(&self, url: &str, target: LinkTarget) {
        self.send(GuestSignal::OpenUrl {
            url: url.to_string(),
            target,
        });
    }
}
