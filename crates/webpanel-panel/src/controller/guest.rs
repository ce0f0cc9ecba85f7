//! Guest surface lifecycle and what the panel shows.

use std::sync::Arc;

use tracing::{debug, warn};
use webpanel_common::{PanelKind, Result};
use webpanel_webview::{GuestSurfaceController, GuestSurfaceParams};

use super::core::PanelController;
use crate::input::{GuestSignal, PanelLink};

impl PanelController {
    /// Destroy the current guest surface, if any, and build a new one.
    pub(super) fn recreate_guest(&mut self) -> Result<()> {
        self.destroy_guest();

        let link = Arc::new(PanelLink::new(self.guest_generation, self.tx.clone()));
        let guest = GuestSurfaceController::new(GuestSurfaceParams {
            config: &self.config.guest,
            views: self.views.as_ref(),
            host_apis: Arc::clone(&self.host_apis),
            delegate: link.clone(),
            embedder: link.clone(),
            memory: self.memory.clone(),
            sink: link.sink(),
        })?;

        let subscription = guest
            .responsiveness()
            .subscribe(move |state| link.send(GuestSignal::Responsiveness(*state)));

        debug!(generation = self.guest_generation, "guest surface ready");
        self.guest = Some(guest);
        self.guest_subscription = Some(subscription);
        Ok(())
    }

    /// Destroy the guest surface. Signals it queued earlier become stale.
    pub(super) fn destroy_guest(&mut self) {
        if let Some(subscription) = self.guest_subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(guest) = self.guest.take() {
            guest.destroy();
            debug!(generation = self.guest_generation, "guest surface destroyed");
        }
        self.guest_generation += 1;
    }

    /// Show the guest panel at the current guest size.
    pub(super) fn show_guest(&mut self) {
        let size = self.guest_size();
        self.presentation.show_panel(PanelKind::Guest);
        if let Some(guest) = &self.guest {
            if let Err(e) = guest.set_size(size) {
                warn!(error = %e, "failed to size guest view");
            }
            if let Err(e) = guest.set_visible(true) {
                warn!(error = %e, "failed to show guest view");
            }
        }
        self.host
            .resize_widget(size, self.config.window.resize_duration());
    }

    /// Show a static panel and size the host to it.
    pub(super) fn show_static(&mut self, kind: PanelKind) {
        if let Some(guest) = &self.guest {
            if let Err(e) = guest.set_visible(false) {
                warn!(error = %e, "failed to hide guest view");
            }
        }
        self.presentation.show_panel(kind);
        let size = self.presentation.panel_size(kind);
        self.host
            .resize_widget(size, self.config.window.resize_duration());
    }
}
