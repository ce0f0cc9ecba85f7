//! Graceful shutdown: stop probing, tear down the panel, drop the window.

use super::core::WebPanelApp;

impl WebPanelApp {
    /// Order matters: the guest webview must go before its parent window.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }

        // Dropping the controller destroys the guest surface.
        self.controller = None;
        self.window = None;

        tracing::info!("Graceful shutdown complete");
    }
}
