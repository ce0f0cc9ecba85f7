//! Window creation and panel controller setup.

use std::sync::Arc;

use webpanel_panel::{instrument, PanelController, PanelDeps};
use webpanel_webview::{IpcHostApiFactory, SharedMemory, WryGuestViewFactory};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::core::WebPanelApp;
use crate::connectivity;
use crate::host::DesktopHost;
use crate::presentation::ChromePresentation;

impl WebPanelApp {
    /// Create the window, the panel controller and the connectivity monitor.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let status = self.config.window.status_size();
        let attrs = WindowAttributes::default()
            .with_title("webpanel")
            .with_resizable(false)
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(status.width),
                f64::from(status.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let presentation = match ChromePresentation::new(window.clone(), &self.config.window) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Failed to create panel chrome: {e}");
                return false;
            }
        };

        let views = WryGuestViewFactory::new(
            window.clone(),
            self.config.window.guest_size(),
            self.config.debug.enable_debug,
        );
        let host = DesktopHost::new(
            self.config.guest.url.clone(),
            self.config.guest.enabled,
            self.online.clone(),
            self.proxy.clone(),
        );

        let mut controller = PanelController::new(PanelDeps {
            config: self.config.clone(),
            host: instrument(host, self.config.debug.log_host_calls),
            presentation: Box::new(presentation),
            views: Box::new(views),
            host_apis: Arc::new(IpcHostApiFactory),
            memory: SharedMemory::new(),
        });

        match self.probe_target.clone() {
            Some(target) => {
                self.monitor = Some(connectivity::spawn_monitor(
                    &self.runtime,
                    target,
                    &self.config.network,
                    self.online.clone(),
                    controller.sender(),
                ));
            }
            None => tracing::warn!(
                url = %self.config.guest.url,
                "Guest URL has no host to probe, connectivity monitor disabled"
            ),
        }

        controller.start();
        self.controller = Some(controller);
        self.window = Some(window);
        tracing::info!("Window created and panel controller started");
        true
    }
}
