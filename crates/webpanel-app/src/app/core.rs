//! WebPanelApp struct definition and constructor.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use webpanel_config::schema::WebPanelConfig;
use webpanel_panel::{PanelController, PanelInput};
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use super::types::AppEvent;
use crate::connectivity::ProbeTarget;

/// Top-level application state.
pub struct WebPanelApp {
    pub(super) config: Arc<WebPanelConfig>,
    pub(super) runtime: Handle,
    pub(super) proxy: EventLoopProxy<AppEvent>,

    // Connectivity
    pub(super) probe_target: Option<ProbeTarget>,
    pub(super) online: Arc<AtomicBool>,
    pub(super) monitor: Option<JoinHandle<()>>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Created once the window exists
    pub(super) controller: Option<PanelController>,
}

impl WebPanelApp {
    pub fn new(
        config: WebPanelConfig,
        runtime: Handle,
        proxy: EventLoopProxy<AppEvent>,
        probe_target: Option<ProbeTarget>,
        online: bool,
    ) -> Self {
        Self {
            config: Arc::new(config),
            runtime,
            proxy,
            probe_target,
            online: Arc::new(AtomicBool::new(online)),
            monitor: None,
            window: None,
            controller: None,
        }
    }

    /// Feed one input to the controller, if it exists yet.
    pub(super) fn dispatch(&mut self, input: PanelInput) {
        if let Some(ref mut controller) = self.controller {
            controller.handle(input);
        }
    }
}
