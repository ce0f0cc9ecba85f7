//! Guest surface controller.
//!
//! Owns one live guest view, enforces the navigation policy on it, turns
//! raw guest events into delegate callbacks and publishes the guest
//! client's responsiveness.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};
use webpanel_common::{ConfigError, ObservableValue, Result, Size};
use webpanel_config::schema::GuestConfig;

use crate::bridge::{
    ClientBridge, DetailedWebClientState, HostApiContext, HostApiFactory, Responsiveness,
};
use crate::delegate::{GuestDelegate, GuestEmbedder};
use crate::events::{FrameKind, GuestEvent, PermissionKind, WindowDisposition};
use crate::exit_reason::ExitReason;
use crate::ipc::{BridgeMessage, IPC_INIT_SCRIPT};
use crate::memory::SharedMemory;
use crate::navigation::{origin_of, NavigationPolicy};
use crate::page::{PageClassifier, PageType};
use crate::view::{GuestEventSink, GuestView, GuestViewFactory, GuestViewRequest, NavigationInterceptor};

/// Popup size used when the guest does not ask for one.
pub const DEFAULT_POPUP_SIZE: Size = Size::new(600, 700);

/// Collaborators for [`GuestSurfaceController::new`].
pub struct GuestSurfaceParams<'a> {
    pub config: &'a GuestConfig,
    pub views: &'a dyn GuestViewFactory,
    pub host_apis: Arc<dyn HostApiFactory>,
    pub delegate: Arc<dyn GuestDelegate>,
    pub embedder: Arc<dyn GuestEmbedder>,
    pub memory: SharedMemory,
    /// Where the view's events go. The owner feeds them back through
    /// [`GuestSurfaceController::handle_event`].
    pub sink: GuestEventSink,
}

pub struct GuestSurfaceController {
    view: Box<dyn GuestView>,
    /// Open while the surface is alive; closed on destroy so that late
    /// backend callbacks are dropped.
    gate: Arc<AtomicBool>,
    classifier: PageClassifier,
    host_apis: Arc<dyn HostApiFactory>,
    delegate: Arc<dyn GuestDelegate>,
    embedder: Arc<dyn GuestEmbedder>,
    memory: SharedMemory,
    responsiveness: ObservableValue<Responsiveness>,
    bridge: Option<ClientBridge>,
    start_url: String,
    committed_url: Option<String>,
    login_page: bool,
    exit_reason: Option<ExitReason>,
    enable_popups: bool,
    reload_after_navigation: bool,
    removed: bool,
}

impl GuestSurfaceController {
    /// Build the guest view and start loading the effective start URL.
    pub fn new(params: GuestSurfaceParams<'_>) -> Result<Self> {
        let GuestSurfaceParams {
            config,
            views,
            host_apis,
            delegate,
            embedder,
            memory,
            sink,
        } = params;

        let policy = NavigationPolicy::from_config(config)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        let gate = Arc::new(AtomicBool::new(true));
        let gated_sink: GuestEventSink = {
            let gate = Arc::clone(&gate);
            Arc::new(move |event| {
                if gate.load(Ordering::Acquire) {
                    sink(event);
                }
            })
        };

        let mut view = views.create(GuestViewRequest {
            interceptor: NavigationInterceptor::new(policy, Arc::clone(&gated_sink)),
            sink: gated_sink,
            init_script: IPC_INIT_SCRIPT,
        })?;

        let start_url = memory
            .take_start_url()
            .unwrap_or_else(|| config.url.clone());
        if let Err(e) = view.load_url(&start_url) {
            view.remove();
            return Err(e);
        }
        info!(url = %start_url, "guest surface created");

        Ok(Self {
            view,
            gate,
            classifier: PageClassifier::from_config(config),
            host_apis,
            delegate,
            embedder,
            memory,
            responsiveness: ObservableValue::with_value(Responsiveness::Uninitialized),
            bridge: None,
            start_url,
            committed_url: None,
            login_page: false,
            exit_reason: None,
            enable_popups: config.enable_popups,
            reload_after_navigation: config.reload_after_navigation,
            removed: false,
        })
    }

    pub fn handle_event(&mut self, event: GuestEvent) {
        if self.removed {
            return;
        }
        match event {
            GuestEvent::NavigationCommitted {
                url,
                frame: FrameKind::TopLevel,
            } => self.on_navigation_committed(url),
            GuestEvent::NavigationCommitted {
                frame: FrameKind::Subframe,
                ..
            } => {}
            GuestEvent::AdminBlocked { url } => self.delegate.on_admin_denied(&url),
            GuestEvent::Message { body } => self.on_message(&body),
            GuestEvent::Unresponsive => {
                warn!("guest renderer unresponsive");
                self.delegate.on_unresponsive();
            }
            GuestEvent::Exited { reason } => self.on_exit(&reason),
            GuestEvent::PermissionRequested {
                request_id,
                permission,
            } => self.on_permission_request(request_id, &permission),
            GuestEvent::NewWindow {
                url,
                disposition,
                size,
            } => self.on_new_window(&url, disposition, size),
        }
    }

    fn on_navigation_committed(&mut self, url: String) {
        let previous = self
            .responsiveness
            .get_current_value()
            .unwrap_or(Responsiveness::Uninitialized);
        self.teardown_bridge(Responsiveness::Uninitialized);
        self.login_page = false;
        self.committed_url = Some(url.clone());

        let Some(origin) = origin_of(&url) else {
            warn!(url = %url, "guest committed a page with an opaque origin");
            self.delegate.on_page_committed(&url, PageType::LoadError);
            return;
        };

        self.bridge = Some(ClientBridge::connect(
            self.host_apis.as_ref(),
            HostApiContext {
                origin,
                url: url.clone(),
                embedder: Arc::clone(&self.embedder),
            },
            self.memory.clone(),
            self.responsiveness.clone(),
        ));

        let page = self.classifier.classify(&url);
        match page {
            PageType::Login => self.login_page = true,
            PageType::Regular => {
                if previous == Responsiveness::Responsive && self.reload_after_navigation {
                    self.memory.remember_url(url.as_str());
                }
            }
            PageType::GuestError | PageType::LoadError => {}
        }
        debug!(url = %url, ?page, "guest page committed");
        self.delegate.on_page_committed(&url, page);
    }

    fn on_message(&mut self, body: &str) {
        let Some(message) = BridgeMessage::from_json(body) else {
            warn!(body_len = body.len(), "dropping malformed bridge message");
            return;
        };
        match self.bridge.as_mut() {
            Some(bridge) => bridge.api_mut().handle_message(&message),
            None => debug!(kind = %message.kind, "bridge message before connect, dropped"),
        }
    }

    fn on_exit(&mut self, raw_reason: &str) {
        let reason = ExitReason::from_reason(raw_reason);
        if reason.is_normal() {
            debug!("guest renderer exited normally");
            return;
        }
        if reason == ExitReason::Unknown {
            warn!(reason = %raw_reason, "unrecognized renderer exit reason");
        }
        warn!(reason = %reason, code = reason.code(), "guest renderer exited");
        self.exit_reason = Some(reason);
        self.teardown_bridge(Responsiveness::Error);
        self.delegate.on_crash(reason);
    }

    fn on_permission_request(&self, request_id: u64, permission: &PermissionKind) {
        let allow = match (&self.bridge, permission) {
            (None, _) => {
                warn!(?permission, "permission requested before the client connected");
                false
            }
            (Some(_), PermissionKind::Media) => true,
            (Some(bridge), PermissionKind::Geolocation) => {
                bridge.api().should_allow_geolocation_permission_request()
            }
            (Some(_), PermissionKind::Other(name)) => {
                warn!(permission = %name, "denying unsupported permission request");
                false
            }
        };
        debug!(request_id, ?permission, allow, "permission request resolved");
        self.view.resolve_permission(request_id, allow);
    }

    fn on_new_window(&self, url: &str, disposition: WindowDisposition, size: Option<Size>) {
        let Some(bridge) = &self.bridge else {
            warn!(url = %url, "new window requested before the client connected");
            return;
        };
        if self.enable_popups && disposition == WindowDisposition::NewPopup {
            bridge
                .api()
                .open_link_in_popup(url, size.unwrap_or(DEFAULT_POPUP_SIZE));
        } else {
            bridge.api().open_link_in_new_tab(url);
        }
    }

    fn teardown_bridge(&mut self, state: Responsiveness) {
        if let Some(bridge) = self.bridge.take() {
            bridge.destroy(state);
        }
        self.responsiveness.assign_and_signal(state, false);
    }

    /// Tear down the bridge and remove the view. Consumes the surface.
    pub fn destroy(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        self.gate.store(false, Ordering::Release);
        if let Some(bridge) = self.bridge.take() {
            bridge.destroy(Responsiveness::Uninitialized);
        }
        self.view.remove();
        debug!(url = ?self.committed_url, "guest surface destroyed");
    }

    pub fn waiting_on_panel_will_open(&self) -> bool {
        self.bridge
            .as_ref()
            .is_some_and(|bridge| bridge.api().waiting_on_panel_will_open())
    }

    /// Tell the guest client the panel is about to open.
    pub fn notify_panel_will_open(&self) -> Result<()> {
        if self.bridge.is_none() {
            return Ok(());
        }
        self.view
            .post_message(&BridgeMessage::signal("panelWillOpen"))
    }

    pub fn responsiveness(&self) -> ObservableValue<Responsiveness> {
        self.responsiveness.clone()
    }

    pub fn detailed_state(&self) -> DetailedWebClientState {
        self.bridge
            .as_ref()
            .map(|bridge| bridge.api().detailed_web_client_state())
            .unwrap_or(DetailedWebClientState::WebClientNotCreated)
    }

    pub fn is_login_page(&self) -> bool {
        self.login_page
    }

    pub fn has_bridge(&self) -> bool {
        self.bridge.is_some()
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    pub fn committed_url(&self) -> Option<&str> {
        self.committed_url.as_deref()
    }

    pub fn set_visible(&self, visible: bool) -> Result<()> {
        self.view.set_visible(visible)
    }

    pub fn set_size(&self, size: Size) -> Result<()> {
        self.view.set_size(size)
    }
}

impl Drop for GuestSurfaceController {
    fn drop(&mut self) {
        self.remove();
    }
}

impl fmt::Debug for GuestSurfaceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuestSurfaceController")
            .field("start_url", &self.start_url)
            .field("committed_url", &self.committed_url)
            .field("bridge", &self.bridge)
            .field("login_page", &self.login_page)
            .field("exit_reason", &self.exit_reason)
            .finish_non_exhaustive()
    }
}
