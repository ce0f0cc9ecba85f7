//! PanelController struct definition and constructor.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;
use tracing::info;
use webpanel_common::{OneShotTimer, PanelState, Size, Subscription};
use webpanel_config::schema::WebPanelConfig;
use webpanel_webview::{GuestSurfaceController, GuestViewFactory, HostApiFactory, SharedMemory};

use crate::host::PanelHost;
use crate::input::PanelInput;
use crate::presentation::Presentation;

/// Collaborators handed to [`PanelController::new`].
pub struct PanelDeps {
    pub config: Arc<WebPanelConfig>,
    pub host: Arc<dyn PanelHost>,
    pub presentation: Box<dyn Presentation>,
    pub views: Box<dyn GuestViewFactory>,
    pub host_apis: Arc<dyn HostApiFactory>,
    pub memory: SharedMemory,
}

pub struct PanelController {
    pub(super) config: Arc<WebPanelConfig>,
    pub(super) host: Arc<dyn PanelHost>,
    pub(super) presentation: Box<dyn Presentation>,
    pub(super) views: Box<dyn GuestViewFactory>,
    pub(super) host_apis: Arc<dyn HostApiFactory>,
    pub(super) memory: SharedMemory,

    // Input queue
    pub(super) tx: UnboundedSender<PanelInput>,
    pub(super) rx: UnboundedReceiver<PanelInput>,

    pub(super) state: PanelState,
    pub(super) started: bool,

    // Timed transitions
    pub(super) timer: OneShotTimer,
    pub(super) timer_generation: u64,
    pub(super) show_loading_at: Instant,
    pub(super) earliest_dismiss_at: Instant,

    // Guards prepare completions from earlier BeginLoad entries
    pub(super) load_generation: u64,

    // Guest surface; the generation is bumped on every destroy
    pub(super) guest: Option<GuestSurfaceController>,
    pub(super) guest_subscription: Option<Subscription>,
    pub(super) guest_generation: u64,

    // Last requested guest content size
    pub(super) guest_size: Size,
    pub(super) debug_mode: bool,
    // Overrides `guest_size` while debug mode is on
    pub(super) debug_size: Option<Size>,
}

impl PanelController {
    /// Build a controller. The initial state is chosen here but not entered
    /// until [`start`](Self::start).
    pub fn new(deps: PanelDeps) -> Self {
        let PanelDeps {
            config,
            host,
            presentation,
            views,
            host_apis,
            memory,
        } = deps;

        let online = host.is_online() && !config.debug.simulate_offline;
        let state = if online {
            PanelState::BeginLoad
        } else {
            PanelState::Offline
        };
        info!(state = %state, online, "panel controller created");

        let (tx, rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        let guest_size = config.window.guest_size();

        Self {
            config,
            host,
            presentation,
            views,
            host_apis,
            memory,
            tx,
            rx,
            state,
            started: false,
            timer: OneShotTimer::new(),
            timer_generation: 0,
            show_loading_at: now,
            earliest_dismiss_at: now,
            load_generation: 0,
            guest: None,
            guest_subscription: None,
            guest_generation: 0,
            guest_size,
            debug_mode: false,
            debug_size: None,
        }
    }

    /// Handle for queueing inputs from outside the controller.
    pub fn sender(&self) -> UnboundedSender<PanelInput> {
        self.tx.clone()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn has_guest(&self) -> bool {
        self.guest.is_some()
    }

    /// Size the guest is shown at: the debug size while debugging, otherwise
    /// the last size the guest asked for.
    pub fn guest_size(&self) -> Size {
        self.debug_size.unwrap_or(self.guest_size)
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn memory(&self) -> &SharedMemory {
        &self.memory
    }
}

impl Drop for PanelController {
    fn drop(&mut self) {
        self.timer.reset();
        self.destroy_guest();
    }
}
