//! Communication bridge between a guest surface and the client running in
//! the guest page.
//!
//! A bridge exists only while the last committed top-level page has a
//! non-opaque origin. It owns a [`HostApi`] bound to that origin and
//! forwards the API's responsiveness into the owning surface.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use webpanel_common::{ObservableValue, Size, Subscription};

use crate::delegate::GuestEmbedder;
use crate::ipc::BridgeMessage;
use crate::memory::SharedMemory;

/// Whether the guest client has connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Responsiveness {
    Uninitialized,
    Responsive,
    Error,
}

/// Finer-grained client state, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailedWebClientState {
    Bootstrapping,
    WebClientNotCreated,
    WebClientInitializeFailed,
    WebClientNotResponsive,
    Responsive,
    PermanentError,
    Unknown,
}

impl fmt::Display for DetailedWebClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bootstrapping => "bootstrapping",
            Self::WebClientNotCreated => "web_client_not_created",
            Self::WebClientInitializeFailed => "web_client_initialize_failed",
            Self::WebClientNotResponsive => "web_client_not_responsive",
            Self::Responsive => "responsive",
            Self::PermanentError => "permanent_error",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// The in-page client's API as seen from the host side.
pub trait HostApi: Send {
    /// Client responsiveness. Must hold a value from construction on.
    fn responsiveness(&self) -> ObservableValue<Responsiveness>;
    fn detailed_web_client_state(&self) -> DetailedWebClientState;
    fn should_allow_geolocation_permission_request(&self) -> bool;
    fn open_link_in_popup(&self, url: &str, size: Size);
    fn open_link_in_new_tab(&self, url: &str);
    fn waiting_on_panel_will_open(&self) -> bool;
    /// Handle a message posted by the guest page.
    fn handle_message(&mut self, message: &BridgeMessage);
    /// Called once when the bridge is torn down.
    fn shutdown(&mut self, final_state: Responsiveness);
}

/// What a [`HostApiFactory`] gets to build a host API.
#[derive(Clone)]
pub struct HostApiContext {
    pub origin: String,
    pub url: String,
    pub embedder: Arc<dyn GuestEmbedder>,
}

impl fmt::Debug for HostApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostApiContext")
            .field("origin", &self.origin)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

pub trait HostApiFactory: Send + Sync {
    fn create(&self, context: HostApiContext) -> Box<dyn HostApi>;
}

pub struct ClientBridge {
    origin: String,
    api: Box<dyn HostApi>,
    subscription: Subscription,
}

impl ClientBridge {
    /// Build a host API for `context` and start forwarding its
    /// responsiveness into `surface`.
    pub fn connect(
        factory: &dyn HostApiFactory,
        context: HostApiContext,
        memory: SharedMemory,
        surface: ObservableValue<Responsiveness>,
    ) -> Self {
        let origin = context.origin.clone();
        let api = factory.create(context);
        let subscription = api.responsiveness().subscribe(move |state| {
            if *state == Responsiveness::Responsive {
                memory.on_client_responsive();
            }
            surface.assign_and_signal(*state, false);
        });
        debug!(origin = %origin, "client bridge connected");
        Self {
            origin,
            api,
            subscription,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn api(&self) -> &dyn HostApi {
        self.api.as_ref()
    }

    pub fn api_mut(&mut self) -> &mut dyn HostApi {
        self.api.as_mut()
    }

    pub fn destroy(mut self, final_state: Responsiveness) {
        self.subscription.unsubscribe();
        self.api.shutdown(final_state);
        debug!(origin = %self.origin, state = ?final_state, "client bridge destroyed");
    }
}

impl fmt::Debug for ClientBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBridge")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
