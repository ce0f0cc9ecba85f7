//! [`HostApi`] backed by the JSON bridge protocol in [`crate::ipc`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use webpanel_common::{LinkTarget, ObservableValue, Size};

use crate::bridge::{
    DetailedWebClientState, HostApi, HostApiContext, HostApiFactory, Responsiveness,
};
use crate::delegate::GuestEmbedder;
use crate::ipc::BridgeMessage;

pub struct IpcHostApi {
    origin: String,
    responsiveness: ObservableValue<Responsiveness>,
    detailed: DetailedWebClientState,
    geolocation_allowed: bool,
    waiting_on_panel_will_open: bool,
    embedder: Arc<dyn GuestEmbedder>,
}

impl IpcHostApi {
    pub fn new(context: HostApiContext) -> Self {
        Self {
            origin: context.origin,
            responsiveness: ObservableValue::with_value(Responsiveness::Uninitialized),
            detailed: DetailedWebClientState::WebClientNotCreated,
            geolocation_allowed: false,
            waiting_on_panel_will_open: false,
            embedder: context.embedder,
        }
    }

    fn on_resize(&self, message: &BridgeMessage) {
        let (Some(width), Some(height)) =
            (message.payload_u64("width"), message.payload_u64("height"))
        else {
            warn!(origin = %self.origin, "resize message without dimensions");
            return;
        };
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            warn!(origin = %self.origin, width, height, "resize dimensions out of range");
            return;
        };
        let duration = Duration::from_millis(message.payload_u64("durationMs").unwrap_or(0));
        self.embedder
            .resize_requested(Size::new(width, height), duration);
    }
}

impl HostApi for IpcHostApi {
    fn responsiveness(&self) -> ObservableValue<Responsiveness> {
        self.responsiveness.clone()
    }

    fn detailed_web_client_state(&self) -> DetailedWebClientState {
        self.detailed
    }

    fn should_allow_geolocation_permission_request(&self) -> bool {
        self.geolocation_allowed
    }

    fn open_link_in_popup(&self, url: &str, size: Size) {
        self.embedder.open_url(
            url,
            LinkTarget::Popup {
                width: size.width,
                height: size.height,
            },
        );
    }

    fn open_link_in_new_tab(&self, url: &str) {
        self.embedder.open_url(url, LinkTarget::NewTab);
    }

    fn waiting_on_panel_will_open(&self) -> bool {
        self.waiting_on_panel_will_open
    }

    fn handle_message(&mut self, message: &BridgeMessage) {
        debug!(origin = %self.origin, kind = %message.kind, "bridge message");
        match message.kind.as_str() {
            "bootstrapping" => self.detailed = DetailedWebClientState::Bootstrapping,
            "clientReady" => {
                self.detailed = DetailedWebClientState::Responsive;
                self.responsiveness
                    .assign_and_signal(Responsiveness::Responsive, false);
            }
            "clientError" => {
                self.detailed = DetailedWebClientState::WebClientInitializeFailed;
                self.responsiveness
                    .assign_and_signal(Responsiveness::Error, false);
            }
            "clientUnresponsive" => {
                self.detailed = DetailedWebClientState::WebClientNotResponsive;
            }
            "resize" => self.on_resize(message),
            "showPanel" => self.embedder.show_requested(),
            "closePanel" => self.embedder.close_requested(),
            "geolocation" => {
                self.geolocation_allowed = message.payload_bool("allowed").unwrap_or(false);
            }
            "panelWillOpen" => {
                self.waiting_on_panel_will_open =
                    message.payload_bool("waiting").unwrap_or(false);
            }
            other => warn!(origin = %self.origin, kind = %other, "unknown bridge message"),
        }
    }

    fn shutdown(&mut self, final_state: Responsiveness) {
        if final_state == Responsiveness::Error {
            self.detailed = DetailedWebClientState::PermanentError;
        }
        self.responsiveness.assign_and_signal(final_state, false);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IpcHostApiFactory;

impl HostApiFactory for IpcHostApiFactory {
    fn create(&self, context: HostApiContext) -> Box<dyn HostApi> {
        Box::new(IpcHostApi::new(context))
    }
}
