//! Handlers for external signals.

use tracing::{debug, info, warn};
use webpanel_common::PanelState;
use webpanel_webview::{PageType, Responsiveness};

use super::core::PanelController;
use crate::input::GuestSignal;

impl PanelController {
    pub(super) fn on_network_changed(&mut self, online: bool) {
        let online = online && !self.config.debug.simulate_offline;
        debug!(online, state = %self.state, "network changed");
        match (online, self.state) {
            (true, PanelState::Offline) => self.set_state(PanelState::BeginLoad),
            (
                false,
                PanelState::BeginLoad | PanelState::ShowLoading | PanelState::FinishLoading,
            ) => self.set_state(PanelState::Offline),
            _ => {}
        }
    }

    pub(super) fn on_guest_signal(&mut self, signal: GuestSignal) {
        match signal {
            GuestSignal::View(event) => {
                if let Some(guest) = self.guest.as_mut() {
                    guest.handle_event(event);
                }
            }
            GuestSignal::Responsiveness(Responsiveness::Responsive) => self.on_client_ready(),
            GuestSignal::Responsiveness(Responsiveness::Error) => {
                if self.state.is_loading() {
                    warn!(state = %self.state, "guest client failed while loading");
                    self.set_state(PanelState::Error);
                }
            }
            GuestSignal::Responsiveness(Responsiveness::Uninitialized) => {}
            GuestSignal::PageCommitted { url, page } => self.on_page_committed(&url, page),
            GuestSignal::Unresponsive => self.set_state(PanelState::Unresponsive),
            GuestSignal::Crashed(reason) => {
                warn!(reason = %reason, code = reason.code(), "guest crashed");
                self.set_state(PanelState::Error);
            }
            GuestSignal::AdminDenied { url } => {
                info!(url = %url, "guest navigation denied by administrator");
                self.set_state(PanelState::Unavailable);
            }
            GuestSignal::ResizeRequested { size, duration } => {
                self.guest_size = size;
                if self.state == PanelState::Ready {
                    let size = self.guest_size();
                    if let Some(guest) = &self.guest {
                        if let Err(e) = guest.set_size(size) {
                            warn!(error = %e, "failed to size guest view");
                        }
                    }
                    self.host.resize_widget(size, duration);
                }
            }
            GuestSignal::ShowRequested => {
                if self.state == PanelState::Ready {
                    self.show_guest();
                }
            }
            GuestSignal::CloseRequested => self.close(),
            GuestSignal::OpenUrl { url, target } => self.host.open_url(&url, target),
        }
    }

    fn on_client_ready(&mut self) {
        match self.state {
            PanelState::BeginLoad | PanelState::FinishLoading => self.set_state(PanelState::Ready),
            // The loading panel is already up; keep it for the minimum time.
            PanelState::ShowLoading => self.set_state(PanelState::HoldLoading),
            other => debug!(state = %other, "client ready ignored"),
        }
    }

    fn on_page_committed(&mut self, url: &str, page: PageType) {
        self.host.webview_committed(url);
        match page {
            PageType::Regular => {}
            PageType::LoadError => {
                warn!(url = %url, "guest failed to load");
                self.set_state(PanelState::Error);
            }
            PageType::Login | PageType::GuestError => {
                if page == PageType::Login {
                    self.guest_size = self.config.window.login_size();
                }
                if self.state.is_loading() {
                    self.set_state(PanelState::Ready);
                } else if self.state == PanelState::Ready {
                    self.show_guest();
                }
            }
        }
    }

    pub fn intent_to_show(&mut self) {
        match self.state {
            PanelState::Error => self.reload(),
            PanelState::Ready => {
                if let Some(guest) = &self.guest {
                    debug!(
                        waiting = guest.waiting_on_panel_will_open(),
                        "notifying guest that the panel will open"
                    );
                    if let Err(e) = guest.notify_panel_will_open() {
                        warn!(error = %e, "failed to notify guest");
                    }
                }
            }
            _ => {}
        }
    }

    pub fn reload(&mut self) {
        info!(state = %self.state, "reloading panel");
        self.destroy_guest();
        self.set_state(PanelState::BeginLoad);
    }

    pub fn close(&mut self) {
        if self.state == PanelState::Ready && self.debug_mode {
            self.leave_debug_mode();
            self.set_state(PanelState::Error);
        } else {
            self.host.close_panel();
        }
    }

    pub fn show_debug(&mut self) {
        if !self.config.debug.enable_debug {
            warn!("show_debug ignored: debug mode is not enabled");
            return;
        }
        if self.guest.is_none() {
            if let Err(e) = self.recreate_guest() {
                warn!(error = %e, "failed to create guest surface for debugging");
                self.set_state(PanelState::Error);
                return;
            }
        }
        // Cleared first so entering Ready keeps the override.
        let was_debug = std::mem::replace(&mut self.debug_mode, false);
        self.debug_size = Some(self.config.window.debug_size());
        self.set_state(PanelState::Ready);
        self.debug_mode = true;
        if !was_debug {
            self.presentation.set_debug_mode(true);
        }
    }

    pub(super) fn leave_debug_mode(&mut self) {
        self.debug_mode = false;
        self.debug_size = None;
        self.presentation.set_debug_mode(false);
    }
}
