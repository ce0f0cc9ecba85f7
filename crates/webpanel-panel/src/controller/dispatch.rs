//! Input dispatch and state transitions.

use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info, warn};
use webpanel_common::PanelState;

use super::core::PanelController;
use super::states::descriptor;
use crate::input::PanelInput;

impl PanelController {
    /// Enter the initial state. Must be called once, inside a tokio runtime.
    pub fn start(&mut self) {
        if self.started {
            warn!("panel controller already started");
            return;
        }
        self.started = true;
        let initial = self.state;
        info!(state = %initial, "entering initial state");
        if let Some(enter) = descriptor(initial).on_enter {
            enter(self);
        }
        if self.state == initial {
            self.host.web_ui_state_changed(initial);
        }
    }

    /// Start, then handle inputs until the queue closes.
    pub async fn run(mut self) {
        self.start();
        while let Some(input) = self.rx.recv().await {
            self.handle(input);
        }
    }

    /// Handle every input already queued. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.rx.try_recv() {
                Ok(input) => {
                    self.handle(input);
                    handled += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return handled,
            }
        }
    }

    pub fn handle(&mut self, input: PanelInput) {
        match input {
            PanelInput::NetworkChanged { online } => self.on_network_changed(online),
            PanelInput::TimerFired { generation } => {
                if generation != self.timer_generation {
                    debug!(generation, current = self.timer_generation, "stale timer firing");
                    return;
                }
                self.on_timer_fired();
            }
            PanelInput::PrepareFinished {
                generation,
                enabled,
                success,
            } => {
                if generation != self.load_generation || self.state != PanelState::BeginLoad {
                    debug!(
                        generation,
                        current = self.load_generation,
                        state = %self.state,
                        "stale prepare completion"
                    );
                    return;
                }
                self.on_prepare_finished(enabled, success);
            }
            PanelInput::Guest { generation, signal } => {
                if generation != self.guest_generation || self.guest.is_none() {
                    debug!(
                        generation,
                        current = self.guest_generation,
                        "signal from destroyed guest"
                    );
                    return;
                }
                self.on_guest_signal(signal);
            }
            PanelInput::IntentToShow => self.intent_to_show(),
            PanelInput::Reload => self.reload(),
            PanelInput::Close => self.close(),
            PanelInput::ShowDebug => self.show_debug(),
        }
    }

    /// Exit the current state, switch, enter the next one, then report it.
    pub(super) fn set_state(&mut self, next: PanelState) {
        let previous = self.state;
        info!(from = %previous, to = %next, "panel state transition");

        if let Some(exit) = descriptor(previous).on_exit {
            exit(self);
        }
        self.state = next;
        if let Some(enter) = descriptor(next).on_enter {
            enter(self);
        }

        // An entry action that transitions again has already reported.
        if self.state == next {
            self.host.web_ui_state_changed(next);
        }
    }
}
