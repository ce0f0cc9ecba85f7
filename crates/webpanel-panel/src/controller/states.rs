//! Per-state entry and exit actions, and the timed transitions they arm.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, warn};
use webpanel_common::{PanelKind, PanelState};

use super::core::PanelController;
use crate::input::PanelInput;

type Action = fn(&mut PanelController);

/// Entry and exit actions of one state.
pub(super) struct StateDescriptor {
    pub on_enter: Option<Action>,
    pub on_exit: Option<Action>,
}

static BEGIN_LOAD: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_begin_load),
    on_exit: Some(PanelController::cancel_timer),
};

static SHOW_LOADING: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_show_loading),
    on_exit: Some(PanelController::cancel_timer),
};

static HOLD_LOADING: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_hold_loading),
    on_exit: Some(PanelController::cancel_timer),
};

static FINISH_LOADING: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_finish_loading),
    on_exit: Some(PanelController::cancel_timer),
};

static READY: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_ready),
    on_exit: None,
};

static ERROR: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_error),
    on_exit: None,
};

static OFFLINE: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_offline),
    on_exit: None,
};

static UNAVAILABLE: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_unavailable),
    on_exit: None,
};

// No dedicated panel yet; shows the error panel.
static UNRESPONSIVE: StateDescriptor = StateDescriptor {
    on_enter: Some(PanelController::enter_error),
    on_exit: None,
};

pub(super) fn descriptor(state: PanelState) -> &'static StateDescriptor {
    match state {
        PanelState::BeginLoad => &BEGIN_LOAD,
        PanelState::ShowLoading => &SHOW_LOADING,
        PanelState::HoldLoading => &HOLD_LOADING,
        PanelState::FinishLoading => &FINISH_LOADING,
        PanelState::Ready => &READY,
        PanelState::Error => &ERROR,
        PanelState::Offline => &OFFLINE,
        PanelState::Unavailable => &UNAVAILABLE,
        PanelState::Unresponsive => &UNRESPONSIVE,
    }
}

impl PanelController {
    // =========================================================================
    // TIMER
    // =========================================================================

    /// Queue a `TimerFired` after `delay`, replacing any pending one.
    pub(super) fn arm_timer(&mut self, delay: Duration) {
        self.timer_generation += 1;
        let generation = self.timer_generation;
        let tx = self.tx.clone();
        debug!(generation, delay_ms = delay.as_millis() as u64, state = %self.state, "timer armed");
        self.timer.start(delay, move || {
            let _ = tx.send(PanelInput::TimerFired { generation });
        });
    }

    pub(super) fn cancel_timer(&mut self) {
        self.timer.reset();
        // A firing already queued is now stale.
        self.timer_generation += 1;
    }

    pub(super) fn on_timer_fired(&mut self) {
        match self.state {
            PanelState::BeginLoad => self.set_state(PanelState::ShowLoading),
            PanelState::ShowLoading => self.set_state(PanelState::FinishLoading),
            PanelState::HoldLoading => self.set_state(PanelState::Ready),
            PanelState::FinishLoading => {
                let detailed = self.guest.as_ref().map(|guest| guest.detailed_state());
                let exit_reason = self.guest.as_ref().and_then(|guest| guest.exit_reason());
                let login_page = self.guest.as_ref().is_some_and(|guest| guest.is_login_page());
                warn!(
                    detailed_state = ?detailed,
                    exit_reason = ?exit_reason,
                    login_page,
                    max_ms = self.config.loading.max_loading_time_ms,
                    "guest did not become ready in time"
                );
                self.set_state(PanelState::Error);
            }
            other => debug!(state = %other, "timer fired in a state without timeout"),
        }
    }

    // =========================================================================
    // LOADING STATES
    // =========================================================================

    fn enter_begin_load(&mut self) {
        self.load_generation += 1;
        let generation = self.load_generation;
        self.show_loading_at = Instant::now() + self.config.loading.pre_loading();

        let host = self.host.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (profile, prepared) =
                tokio::join!(host.is_profile_enabled(), host.prepare_for_client());
            let enabled = match profile {
                Ok(status) => status.enabled,
                Err(e) => {
                    warn!(error = %e, "is_profile_enabled failed, assuming enabled");
                    true
                }
            };
            let success = match prepared {
                Ok(result) => result.success,
                Err(e) => {
                    warn!(error = %e, "prepare_for_client failed");
                    false
                }
            };
            let _ = tx.send(PanelInput::PrepareFinished {
                generation,
                enabled,
                success,
            });
        });
    }

    pub(super) fn on_prepare_finished(&mut self, enabled: bool, success: bool) {
        debug!(enabled, success, "prepare finished");
        if !enabled {
            self.set_state(PanelState::Unavailable);
            return;
        }
        if !success {
            self.set_state(PanelState::Error);
            return;
        }
        if let Err(e) = self.recreate_guest() {
            error!(error = %e, "failed to create guest surface");
            self.set_state(PanelState::Error);
            return;
        }
        let delay = self
            .show_loading_at
            .saturating_duration_since(Instant::now());
        self.arm_timer(delay);
    }

    fn enter_show_loading(&mut self) {
        self.show_static(PanelKind::Loading);
        let min = self.config.loading.min_loading();
        self.earliest_dismiss_at = Instant::now() + min;
        self.arm_timer(min);
    }

    fn enter_hold_loading(&mut self) {
        let delay = self
            .earliest_dismiss_at
            .saturating_duration_since(Instant::now());
        self.arm_timer(delay);
    }

    fn enter_finish_loading(&mut self) {
        self.arm_timer(self.config.loading.finish_loading());
    }

    // =========================================================================
    // SETTLED STATES
    // =========================================================================

    fn enter_ready(&mut self) {
        if self.debug_mode {
            self.leave_debug_mode();
        }
        self.show_guest();
    }

    fn enter_error(&mut self) {
        self.destroy_guest();
        self.show_static(PanelKind::Error);
    }

    fn enter_offline(&mut self) {
        self.destroy_guest();
        self.show_static(PanelKind::Offline);
    }

    fn enter_unavailable(&mut self) {
        self.destroy_guest();
        self.show_static(PanelKind::Unavailable);
    }
}
