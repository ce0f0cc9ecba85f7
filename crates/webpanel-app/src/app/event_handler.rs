//! `ApplicationHandler` implementation for the winit event loop.

use std::time::Instant;

use webpanel_panel::PanelInput;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use super::core::WebPanelApp;
use super::types::{AppEvent, POLL_INTERVAL};

/// Map a pressed key to a panel action.
pub(super) fn key_input(key: &Key) -> Option<PanelInput> {
    match key {
        Key::Named(NamedKey::F5) => Some(PanelInput::Reload),
        Key::Named(NamedKey::F12) => Some(PanelInput::ShowDebug),
        Key::Named(NamedKey::Escape) => Some(PanelInput::Close),
        _ => None,
    }
}

impl ApplicationHandler<AppEvent> for WebPanelApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Focused(true) => self.dispatch(PanelInput::IntentToShow),

            WindowEvent::KeyboardInput { event, .. } => self.handle_keyboard_input(event),

            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        let Some(ref window) = self.window else {
            return;
        };
        match event {
            AppEvent::Resize { size, duration } => {
                tracing::debug!(size = %size, duration_ms = duration.as_millis() as u64, "resizing panel");
                let _ = window.request_inner_size(winit::dpi::LogicalSize::new(
                    f64::from(size.width),
                    f64::from(size.height),
                ));
            }
            AppEvent::Close => {
                tracing::debug!("closing panel");
                window.set_minimized(true);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(ref mut controller) = self.controller {
            controller.pump();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}

impl WebPanelApp {
    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        let KeyEvent {
            logical_key,
            state,
            repeat,
            ..
        } = event;
        if state != ElementState::Pressed || repeat {
            return;
        }
        if let Some(input) = key_input(&logical_key) {
            tracing::debug!(key = ?logical_key, "panel shortcut");
            self.dispatch(input);
        }
    }
}
