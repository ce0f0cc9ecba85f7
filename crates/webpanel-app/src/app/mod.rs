//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window and the panel controller, and pumps the
//! controller's input queue between window events.

mod core;
mod event_handler;
mod init;
mod shutdown;
mod types;

pub use core::WebPanelApp;
pub use types::AppEvent;
