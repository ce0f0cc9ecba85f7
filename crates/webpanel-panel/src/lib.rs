//! Panel-loading orchestration for webpanel.
//!
//! [`PanelController`] is a timed state machine that decides when to show a
//! loading indicator, when to reveal the guest, and how to recover from
//! network loss, load timeouts and guest crashes. It talks to the outside
//! through [`PanelHost`] and [`Presentation`] and never touches a window
//! system directly.

pub mod controller;
pub mod host;
pub mod input;
pub mod presentation;

pub use controller::{PanelController, PanelDeps};
pub use host::{instrument, LoggingHost, PanelHost, PrepareResult, ProfileStatus};
pub use input::{GuestSignal, PanelInput, PanelLink};
pub use presentation::Presentation;
