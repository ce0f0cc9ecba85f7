//! The panel state machine.
//!
//! [`PanelController`] decides which [`PanelState`](webpanel_common::PanelState)
//! the panel is in, owns the live guest surface, and reports every state it
//! enters to the [`PanelHost`](crate::host::PanelHost). All of its work runs on
//! one task: inputs are queued on an unbounded channel and handled to
//! completion one at a time.

mod core;
mod dispatch;
mod guest;
mod signals;
mod states;


pub use self::core::{PanelController, PanelDeps};
