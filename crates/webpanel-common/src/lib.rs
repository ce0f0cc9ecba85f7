//! Shared building blocks for the webpanel crates: the error taxonomy,
//! panel value types, an observable value slot and a one-shot timer.

pub mod errors;
pub mod observable;
pub mod timer;
pub mod types;

pub use errors::{ConfigError, HostError, TimerReset, WebPanelError};
pub use observable::{ObservableValue, Subscription};
pub use timer::{OneShotTimer, TimerWait};
pub use types::{LinkTarget, PanelKind, PanelState, Size};

pub type Result<T> = std::result::Result<T, WebPanelError>;
