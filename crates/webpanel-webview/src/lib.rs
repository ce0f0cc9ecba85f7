//! Guest surface for webpanel: the embedded web client, the policy that
//! guards its navigation, and the bridge that talks to the client.
//!
//! The guest view itself sits behind [`GuestView`]; [`wry_view`] provides
//! the desktop backend.

pub mod bridge;
pub mod delegate;
pub mod events;
pub mod exit_reason;
pub mod ipc;
pub mod ipc_host;
pub mod memory;
pub mod navigation;
pub mod page;
pub mod surface;
pub mod view;
pub mod wry_view;

pub use bridge::{
    ClientBridge, DetailedWebClientState, HostApi, HostApiContext, HostApiFactory, Responsiveness,
};
pub use delegate::{GuestDelegate, GuestEmbedder};
pub use events::{FrameKind, GuestEvent, PermissionKind, WindowDisposition};
pub use exit_reason::ExitReason;
pub use ipc::BridgeMessage;
pub use ipc_host::{IpcHostApi, IpcHostApiFactory};
pub use memory::{PersistentMemory, SharedMemory};
pub use navigation::{origin_of, NavigationPolicy, RequestDecision};
pub use page::{PageClassifier, PageType};
pub use surface::{GuestSurfaceController, GuestSurfaceParams};
pub use view::{GuestEventSink, GuestView, GuestViewFactory, GuestViewRequest, NavigationInterceptor};
pub use wry_view::WryGuestViewFactory;
