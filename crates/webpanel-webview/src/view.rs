//! The embedded guest element, abstracted over its rendering backend.

use std::sync::Arc;

use tracing::{debug, warn};
use webpanel_common::{Result, Size};

use crate::events::{FrameKind, GuestEvent};
use crate::ipc::BridgeMessage;
use crate::navigation::{NavigationPolicy, RequestDecision};

/// Receives every event a guest view emits.
pub type GuestEventSink = Arc<dyn Fn(GuestEvent) + Send + Sync>;

/// Runs the navigation policy before each guest request.
///
/// Backends call [`on_before_request`](Self::on_before_request) from their
/// navigation hook and cancel the request when it returns `false`.
#[derive(Clone)]
pub struct NavigationInterceptor {
    policy: Arc<NavigationPolicy>,
    sink: GuestEventSink,
}

impl NavigationInterceptor {
    pub fn new(policy: NavigationPolicy, sink: GuestEventSink) -> Self {
        Self {
            policy: Arc::new(policy),
            sink,
        }
    }

    pub fn on_before_request(&self, url: &str, frame: FrameKind) -> bool {
        match self.policy.check(url, frame) {
            RequestDecision::Allow => {
                debug!(url = %url, ?frame, "request allowed");
                true
            }
            RequestDecision::Cancel => {
                warn!(url = %url, "navigation blocked: origin not allowed");
                false
            }
            RequestDecision::DeniedByAdmin => {
                warn!(url = %url, "navigation blocked by administrator policy");
                (self.sink)(GuestEvent::AdminBlocked {
                    url: url.to_string(),
                });
                false
            }
        }
    }
}

/// Everything a backend needs to build a guest view.
#[derive(Clone)]
pub struct GuestViewRequest {
    pub interceptor: NavigationInterceptor,
    pub sink: GuestEventSink,
    /// Script installed into every document before the page's own scripts.
    pub init_script: &'static str,
}

/// A live embedded guest element. Starts hidden and empty.
pub trait GuestView {
    fn load_url(&mut self, url: &str) -> Result<()>;
    fn post_message(&self, message: &BridgeMessage) -> Result<()>;
    fn set_visible(&self, visible: bool) -> Result<()>;
    fn set_size(&self, size: Size) -> Result<()>;

    /// Answer a pending permission request. Backends without permission
    /// prompts ignore this.
    fn resolve_permission(&self, _request_id: u64, _allow: bool) {}

    /// Detach the element from its parent. Called exactly once.
    fn remove(&mut self);
}

pub trait GuestViewFactory {
    fn create(&self, request: GuestViewRequest) -> Result<Box<dyn GuestView>>;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use webpanel_config::schema::GuestConfig;

    use super::*;

    fn interceptor(blocked: &[&str]) -> (NavigationInterceptor, Arc<Mutex<Vec<GuestEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink_events = Arc::clone(&events);
        let sink: GuestEventSink = Arc::new(move |e: GuestEvent| sink_events.lock().unwrap().push(e));
        let config = GuestConfig {
            admin_blocked_patterns: blocked.iter().map(|s| s.to_string()).collect(),
            ..GuestConfig::default()
        };
        let policy = NavigationPolicy::from_config(&config).unwrap();
        (NavigationInterceptor::new(policy, sink), events)
    }

    #[test]
    fn allowed_request_emits_nothing() {
        let (interceptor, events) = interceptor(&[]);
        assert!(interceptor.on_before_request("https://panel.example.com/x", FrameKind::TopLevel));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn foreign_origin_is_silently_canceled() {
        let (interceptor, events) = interceptor(&[]);
        assert!(!interceptor.on_before_request("https://evil.com/", FrameKind::TopLevel));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn admin_block_is_reported() {
        let (interceptor, events) = interceptor(&["https://panel.example.com/admin*"]);
        assert!(!interceptor.on_before_request(
            "https://panel.example.com/admin/x",
            FrameKind::TopLevel
        ));
        assert_eq!(
            *events.lock().unwrap(),
            vec![GuestEvent::AdminBlocked {
                url: "https://panel.example.com/admin/x".into()
            }]
        );
    }
}
