//! Bridge protocol between the host and the guest page.
//!
//! Messages flow in both directions:
//! - **Guest -> host**: the page calls `window.webpanel.host.*`, which posts
//!   `{"kind": ..., "payload": ...}` through `window.ipc.postMessage`.
//! - **Host -> guest**: the host evaluates `window.webpanel.ipc._dispatch(kind, payload)`
//!   in the page, reaching callbacks registered with `window.webpanel.ipc.on`.

use serde::{Deserialize, Serialize};

/// A typed bridge message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMessage {
    /// The message type / command name.
    pub kind: String,
    /// The message payload (arbitrary JSON, `null` when absent).
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl BridgeMessage {
    /// Parse a message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// A message without payload.
    pub fn signal(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn json(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    pub fn payload_u64(&self, key: &str) -> Option<u64> {
        self.payload.get(key).and_then(serde_json::Value::as_u64)
    }

    pub fn payload_bool(&self, key: &str) -> Option<bool> {
        self.payload.get(key).and_then(serde_json::Value::as_bool)
    }
}

/// JavaScript installed into every guest document before its own scripts run.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    if (window.webpanel) { return; }
    function post(kind, payload) {
        window.ipc.postMessage(JSON.stringify({ kind: kind, payload: payload || null }));
    }
    window.webpanel = {
        host: {
            bootstrapping: function() { post('bootstrapping'); },
            clientReady: function() { post('clientReady'); },
            clientError: function(reason) { post('clientError', { reason: reason || null }); },
            clientUnresponsive: function() { post('clientUnresponsive'); },
            resize: function(width, height, durationMs) {
                post('resize', { width: width, height: height, durationMs: durationMs || 0 });
            },
            showPanel: function() { post('showPanel'); },
            closePanel: function() { post('closePanel'); },
            setGeolocationAllowed: function(allowed) { post('geolocation', { allowed: !!allowed }); },
            setWaitingOnPanelWillOpen: function(waiting) { post('panelWillOpen', { waiting: !!waiting }); }
        },
        ipc: {
            _handlers: {},
            on: function(kind, callback) { this._handlers[kind] = callback; },
            _dispatch: function(kind, payload) {
                var handler = this._handlers[kind];
                if (handler) { handler(payload); }
            }
        }
    };
})();
"#;

/// Generate a JS snippet that dispatches a message to the guest's handlers.
pub fn js_dispatch_message(message: &BridgeMessage) -> String {
    let payload_json =
        serde_json::to_string(&message.payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.webpanel && window.webpanel.ipc._dispatch({}, {});",
        serde_json::to_string(&message.kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_with_payload() {
        let msg =
            BridgeMessage::from_json(r#"{"kind":"resize","payload":{"width":300,"height":500}}"#)
                .unwrap();
        assert_eq!(msg.kind, "resize");
        assert_eq!(msg.payload_u64("width"), Some(300));
        assert_eq!(msg.payload_u64("height"), Some(500));
        assert_eq!(msg.payload_u64("durationMs"), None);
    }

    #[test]
    fn parses_message_without_payload() {
        let msg = BridgeMessage::from_json(r#"{"kind":"clientReady"}"#).unwrap();
        assert_eq!(msg, BridgeMessage::signal("clientReady"));
    }

    #[test]
    fn rejects_non_message_json() {
        assert!(BridgeMessage::from_json("[1,2,3]").is_none());
        assert!(BridgeMessage::from_json("not json").is_none());
    }

    #[test]
    fn dispatch_escapes_kind() {
        let msg = BridgeMessage::json("say\"hi", serde_json::json!({"a": 1}));
        let js = js_dispatch_message(&msg);
        assert!(js.contains(r#"_dispatch("say\"hi", {"a":1})"#));
    }

    #[test]
    fn init_script_exposes_host_api() {
        assert!(IPC_INIT_SCRIPT.contains("clientReady"));
        assert!(IPC_INIT_SCRIPT.contains("window.ipc.postMessage"));
        assert!(IPC_INIT_SCRIPT.contains("_dispatch"));
    }
}
