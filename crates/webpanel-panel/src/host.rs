//! The embedding host, as seen by the panel controller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use webpanel_common::{HostError, LinkTarget, PanelState, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStatus {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepareResult {
    pub success: bool,
}

/// Outbound calls from the panel to whatever embeds it.
#[async_trait]
pub trait PanelHost: Send + Sync {
    /// Connectivity at the time of the call.
    fn is_online(&self) -> bool;

    async fn is_profile_enabled(&self) -> Result<ProfileStatus, HostError>;

    /// Prepare session state for the guest client (cookie sync and the like).
    async fn prepare_for_client(&self) -> Result<PrepareResult, HostError>;

    fn web_ui_state_changed(&self, state: PanelState);
    fn resize_widget(&self, size: Size, duration: Duration);
    fn close_panel(&self);
    fn webview_committed(&self, url: &str);
    fn open_url(&self, url: &str, target: LinkTarget);
}

/// Logs every call made to the wrapped host, then delegates.
pub struct LoggingHost<H> {
    inner: H,
}

impl<H: PanelHost> LoggingHost<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

#[async_trait]
impl<H: PanelHost> PanelHost for LoggingHost<H> {
    fn is_online(&self) -> bool {
        let online = self.inner.is_online();
        debug!(online, "host.is_online");
        online
    }

    async fn is_profile_enabled(&self) -> Result<ProfileStatus, HostError> {
        debug!("host.is_profile_enabled ->");
        let result = self.inner.is_profile_enabled().await;
        debug!(?result, "host.is_profile_enabled <-");
        result
    }

    async fn prepare_for_client(&self) -> Result<PrepareResult, HostError> {
        debug!("host.prepare_for_client ->");
        let result = self.inner.prepare_for_client().await;
        debug!(?result, "host.prepare_for_client <-");
        result
    }

    fn web_ui_state_changed(&self, state: PanelState) {
        debug!(state = %state, "host.web_ui_state_changed");
        self.inner.web_ui_state_changed(state);
    }

    fn resize_widget(&self, size: Size, duration: Duration) {
        debug!(size = %size, duration_ms = duration.as_millis() as u64, "host.resize_widget");
        self.inner.resize_widget(size, duration);
    }

    fn close_panel(&self) {
        debug!("host.close_panel");
        self.inner.close_panel();
    }

    fn webview_committed(&self, url: &str) {
        debug!(url = %url, "host.webview_committed");
        self.inner.webview_committed(url);
    }

    fn open_url(&self, url: &str, target: LinkTarget) {
        debug!(url = %url, ?target, "host.open_url");
        self.inner.open_url(url, target);
    }
}

/// Wrap `host` in a [`LoggingHost`] when `log_calls` is set.
pub fn instrument<H: PanelHost + 'static>(host: H, log_calls: bool) -> Arc<dyn PanelHost> {
    if log_calls {
        Arc::new(LoggingHost::new(host))
    } else {
        Arc::new(host)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct CountingHost {
        calls: Mutex<Vec<String>>,
    }

    impl CountingHost {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }
    }

    #[async_trait]
    impl PanelHost for CountingHost {
        fn is_online(&self) -> bool {
            self.record("is_online");
            true
        }
        async fn is_profile_enabled(&self) -> Result<ProfileStatus, HostError> {
            self.record("is_profile_enabled");
            Ok(ProfileStatus { enabled: true })
        }
        async fn prepare_for_client(&self) -> Result<PrepareResult, HostError> {
            self.record("prepare_for_client");
            Err(HostError::Rpc("boom".into()))
        }
        fn web_ui_state_changed(&self, state: PanelState) {
            self.record(&format!("state {state}"));
        }
        fn resize_widget(&self, size: Size, _duration: Duration) {
            self.record(&format!("resize {size}"));
        }
        fn close_panel(&self) {
            self.record("close");
        }
        fn webview_committed(&self, url: &str) {
            self.record(&format!("committed {url}"));
        }
        fn open_url(&self, url: &str, _target: LinkTarget) {
            self.record(&format!("open {url}"));
        }
    }

    #[tokio::test]
    async fn logging_host_delegates_everything() {
        let host = LoggingHost::new(CountingHost::default());
        assert!(host.is_online());
        assert_eq!(
            host.is_profile_enabled().await,
            Ok(ProfileStatus { enabled: true })
        );
        assert_eq!(
            host.prepare_for_client().await,
            Err(HostError::Rpc("boom".into()))
        );
        host.web_ui_state_changed(PanelState::Ready);
        host.resize_widget(Size::new(10, 20), Duration::ZERO);
        host.close_panel();
        host.webview_committed("https://panel.example.com/");
        host.open_url("https://docs.example.com/", LinkTarget::NewTab);

        let calls = host.into_inner().calls.into_inner().unwrap();
        assert_eq!(
            calls,
            vec![
                "is_online",
                "is_profile_enabled",
                "prepare_for_client",
                "state ready",
                "resize 10x20",
                "close",
                "committed https://panel.example.com/",
                "open https://docs.example.com/",
            ]
        );
    }

    #[test]
    fn instrument_returns_usable_host() {
        let plain = instrument(CountingHost::default(), false);
        let logged = instrument(CountingHost::default(), true);
        assert!(plain.is_online());
        assert!(logged.is_online());
    }
}
