//! Desktop implementation of the panel host.
//!
//! The profile switch comes from config, readiness is a HEAD request to the
//! guest URL, and window-facing calls are forwarded to the event loop.

use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};
use webpanel_common::{HostError, LinkTarget, PanelState, Size};
use webpanel_panel::{PanelHost, PrepareResult, ProfileStatus};
use winit::event_loop::EventLoopProxy;

use crate::app::AppEvent;

const PREPARE_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport failures mean the guest server could not be reached at all;
/// anything else is a failed call.
fn host_error(e: reqwest::Error) -> HostError {
    if e.is_connect() || e.is_timeout() {
        HostError::Unavailable(e.to_string())
    } else {
        HostError::Rpc(e.to_string())
    }
}

/// A HEAD response means the guest can be loaded unless the server failed.
pub fn is_prepared(status: StatusCode) -> bool {
    !status.is_server_error()
}

pub struct DesktopHost {
    client: reqwest::Client,
    guest_url: String,
    enabled: bool,
    online: Arc<AtomicBool>,
    proxy: Mutex<EventLoopProxy<AppEvent>>,
}

impl DesktopHost {
    pub fn new(
        guest_url: impl Into<String>,
        enabled: bool,
        online: Arc<AtomicBool>,
        proxy: EventLoopProxy<AppEvent>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            guest_url: guest_url.into(),
            enabled,
            online,
            proxy: Mutex::new(proxy),
        }
    }

    fn send(&self, event: AppEvent) {
        let proxy = self.proxy.lock().unwrap_or_else(|e| e.into_inner());
        if proxy.send_event(event).is_err() {
            debug!("event loop closed, dropping host event");
        }
    }
}

#[async_trait]
impl PanelHost for DesktopHost {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    async fn is_profile_enabled(&self) -> Result<ProfileStatus, HostError> {
        Ok(ProfileStatus {
            enabled: self.enabled,
        })
    }

    async fn prepare_for_client(&self) -> Result<PrepareResult, HostError> {
        let response = self
            .client
            .head(&self.guest_url)
            .timeout(PREPARE_TIMEOUT)
            .send()
            .await
            .map_err(host_error)?;
        let status = response.status();
        debug!(url = %self.guest_url, status = status.as_u16(), "guest URL probed");
        Ok(PrepareResult {
            success: is_prepared(status),
        })
    }

    fn web_ui_state_changed(&self, state: PanelState) {
        info!(state = %state, "panel state");
    }

    fn resize_widget(&self, size: Size, duration: Duration) {
        self.send(AppEvent::Resize { size, duration });
    }

    fn close_panel(&self) {
        self.send(AppEvent::Close);
    }

    fn webview_committed(&self, url: &str) {
        debug!(url = %url, "guest committed");
    }

    fn open_url(&self, url: &str, target: LinkTarget) {
        // The desktop has no popup surface; popups open in the browser too.
        debug!(url = %url, target = ?target, "opening link externally");
        if let Err(e) = open_external(url) {
            warn!(url = %url, error = %e, "failed to open link");
        }
    }
}

fn open_external(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    };

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_not_prepared() {
        assert!(is_prepared(StatusCode::OK));
        assert!(is_prepared(StatusCode::FOUND));
        assert!(is_prepared(StatusCode::NOT_FOUND));
        assert!(is_prepared(StatusCode::METHOD_NOT_ALLOWED));
        assert!(!is_prepared(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_prepared(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn refused_connection_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = reqwest::Client::new()
            .head(format!("http://127.0.0.1:{port}/"))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .unwrap_err();
        assert!(matches!(host_error(err), HostError::Unavailable(_)));
    }
}
