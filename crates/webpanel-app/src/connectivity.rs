//! Connectivity monitor: a TCP probe to the guest host on a fixed interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use url::Url;
use webpanel_config::schema::NetworkConfig;
use webpanel_panel::PanelInput;

/// Host and port probed for connectivity.
pub type ProbeTarget = (String, u16);

/// Derive the probe target from the guest URL.
pub fn probe_target(url: &str) -> Option<ProbeTarget> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_string();
    let port = parsed.port_or_known_default()?;
    Some((host, port))
}

/// True if a TCP connection to `target` opens within `timeout`.
pub async fn probe(target: &ProbeTarget, timeout: Duration) -> bool {
    let (host, port) = target;
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect((host.as_str(), *port))).await,
        Ok(Ok(_))
    )
}

/// Probe periodically, keep `online` current, and report changes.
///
/// Stops once the controller's input queue is closed.
pub fn spawn_monitor(
    handle: &Handle,
    target: ProbeTarget,
    network: &NetworkConfig,
    online: Arc<AtomicBool>,
    tx: UnboundedSender<PanelInput>,
) -> JoinHandle<()> {
    let interval = network.probe_interval();
    let timeout = network.probe_timeout();

    handle.spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the caller already probed.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let now_online = probe(&target, timeout).await;
            let was_online = online.swap(now_online, Ordering::SeqCst);
            if now_online == was_online {
                continue;
            }
            tracing::info!(online = now_online, host = %target.0, "connectivity changed");
            if tx
                .send(PanelInput::NetworkChanged { online: now_online })
                .is_err()
            {
                tracing::debug!("panel input queue closed, stopping connectivity monitor");
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn target_uses_default_port() {
        assert_eq!(
            probe_target("https://panel.example.com/app"),
            Some(("panel.example.com".to_string(), 443))
        );
        assert_eq!(
            probe_target("http://localhost:8080/"),
            Some(("localhost".to_string(), 8080))
        );
    }

    #[test]
    fn target_requires_host() {
        assert_eq!(probe_target("data:text/html,hi"), None);
        assert_eq!(probe_target("not a url"), None);
    }

    #[tokio::test]
    async fn probe_reaches_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let target = ("127.0.0.1".to_string(), port);
        assert!(probe(&target, Duration::from_secs(2)).await);

        drop(listener);
        assert!(!probe(&target, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn monitor_reports_changes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let online = Arc::new(AtomicBool::new(false));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let network = NetworkConfig {
            probe_interval_ms: 20,
            probe_timeout_ms: 10,
        };

        let task = spawn_monitor(
            &Handle::current(),
            ("127.0.0.1".to_string(), port),
            &network,
            Arc::clone(&online),
            tx,
        );

        let input = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert!(matches!(
            input,
            Some(PanelInput::NetworkChanged { online: true })
        ));
        assert!(online.load(Ordering::SeqCst));

        drop(rx);
        drop(listener);
        let _ = tokio::time::timeout(Duration::from_secs(2), task).await;
    }
}
