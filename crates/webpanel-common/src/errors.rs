use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure of an outbound call to the embedding host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("host rpc failed: {0}")]
    Rpc(String),

    #[error("host unavailable: {0}")]
    Unavailable(String),
}

/// Yielded by an awaitable timer that was canceled before it fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("timer reset")]
pub struct TimerReset;

#[derive(Debug, thiserror::Error)]
pub enum WebPanelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("loading.max_loading_time_ms".into());
        assert_eq!(
            err.to_string(),
            "config validation error: loading.max_loading_time_ms"
        );
    }

    #[test]
    fn host_error_display() {
        let err = HostError::Rpc("channel closed".into());
        assert_eq!(err.to_string(), "host rpc failed: channel closed");

        let err = HostError::Unavailable("shutting down".into());
        assert_eq!(err.to_string(), "host unavailable: shutting down");
    }

    #[test]
    fn timer_reset_display() {
        assert_eq!(TimerReset.to_string(), "timer reset");
    }

    #[test]
    fn webpanel_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: WebPanelError = config_err.into();
        assert!(matches!(err, WebPanelError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn webpanel_error_from_host() {
        let err: WebPanelError = HostError::Rpc("timeout".into()).into();
        assert!(matches!(err, WebPanelError::Host(_)));
        assert_eq!(err.to_string(), "host rpc failed: timeout");
    }

    #[test]
    fn webpanel_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: WebPanelError = io_err.into();
        assert!(matches!(err, WebPanelError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn webpanel_error_webview_variant() {
        let err = WebPanelError::WebView("child window refused".into());
        assert_eq!(err.to_string(), "webview error: child window refused");
    }
}
