mod app;
mod cli;
mod connectivity;
mod host;
mod panels;
mod presentation;

use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use webpanel_common::ConfigError;
use webpanel_config::schema::WebPanelConfig;
use winit::event_loop::EventLoop;

use crate::app::{AppEvent, WebPanelApp};

const DEFAULT_LOG_DIRECTIVE: &str = "webpanel=info";

fn init_logging(directive: &str) {
    let directive: Result<Directive, _> = directive
        .parse()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse());
    let filter = match directive {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Only a missing file falls back to defaults. A file that is present but
/// unreadable or invalid would silently drop its origin and block lists.
fn resolve_config(
    loaded: Result<WebPanelConfig, ConfigError>,
) -> Result<WebPanelConfig, ConfigError> {
    match loaded {
        Err(ConfigError::FileNotFound(path)) => {
            tracing::warn!("Config file {} not found, using defaults", path.display());
            Ok(WebPanelConfig::default())
        }
        other => other,
    }
}

fn apply_overrides(config: &mut WebPanelConfig, args: &cli::Args) {
    if let Some(ref url) = args.url {
        config.guest.url = url.clone();
    }
    if args.offline {
        config.debug.simulate_offline = true;
    }
    if args.debug {
        config.debug.enable_debug = true;
    }
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Logging depends on the config, so report load problems after init.
    let loaded = webpanel_config::load_config(args.config.as_deref());
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => format!("webpanel={}", config.logging.level),
        (None, Err(_)) => DEFAULT_LOG_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("webpanel v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = match resolve_config(loaded) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut config, &args);
    if let Err(e) = webpanel_config::validation::validate(&config) {
        tracing::error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!(url = %config.guest.url, "Config loaded");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("webpanel-rt")
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let target = connectivity::probe_target(&config.guest.url);
    let online = match &target {
        Some(target) => runtime.block_on(connectivity::probe(
            target,
            config.network.probe_timeout(),
        )),
        None => false,
    };
    tracing::info!(online, "Initial connectivity probed");

    let event_loop = match EventLoop::<AppEvent>::with_user_event().build() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The panel controller spawns its timers and host calls from the
    // event-loop thread.
    let guard = runtime.enter();
    let mut app = WebPanelApp::new(
        config,
        runtime.handle().clone(),
        event_loop.create_proxy(),
        target,
        online,
    );

    tracing::info!("Entering event loop");
    let result = event_loop.run_app(&mut app);
    drop(app);
    drop(guard);
    runtime.shutdown_timeout(Duration::from_secs(2));

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Event loop error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn cli_overrides_config() {
        let args = cli::Args::try_parse_from([
            "webpanel",
            "--url",
            "https://other.test/",
            "--offline",
        ])
        .unwrap();
        let mut config = WebPanelConfig::default();
        apply_overrides(&mut config, &args);
        assert_eq!(config.guest.url, "https://other.test/");
        assert!(config.debug.simulate_offline);
        assert!(!config.debug.enable_debug);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let loaded = Err(ConfigError::FileNotFound("/nonexistent/config.toml".into()));
        let config = resolve_config(loaded).unwrap();
        assert_eq!(config.guest.url, WebPanelConfig::default().guest.url);
    }

    #[test]
    fn broken_config_file_is_fatal() {
        let err = resolve_config(Err(ConfigError::ParseError("invalid TOML".into()))).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[guest]\nadmin_blocked_patterns = [\"https://x.test/*\"]\n[logging]\nlevel = \"chatty\"\n",
        )
        .unwrap();
        let err = resolve_config(webpanel_config::load_config(Some(&path))).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn no_overrides_keeps_config() {
        let args = cli::Args::try_parse_from(["webpanel"]).unwrap();
        let mut config = WebPanelConfig::default();
        apply_overrides(&mut config, &args);
        assert_eq!(config.guest.url, WebPanelConfig::default().guest.url);
        assert!(!config.debug.simulate_offline);
    }
}
