//! wry-hosted presentation of the static panels.

use std::sync::Arc;

use tracing::{debug, warn};
use webpanel_common::{PanelKind, Result, Size, WebPanelError};
use webpanel_config::schema::WindowConfig;
use webpanel_panel::Presentation;
use webpanel_webview::wry_view::size_to_wry_rect;
use winit::window::Window;
use wry::{WebView, WebViewBuilder};

use crate::panels::panel_html;

const WINDOW_TITLE: &str = "webpanel";

/// Shows static panels in a chrome webview layered under the guest view.
pub struct ChromePresentation {
    window: Arc<Window>,
    webview: WebView,
    status_size: Size,
    current: Option<PanelKind>,
}

impl ChromePresentation {
    pub fn new(window: Arc<Window>, config: &WindowConfig) -> Result<Self> {
        let status_size = config.status_size();
        let webview = WebViewBuilder::new()
            .with_bounds(size_to_wry_rect(status_size))
            .with_visible(false)
            .with_focused(false)
            .build_as_child(window.as_ref())
            .map_err(|e| WebPanelError::WebView(e.to_string()))?;

        Ok(Self {
            window,
            webview,
            status_size,
            current: None,
        })
    }
}

impl Presentation for ChromePresentation {
    fn show_panel(&mut self, kind: PanelKind) {
        let Some(html) = panel_html(kind) else {
            if let Err(e) = self.webview.set_visible(false) {
                warn!(error = %e, "failed to hide chrome webview");
            }
            self.current = Some(kind);
            return;
        };

        if self.current != Some(kind) {
            if let Err(e) = self.webview.load_html(&html) {
                warn!(error = %e, panel = ?kind, "failed to load panel markup");
            }
        }
        if let Err(e) = self.webview.set_bounds(size_to_wry_rect(self.status_size)) {
            warn!(error = %e, "failed to size chrome webview");
        }
        if let Err(e) = self.webview.set_visible(true) {
            warn!(error = %e, "failed to show chrome webview");
        }
        debug!(panel = ?kind, "static panel shown");
        self.current = Some(kind);
    }

    fn panel_size(&self, _kind: PanelKind) -> Size {
        self.status_size
    }

    fn set_debug_mode(&mut self, enabled: bool) {
        let title = if enabled {
            format!("{WINDOW_TITLE} [debug]")
        } else {
            WINDOW_TITLE.to_string()
        };
        self.window.set_title(&title);
        self.window.set_resizable(enabled);
    }
}
