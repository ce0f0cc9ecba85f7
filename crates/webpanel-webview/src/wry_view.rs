//! `wry` backend for [`GuestView`].
//!
//! wry reports navigation requests, new-window requests, page loads and IPC
//! messages. It has no renderer-exit, unresponsive or permission hooks, so
//! those events never come from this backend.

use std::sync::Arc;

use tracing::{debug, warn};
use webpanel_common::{Result, Size, WebPanelError};
use wry::raw_window_handle::HasWindowHandle;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::events::{FrameKind, GuestEvent, WindowDisposition};
use crate::ipc::{js_dispatch_message, BridgeMessage};
use crate::view::{GuestView, GuestViewFactory, GuestViewRequest};

fn webview_error(e: wry::Error) -> WebPanelError {
    WebPanelError::WebView(e.to_string())
}

/// Convert a panel size to a wry rect anchored at the parent's origin.
pub fn size_to_wry_rect(size: Size) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            f64::from(size.width),
            f64::from(size.height),
        )),
    }
}

/// Builds guest views as children of `parent`.
pub struct WryGuestViewFactory<W> {
    parent: Arc<W>,
    initial_size: Size,
    devtools: bool,
}

impl<W: HasWindowHandle> WryGuestViewFactory<W> {
    pub fn new(parent: Arc<W>, initial_size: Size, devtools: bool) -> Self {
        Self {
            parent,
            initial_size,
            devtools,
        }
    }
}

impl<W: HasWindowHandle> GuestViewFactory for WryGuestViewFactory<W> {
    fn create(&self, request: GuestViewRequest) -> Result<Box<dyn GuestView>> {
        let GuestViewRequest {
            interceptor,
            sink,
            init_script,
        } = request;

        let nav_sink = Arc::clone(&sink);
        let window_sink = Arc::clone(&sink);
        let ipc_sink = sink;

        let webview = WebViewBuilder::new()
            .with_bounds(size_to_wry_rect(self.initial_size))
            .with_devtools(self.devtools)
            .with_visible(false)
            .with_focused(false)
            .with_initialization_script(init_script)
            // wry only exposes top-level navigations here.
            .with_navigation_handler(move |url| {
                interceptor.on_before_request(&url, FrameKind::TopLevel)
            })
            .with_new_window_req_handler(move |url| {
                window_sink(GuestEvent::NewWindow {
                    url,
                    disposition: WindowDisposition::NewForegroundTab,
                    size: None,
                });
                false
            })
            .with_on_page_load_handler(move |event, url| {
                // The backend's initial empty document is not a guest commit.
                if matches!(event, PageLoadEvent::Started) && url != "about:blank" {
                    nav_sink(GuestEvent::NavigationCommitted {
                        url,
                        frame: FrameKind::TopLevel,
                    });
                }
            })
            .with_ipc_handler(move |request| {
                let body = request.body().to_string();
                if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                    warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
                    return;
                }
                ipc_sink(GuestEvent::Message { body });
            })
            .build_as_child(self.parent.as_ref())
            .map_err(webview_error)?;

        debug!(size = %self.initial_size, "guest webview created");
        Ok(Box::new(WryGuestView {
            webview: Some(webview),
        }))
    }
}

pub struct WryGuestView {
    webview: Option<WebView>,
}

impl WryGuestView {
    fn webview(&self) -> Result<&WebView> {
        self.webview
            .as_ref()
            .ok_or_else(|| WebPanelError::WebView("guest webview already removed".into()))
    }
}

impl GuestView for WryGuestView {
    fn load_url(&mut self, url: &str) -> Result<()> {
        debug!(url = %url, "loading guest URL");
        self.webview()?.load_url(url).map_err(webview_error)
    }

    fn post_message(&self, message: &BridgeMessage) -> Result<()> {
        self.webview()?
            .evaluate_script(&js_dispatch_message(message))
            .map_err(webview_error)
    }

    fn set_visible(&self, visible: bool) -> Result<()> {
        self.webview()?.set_visible(visible).map_err(webview_error)
    }

    fn set_size(&self, size: Size) -> Result<()> {
        self.webview()?
            .set_bounds(size_to_wry_rect(size))
            .map_err(webview_error)
    }

    fn remove(&mut self) {
        if let Some(webview) = self.webview.take() {
            if let Err(e) = webview.set_visible(false) {
                warn!(error = %e, "failed to hide guest webview before removal");
            }
            drop(webview);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_converts_to_logical_rect() {
        let rect = size_to_wry_rect(Size::new(400, 600));
        match rect.position {
            wry::dpi::Position::Logical(pos) => {
                assert!(pos.x.abs() < f64::EPSILON);
                assert!(pos.y.abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical position"),
        }
        match rect.size {
            wry::dpi::Size::Logical(size) => {
                assert!((size.width - 400.0).abs() < f64::EPSILON);
                assert!((size.height - 600.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical size"),
        }
    }
}
