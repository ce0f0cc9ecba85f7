//! Markup for the static panels shown while the guest is hidden.

use webpanel_common::PanelKind;

const STYLE: &str = "\
html,body{margin:0;height:100%;background:#1f1f1f;color:#e8eaed;\
font:14px system-ui,-apple-system,'Segoe UI',sans-serif;}\
body{display:flex;align-items:center;justify-content:center;text-align:center;}\
h1{font-size:15px;font-weight:600;margin:0 0 6px;}\
p{margin:0;color:#9aa0a6;}\
.spinner{width:20px;height:20px;margin:0 auto 10px;border:2px solid #5f6368;\
border-top-color:#8ab4f8;border-radius:50%;animation:spin 0.8s linear infinite;}\
@keyframes spin{to{transform:rotate(360deg)}}";

/// Heading and detail text for a static panel. `None` for the guest panel.
pub fn panel_copy(kind: PanelKind) -> Option<(&'static str, &'static str)> {
    match kind {
        PanelKind::Loading => Some(("Loading", "Connecting to the panel...")),
        PanelKind::Error => Some((
            "Something went wrong",
            "Press F5 or reopen the panel to try again.",
        )),
        PanelKind::Offline => Some((
            "You're offline",
            "The panel will load when you reconnect.",
        )),
        PanelKind::Unavailable => Some((
            "Not available",
            "This panel is not available for your account.",
        )),
        PanelKind::Guest => None,
    }
}

/// Full HTML document for a static panel.
pub fn panel_html(kind: PanelKind) -> Option<String> {
    let (title, detail) = panel_copy(kind)?;
    let spinner = if kind == PanelKind::Loading {
        "<div class=\"spinner\"></div>"
    } else {
        ""
    };
    Some(format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>{STYLE}</style></head>\
         <body><div>{spinner}<h1>{title}</h1><p>{detail}</p></div></body></html>"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIC: [PanelKind; 4] = [
        PanelKind::Loading,
        PanelKind::Error,
        PanelKind::Offline,
        PanelKind::Unavailable,
    ];

    #[test]
    fn guest_has_no_static_markup() {
        assert!(panel_html(PanelKind::Guest).is_none());
    }

    #[test]
    fn static_panels_have_distinct_headings() {
        let mut titles: Vec<&str> = STATIC
            .iter()
            .map(|k| panel_copy(*k).unwrap().0)
            .collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), STATIC.len());
    }

    #[test]
    fn only_loading_spins() {
        for kind in STATIC {
            let html = panel_html(kind).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert_eq!(html.contains("class=\"spinner\""), kind == PanelKind::Loading);
        }
    }
}
