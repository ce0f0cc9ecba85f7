//! Visual side of the panel, kept out of the state machine.

use webpanel_common::{PanelKind, Size};

pub trait Presentation {
    /// Show `kind` and hide every other panel.
    fn show_panel(&mut self, kind: PanelKind);

    /// Measured bounds of a static panel.
    fn panel_size(&self, kind: PanelKind) -> Size;

    fn set_debug_mode(&mut self, enabled: bool);
}
