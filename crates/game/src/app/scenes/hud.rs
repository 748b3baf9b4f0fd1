use tracing::info;

use crate::app::session::{Overlay, UiSurface};

const TITLE_MENU_TINT: [u8; 4] = [12, 14, 38, 210];
const PAUSE_MENU_TINT: [u8; 4] = [0, 0, 0, 150];

/// Menu overlay state. Presentation is a full-screen tint per overlay.
#[derive(Debug, Default)]
pub(crate) struct Hud {
    overlay: Option<Overlay>,
}

impl Hud {
    pub(crate) fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub(crate) fn tint(&self) -> Option<[u8; 4]> {
        self.overlay.map(|overlay| match overlay {
            Overlay::TitleMenu => TITLE_MENU_TINT,
            Overlay::PauseMenu => PAUSE_MENU_TINT,
        })
    }
}

impl UiSurface for Hud {
    fn show_overlay(&mut self, overlay: Option<Overlay>) {
        if self.overlay == overlay {
            return;
        }
        info!(from = ?self.overlay, to = ?overlay, "overlay_changed");
        self.overlay = overlay;
    }
}
