mod host;
mod hud;
mod level;
mod title;

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::rc::Rc;

use engine::SimClock;
use tracing::{debug, info, warn};

use super::session::{
    Overlay, Session, SessionCell, SessionConfig, SessionDiagnostic, UiSurface,
};

pub(crate) use host::EngineHost;
pub(crate) use hud::Hud;
pub(crate) use level::{LevelLayout, LevelScene};
pub(crate) use title::TitleScene;

/// State handed to every scene hook. Owns the session cell and the HUD, both of
/// which persist across scene loads.
pub(crate) struct GameContext {
    sessions: SessionCell,
    hud: Rc<RefCell<Hud>>,
    clock_synced: bool,
}

impl GameContext {
    pub(crate) fn new(config: SessionConfig) -> Self {
        let hud = Rc::new(RefCell::new(Hud::default()));
        let mut session = Session::new(config);
        let surface: Rc<RefCell<dyn UiSurface>> = hud.clone();
        session.attach_ui_surface(&surface);
        Self {
            sessions: SessionCell::new(session),
            hud,
            clock_synced: false,
        }
    }

    pub(crate) fn session(&self) -> &Session {
        self.sessions.instance()
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        self.sessions.instance_mut()
    }

    pub(crate) fn overlay(&self) -> Option<Overlay> {
        self.hud.try_borrow().ok().and_then(|hud| hud.overlay())
    }

    pub(crate) fn overlay_tint(&self) -> Option<[u8; 4]> {
        self.hud.try_borrow().ok().and_then(|hud| hud.tint())
    }

    pub(crate) fn show_overlay(&self, overlay: Option<Overlay>) {
        match self.hud.try_borrow_mut() {
            Ok(mut hud) => hud.show_overlay(overlay),
            Err(_) => warn!(overlay = ?overlay, "hud_busy"),
        };
    }

    /// Applies the session's pause state to the engine clock on the first tick.
    /// The clock is owned by the loop, so this cannot happen at bootstrap.
    pub(crate) fn sync_clock_once(&mut self, clock: &mut SimClock) {
        if self.clock_synced {
            return;
        }
        self.clock_synced = true;
        let mut host = EngineHost::new(clock);
        self.sessions.instance().sync_clock(&mut host);
        debug!(time_scale = clock.time_scale(), "clock_synced");
    }

    /// Drains the session's diagnostics into one summary line.
    pub(crate) fn report_diagnostics(&mut self, scene: &str) {
        let diagnostics = self.sessions.instance_mut().drain_diagnostics();
        if diagnostics.is_empty() {
            return;
        }
        let faults = diagnostics
            .iter()
            .filter(|diagnostic| matches!(diagnostic, SessionDiagnostic::ConfigurationFault(_)))
            .count();
        info!(
            scene,
            total = diagnostics.len(),
            faults,
            discarded_sessions = self.sessions.discarded(),
            "session_diagnostics"
        );
    }
}
