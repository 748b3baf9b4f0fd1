//! Session coordinator: pause and progression state that outlives every scene,
//! the binding pass that attaches scene collaborators, and the commands UI and
//! gameplay code call into.

mod binding;
mod config;
mod diagnostics;
mod host;
mod pause;
mod progression;
mod roles;
mod singleton;


use std::cell::RefCell;
use std::rc::Rc;

use engine::EntityId;
use tracing::{debug, error, info, warn};

pub(crate) use binding::{BindingOutcome, BindingReport, BindingSet};
pub(crate) use config::{
    apply_target_scene_override, load_session_config, SessionConfig, SESSION_CONFIG_FILE,
    TARGET_SCENE_ENV_VAR,
};
pub(crate) use diagnostics::{ConfigurationFault, SessionDiagnostic};
pub(crate) use host::SessionHost;
pub(crate) use pause::PauseState;
pub(crate) use progression::ProgressionState;
pub(crate) use roles::{
    Collaborator, ElevatorControl, KeyCardItem, Overlay, PlayerAvatar, Requirement, Role,
    UiSurface,
};
pub(crate) use singleton::SessionCell;

use diagnostics::DiagnosticChannel;
use pause::PauseMachine;
use progression::ProgressionMachine;
use roles::Bound;

/// Discrete requests from the input layer and UI buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionEvent {
    PauseToggleRequested,
    StartRequested,
    QuitRequested,
}

pub(crate) struct Session {
    config: SessionConfig,
    pause: PauseMachine,
    progression: ProgressionMachine,
    player: Bound<dyn PlayerAvatar>,
    elevator: Bound<dyn ElevatorControl>,
    key_card: Bound<dyn KeyCardItem>,
    ui_surface: Bound<dyn UiSurface>,
    diagnostics: DiagnosticChannel,
    levels_completed: u32,
}

impl Session {
    pub(crate) fn new(config: SessionConfig) -> Self {
        let pause = PauseMachine::new(config.start_paused);
        Self {
            config,
            pause,
            progression: ProgressionMachine::default(),
            player: Bound::empty(),
            elevator: Bound::empty(),
            key_card: Bound::empty(),
            ui_surface: Bound::empty(),
            diagnostics: DiagnosticChannel::default(),
            levels_completed: 0,
        }
    }

    pub(crate) fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub(crate) fn is_title_scene(&self, scene: &str) -> bool {
        scene == self.config.title_scene
    }

    /// The UI surface persists across scenes like the session itself, so it is
    /// attached once by the bootstrap rather than bound per scene.
    pub(crate) fn attach_ui_surface(&mut self, surface: &Rc<RefCell<dyn UiSurface>>) {
        self.ui_surface.attach(surface);
    }

    /// Aligns the engine clock with the pause state (used once at boot).
    pub(crate) fn sync_clock(&self, host: &mut dyn SessionHost) {
        host.set_time_scale(self.pause.time_scale_for_state());
    }

    /// Attaches the scene's registrations. Roles that still hold a live reference
    /// are left alone; a missing required role is a configuration fault except
    /// in the title scene, which hosts no gameplay collaborators.
    pub(crate) fn bind_scene(&mut self, scene: &str, set: BindingSet) -> BindingReport {
        let in_title = self.is_title_scene(scene);
        let mut report = BindingReport::new(scene);

        for role in Role::BINDING_ORDER {
            let outcome = if self.is_role_live(role) {
                BindingOutcome::Retained
            } else if let Some(collaborator) = set.resolve(role) {
                self.attach(collaborator);
                BindingOutcome::Bound
            } else {
                BindingOutcome::Missing
            };

            if outcome == BindingOutcome::Missing {
                match role.requirement() {
                    Requirement::Required if !in_title => {
                        let fault = ConfigurationFault {
                            role,
                            scene: scene.to_string(),
                        };
                        error!(role = %role, scene, "{fault}");
                        self.diagnostics
                            .push(SessionDiagnostic::ConfigurationFault(fault.clone()));
                        report.faults.push(fault);
                    }
                    _ => debug!(role = %role, scene, "binding_role_absent"),
                }
            }
            report.outcomes.push((role, outcome));
        }

        info!(
            scene,
            registrations = set.len(),
            faults = report.faults.len(),
            player = ?self.player_entity(),
            "scene_bound"
        );
        report
    }

    fn is_role_live(&self, role: Role) -> bool {
        match role {
            Role::Player => self.player.is_live(),
            Role::Elevator => self.elevator.is_live(),
            Role::KeyCard => self.key_card.is_live(),
        }
    }

    fn attach(&mut self, collaborator: &Collaborator) {
        match collaborator {
            Collaborator::Player(player) => self.player.attach(player),
            Collaborator::Elevator(elevator) => self.elevator.attach(elevator),
            Collaborator::KeyCard(key_card) => self.key_card.attach(key_card),
        }
    }

    pub(crate) fn handle_event(
        &mut self,
        event: SessionEvent,
        active_scene: &str,
        host: &mut dyn SessionHost,
    ) {
        match event {
            SessionEvent::PauseToggleRequested => {
                if self.is_title_scene(active_scene) {
                    debug!(scene = active_scene, "pause_toggle_suppressed");
                    return;
                }
                self.toggle_pause(host);
            }
            SessionEvent::StartRequested => self.start_game(host),
            SessionEvent::QuitRequested => self.quit_game(host),
        }
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    pub(crate) fn pause_state(&self) -> PauseState {
        self.pause.state()
    }

    pub(crate) fn toggle_pause(&mut self, host: &mut dyn SessionHost) -> PauseState {
        let ui = self.ui_surface.get();
        let mut surface = ui.as_ref().and_then(|ui| match ui.try_borrow_mut() {
            Ok(surface) => Some(surface),
            Err(_) => {
                warn!("ui_surface_busy");
                None
            }
        });
        let state = match surface.as_deref_mut() {
            Some(surface) => self.pause.toggle(host, Some(surface)),
            None => self.pause.toggle(host, None),
        };
        info!(state = ?state, time_scale = host.time_scale(), "pause_toggled");
        state
    }

    pub(crate) fn start_game(&mut self, host: &mut dyn SessionHost) {
        info!(target_scene = %self.config.target_scene, "start_game");
        host.load_scene(&self.config.target_scene);
        self.show_overlay(None);
    }

    pub(crate) fn quit_game(&mut self, host: &mut dyn SessionHost) {
        info!("quit_game");
        host.terminate();
    }

    pub(crate) fn progression_state(&self) -> ProgressionState {
        self.progression.state()
    }

    pub(crate) fn collect_key_card(&mut self) {
        let unlocked_now = self.progression.unlock();
        info!(unlocked_now, "key_card_collected");

        let Some(elevator) = self.elevator.get() else {
            debug!("elevator_unbound_activation_skipped");
            return;
        };
        match elevator.try_borrow_mut() {
            Ok(mut elevator) => elevator.activate(),
            Err(_) => warn!("elevator_busy_activation_skipped"),
        };
    }

    pub(crate) fn is_elevator_available(&self) -> bool {
        let Some(elevator) = self.elevator.get() else {
            return false;
        };
        let available = match elevator.try_borrow() {
            Ok(elevator) => elevator.is_available(),
            Err(_) => {
                warn!("elevator_busy_availability_unknown");
                false
            }
        };
        available
    }

    pub(crate) fn notify_level_complete(&mut self, scene: &str) {
        self.levels_completed = self.levels_completed.saturating_add(1);
        info!(scene, total = self.levels_completed, "level_complete");
        self.diagnostics.push(SessionDiagnostic::LevelComplete {
            scene: scene.to_string(),
            total: self.levels_completed,
        });
    }

    pub(crate) fn levels_completed(&self) -> u32 {
        self.levels_completed
    }

    pub(crate) fn player_entity(&self) -> Option<EntityId> {
        let player = self.player.get()?;
        let entity = player.try_borrow().ok().map(|player| player.entity_id());
        entity
    }

    pub(crate) fn has_key_card(&self) -> bool {
        self.key_card.is_live()
    }

    pub(crate) fn drain_diagnostics(&mut self) -> Vec<SessionDiagnostic> {
        self.diagnostics.drain()
    }

    fn show_overlay(&self, overlay: Option<Overlay>) {
        let Some(surface) = self.ui_surface.get() else {
            debug!(overlay = ?overlay, "ui_surface_unbound");
            return;
        };
        match surface.try_borrow_mut() {
            Ok(mut surface) => surface.show_overlay(overlay),
            Err(_) => warn!(overlay = ?overlay, "ui_surface_busy"),
        };
    }
}
