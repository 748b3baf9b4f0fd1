use super::host::{SessionHost, FROZEN_TIME_SCALE, NORMAL_TIME_SCALE};
use super::roles::{Overlay, UiSurface};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum PauseState {
    #[default]
    Running,
    Paused,
}

#[derive(Debug, Default)]
pub(crate) struct PauseMachine {
    state: PauseState,
}

impl PauseMachine {
    pub(crate) fn new(start_paused: bool) -> Self {
        let state = if start_paused {
            PauseState::Paused
        } else {
            PauseState::Running
        };
        Self { state }
    }

    pub(crate) fn state(&self) -> PauseState {
        self.state
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.state == PauseState::Paused
    }

    /// Flips the state. Pausing freezes the clock before the overlay is shown;
    /// resuming clears the overlay before the clock is restored.
    pub(crate) fn toggle(
        &mut self,
        host: &mut dyn SessionHost,
        ui: Option<&mut dyn UiSurface>,
    ) -> PauseState {
        match self.state {
            PauseState::Running => {
                host.set_time_scale(FROZEN_TIME_SCALE);
                if let Some(ui) = ui {
                    ui.show_overlay(Some(Overlay::PauseMenu));
                }
                self.state = PauseState::Paused;
            }
            PauseState::Paused => {
                if let Some(ui) = ui {
                    ui.show_overlay(None);
                }
                host.set_time_scale(NORMAL_TIME_SCALE);
                self.state = PauseState::Running;
            }
        }
        self.state
    }

    pub(crate) fn time_scale_for_state(&self) -> f32 {
        match self.state {
            PauseState::Running => NORMAL_TIME_SCALE,
            PauseState::Paused => FROZEN_TIME_SCALE,
        }
    }
}
