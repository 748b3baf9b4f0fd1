use engine::{SceneCommand, SimClock};

use crate::app::session::SessionHost;

/// Session side effects for one tick: time scale goes straight to the clock,
/// scene loads and termination become the tick's [`SceneCommand`].
pub(crate) struct EngineHost<'a> {
    clock: &'a mut SimClock,
    command: SceneCommand,
}

impl<'a> EngineHost<'a> {
    pub(crate) fn new(clock: &'a mut SimClock) -> Self {
        Self {
            clock,
            command: SceneCommand::None,
        }
    }

    pub(crate) fn into_command(self) -> SceneCommand {
        self.command
    }
}

impl SessionHost for EngineHost<'_> {
    fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    // Quit requested earlier in the same tick is not overridden.
    fn load_scene(&mut self, name: &str) {
        if self.command != SceneCommand::Quit {
            self.command = SceneCommand::LoadScene(name.to_string());
        }
    }

    fn terminate(&mut self) {
        self.command = SceneCommand::Quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminate_wins_over_scene_load() {
        let mut clock = SimClock::default();
        let mut host = EngineHost::new(&mut clock);
        host.terminate();
        host.load_scene("FirstLevel");
        assert_eq!(host.into_command(), SceneCommand::Quit);
    }

    #[test]
    fn time_scale_is_forwarded_to_clock() {
        let mut clock = SimClock::default();
        let mut host = EngineHost::new(&mut clock);
        host.set_time_scale(0.0);
        assert_eq!(host.time_scale(), 0.0);
        assert_eq!(host.into_command(), SceneCommand::None);
        assert!(clock.is_frozen());
    }
}
