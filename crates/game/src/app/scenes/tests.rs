use engine::{InputAction, InputSnapshot, SceneCommand, SceneMachine, SimClock, Vec2};

use super::*;
use crate::app::session::{PauseState, ProgressionState};

const TITLE: &str = "TitleScreen";
const LEVEL: &str = "FirstLevel";

struct Harness {
    scenes: SceneMachine<GameContext>,
    ctx: GameContext,
    clock: SimClock,
}

impl Harness {
    fn new() -> Self {
        Self::with(SessionConfig::default(), LevelLayout::default())
    }

    fn with(config: SessionConfig, layout: LevelLayout) -> Self {
        let mut scenes: SceneMachine<GameContext> =
            SceneMachine::new(TITLE, Box::new(TitleScene::new(TITLE)));
        scenes
            .register(LEVEL, Box::new(LevelScene::new(LEVEL, layout)))
            .expect("register level");
        let mut ctx = GameContext::new(config);
        scenes.load_scene(TITLE, &mut ctx).expect("load title");
        Self {
            scenes,
            ctx,
            clock: SimClock::new(1.0 / 60.0),
        }
    }

    /// One tick in the order the loop runs it.
    fn step(&mut self, input: InputSnapshot) -> SceneCommand {
        let command = self
            .scenes
            .update_active(&mut self.clock, &input, &mut self.ctx);
        self.scenes.apply_pending_active();
        self.clock.advance();
        if let SceneCommand::LoadScene(name) = &command {
            self.scenes
                .load_scene(name, &mut self.ctx)
                .expect("load requested scene");
        }
        command
    }

    fn hold(&mut self, action: InputAction, ticks: u32) {
        for _ in 0..ticks {
            self.step(InputSnapshot::empty().with_action_down(action, true));
        }
    }

    fn start_level(&mut self) {
        self.step(InputSnapshot::empty().with_confirm_pressed(true));
        assert_eq!(self.scenes.active_scene(), LEVEL);
    }

    fn position_of(&self, debug_name: &str) -> Option<Vec2> {
        self.scenes
            .active_world()
            .entities()
            .iter()
            .find(|entity| entity.renderable.debug_name == debug_name)
            .map(|entity| entity.transform.position)
    }
}

#[test]
fn confirm_on_title_loads_target_level_and_clears_overlay() {
    let mut harness = Harness::new();
    assert_eq!(harness.ctx.overlay(), Some(Overlay::TitleMenu));

    let command = harness.step(InputSnapshot::empty().with_confirm_pressed(true));

    assert_eq!(command, SceneCommand::LoadScene(LEVEL.to_string()));
    assert_eq!(harness.scenes.active_scene(), LEVEL);
    assert_eq!(harness.ctx.overlay(), None);
    assert!(harness.ctx.session().player_entity().is_some());
    assert!(harness.ctx.session().has_key_card());
    assert!(harness.ctx.session_mut().drain_diagnostics().is_empty());
}

#[test]
fn pause_on_title_is_ignored() {
    let mut harness = Harness::new();

    harness.step(InputSnapshot::empty().with_pause_pressed(true));

    assert!(!harness.ctx.session().is_paused());
    assert_eq!(harness.clock.time_scale(), 1.0);
    assert_eq!(harness.ctx.overlay(), Some(Overlay::TitleMenu));
}

#[test]
fn quit_on_title_requests_quit() {
    let mut harness = Harness::new();

    let command = harness.step(InputSnapshot::empty().with_quit_pressed(true));

    assert_eq!(command, SceneCommand::Quit);
    assert_eq!(harness.scenes.active_scene(), TITLE);
}

#[test]
fn pause_in_level_freezes_clock_and_movement() {
    let mut harness = Harness::new();
    harness.start_level();

    harness.step(InputSnapshot::empty().with_pause_pressed(true));
    assert_eq!(harness.ctx.session().pause_state(), PauseState::Paused);
    assert_eq!(harness.ctx.overlay(), Some(Overlay::PauseMenu));
    assert!(harness.clock.is_frozen());
    assert_eq!(harness.ctx.overlay_tint(), harness.scenes.screen_tint_active(&harness.ctx));

    harness.hold(InputAction::MoveRight, 10);
    assert_eq!(harness.position_of("player"), Some(Vec2 { x: 0.0, y: 0.0 }));

    harness.step(InputSnapshot::empty().with_pause_pressed(true));
    assert_eq!(harness.ctx.session().pause_state(), PauseState::Running);
    assert_eq!(harness.ctx.overlay(), None);
    assert_eq!(harness.clock.time_scale(), 1.0);
}

#[test]
fn confirm_while_paused_resumes() {
    let mut harness = Harness::new();
    harness.start_level();
    harness.step(InputSnapshot::empty().with_pause_pressed(true));

    harness.step(InputSnapshot::empty().with_confirm_pressed(true));

    assert!(!harness.ctx.session().is_paused());
    assert_eq!(harness.scenes.active_scene(), LEVEL);
}

#[test]
fn quit_from_pause_menu_requests_quit() {
    let mut harness = Harness::new();
    harness.start_level();
    harness.step(InputSnapshot::empty().with_pause_pressed(true));

    let command = harness.step(InputSnapshot::empty().with_quit_pressed(true));

    assert_eq!(command, SceneCommand::Quit);
}

#[test]
fn quit_during_play_is_ignored() {
    let mut harness = Harness::new();
    harness.start_level();

    let command = harness.step(InputSnapshot::empty().with_quit_pressed(true));

    assert_eq!(command, SceneCommand::None);
}

#[test]
fn walking_over_key_card_unlocks_and_powers_elevator() {
    let mut harness = Harness::new();
    harness.start_level();
    assert!(!harness.ctx.session().is_elevator_available());

    harness.hold(InputAction::MoveRight, 40);

    let session = harness.ctx.session();
    assert_eq!(session.progression_state(), ProgressionState::Unlocked);
    assert!(session.is_elevator_available());
    assert!(!session.has_key_card());
    assert!(harness.position_of("key_card").is_none());
    assert_eq!(session.levels_completed(), 0);
}

#[test]
fn entering_open_elevator_completes_level_once() {
    let mut harness = Harness::new();
    harness.start_level();

    harness.hold(InputAction::MoveRight, 75);

    assert_eq!(harness.ctx.session().levels_completed(), 1);
}

#[test]
fn locked_elevator_does_not_complete_level() {
    let layout = LevelLayout {
        key_card: Vec2 { x: 0.0, y: 10.0 },
        elevator: Vec2 { x: 2.0, y: 0.0 },
        ..LevelLayout::default()
    };
    let mut harness = Harness::with(SessionConfig::default(), layout);
    harness.start_level();

    harness.hold(InputAction::MoveRight, 40);

    let session = harness.ctx.session();
    assert_eq!(session.progression_state(), ProgressionState::Locked);
    assert!(!session.is_elevator_available());
    assert_eq!(session.levels_completed(), 0);
}

#[test]
fn reloading_level_rebinds_fresh_objects() {
    let mut harness = Harness::new();
    harness.start_level();
    harness.hold(InputAction::MoveRight, 40);
    assert!(!harness.ctx.session().has_key_card());

    harness
        .scenes
        .load_scene(LEVEL, &mut harness.ctx)
        .expect("reload level");

    let session = harness.ctx.session_mut();
    assert!(session.has_key_card());
    assert!(session.player_entity().is_some());
    assert_eq!(session.progression_state(), ProgressionState::Unlocked);
    assert!(session.drain_diagnostics().is_empty());
}

#[test]
fn start_paused_config_freezes_clock_on_first_tick() {
    let config = SessionConfig {
        start_paused: true,
        ..SessionConfig::default()
    };
    let mut harness = Harness::with(config, LevelLayout::default());

    harness.step(InputSnapshot::empty());

    assert!(harness.ctx.session().is_paused());
    assert!(harness.clock.is_frozen());
}
