use engine::{
    InputSnapshot, RenderableDesc, RenderableKind, Scene, SceneCommand, SceneWorld, SimClock,
    Transform, Vec2,
};
use tracing::info;

use super::{EngineHost, GameContext};
use crate::app::session::{BindingSet, Overlay, SessionEvent};

const BANNER_COLOR: [u8; 4] = [196, 58, 64, 255];

/// Menu scene: confirm starts the game, quit exits. Hosts no gameplay roles.
pub(crate) struct TitleScene {
    name: String,
}

impl TitleScene {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Scene<GameContext> for TitleScene {
    fn load(&mut self, ctx: &mut GameContext, world: &mut SceneWorld) {
        world.spawn(
            Transform {
                position: Vec2 { x: 0.0, y: 1.5 },
            },
            RenderableDesc {
                kind: RenderableKind::Solid(BANNER_COLOR),
                debug_name: "title_banner",
            },
        );
        ctx.session_mut().bind_scene(&self.name, BindingSet::default());
        ctx.show_overlay(Some(Overlay::TitleMenu));
        info!(scene = %self.name, "title_loaded");
    }

    fn update(
        &mut self,
        clock: &mut SimClock,
        input: &InputSnapshot,
        ctx: &mut GameContext,
        _world: &mut SceneWorld,
    ) -> SceneCommand {
        ctx.sync_clock_once(clock);
        let mut host = EngineHost::new(clock);
        for event in title_events(input) {
            ctx.session_mut().handle_event(event, &self.name, &mut host);
        }
        host.into_command()
    }

    fn unload(&mut self, ctx: &mut GameContext, _world: &mut SceneWorld) {
        ctx.report_diagnostics(&self.name);
        info!(scene = %self.name, "title_unloaded");
    }

    fn screen_tint(&self, ctx: &GameContext) -> Option<[u8; 4]> {
        ctx.overlay_tint()
    }

    fn debug_title(&self, ctx: &GameContext, _world: &SceneWorld) -> Option<String> {
        Some(format!(
            "{} | Enter: start {} | Q: quit",
            self.name,
            ctx.session().config().target_scene
        ))
    }
}

fn title_events(input: &InputSnapshot) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    if input.pause_pressed() {
        events.push(SessionEvent::PauseToggleRequested);
    }
    if input.confirm_pressed() {
        events.push(SessionEvent::StartRequested);
    }
    if input.quit_pressed() {
        events.push(SessionEvent::QuitRequested);
    }
    events
}
